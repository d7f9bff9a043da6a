//! Azure Functions 适配器

use crate::function_container::FunctionContainer;
use pip_services_commons::{trace_id_of, ApplicationError, Context, InvocationError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::ops::Deref;
use tracing::debug;

/// HTTP 触发的函数请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AzureRequest {
    #[serde(default)]
    pub body: Value,
    #[serde(default)]
    pub query: HashMap<String, String>,
}

impl AzureRequest {
    pub fn new(body: Value) -> Self {
        Self {
            body,
            query: HashMap::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// 命令名，先看请求体再看查询参数
    pub fn cmd(&self) -> Option<&str> {
        self.body
            .get("cmd")
            .and_then(Value::as_str)
            .or_else(|| self.query.get("cmd").map(String::as_str))
            .filter(|cmd| !cmd.is_empty())
    }

    /// 调用上下文，请求体中没有 trace_id 时取查询参数
    fn context(&self) -> Context {
        let context = Context::from_value(&self.body);
        if context.trace_id().is_some() {
            return context;
        }
        match self.query.get("trace_id") {
            Some(trace_id) => context.with("trace_id", trace_id.as_str()),
            None => context,
        }
    }

    /// 查询参数与请求体合并后的动作参数，请求体优先
    fn args(&self) -> Value {
        let mut args: Map<String, Value> = self
            .query
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        match &self.body {
            Value::Object(body) => {
                args.extend(body.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            Value::Null => {}
            other => {
                args.insert("body".to_string(), other.clone());
            }
        }
        Value::Object(args)
    }
}

/// 函数响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AzureResponse {
    pub status: u16,
    pub body: Value,
}

impl AzureResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// 把错误转换为响应，错误体为 `{ code, message }`
    pub fn from_error(error: &ApplicationError) -> Self {
        let (status, code) = match error {
            ApplicationError::Invocation { source } => {
                let status = match source {
                    InvocationError::BadRequest { .. } => 400,
                    InvocationError::NotFound { .. } => 404,
                    InvocationError::Conflict { .. } => 409,
                };
                (status, source.code().to_string())
            }
            _ => (500, "INTERNAL".to_string()),
        };
        Self {
            status,
            body: json!({ "code": code, "message": error.to_string() }),
        }
    }
}

/// Azure Functions 函数
pub struct AzureFunction {
    function: FunctionContainer,
}

impl AzureFunction {
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            function: FunctionContainer::new(name, description),
        }
    }

    /// 处理一个 HTTP 请求，错误也以响应返回
    pub async fn handle(&self, request: AzureRequest) -> AzureResponse {
        let context = request.context();
        let cmd = request.cmd();
        debug!("收到 Azure 请求: cmd={:?}, trace_id={}", cmd, trace_id_of(Some(&context)));

        match self.function.execute(Some(&context), cmd, request.args()).await {
            Ok(result) => AzureResponse::ok(result),
            Err(e) => AzureResponse::from_error(&e),
        }
    }
}

impl Deref for AzureFunction {
    type Target = FunctionContainer;

    fn deref(&self) -> &Self::Target {
        &self.function
    }
}

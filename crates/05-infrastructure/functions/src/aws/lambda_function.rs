//! AWS Lambda 函数适配器

use crate::function_container::FunctionContainer;
use pip_services_commons::{trace_id_of, ApplicationResult, Context};
use serde_json::Value;
use std::ops::Deref;
use tracing::debug;

/// AWS Lambda 函数
///
/// 事件是一个 JSON 对象，`cmd` 字段选择动作，`trace_id` 字段作为调用上下文，
/// 整个事件作为动作参数。动作结果原样作为响应返回。
pub struct LambdaFunction {
    function: FunctionContainer,
}

impl LambdaFunction {
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            function: FunctionContainer::new(name, description),
        }
    }

    /// 处理一个 Lambda 事件
    pub async fn handle(&self, event: Value) -> ApplicationResult<Value> {
        let context = Context::from_value(&event);
        let cmd = event.get("cmd").and_then(Value::as_str).map(str::to_string);
        debug!("收到 Lambda 事件: cmd={:?}, trace_id={}", cmd, trace_id_of(Some(&context)));

        self.function
            .execute(Some(&context), cmd.as_deref(), event)
            .await
    }
}

impl Deref for LambdaFunction {
    type Target = FunctionContainer;

    fn deref(&self) -> &Self::Target {
        &self.function
    }
}

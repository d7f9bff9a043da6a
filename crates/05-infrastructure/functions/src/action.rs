//! 函数动作登记

use crate::schema::ObjectSchema;
use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::RwLock;
use pip_services_commons::{ApplicationResult, ConfigError, ConfigResult, Context, References};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// 动作处理函数
pub type ActionHandler =
    Arc<dyn Fn(Option<Context>, Value) -> BoxFuture<'static, ApplicationResult<Value>> + Send + Sync>;

/// 一个可调用的动作
#[derive(Clone)]
pub struct FunctionAction {
    cmd: String,
    schema: Option<ObjectSchema>,
    handler: ActionHandler,
}

impl FunctionAction {
    pub fn new<F, Fut>(cmd: impl Into<String>, schema: Option<ObjectSchema>, handler: F) -> Self
    where
        F: Fn(Option<Context>, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApplicationResult<Value>> + Send + 'static,
    {
        let handler: ActionHandler = Arc::new(move |context, args| handler(context, args).boxed());
        Self {
            cmd: cmd.into(),
            schema,
            handler,
        }
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    pub fn schema(&self) -> Option<&ObjectSchema> {
        self.schema.as_ref()
    }

    pub async fn invoke(&self, context: Option<Context>, args: Value) -> ApplicationResult<Value> {
        (self.handler)(context, args).await
    }
}

impl std::fmt::Debug for FunctionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionAction")
            .field("cmd", &self.cmd)
            .field("schema", &self.schema)
            .finish()
    }
}

/// 动作登记表，命令名不能重复
#[derive(Default)]
pub struct ActionRegistry {
    actions: RwLock<Vec<FunctionAction>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记动作
    pub fn add(&self, action: FunctionAction) -> ConfigResult<()> {
        let mut actions = self.actions.write();
        if actions.iter().any(|a| a.cmd == action.cmd) {
            return Err(ConfigError::invalid(
                "DUPLICATED_ACTION",
                format!("动作 {} 已经登记", action.cmd),
            ));
        }
        debug!("登记动作: {}", action.cmd);
        actions.push(action);
        Ok(())
    }

    /// 用处理函数登记动作
    pub fn register<F, Fut>(
        &self,
        cmd: impl Into<String>,
        schema: Option<ObjectSchema>,
        handler: F,
    ) -> ConfigResult<()>
    where
        F: Fn(Option<Context>, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApplicationResult<Value>> + Send + 'static,
    {
        self.add(FunctionAction::new(cmd, schema, handler))
    }

    pub fn get(&self, cmd: &str) -> Option<FunctionAction> {
        self.actions.read().iter().find(|a| a.cmd == cmd).cloned()
    }

    /// 已登记的命令名，按登记顺序
    pub fn cmds(&self) -> Vec<String> {
        self.actions.read().iter().map(|a| a.cmd.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.actions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.read().is_empty()
    }

    pub fn clear(&self) {
        self.actions.write().clear();
    }
}

/// 在容器打开时登记动作
///
/// 每次打开都会先清空登记表再调用，实现可以从引用集合中取得依赖
#[async_trait]
pub trait FunctionRegistrar: Send + Sync {
    async fn register(
        &self,
        registry: &ActionRegistry,
        references: Arc<dyn References>,
    ) -> ApplicationResult<()>;
}

//! 函数容器

use crate::action::{ActionRegistry, FunctionAction, FunctionRegistrar};
use async_trait::async_trait;
use parking_lot::RwLock;
use pip_services_commons::{
    ApplicationResult, Context, Counters, DependencyResolver, InvocationError, LifecycleError,
    References,
};
use pip_services_components::{CompositeCounters, CompositeTracer};
use pip_services_container::{Container, ContainerHooks};
use serde_json::Value;
use std::ops::Deref;
use std::sync::Arc;

/// 容器打开时收集的函数运行状态
#[derive(Default)]
struct FunctionState {
    counters: RwLock<Arc<CompositeCounters>>,
    tracer: RwLock<Arc<CompositeTracer>>,
    dependency_resolver: DependencyResolver,
    registry: ActionRegistry,
    registrars: RwLock<Vec<Arc<dyn FunctionRegistrar>>>,
}

#[async_trait]
impl ContainerHooks for FunctionState {
    async fn set_references(&self, references: Arc<dyn References>) -> ApplicationResult<()> {
        let counters = CompositeCounters::from_references(&references).await;
        *self.counters.write() = Arc::new(counters);
        let tracer = CompositeTracer::from_references(&references).await;
        *self.tracer.write() = Arc::new(tracer);
        self.dependency_resolver.set_references(references.clone());

        self.registry.clear();
        let registrars = self.registrars.read().clone();
        for registrar in registrars {
            registrar.register(&self.registry, references.clone()).await?;
        }
        Ok(())
    }

    async fn unset_references(&self) -> ApplicationResult<()> {
        self.dependency_resolver.unset_references();
        self.registry.clear();
        Ok(())
    }
}

/// 函数容器
///
/// 打开时收集计数器与跟踪器、调用动作登记器，之后按命令名分发调用。
/// 每次调用记录 `<名称>.<命令>.exec_count` 与 `<名称>.<命令>.exec_time` 计数器。
pub struct FunctionContainer {
    container: Container,
    state: Arc<FunctionState>,
}

impl FunctionContainer {
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        let container = Container::new(name, description);
        let state = Arc::new(FunctionState::default());
        container.set_hooks(state.clone());
        Self { container, state }
    }

    /// 添加动作登记器，在下一次打开时生效
    pub fn add_registrar(&self, registrar: Arc<dyn FunctionRegistrar>) {
        self.state.registrars.write().push(registrar);
    }

    /// 已打开容器中的动作登记表
    pub fn actions(&self) -> &ActionRegistry {
        &self.state.registry
    }

    /// 命名依赖，引用集合在打开时设置
    pub fn dependency_resolver(&self) -> &DependencyResolver {
        &self.state.dependency_resolver
    }

    /// 按命令名执行动作
    pub async fn execute(
        &self,
        context: Option<&Context>,
        cmd: Option<&str>,
        args: Value,
    ) -> ApplicationResult<Value> {
        let name = self.container.info().name();
        if !self.container.is_open() {
            return Err(LifecycleError::NotOpened { component: name }.into());
        }

        let cmd = cmd
            .filter(|cmd| !cmd.is_empty())
            .ok_or_else(|| InvocationError::bad_request("NO_COMMAND", "请求中缺少 cmd"))?;
        let action = self.state.registry.get(cmd).ok_or_else(|| {
            InvocationError::bad_request("NO_ACTION", format!("未登记的动作: {}", cmd))
        })?;

        if let Some(schema) = action.schema() {
            schema.validate_and_return_error(&args)?;
        }

        self.instrumented(context, &name, &action, args).await
    }

    async fn instrumented(
        &self,
        context: Option<&Context>,
        name: &str,
        action: &FunctionAction,
        args: Value,
    ) -> ApplicationResult<Value> {
        let cmd = action.cmd();
        let logger = self.container.logger();
        let counters = self.state.counters.read().clone();
        let tracer = self.state.tracer.read().clone();

        logger.trace(context, &format!("正在执行 {}.{}", name, cmd));
        counters.increment_one(&format!("{}.{}.exec_count", name, cmd));
        let timing = counters.begin_timing(format!("{}.{}.exec_time", name, cmd));
        let trace = tracer.begin_trace(context, name, cmd);

        let result = action.invoke(context.cloned(), args).await;
        timing.end_timing();

        match &result {
            Ok(_) => trace.end_trace(),
            Err(e) => {
                trace.end_failure(e);
                logger.error(context, Some(e), &format!("执行 {}.{} 失败", name, cmd));
            }
        }
        result
    }
}

impl Deref for FunctionContainer {
    type Target = Container;

    fn deref(&self) -> &Self::Target {
        &self.container
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ObjectSchema, PropertyType};
    use pip_services_commons::{ApplicationError, Descriptor, ReferencesExt};
    use pip_services_components::LogCounters;
    use serde_json::json;

    struct GreetingRegistrar;

    #[async_trait]
    impl FunctionRegistrar for GreetingRegistrar {
        async fn register(
            &self,
            registry: &ActionRegistry,
            _references: Arc<dyn References>,
        ) -> ApplicationResult<()> {
            let schema = ObjectSchema::new().with_required_property("name", PropertyType::String);
            registry.register("greet", Some(schema), |_context, args| async move {
                let name = args["name"].as_str().unwrap_or_default().to_string();
                Ok(json!({ "greeting": format!("你好, {}", name) }))
            })?;
            registry.register("fail", None, |_context, _args| async move {
                Err(InvocationError::Conflict {
                    code: "BUSY".to_string(),
                    message: "忙".to_string(),
                }
                .into())
            })?;
            Ok(())
        }
    }

    fn function() -> FunctionContainer {
        let function = FunctionContainer::new("greeter", None);
        function.add_registrar(Arc::new(GreetingRegistrar));
        function
            .configure(&pip_services_commons::ConfigParams::from_string(
                "counters.descriptor=pip-services:counters:log:default:1.0",
            ))
            .unwrap();
        function
    }

    #[tokio::test]
    async fn test_execute_before_open() {
        let function = function();
        let err = function
            .execute(None, Some("greet"), json!({ "name": "a" }))
            .await
            .unwrap_err();
        assert!(err.is_lifecycle());
    }

    #[tokio::test]
    async fn test_execute_registered_action() {
        let function = function();
        function.open(None).await.unwrap();

        let result = function
            .execute(None, Some("greet"), json!({ "cmd": "greet", "name": "世界" }))
            .await
            .unwrap();
        assert_eq!(result["greeting"], "你好, 世界");

        let counters = function
            .references()
            .unwrap()
            .get_one_required_as::<LogCounters>(&Descriptor::new("*", "counters", "log", "*", "*").into())
            .await
            .unwrap();
        let exec_count = counters.get("greeter.greet.exec_count").unwrap();
        assert_eq!(exec_count.count, Some(1));
        assert!(counters.get("greeter.greet.exec_time").is_some());

        function.close(None).await.unwrap();
        assert!(function.actions().is_empty());
    }

    #[tokio::test]
    async fn test_bad_requests() {
        let function = function();
        function.open(None).await.unwrap();

        for (cmd, code) in [(None, "NO_COMMAND"), (Some(""), "NO_COMMAND"), (Some("missing"), "NO_ACTION")] {
            let err = function.execute(None, cmd, json!({})).await.unwrap_err();
            match err {
                ApplicationError::Invocation { source } => assert_eq!(source.code(), code),
                other => panic!("意外的错误: {}", other),
            }
        }

        let err = function
            .execute(None, Some("greet"), json!({ "name": 1 }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("INVALID_DATA"));

        let err = function.execute(None, Some("fail"), json!({})).await.unwrap_err();
        assert!(err.to_string().contains("BUSY"));

        function.close(None).await.unwrap();
    }
}

//! 云函数端到端场景测试

mod common;

use async_trait::async_trait;
use common::*;
use pip_services_commons::{ApplicationResult, ConfigParams, Descriptor, References, ReferencesExt};
use pip_services_components::LogCounters;
use pip_services_functions::{
    ActionRegistry, AzureFunction, AzureRequest, FunctionRegistrar, LambdaFunction, ObjectSchema,
    PropertyType,
};
use serde_json::json;
use std::sync::Arc;

/// 把控制器的问候操作登记为 `greet` 动作
struct ControllerRegistrar;

#[async_trait]
impl FunctionRegistrar for ControllerRegistrar {
    async fn register(
        &self,
        registry: &ActionRegistry,
        references: Arc<dyn References>,
    ) -> ApplicationResult<()> {
        let controller = references
            .get_one_required_as::<DummyController>(&controller_descriptor())
            .await?;

        let schema = ObjectSchema::new().with_required_property("name", PropertyType::String);
        registry.register("greet", Some(schema), move |_context, args| {
            let controller = controller.clone();
            async move {
                let name = args["name"].as_str().unwrap_or_default();
                let greeting = controller.greet(name)?;
                Ok(json!({ "greeting": greeting }))
            }
        })?;
        Ok(())
    }
}

fn parameters() -> ConfigParams {
    ConfigParams::from_tuples([("LOG_LEVEL", "trace"), ("MESSAGE", "你好")])
}

#[tokio::test]
async fn test_lambda_function_from_config_file() -> anyhow::Result<()> {
    init_test_logger();
    let file = write_config(SAMPLE_CONFIG)?;

    let function = LambdaFunction::new("lambda", None);
    function.add_factory(sample_factory());
    function.add_registrar(Arc::new(ControllerRegistrar));
    function.read_config_from_file(None, file.path(), Some(&parameters()))?;
    function.open(None).await?;
    assert_eq!(function.actions().cmds(), vec!["greet"]);

    let response = function
        .handle(json!({ "cmd": "greet", "trace_id": "t1", "name": "小红" }))
        .await?;
    assert_eq!(response["greeting"], "你好, 小红");

    let err = function
        .handle(json!({ "cmd": "greet", "trace_id": "t2" }))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("INVALID_DATA"));

    // 计数器名用配置中上下文信息的名称
    let counters = function
        .references()
        .ok_or_else(|| anyhow::anyhow!("函数没有引用集合"))?
        .get_one_required_as::<LogCounters>(&Descriptor::new("*", "counters", "log", "*", "*").into())
        .await?;
    let exec_count = counters
        .get("sample.greet.exec_count")
        .ok_or_else(|| anyhow::anyhow!("没有执行计数"))?;
    assert_eq!(exec_count.count, Some(1));

    function.close(None).await?;
    assert!(function.actions().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_azure_function_status_codes() -> anyhow::Result<()> {
    init_test_logger();
    let file = write_config(SAMPLE_CONFIG)?;

    let function = AzureFunction::new("azure", None);
    function.add_factory(sample_factory());
    function.add_registrar(Arc::new(ControllerRegistrar));
    function.read_config_from_file(None, file.path(), Some(&parameters()))?;
    function.open(None).await?;

    let response = function
        .handle(AzureRequest::new(json!({ "cmd": "greet", "name": "a" })))
        .await;
    assert_eq!(response.status, 200);

    let response = function
        .handle(AzureRequest::default().with_query("cmd", "greet").with_query("name", "b"))
        .await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body["greeting"], "你好, b");

    // 存储最多两项
    let response = function
        .handle(AzureRequest::new(json!({ "cmd": "greet", "name": "c" })))
        .await;
    assert_eq!(response.status, 409);
    assert_eq!(response.body["code"], "TOO_MANY_ITEMS");

    let response = function
        .handle(AzureRequest::new(json!({ "cmd": "unknown" })))
        .await;
    assert_eq!(response.status, 400);
    assert_eq!(response.body["code"], "NO_ACTION");

    function.close(None).await?;

    let response = function
        .handle(AzureRequest::new(json!({ "cmd": "greet", "name": "d" })))
        .await;
    assert_eq!(response.status, 500);
    Ok(())
}

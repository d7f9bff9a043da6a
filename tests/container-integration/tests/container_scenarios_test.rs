//! 容器端到端场景测试

mod common;

use common::*;
use pip_services_commons::{
    ConfigParams, Descriptor, LogLevel, Logger, Openable, ReferencesExt, TypeDescriptor,
};
use pip_services_components::{ConsoleLogger, LogCounters};
use pip_services_container::{Container, ContainerState, ProcessContainer};
use std::time::Duration;
use tokio::sync::oneshot;

fn sample_parameters() -> ConfigParams {
    ConfigParams::from_tuples([("LOG_LEVEL", "debug"), ("MESSAGE", "早上好")])
}

/// 从配置文件组装示例服务并检查依赖连接
#[tokio::test]
async fn test_wire_sample_service_from_file() -> anyhow::Result<()> {
    init_test_logger();
    let file = write_config(SAMPLE_CONFIG)?;

    let container = Container::new("container", None);
    container.add_factory(sample_factory());
    container.read_config_from_file(None, file.path(), Some(&sample_parameters()))?;
    assert_eq!(container.state(), ContainerState::Configured);

    container.open(None).await?;
    assert_eq!(container.info().name(), "sample");

    let references = container
        .references()
        .ok_or_else(|| anyhow::anyhow!("容器没有引用集合"))?;
    let controller = references
        .get_one_required_as::<DummyController>(&controller_descriptor())
        .await?;
    let persistence = references
        .get_one_required_as::<DummyPersistence>(&persistence_descriptor())
        .await?;

    assert_eq!(controller.message(), "早上好");
    assert_eq!(persistence.max_items(), 2);
    assert!(controller.is_open());
    assert!(persistence.is_open());

    // 控制器拿到的是同一个存储实例
    let linked = controller
        .persistence()
        .ok_or_else(|| anyhow::anyhow!("控制器没有连接存储"))?;
    assert!(std::sync::Arc::ptr_eq(&linked, &persistence));
    assert_eq!(controller.greet("小明")?, "早上好, 小明");
    assert_eq!(persistence.get("小明").as_deref(), Some("早上好"));

    let logger = references
        .get_one_required_as::<ConsoleLogger>(
            &Descriptor::new("pip-services", "logger", "console", "*", "1.0").into(),
        )
        .await?;
    assert_eq!(logger.level(), LogLevel::Debug);

    container.close(None).await?;
    assert!(!controller.is_open());
    assert!(controller.persistence().is_none());
    assert_eq!(container.state(), ContainerState::Closed);
    Ok(())
}

/// 组件错误在调用方可见，容器本身不受影响
#[tokio::test]
async fn test_component_errors_do_not_close_container() -> anyhow::Result<()> {
    init_test_logger();
    let file = write_config(SAMPLE_CONFIG)?;

    let container = Container::new("container", None);
    container.add_factory(sample_factory());
    container.read_config_from_file(None, file.path(), Some(&sample_parameters()))?;
    container.open(None).await?;

    let references = container
        .references()
        .ok_or_else(|| anyhow::anyhow!("容器没有引用集合"))?;
    let controller = references
        .get_one_required_as::<DummyController>(&controller_descriptor())
        .await?;

    controller.greet("a")?;
    controller.greet("b")?;
    let err = controller.greet("c").unwrap_err();
    assert!(err.to_string().contains("TOO_MANY_ITEMS"));
    assert!(container.is_open());

    container.close(None).await?;
    Ok(())
}

/// 缺少必需依赖时打开失败，已创建的部分被清理
#[tokio::test]
async fn test_missing_dependency_fails_open() -> anyhow::Result<()> {
    init_test_logger();
    let file = write_config(
        r#"
- descriptor: "sample:controller:default:default:1.0"
  message: "hi"
  dependencies:
    persistence: "sample:persistence:mongodb:*:1.0"
"#,
    )?;

    let container = Container::new("container", None);
    container.add_factory(sample_factory());
    container.read_config_from_file(None, file.path(), None)?;

    let err = container.open(None).await.unwrap_err();
    assert!(err.is_reference());
    assert!(err.to_string().contains("mongodb"));
    assert_eq!(container.state(), ContainerState::Closed);
    assert!(container.references().is_none());
    Ok(())
}

/// 以类型名声明的组件和以描述符声明的组件可以混用
#[tokio::test]
async fn test_type_declarations() -> anyhow::Result<()> {
    init_test_logger();
    let container = Container::new("container", None);
    container.add_factory(sample_factory());
    container.register_type::<DummyPersistence>("memory_persistence");
    container.configure(&ConfigParams::from_string(
        "persistence.type=memory_persistence;persistence.max_items=7;\
         counters.descriptor=pip-services:counters:log:default:1.0",
    ))?;

    container.open(None).await?;
    let references = container
        .references()
        .ok_or_else(|| anyhow::anyhow!("容器没有引用集合"))?;

    let persistence = references
        .get_one_required_as::<DummyPersistence>(
            &TypeDescriptor::new("memory_persistence", None).into(),
        )
        .await?;
    assert_eq!(persistence.max_items(), 7);

    let counters = references
        .get_optional_as::<LogCounters>(&Descriptor::new("*", "counters", "*", "*", "*").into())
        .await;
    assert_eq!(counters.len(), 1);

    container.close(None).await?;
    Ok(())
}

/// 进程容器运行到收到停止信号为止
#[tokio::test]
async fn test_process_container_runs_until_shutdown() -> anyhow::Result<()> {
    init_test_logger();
    let file = write_config(SAMPLE_CONFIG)?;

    let process = ProcessContainer::new("sample", Some("示例进程"))
        .with_config_path(file.path().display().to_string())
        .with_parameters(sample_parameters());
    process.add_factory(sample_factory());

    let (stop, stopped) = oneshot::channel::<()>();
    let shutdown = async move {
        stopped.await.ok();
    };

    let watcher = async {
        for _ in 0..100 {
            if process.is_open() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let opened = process.is_open();
        stop.send(()).ok();
        opened
    };

    let (result, opened) = tokio::join!(process.run(shutdown), watcher);
    result?;
    assert!(opened);
    assert_eq!(process.state(), ContainerState::Closed);
    Ok(())
}

//! 进程容器

use crate::container::Container;
use pip_services_commons::{ApplicationResult, ConfigParams, Context, Logger};
use pip_services_components::ConsoleLogger;
use std::future::Future;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{error, info};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "./config/config.yml";

/// 指定配置文件路径的环境变量
pub const CONFIG_PATH_VARIABLE: &str = "CONFIG_PATH";

/// 进程容器
///
/// 以控制台日志启动，读取配置文件后打开容器，等待宿主提供的停止信号，然后关闭容器。
/// 配置文件中的占位符参数来自环境变量，显式设置的参数优先。
pub struct ProcessContainer {
    container: Container,
    config_path: Option<String>,
    parameters: ConfigParams,
}

impl ProcessContainer {
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        let container = Container::new(name, description);
        container.set_logger(Arc::new(ConsoleLogger::new()));
        Self {
            container,
            config_path: None,
            parameters: ConfigParams::new(),
        }
    }

    pub fn with_config_path(mut self, path: impl Into<String>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_parameters(mut self, parameters: ConfigParams) -> Self {
        self.parameters = parameters;
        self
    }

    /// 配置文件路径：显式设置、`CONFIG_PATH` 环境变量、默认路径，依次取第一个
    pub fn config_path(&self) -> String {
        self.config_path
            .clone()
            .or_else(|| std::env::var(CONFIG_PATH_VARIABLE).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
    }

    /// 环境变量被显式参数覆盖后的配置参数
    pub fn parameters(&self) -> ConfigParams {
        ConfigParams::from_tuples(std::env::vars()).override_with(&self.parameters)
    }

    /// 读取配置、打开容器，等待停止信号后关闭
    pub async fn run<F>(&self, shutdown: F) -> ApplicationResult<()>
    where
        F: Future<Output = ()>,
    {
        let context = Context::from_trace_id(self.container.info().name());
        let path = self.config_path();
        info!("读取配置文件: {}", path);

        self.container
            .read_config_from_file(Some(&context), &path, Some(&self.parameters()))?;
        self.container.open(Some(&context)).await?;

        shutdown.await;
        self.container
            .logger()
            .info(Some(&context), "收到停止信号，正在关闭容器");
        self.container.close(Some(&context)).await
    }
}

impl Deref for ProcessContainer {
    type Target = Container;

    fn deref(&self) -> &Self::Target {
        &self.container
    }
}

/// 等待 Ctrl+C 或 SIGTERM
///
/// 宿主可以把它传给 [`ProcessContainer::run`]，容器本身不安装任何信号处理
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(%e, "安装 Ctrl+C 处理器失败");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(%e, "安装 SIGTERM 处理器失败");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("收到 Ctrl+C 信号"),
        _ = terminate => info!("收到 SIGTERM 信号"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ContainerState;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_explicit_parameters_override_environment() {
        std::env::set_var("PROCESS_CONTAINER_TEST_LEVEL", "info");
        let process = ProcessContainer::new("test", None).with_parameters(
            ConfigParams::from_tuples([("PROCESS_CONTAINER_TEST_LEVEL", "debug")]),
        );

        assert_eq!(
            process.parameters().get("PROCESS_CONTAINER_TEST_LEVEL"),
            Some("debug")
        );
    }

    #[tokio::test]
    async fn test_run_until_shutdown() {
        let mut file = Builder::new().suffix(".yml").tempfile().unwrap();
        write!(
            file,
            "- descriptor: \"pip-services:logger:console:default:1.0\"\n\
             \x20 level: \"{{{{LEVEL}}}}\"\n"
        )
        .unwrap();

        let process = ProcessContainer::new("test", None)
            .with_config_path(file.path().display().to_string())
            .with_parameters(ConfigParams::from_tuples([("LEVEL", "debug")]));

        process.run(async {}).await.unwrap();
        assert_eq!(process.state(), ContainerState::Closed);
        assert!(!process.is_open());
    }

    #[tokio::test]
    async fn test_missing_config_file() {
        let process = ProcessContainer::new("test", None).with_config_path("./missing/config.yml");
        let err = process.run(async {}).await.unwrap_err();
        assert!(err.is_config());
    }
}

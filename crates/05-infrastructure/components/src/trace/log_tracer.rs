//! 输出到日志的跟踪器

use crate::log::CompositeLogger;
use async_trait::async_trait;
use parking_lot::RwLock;
use pip_services_commons::{
    ApplicationResult, Component, ConfigParams, Configurable, Context, LogLevel, Logger,
    Referenceable, References, Tracer,
};
use std::error::Error;
use std::sync::Arc;

/// 日志跟踪器
///
/// 把每次调用的结果与耗时写入日志。成功调用按 `options.log_level`
/// 记录（默认 `debug`），失败调用总是按 `error` 记录。
#[derive(Component)]
#[component(configurable, referenceable, tracer)]
pub struct LogTracer {
    log_level: RwLock<LogLevel>,
    logger: RwLock<Arc<dyn Logger>>,
}

impl Default for LogTracer {
    fn default() -> Self {
        Self {
            log_level: RwLock::new(LogLevel::Debug),
            logger: RwLock::new(Arc::new(CompositeLogger::new())),
        }
    }
}

impl LogTracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定的日志记录器创建
    pub fn with_logger(logger: Arc<dyn Logger>) -> Self {
        let tracer = Self::default();
        *tracer.logger.write() = logger;
        tracer
    }
}

impl Configurable for LogTracer {
    fn configure(&self, config: &ConfigParams) -> ApplicationResult<()> {
        let current = *self.log_level.read();
        let level = config
            .get("options.log_level")
            .or_else(|| config.get("log_level"));
        *self.log_level.write() = LogLevel::parse_or(level, current);
        Ok(())
    }
}

#[async_trait]
impl Referenceable for LogTracer {
    async fn set_references(&self, references: Arc<dyn References>) -> ApplicationResult<()> {
        let logger = CompositeLogger::from_references(&references).await;
        *self.logger.write() = Arc::new(logger);
        Ok(())
    }
}

impl Tracer for LogTracer {
    fn trace(&self, context: Option<&Context>, component: &str, operation: &str, duration_ms: f64) {
        let logger = self.logger.read().clone();
        let level = *self.log_level.read();
        logger.log(
            level,
            context,
            None,
            &format!("已执行 {}.{}，耗时 {:.0} 毫秒", component, operation, duration_ms),
        );
    }

    fn failure(
        &self,
        context: Option<&Context>,
        component: &str,
        operation: &str,
        error: &(dyn Error + 'static),
        duration_ms: f64,
    ) {
        let logger = self.logger.read().clone();
        logger.error(
            context,
            Some(error),
            &format!("执行 {}.{} 失败，耗时 {:.0} 毫秒", component, operation, duration_ms),
        );
    }
}

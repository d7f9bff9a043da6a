//! 组合日志记录器

use async_trait::async_trait;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use pip_services_commons::{
    ApplicationResult, Component, Context, Descriptor, LogLevel, Locator, Logger, Referenceable,
    References,
};
use std::error::Error;
use std::sync::Arc;

/// 匹配所有日志组件的描述符
pub static LOGGER_DESCRIPTOR: Lazy<Locator> =
    Lazy::new(|| Descriptor::new("*", "logger", "*", "*", "*").into());

/// 组合日志记录器
///
/// 把日志转发给引用集合中的所有日志组件，由各组件自行按级别过滤
#[derive(Component, Default)]
#[component(referenceable, logger)]
pub struct CompositeLogger {
    loggers: RwLock<Vec<Arc<dyn Component>>>,
}

impl CompositeLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用给定的日志组件创建，不具备日志能力的组件被忽略
    pub fn from_loggers(loggers: Vec<Arc<dyn Component>>) -> Self {
        let logger = Self::new();
        for component in loggers {
            logger.add(component);
        }
        logger
    }

    /// 收集引用集合中的所有日志组件
    pub async fn from_references(references: &Arc<dyn References>) -> Self {
        Self::from_loggers(references.get_optional(&LOGGER_DESCRIPTOR).await)
    }

    pub fn add(&self, component: Arc<dyn Component>) {
        if component.as_logger().is_some() {
            self.loggers.write().push(component);
        }
    }

    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }
}

#[async_trait]
impl Referenceable for CompositeLogger {
    async fn set_references(&self, references: Arc<dyn References>) -> ApplicationResult<()> {
        let found = references.get_optional(&LOGGER_DESCRIPTOR).await;
        let mut loggers = self.loggers.write();
        for component in found {
            if component.as_logger().is_some() && !loggers.iter().any(|l| Arc::ptr_eq(l, &component)) {
                loggers.push(component);
            }
        }
        Ok(())
    }
}

impl Logger for CompositeLogger {
    fn level(&self) -> LogLevel {
        LogLevel::Trace
    }

    fn set_level(&self, _level: LogLevel) {}

    fn log(
        &self,
        level: LogLevel,
        context: Option<&Context>,
        error: Option<&(dyn Error + 'static)>,
        message: &str,
    ) {
        let loggers = self.loggers.read().clone();
        for component in &loggers {
            if let Some(logger) = component.as_logger() {
                logger.log(level, context, error, message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::{ConsoleLogger, NullLogger};
    use pip_services_commons::ReferenceSet;

    #[derive(Component, Default)]
    #[component(logger)]
    struct MemoryLogger {
        messages: RwLock<Vec<(LogLevel, String)>>,
    }

    impl Logger for MemoryLogger {
        fn level(&self) -> LogLevel {
            LogLevel::Info
        }

        fn set_level(&self, _level: LogLevel) {}

        fn log(
            &self,
            level: LogLevel,
            _context: Option<&Context>,
            _error: Option<&(dyn Error + 'static)>,
            message: &str,
        ) {
            if level <= self.level() {
                self.messages.write().push((level, message.to_string()));
            }
        }
    }

    #[tokio::test]
    async fn test_collects_loggers_from_references() {
        let memory = Arc::new(MemoryLogger::default());
        let references: Arc<dyn References> = Arc::new(ReferenceSet::new());
        references
            .put(
                Descriptor::new("test", "logger", "memory", "default", "1.0").into(),
                memory.clone(),
            )
            .await
            .unwrap();
        references
            .put(
                Descriptor::new("pip-services", "logger", "null", "default", "1.0").into(),
                Arc::new(NullLogger::new()),
            )
            .await
            .unwrap();
        references
            .put("not-a-logger".into(), Arc::new(crate::info::ContextInfo::default()))
            .await
            .unwrap();

        let logger = CompositeLogger::from_references(&references).await;
        assert_eq!(logger.len(), 2);

        logger.info(None, "hello");
        logger.debug(None, "hidden");
        logger.error(None, None, "failed");

        let messages = memory.messages.read().clone();
        assert_eq!(
            messages,
            vec![
                (LogLevel::Info, "hello".to_string()),
                (LogLevel::Error, "failed".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_set_references_skips_duplicates() {
        let console: Arc<dyn Component> = Arc::new(ConsoleLogger::new());
        let references: Arc<dyn References> = Arc::new(ReferenceSet::new());
        references
            .put(
                Descriptor::new("pip-services", "logger", "console", "default", "1.0").into(),
                console.clone(),
            )
            .await
            .unwrap();

        let logger = CompositeLogger::from_loggers(vec![console]);
        logger.set_references(references).await.unwrap();
        assert_eq!(logger.len(), 1);
    }
}

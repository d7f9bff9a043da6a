//! 控制台日志记录器

use parking_lot::RwLock;
use pip_services_commons::{
    trace_id_of, ApplicationResult, Component, ConfigParams, Configurable, Context, LogLevel,
    Logger,
};
use std::error::Error;
use tracing::{debug, error, info, trace, warn};

/// 控制台日志记录器
///
/// 通过 `tracing` 输出日志，实际的格式与输出目标由宿主程序安装的订阅者决定。
///
/// 配置参数：
/// - `level`：最大日志级别，默认 `info`
/// - `source`：日志来源名称
#[derive(Component)]
#[component(configurable, logger)]
pub struct ConsoleLogger {
    level: RwLock<LogLevel>,
    source: RwLock<Option<String>>,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::with_level(LogLevel::Info)
    }
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(level: LogLevel) -> Self {
        Self {
            level: RwLock::new(level),
            source: RwLock::new(None),
        }
    }

    pub fn source(&self) -> Option<String> {
        self.source.read().clone()
    }
}

impl Configurable for ConsoleLogger {
    fn configure(&self, config: &ConfigParams) -> ApplicationResult<()> {
        let current = *self.level.read();
        *self.level.write() = LogLevel::parse_or(config.get("level"), current);
        if let Some(source) = config.get("source") {
            *self.source.write() = Some(source.to_string());
        }
        Ok(())
    }
}

impl Logger for ConsoleLogger {
    fn level(&self) -> LogLevel {
        *self.level.read()
    }

    fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    fn log(
        &self,
        level: LogLevel,
        context: Option<&Context>,
        err: Option<&(dyn Error + 'static)>,
        message: &str,
    ) {
        if level == LogLevel::None || level > self.level() {
            return;
        }

        let trace_id = trace_id_of(context);
        let source = self.source.read().clone().unwrap_or_default();
        let cause = err.map(ToString::to_string).unwrap_or_default();

        match level {
            LogLevel::Fatal => {
                error!(fatal = true, trace_id = %trace_id, source = %source, error = %cause, "{}", message)
            }
            LogLevel::Error => error!(trace_id = %trace_id, source = %source, error = %cause, "{}", message),
            LogLevel::Warn => warn!(trace_id = %trace_id, source = %source, "{}", message),
            LogLevel::Info => info!(trace_id = %trace_id, source = %source, "{}", message),
            LogLevel::Debug => debug!(trace_id = %trace_id, source = %source, "{}", message),
            LogLevel::Trace => trace!(trace_id = %trace_id, source = %source, "{}", message),
            LogLevel::None => {}
        }
    }
}

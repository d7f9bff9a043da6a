use pip_services_commons::{Component, Context, LogLevel, Logger};
use std::error::Error;

/// 空日志记录器，丢弃所有日志
#[derive(Component, Default)]
#[component(logger)]
pub struct NullLogger;

impl NullLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NullLogger {
    fn level(&self) -> LogLevel {
        LogLevel::None
    }

    fn set_level(&self, _level: LogLevel) {}

    fn log(
        &self,
        _level: LogLevel,
        _context: Option<&Context>,
        _error: Option<&(dyn Error + 'static)>,
        _message: &str,
    ) {
    }
}

//! 日志组件

mod composite_logger;
mod console_logger;
mod null_logger;

pub use composite_logger::{CompositeLogger, LOGGER_DESCRIPTOR};
pub use console_logger::ConsoleLogger;
pub use null_logger::NullLogger;

//! 日志契约

use crate::context::Context;
use crate::errors::ConfigError;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// 日志级别，数值越大越详细
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    None = 0,
    Fatal = 1,
    Error = 2,
    Warn = 3,
    #[default]
    Info = 4,
    Debug = 5,
    Trace = 6,
}

impl LogLevel {
    /// 解析日志级别，无法识别时返回默认值
    pub fn parse_or(value: Option<&str>, default: LogLevel) -> LogLevel {
        value.and_then(|v| v.parse().ok()).unwrap_or(default)
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "0" | "NOTHING" | "NONE" => Ok(Self::None),
            "1" | "FATAL" => Ok(Self::Fatal),
            "2" | "ERROR" => Ok(Self::Error),
            "3" | "WARN" | "WARNING" => Ok(Self::Warn),
            "4" | "INFO" => Ok(Self::Info),
            "5" | "DEBUG" => Ok(Self::Debug),
            "6" | "TRACE" => Ok(Self::Trace),
            _ => Err(ConfigError::invalid(
                "BAD_LOG_LEVEL",
                format!("无法识别的日志级别: {}", value),
            )),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::Fatal => "FATAL",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        };
        f.write_str(name)
    }
}

/// 日志记录器
pub trait Logger: Send + Sync {
    /// 当前最大日志级别
    fn level(&self) -> LogLevel;

    fn set_level(&self, level: LogLevel);

    /// 记录一条日志
    fn log(
        &self,
        level: LogLevel,
        context: Option<&Context>,
        error: Option<&(dyn Error + 'static)>,
        message: &str,
    );

    fn fatal(&self, context: Option<&Context>, error: Option<&(dyn Error + 'static)>, message: &str) {
        self.log(LogLevel::Fatal, context, error, message);
    }

    fn error(&self, context: Option<&Context>, error: Option<&(dyn Error + 'static)>, message: &str) {
        self.log(LogLevel::Error, context, error, message);
    }

    fn warn(&self, context: Option<&Context>, message: &str) {
        self.log(LogLevel::Warn, context, None, message);
    }

    fn info(&self, context: Option<&Context>, message: &str) {
        self.log(LogLevel::Info, context, None, message);
    }

    fn debug(&self, context: Option<&Context>, message: &str) {
        self.log(LogLevel::Debug, context, None, message);
    }

    fn trace(&self, context: Option<&Context>, message: &str) {
        self.log(LogLevel::Trace, context, None, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_levels() {
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("5".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::parse_or(Some("loud"), LogLevel::Error), LogLevel::Error);
        assert!(LogLevel::Debug > LogLevel::Info);
    }
}

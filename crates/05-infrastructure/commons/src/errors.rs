//! 错误类型定义

use crate::refer::Locator;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置无效 [{code}]: {message}")]
    InvalidConfig { code: String, message: String },

    #[error("描述符格式错误: {value}")]
    BadDescriptor { value: String },

    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置键不存在: {key}")]
    KeyNotFound { key: String },
}

impl ConfigError {
    /// 创建配置无效错误
    pub fn invalid(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            code: code.into(),
            message: message.into(),
        }
    }

    /// 错误码，仅 `InvalidConfig` 携带
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::InvalidConfig { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// 引用错误类型
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("找不到引用: {locator}")]
    NotFound { locator: Locator },

    #[error("引用 {locator} 的类型不是 {expected}")]
    UnexpectedType {
        locator: Locator,
        expected: &'static str,
    },

    #[error("注册组件失败: {locator}, 原因: {source}")]
    RegistrationFailed {
        locator: Locator,
        source: Box<ApplicationError>,
    },

    #[error("引用集合已被释放")]
    Released,
}

impl ReferenceError {
    /// 创建引用不存在错误
    pub fn not_found(locator: impl Into<Locator>) -> Self {
        Self::NotFound {
            locator: locator.into(),
        }
    }

    /// 出错的定位器
    pub fn locator(&self) -> Option<&Locator> {
        match self {
            Self::NotFound { locator }
            | Self::UnexpectedType { locator, .. }
            | Self::RegistrationFailed { locator, .. } => Some(locator),
            Self::Released => None,
        }
    }
}

/// 生命周期错误类型
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("{component} 已经打开")]
    AlreadyOpened { component: String },

    #[error("{component} 尚未打开")]
    NotOpened { component: String },
}

/// 组件创建错误类型
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("没有工厂能够创建组件: {locator}")]
    CannotCreate { locator: Locator },

    #[error("未注册的组件类型: {type_name}")]
    UnknownType { type_name: String },

    #[error("组件创建失败: {locator}, 原因: {message}")]
    CreationFailed { locator: Locator, message: String },
}

/// 调用错误类型
///
/// 云函数动作分发时返回给调用方的错误
#[derive(Error, Debug)]
pub enum InvocationError {
    #[error("请求无效 [{code}]: {message}")]
    BadRequest { code: String, message: String },

    #[error("资源不存在 [{code}]: {message}")]
    NotFound { code: String, message: String },

    #[error("请求冲突 [{code}]: {message}")]
    Conflict { code: String, message: String },
}

impl InvocationError {
    /// 创建请求无效错误
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    /// 错误码
    pub fn code(&self) -> &str {
        match self {
            Self::BadRequest { code, .. } | Self::NotFound { code, .. } | Self::Conflict { code, .. } => {
                code
            }
        }
    }
}

/// 应用错误类型
///
/// 所有组件契约统一返回的错误
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("配置错误: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("引用错误: {source}")]
    Reference {
        #[from]
        source: ReferenceError,
    },

    #[error("生命周期错误: {source}")]
    Lifecycle {
        #[from]
        source: LifecycleError,
    },

    #[error("组件错误: {source}")]
    Component {
        #[from]
        source: ComponentError,
    },

    #[error("调用错误: {source}")]
    Invocation {
        #[from]
        source: InvocationError,
    },

    #[error("{message}: {source}")]
    External {
        message: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{message}")]
    Aggregate {
        message: String,
        errors: Vec<ApplicationError>,
    },
}

impl ApplicationError {
    /// 包装外部错误
    pub fn external(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::External {
            message: message.into(),
            source: source.into(),
        }
    }

    /// 汇总多个错误
    ///
    /// 没有错误时返回 `Ok(())`，只有一个错误时原样返回
    pub fn aggregate(mut errors: Vec<ApplicationError>) -> ApplicationResult<()> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            count => {
                let details = errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                Err(Self::Aggregate {
                    message: format!("{} 个操作失败: {}", count, details),
                    errors,
                })
            }
        }
    }

    /// 是否为引用错误
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference { .. })
    }

    /// 是否为配置错误
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// 是否为生命周期错误
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::Lifecycle { .. })
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refer::Descriptor;

    #[test]
    fn test_aggregate_empty_is_ok() {
        assert!(ApplicationError::aggregate(Vec::new()).is_ok());
    }

    #[test]
    fn test_aggregate_single_is_unwrapped() {
        let err = ApplicationError::aggregate(vec![LifecycleError::NotOpened {
            component: "a".to_string(),
        }
        .into()])
        .unwrap_err();

        assert!(err.is_lifecycle());
    }

    #[test]
    fn test_aggregate_many() {
        let err = ApplicationError::aggregate(vec![
            ConfigError::invalid("A", "first").into(),
            ConfigError::invalid("B", "second").into(),
        ])
        .unwrap_err();

        match err {
            ApplicationError::Aggregate { errors, message } => {
                assert_eq!(errors.len(), 2);
                assert!(message.contains("first"));
                assert!(message.contains("second"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_reference_error_carries_locator() {
        let descriptor = Descriptor::new("pip-services", "discovery", "*", "*", "*");
        let err = ReferenceError::not_found(descriptor.clone());

        assert_eq!(err.locator(), Some(&descriptor.into()));
        assert!(err.to_string().contains("pip-services:discovery:*:*:*"));
    }
}

//! # Pip.Services Components
//!
//! 标准组件实现：
//!
//! - `log`：控制台、空、组合日志记录器
//! - `count`：日志、空、组合计数器
//! - `trace`：日志、空、组合跟踪器
//! - `info`：上下文信息
//! - `build`：组件工厂与默认工厂
//! - `connect`：连接解析器与内存服务发现
//! - `auth`：凭据解析器与内存凭据存储

pub mod auth;
pub mod build;
pub mod connect;
pub mod count;
pub mod info;
pub mod log;
pub mod trace;

pub use auth::{CredentialResolver, MemoryCredentialStore};
pub use build::{ComponentFactory, CompositeFactory};
pub use connect::{ConnectionResolver, MemoryDiscovery};
pub use count::{CompositeCounters, LogCounters, NullCounters};
pub use info::ContextInfo;
pub use log::{CompositeLogger, ConsoleLogger, NullLogger};
pub use trace::{CompositeTracer, LogTracer, NullTracer};

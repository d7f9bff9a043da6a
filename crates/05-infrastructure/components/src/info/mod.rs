//! 上下文信息

mod context_info;

pub use context_info::{ContextInfo, ANY_CONTEXT_INFO, CONTEXT_INFO_DESCRIPTOR};

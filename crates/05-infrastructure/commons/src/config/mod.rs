//! 配置参数与可配置能力

mod config_params;

pub use config_params::ConfigParams;

use crate::errors::ApplicationResult;

/// 可配置能力
///
/// 组件在注册后收到自己的配置分区。配置通过内部可变性保存，
/// 因为组件在引用集合中以共享指针形式存在。
pub trait Configurable: Send + Sync {
    /// 应用配置
    fn configure(&self, config: &ConfigParams) -> ApplicationResult<()>;
}

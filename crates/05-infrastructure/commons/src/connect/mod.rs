//! 连接参数与服务发现

mod connection_params;

pub use connection_params::ConnectionParams;

use crate::context::Context;
use crate::errors::ApplicationResult;
use async_trait::async_trait;

/// 服务发现能力
///
/// 把发现键映射到连接参数的外部存储
#[async_trait]
pub trait Discovery: Send + Sync {
    /// 登记连接
    async fn register(
        &self,
        context: Option<&Context>,
        key: &str,
        connection: ConnectionParams,
    ) -> ApplicationResult<ConnectionParams>;

    /// 解析一个连接，找不到时返回 `None`
    async fn resolve_one(
        &self,
        context: Option<&Context>,
        key: &str,
    ) -> ApplicationResult<Option<ConnectionParams>>;

    /// 解析所有连接
    async fn resolve_all(
        &self,
        context: Option<&Context>,
        key: &str,
    ) -> ApplicationResult<Vec<ConnectionParams>>;
}

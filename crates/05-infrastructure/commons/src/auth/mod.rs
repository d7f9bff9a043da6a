//! 凭据参数与凭据存储

mod credential_params;

pub use credential_params::CredentialParams;

use crate::context::Context;
use crate::errors::ApplicationResult;
use async_trait::async_trait;

/// 凭据存储能力
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// 保存凭据，`None` 表示删除
    async fn store(
        &self,
        context: Option<&Context>,
        key: &str,
        credential: Option<CredentialParams>,
    ) -> ApplicationResult<()>;

    /// 查找凭据，找不到时返回 `None`
    async fn lookup(
        &self,
        context: Option<&Context>,
        key: &str,
    ) -> ApplicationResult<Option<CredentialParams>>;
}

//! AWS 连接解析器

use super::AwsConnectionParams;
use pip_services_commons::{ApplicationResult, ConfigParams, Context, References};
use pip_services_components::{ConnectionResolver, CredentialResolver};
use std::sync::Arc;
use tracing::debug;

/// AWS 连接解析器
///
/// 用连接解析器和凭据解析器取得参数后合并为 [`AwsConnectionParams`]，
/// 统一 ARN 与各字段后再做校验。
#[derive(Default)]
pub struct AwsConnectionResolver {
    connection_resolver: ConnectionResolver,
    credential_resolver: CredentialResolver,
}

impl AwsConnectionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure(&self, config: &ConfigParams) {
        self.connection_resolver.configure(config);
        self.credential_resolver.configure(config);
    }

    pub fn set_references(&self, references: Arc<dyn References>) {
        self.connection_resolver.set_references(references.clone());
        self.credential_resolver.set_references(references);
    }

    /// 解析并校验连接
    pub async fn resolve(&self, context: Option<&Context>) -> ApplicationResult<AwsConnectionParams> {
        let mut result = AwsConnectionParams::new();

        if let Some(connection) = self.connection_resolver.resolve(context).await? {
            result.append_connection(&connection);
        }
        if let Some(credential) = self.credential_resolver.lookup(context).await? {
            result.append_credential(&credential);
        }

        // 配置的 ARN 拆出字段，没有时由字段组合
        let arn = result.arn();
        result.set_arn(&arn);

        result.validate(context)?;
        debug!("解析到 AWS 连接: {}", result);
        Ok(result)
    }
}

//! Azure Functions 连接解析器

use super::AzureConnectionParams;
use pip_services_commons::{ApplicationResult, ConfigParams, Context, References};
use pip_services_components::{ConnectionResolver, CredentialResolver};
use std::sync::Arc;
use tracing::debug;

/// Azure Functions 连接解析器
#[derive(Default)]
pub struct AzureConnectionResolver {
    connection_resolver: ConnectionResolver,
    credential_resolver: CredentialResolver,
}

impl AzureConnectionResolver {
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
    pub async fn resolve(&self, context: Option<&Context>) -> ApplicationResult<AzureConnectionParams> {
        let mut result = AzureConnectionParams::new();

        if let Some(connection) = self.connection_resolver.resolve(context).await? {
            result.append_connection(&connection);
        }
        if let Some(credential) = self.credential_resolver.lookup(context).await? {
            result.append_credential(&credential);
        }

        // 配置的地址拆出字段，没有时由字段组合
        if let Some(uri) = result.function_uri() {
            result.set_function_uri(&uri);
        }

        result.validate(context)?;
        debug!("解析到 Azure 函数地址: {}", result);
        Ok(result)
    }
}

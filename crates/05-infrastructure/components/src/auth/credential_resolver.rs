//! 凭据解析器

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use pip_services_commons::{
    ApplicationResult, Component, ConfigParams, Context, CredentialParams, CredentialStore,
    Descriptor, Locator, ReferenceError, References,
};
use std::sync::Arc;

/// 匹配所有凭据存储组件的描述符
pub static CREDENTIAL_STORE_DESCRIPTOR: Lazy<Locator> =
    Lazy::new(|| Descriptor::new("*", "credential-store", "*", "*", "*").into());

/// 凭据解析器
///
/// 从组件配置中读取凭据。设置了 `store_key` 的凭据通过引用集合中的凭据存储查找。
#[derive(Default)]
pub struct CredentialResolver {
    credentials: RwLock<Vec<CredentialParams>>,
    references: RwLock<Option<Arc<dyn References>>>,
}

impl CredentialResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ConfigParams) -> Self {
        let resolver = Self::new();
        resolver.configure(config);
        resolver
    }

    /// 读取 `credentials.*` 或 `credential` 分区
    pub fn configure(&self, config: &ConfigParams) {
        let credentials = CredentialParams::many_from_config(config);
        self.credentials.write().extend(credentials);
    }

    pub fn set_references(&self, references: Arc<dyn References>) {
        *self.references.write() = Some(references);
    }

    pub fn get_all(&self) -> Vec<CredentialParams> {
        self.credentials.read().clone()
    }

    pub fn add(&self, credential: CredentialParams) {
        self.credentials.write().push(credential);
    }

    async fn stores(&self) -> ApplicationResult<Vec<Arc<dyn Component>>> {
        let references = self.references.read().clone();
        let references = references
            .ok_or_else(|| ReferenceError::not_found(CREDENTIAL_STORE_DESCRIPTOR.clone()))?;

        let stores: Vec<_> = references
            .get_optional(&CREDENTIAL_STORE_DESCRIPTOR)
            .await
            .into_iter()
            .filter(|c| c.as_credential_store().is_some())
            .collect();
        if stores.is_empty() {
            return Err(ReferenceError::not_found(CREDENTIAL_STORE_DESCRIPTOR.clone()).into());
        }
        Ok(stores)
    }

    async fn lookup_in_stores(
        &self,
        context: Option<&Context>,
        credential: &CredentialParams,
    ) -> ApplicationResult<Option<CredentialParams>> {
        let Some(key) = credential.store_key() else {
            return Ok(None);
        };

        for component in self.stores().await? {
            if let Some(store) = component.as_credential_store() {
                if let Some(found) = store.lookup(context, key).await? {
                    return Ok(Some(found));
                }
            }
        }
        Ok(None)
    }

    /// 查找凭据
    ///
    /// 没有需要查找的凭据时返回第一个配置的凭据；
    /// 否则依次在凭据存储中查找，全部找不到时返回 `None`
    pub async fn lookup(&self, context: Option<&Context>) -> ApplicationResult<Option<CredentialParams>> {
        let credentials = self.get_all();
        if credentials.is_empty() {
            return Ok(None);
        }

        let lookups: Vec<&CredentialParams> =
            credentials.iter().filter(|c| c.use_credential_store()).collect();
        if lookups.is_empty() {
            return Ok(credentials.first().cloned());
        }

        for credential in lookups {
            if let Some(found) = self.lookup_in_stores(context, credential).await? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryCredentialStore;
    use pip_services_commons::ReferenceSet;

    #[tokio::test]
    async fn test_configured_credential() {
        let resolver = CredentialResolver::from_config(&ConfigParams::from_string(
            "credential.username=admin;credential.password=secret",
        ));

        let credential = resolver.lookup(None).await.unwrap().unwrap();
        assert_eq!(credential.username(), Some("admin"));
        assert_eq!(credential.password(), Some("secret"));
    }

    #[tokio::test]
    async fn test_lookup_in_store() {
        let store = MemoryCredentialStore::from_config(&ConfigParams::from_string(
            "key1.user=user1;key1.pass=pass1",
        ));
        let references: Arc<dyn References> = Arc::new(ReferenceSet::new());
        references
            .put(
                Descriptor::new("pip-services", "credential-store", "memory", "default", "1.0")
                    .into(),
                Arc::new(store),
            )
            .await
            .unwrap();

        let resolver = CredentialResolver::from_config(&ConfigParams::from_string(
            "credential.store_key=key1",
        ));
        resolver.set_references(references);

        let credential = resolver.lookup(None).await.unwrap().unwrap();
        assert_eq!(credential.username(), Some("user1"));
        assert_eq!(credential.password(), Some("pass1"));

        let other = CredentialResolver::from_config(&ConfigParams::from_string(
            "credential.store_key=missing",
        ));
        assert!(other.lookup(None).await.unwrap_err().is_reference());
    }

    #[tokio::test]
    async fn test_empty_resolver() {
        let resolver = CredentialResolver::new();
        assert!(resolver.lookup(None).await.unwrap().is_none());
    }
}

//! 内存凭据存储

use async_trait::async_trait;
use dashmap::DashMap;
use pip_services_commons::{
    ApplicationResult, Component, ConfigParams, Configurable, Context, CredentialParams,
    CredentialStore,
};

/// 内存凭据存储
///
/// 配置中的每个分区是一个凭据，分区名作为查找键，例如
/// `key1.user=user1;key1.pass=pass1`
#[derive(Component, Default)]
#[component(configurable, credential_store)]
pub struct MemoryCredentialStore {
    items: DashMap<String, CredentialParams>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ConfigParams) -> Self {
        let store = Self::new();
        store.read_credentials(config);
        store
    }

    /// 读取凭据，替换已有内容
    pub fn read_credentials(&self, config: &ConfigParams) {
        self.items.clear();
        for name in config.get_section_names() {
            let section = config.get_section(&name);
            if !section.is_empty() {
                self.items.insert(name, CredentialParams::from_config(section));
            }
        }
    }
}

impl Configurable for MemoryCredentialStore {
    fn configure(&self, config: &ConfigParams) -> ApplicationResult<()> {
        self.read_credentials(config);
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn store(
        &self,
        _context: Option<&Context>,
        key: &str,
        credential: Option<CredentialParams>,
    ) -> ApplicationResult<()> {
        match credential {
            Some(credential) => {
                self.items.insert(key.to_string(), credential);
            }
            None => {
                self.items.remove(key);
            }
        }
        Ok(())
    }

    async fn lookup(
        &self,
        _context: Option<&Context>,
        key: &str,
    ) -> ApplicationResult<Option<CredentialParams>> {
        Ok(self.items.get(key).map(|entry| entry.value().clone()))
    }
}

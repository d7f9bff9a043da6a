//! 内存服务发现

use async_trait::async_trait;
use parking_lot::RwLock;
use pip_services_commons::{
    ApplicationResult, Component, ConfigParams, Configurable, ConnectionParams, Context, Discovery,
};

/// 内存服务发现
///
/// 配置中的每个键是发现键，值是连接字符串，例如
/// `key1=host=10.1.1.100;port=8080`
#[derive(Component, Default)]
#[component(configurable, discovery)]
pub struct MemoryDiscovery {
    items: RwLock<Vec<(String, ConnectionParams)>>,
}

impl MemoryDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ConfigParams) -> Self {
        let discovery = Self::new();
        discovery.read_connections(config);
        discovery
    }

    /// 读取连接，替换已有内容
    pub fn read_connections(&self, config: &ConfigParams) {
        let items = config
            .iter()
            .map(|(key, value)| (key.to_string(), ConnectionParams::from_string(value)))
            .collect();
        *self.items.write() = items;
    }
}

impl Configurable for MemoryDiscovery {
    fn configure(&self, config: &ConfigParams) -> ApplicationResult<()> {
        self.read_connections(config);
        Ok(())
    }
}

#[async_trait]
impl Discovery for MemoryDiscovery {
    async fn register(
        &self,
        _context: Option<&Context>,
        key: &str,
        connection: ConnectionParams,
    ) -> ApplicationResult<ConnectionParams> {
        self.items.write().push((key.to_string(), connection.clone()));
        Ok(connection)
    }

    async fn resolve_one(
        &self,
        _context: Option<&Context>,
        key: &str,
    ) -> ApplicationResult<Option<ConnectionParams>> {
        Ok(self
            .items
            .read()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, connection)| connection.clone()))
    }

    async fn resolve_all(
        &self,
        _context: Option<&Context>,
        key: &str,
    ) -> ApplicationResult<Vec<ConnectionParams>> {
        Ok(self
            .items
            .read()
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, connection)| connection.clone())
            .collect())
    }
}

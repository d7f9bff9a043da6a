//! 连接解析器

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use pip_services_commons::{
    ApplicationResult, Component, ConfigParams, ConnectionParams, Context, Descriptor, Discovery,
    Locator, ReferenceError, References,
};
use std::sync::Arc;
use tracing::debug;

/// 匹配所有服务发现组件的描述符
pub static DISCOVERY_DESCRIPTOR: Lazy<Locator> =
    Lazy::new(|| Descriptor::new("*", "discovery", "*", "*", "*").into());

/// 连接解析器
///
/// 从组件配置中读取连接。设置了 `discovery_key` 的连接通过引用集合中的
/// 服务发现组件解析，解析结果覆盖在配置的连接之上。
#[derive(Default)]
pub struct ConnectionResolver {
    connections: RwLock<Vec<ConnectionParams>>,
    references: RwLock<Option<Arc<dyn References>>>,
}

impl ConnectionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ConfigParams) -> Self {
        let resolver = Self::new();
        resolver.configure(config);
        resolver
    }

    /// 读取 `connections.*` 或 `connection` 分区
    pub fn configure(&self, config: &ConfigParams) {
        let connections = ConnectionParams::many_from_config(config);
        self.connections.write().extend(connections);
    }

    pub fn set_references(&self, references: Arc<dyn References>) {
        *self.references.write() = Some(references);
    }

    pub fn get_all(&self) -> Vec<ConnectionParams> {
        self.connections.read().clone()
    }

    pub fn add(&self, connection: ConnectionParams) {
        self.connections.write().push(connection);
    }

    /// 取出引用集合中的所有服务发现组件
    ///
    /// 没有引用集合或没有发现组件时返回携带发现描述符的引用错误
    async fn discoveries(&self) -> ApplicationResult<Vec<Arc<dyn Component>>> {
        let references = self.references.read().clone();
        let references =
            references.ok_or_else(|| ReferenceError::not_found(DISCOVERY_DESCRIPTOR.clone()))?;

        let discoveries: Vec<_> = references
            .get_optional(&DISCOVERY_DESCRIPTOR)
            .await
            .into_iter()
            .filter(|c| c.as_discovery().is_some())
            .collect();
        if discoveries.is_empty() {
            return Err(ReferenceError::not_found(DISCOVERY_DESCRIPTOR.clone()).into());
        }
        Ok(discoveries)
    }

    /// 在服务发现中登记连接
    ///
    /// 不使用服务发现的连接直接加入本地列表
    pub async fn register(
        &self,
        context: Option<&Context>,
        connection: ConnectionParams,
    ) -> ApplicationResult<()> {
        if let Some(key) = connection.discovery_key() {
            for component in self.discoveries().await? {
                if let Some(discovery) = component.as_discovery() {
                    discovery.register(context, key, connection.clone()).await?;
                }
            }
        }
        self.add(connection);
        Ok(())
    }

    async fn resolve_in_discovery(
        &self,
        context: Option<&Context>,
        connection: &ConnectionParams,
    ) -> ApplicationResult<Option<ConnectionParams>> {
        let Some(key) = connection.discovery_key() else {
            return Ok(None);
        };

        for component in self.discoveries().await? {
            if let Some(discovery) = component.as_discovery() {
                if let Some(resolved) = discovery.resolve_one(context, key).await? {
                    return Ok(Some(resolved));
                }
            }
        }
        Ok(None)
    }

    /// 解析一个连接
    ///
    /// 优先返回不需要服务发现的连接，否则依次通过服务发现解析
    pub async fn resolve(&self, context: Option<&Context>) -> ApplicationResult<Option<ConnectionParams>> {
        let connections = self.get_all();

        if let Some(local) = connections.iter().find(|c| !c.use_discovery()) {
            return Ok(Some(local.clone()));
        }

        for connection in &connections {
            if let Some(resolved) = self.resolve_in_discovery(context, connection).await? {
                debug!("通过服务发现解析连接: {:?}", connection.discovery_key());
                return Ok(Some(connection.override_with(&resolved)));
            }
        }
        Ok(None)
    }

    /// 解析所有连接
    pub async fn resolve_all(&self, context: Option<&Context>) -> ApplicationResult<Vec<ConnectionParams>> {
        let mut resolved = Vec::new();
        for connection in self.get_all() {
            let Some(key) = connection.discovery_key().map(str::to_string) else {
                resolved.push(connection);
                continue;
            };
            for component in self.discoveries().await? {
                if let Some(discovery) = component.as_discovery() {
                    for found in discovery.resolve_all(context, &key).await? {
                        resolved.push(connection.override_with(&found));
                    }
                }
            }
        }
        Ok(resolved)
    }
}

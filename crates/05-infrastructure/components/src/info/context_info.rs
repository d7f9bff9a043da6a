//! 上下文信息组件

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use pip_services_commons::{
    ApplicationResult, Component, ConfigParams, Configurable, Descriptor, Locator,
};

/// 容器保留的上下文信息定位器
pub static CONTEXT_INFO_DESCRIPTOR: Lazy<Descriptor> =
    Lazy::new(|| Descriptor::new("pip-services", "context-info", "default", "default", "1.0"));

/// 查找任意上下文信息组件的定位器
pub static ANY_CONTEXT_INFO: Lazy<Locator> =
    Lazy::new(|| Descriptor::new("*", "context-info", "*", "*", "*").into());

/// 上下文信息
///
/// 描述当前进程或容器：名称、说明、上下文 ID、启动时间和附加属性。
///
/// 配置参数：
/// - `name` 或 `info.name`
/// - `description` 或 `info.description`
/// - `properties.*`
#[derive(Component)]
#[component(configurable)]
pub struct ContextInfo {
    name: RwLock<String>,
    description: RwLock<Option<String>>,
    context_id: RwLock<String>,
    start_time: DateTime<Utc>,
    properties: RwLock<ConfigParams>,
}

impl Default for ContextInfo {
    fn default() -> Self {
        Self::new("unknown", None)
    }
}

impl ContextInfo {
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            name: RwLock::new(name.into()),
            description: RwLock::new(description.map(ToString::to_string)),
            context_id: RwLock::new(uuid::Uuid::new_v4().simple().to_string()),
            start_time: Utc::now(),
            properties: RwLock::new(ConfigParams::new()),
        }
    }

    pub fn name(&self) -> String {
        self.name.read().clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        *self.name.write() = name.into();
    }

    pub fn description(&self) -> Option<String> {
        self.description.read().clone()
    }

    pub fn set_description(&self, description: Option<&str>) {
        *self.description.write() = description.map(ToString::to_string);
    }

    pub fn context_id(&self) -> String {
        self.context_id.read().clone()
    }

    pub fn set_context_id(&self, context_id: impl Into<String>) {
        *self.context_id.write() = context_id.into();
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// 自启动以来经过的毫秒数
    pub fn uptime_ms(&self) -> i64 {
        (Utc::now() - self.start_time).num_milliseconds()
    }

    pub fn properties(&self) -> ConfigParams {
        self.properties.read().clone()
    }
}

impl Configurable for ContextInfo {
    fn configure(&self, config: &ConfigParams) -> ApplicationResult<()> {
        if let Some(name) = config.get("name").or_else(|| config.get("info.name")) {
            self.set_name(name);
        }
        if let Some(description) = config
            .get("description")
            .or_else(|| config.get("info.description"))
        {
            self.set_description(Some(description));
        }
        let properties = config.get_section("properties");
        if !properties.is_empty() {
            *self.properties.write() = properties;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure() {
        let info = ContextInfo::default();
        info.configure(&ConfigParams::from_tuples([
            ("info.name", "orders"),
            ("description", "订单服务"),
            ("properties.region", "eu"),
        ]))
        .unwrap();

        assert_eq!(info.name(), "orders");
        assert_eq!(info.description(), Some("订单服务".to_string()));
        assert_eq!(info.properties().get("region"), Some("eu"));
        assert_eq!(info.context_id().len(), 32);
        assert!(info.uptime_ms() >= 0);
    }

    #[test]
    fn test_reserved_descriptor_matches_query() {
        let reserved: Locator = CONTEXT_INFO_DESCRIPTOR.clone().into();
        assert!(reserved.matches(&ANY_CONTEXT_INFO));
    }
}

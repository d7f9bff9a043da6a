//! 连接参数

use crate::config::ConfigParams;
use std::fmt;

/// 连接参数
///
/// 在配置参数之上提供常用连接字段的访问器。
/// 设置了 `discovery_key` 的连接需要通过发现服务解析。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionParams {
    params: ConfigParams,
}

impl ConnectionParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(params: ConfigParams) -> Self {
        Self { params }
    }

    pub fn from_string(value: &str) -> Self {
        Self::from_config(ConfigParams::from_string(value))
    }

    pub fn from_tuples<I, K, V>(tuples: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        Self::from_config(ConfigParams::from_tuples(tuples))
    }

    /// 从组件配置中读取所有连接
    ///
    /// 优先读取 `connections.*` 下的每个分区，没有时读取单个 `connection` 分区
    pub fn many_from_config(config: &ConfigParams) -> Vec<ConnectionParams> {
        let connections = config.get_section("connections");
        if !connections.is_empty() {
            return connections
                .get_section_names()
                .iter()
                .map(|name| Self::from_config(connections.get_section(name)))
                .filter(|connection| !connection.params.is_empty())
                .collect();
        }

        let connection = config.get_section("connection");
        if connection.is_empty() {
            Vec::new()
        } else {
            vec![Self::from_config(connection)]
        }
    }

    /// 读取第一个连接
    pub fn first_from_config(config: &ConfigParams) -> Option<ConnectionParams> {
        Self::many_from_config(config).into_iter().next()
    }

    pub fn as_config(&self) -> &ConfigParams {
        &self.params
    }

    pub fn into_config(self) -> ConfigParams {
        self.params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.put(key, value);
    }

    pub fn use_discovery(&self) -> bool {
        self.discovery_key().is_some()
    }

    pub fn discovery_key(&self) -> Option<&str> {
        self.params.get("discovery_key").filter(|k| !k.is_empty())
    }

    pub fn set_discovery_key(&mut self, value: &str) {
        self.put("discovery_key", value);
    }

    pub fn protocol(&self) -> Option<&str> {
        self.params.get("protocol")
    }

    pub fn protocol_with_default(&self, default: &str) -> String {
        self.params.get_as_string_with_default("protocol", default)
    }

    pub fn set_protocol(&mut self, value: &str) {
        self.put("protocol", value);
    }

    /// 主机名，`host` 缺失时读取 `ip`
    pub fn host(&self) -> Option<&str> {
        self.params.get("host").or_else(|| self.params.get("ip"))
    }

    pub fn set_host(&mut self, value: &str) {
        self.put("host", value);
    }

    pub fn port(&self) -> Option<i64> {
        self.params.get_as_nullable_integer("port")
    }

    pub fn port_with_default(&self, default: i64) -> i64 {
        self.port().unwrap_or(default)
    }

    pub fn set_port(&mut self, value: i64) {
        self.put("port", value.to_string());
    }

    pub fn uri(&self) -> Option<&str> {
        self.params.get("uri")
    }

    pub fn set_uri(&mut self, value: &str) {
        self.put("uri", value);
    }

    /// 用另一组连接参数覆盖当前参数
    pub fn override_with(&self, other: &ConnectionParams) -> ConnectionParams {
        Self::from_config(self.params.override_with(&other.params))
    }
}

impl From<ConfigParams> for ConnectionParams {
    fn from(params: ConfigParams) -> Self {
        Self::from_config(params)
    }
}

impl fmt::Display for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.params.fmt(f)
    }
}

//! AWS 连接参数

use pip_services_commons::{
    trace_id_of, ConfigError, ConfigParams, ConfigResult, ConnectionParams, Context,
    CredentialParams,
};
use std::fmt;

/// AWS 连接参数
///
/// 资源由 ARN 确定：`arn:<partition>:<service>:<region>:<account>:<resource_type>:<resource>`。
/// 可以直接给出 `arn`，也可以分别给出各字段再组合。
///
/// 配置参数：
/// - `partition`：默认 `aws`
/// - `service` 或 `protocol`
/// - `region`、`account`、`resource_type`、`resource`
/// - `arn`
/// - `access_id`、`access_key`：凭据
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsConnectionParams {
    params: ConfigParams,
}

impl AwsConnectionParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_params(params: ConfigParams) -> Self {
        Self { params }
    }

    pub fn from_string(value: &str) -> Self {
        Self::from_params(ConfigParams::from_string(value))
    }

    /// 合并配置中的第一个连接和第一个凭据
    pub fn from_config(config: &ConfigParams) -> Self {
        let mut result = Self::new();
        if let Some(credential) = CredentialParams::first_from_config(config) {
            result.append_credential(&credential);
        }
        if let Some(connection) = ConnectionParams::first_from_config(config) {
            result.append_connection(&connection);
        }
        result
    }

    /// 合并多组参数，后面的覆盖前面的
    pub fn merge_configs(configs: &[ConfigParams]) -> Self {
        let params = configs
            .iter()
            .fold(ConfigParams::new(), |merged, config| merged.override_with(config));
        Self::from_params(params)
    }

    pub fn append_connection(&mut self, connection: &ConnectionParams) {
        self.params = self.params.override_with(connection.as_config());
    }

    pub fn append_credential(&mut self, credential: &CredentialParams) {
        self.params = self.params.override_with(credential.as_config());
    }

    pub fn as_config(&self) -> &ConfigParams {
        &self.params
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).filter(|value| !value.is_empty())
    }

    pub fn partition(&self) -> &str {
        self.get("partition").unwrap_or("aws")
    }

    pub fn set_partition(&mut self, value: &str) {
        self.params.put("partition", value);
    }

    pub fn service(&self) -> Option<&str> {
        self.get("service").or_else(|| self.get("protocol"))
    }

    pub fn set_service(&mut self, value: &str) {
        self.params.put("service", value);
    }

    pub fn region(&self) -> Option<&str> {
        self.get("region")
    }

    pub fn set_region(&mut self, value: &str) {
        self.params.put("region", value);
    }

    pub fn account(&self) -> Option<&str> {
        self.get("account")
    }

    pub fn set_account(&mut self, value: &str) {
        self.params.put("account", value);
    }

    pub fn resource_type(&self) -> Option<&str> {
        self.get("resource_type")
    }

    pub fn set_resource_type(&mut self, value: &str) {
        self.params.put("resource_type", value);
    }

    pub fn resource(&self) -> Option<&str> {
        self.get("resource")
    }

    pub fn set_resource(&mut self, value: &str) {
        self.params.put("resource", value);
    }

    /// 配置的 ARN，没有时由各字段组合
    pub fn arn(&self) -> String {
        if let Some(arn) = self.get("arn") {
            return arn.to_string();
        }

        let resource = match (self.resource_type(), self.resource()) {
            (Some(resource_type), resource) => {
                format!("{}:{}", resource_type, resource.unwrap_or_default())
            }
            (None, resource) => resource.unwrap_or_default().to_string(),
        };
        format!(
            "arn:{}:{}:{}:{}:{}",
            self.partition(),
            self.service().unwrap_or_default(),
            self.region().unwrap_or_default(),
            self.account().unwrap_or_default(),
            resource
        )
    }

    /// 设置 ARN 并拆出各字段
    ///
    /// 资源部分可以是 `type:name`、`type/name` 或单独的 `name`
    pub fn set_arn(&mut self, arn: &str) {
        self.params.put("arn", arn);

        let mut parts = arn.splitn(6, ':');
        if parts.next() != Some("arn") {
            return;
        }
        let fields = ["partition", "service", "region", "account"];
        for field in fields {
            if let Some(value) = parts.next() {
                self.params.put(field, value);
            }
        }

        let Some(resource) = parts.next() else {
            return;
        };
        match resource.find(|c: char| c == ':' || c == '/') {
            Some(index) => {
                self.set_resource_type(&resource[..index]);
                self.set_resource(&resource[index + 1..]);
            }
            None => {
                self.params.remove("resource_type");
                self.set_resource(resource);
            }
        }
    }

    pub fn access_id(&self) -> Option<&str> {
        self.get("access_id").or_else(|| self.get("client_id"))
    }

    pub fn set_access_id(&mut self, value: &str) {
        self.params.put("access_id", value);
    }

    pub fn access_key(&self) -> Option<&str> {
        self.get("access_key").or_else(|| self.get("client_key"))
    }

    pub fn set_access_key(&mut self, value: &str) {
        self.params.put("access_key", value);
    }

    /// 检查连接与凭据是否完整
    pub fn validate(&self, context: Option<&Context>) -> ConfigResult<()> {
        let trace_id = trace_id_of(context);
        if self.arn() == "arn:aws::::" {
            return Err(ConfigError::invalid(
                "NO_AWS_CONNECTION",
                format!("[{}] 没有设置 AWS 连接", trace_id),
            ));
        }
        if self.access_id().is_none() {
            return Err(ConfigError::invalid(
                "NO_ACCESS_ID",
                format!("[{}] 没有设置 AWS access_id", trace_id),
            ));
        }
        if self.access_key().is_none() {
            return Err(ConfigError::invalid(
                "NO_ACCESS_KEY",
                format!("[{}] 没有设置 AWS access_key", trace_id),
            ));
        }
        Ok(())
    }
}

impl From<ConfigParams> for AwsConnectionParams {
    fn from(params: ConfigParams) -> Self {
        Self::from_params(params)
    }
}

impl fmt::Display for AwsConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.arn())
    }
}

//! Azure Functions 连接参数

use once_cell::sync::Lazy;
use pip_services_commons::{
    trace_id_of, ConfigError, ConfigParams, ConfigResult, ConnectionParams, Context,
    CredentialParams,
};
use regex::Regex;
use std::fmt;

static FUNCTION_URI_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<protocol>[a-z]+)://(?P<app_name>[^./]+)\.azurewebsites\.net/api/(?P<function_name>[^/?#]+)")
        .expect("函数地址正则无效")
});

/// Azure Functions 连接参数
///
/// 函数地址形如 `https://<app_name>.azurewebsites.net/api/<function_name>`。
/// 可以直接给出 `uri`（或 `function_uri`），也可以给出 `app_name` 与 `function_name` 再组合。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AzureConnectionParams {
    params: ConfigParams,
}

impl AzureConnectionParams {
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

    pub fn protocol(&self) -> &str {
        self.get("protocol").unwrap_or("https")
    }

    pub fn set_protocol(&mut self, value: &str) {
        self.params.put("protocol", value);
    }

    pub fn app_name(&self) -> Option<&str> {
        self.get("app_name")
    }

    pub fn set_app_name(&mut self, value: &str) {
        self.params.put("app_name", value);
    }

    pub fn function_name(&self) -> Option<&str> {
        self.get("function_name")
    }

    pub fn set_function_name(&mut self, value: &str) {
        self.params.put("function_name", value);
    }

    pub fn auth_code(&self) -> Option<&str> {
        self.get("auth_code")
    }

    pub fn set_auth_code(&mut self, value: &str) {
        self.params.put("auth_code", value);
    }

    /// 配置的函数地址，没有时由应用名与函数名组合
    pub fn function_uri(&self) -> Option<String> {
        if let Some(uri) = self.get("uri").or_else(|| self.get("function_uri")) {
            return Some(uri.to_string());
        }
        let app_name = self.app_name()?;
        let function_name = self.function_name()?;
        Some(format!(
            "{}://{}.azurewebsites.net/api/{}",
            self.protocol(),
            app_name,
            function_name
        ))
    }

    /// 设置函数地址并拆出协议、应用名与函数名
    pub fn set_function_uri(&mut self, uri: &str) {
        self.params.put("uri", uri);

        if let Some(captures) = FUNCTION_URI_PATTERN.captures(uri) {
            self.set_protocol(&captures["protocol"]);
            self.set_app_name(&captures["app_name"]);
            self.set_function_name(&captures["function_name"]);
        }
    }

    /// 检查地址是否完整以及协议是否为 https
    pub fn validate(&self, context: Option<&Context>) -> ConfigResult<()> {
        let trace_id = trace_id_of(context);
        let Some(uri) = self.function_uri() else {
            return Err(ConfigError::invalid(
                "NO_CONNECTION_URI",
                format!("[{}] 没有设置函数地址，也没有应用名与函数名", trace_id),
            ));
        };
        if self.protocol() != "https" || !uri.starts_with("https://") {
            return Err(ConfigError::invalid(
                "WRONG_PROTOCOL",
                format!("[{}] 函数地址必须使用 https: {}", trace_id, uri),
            ));
        }
        Ok(())
    }
}

impl From<ConfigParams> for AzureConnectionParams {
    fn from(params: ConfigParams) -> Self {
        Self::from_params(params)
    }
}

impl fmt::Display for AzureConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.function_uri().unwrap_or_default())
    }
}

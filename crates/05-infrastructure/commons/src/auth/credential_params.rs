//! 凭据参数

use crate::config::ConfigParams;
use std::fmt;

/// 凭据参数
///
/// 设置了 `store_key` 的凭据需要通过凭据存储查找
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialParams {
    params: ConfigParams,
}

impl CredentialParams {
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

    /// 从组件配置中读取所有凭据，规则与连接相同：先 `credentials.*`，再 `credential`
    pub fn many_from_config(config: &ConfigParams) -> Vec<CredentialParams> {
        let credentials = config.get_section("credentials");
        if !credentials.is_empty() {
            return credentials
                .get_section_names()
                .iter()
                .map(|name| Self::from_config(credentials.get_section(name)))
                .filter(|credential| !credential.params.is_empty())
                .collect();
        }

        let credential = config.get_section("credential");
        if credential.is_empty() {
            Vec::new()
        } else {
            vec![Self::from_config(credential)]
        }
    }

    pub fn first_from_config(config: &ConfigParams) -> Option<CredentialParams> {
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

    pub fn use_credential_store(&self) -> bool {
        self.store_key().is_some()
    }

    pub fn store_key(&self) -> Option<&str> {
        self.params.get("store_key").filter(|k| !k.is_empty())
    }

    pub fn set_store_key(&mut self, value: &str) {
        self.put("store_key", value);
    }

    /// 用户名，`username` 缺失时读取 `user`
    pub fn username(&self) -> Option<&str> {
        self.params.get("username").or_else(|| self.params.get("user"))
    }

    pub fn set_username(&mut self, value: &str) {
        self.put("username", value);
    }

    /// 密码，`password` 缺失时读取 `pass`
    pub fn password(&self) -> Option<&str> {
        self.params.get("password").or_else(|| self.params.get("pass"))
    }

    pub fn set_password(&mut self, value: &str) {
        self.put("password", value);
    }

    /// 访问 ID，`access_id` 缺失时读取 `client_id`
    pub fn access_id(&self) -> Option<&str> {
        self.params
            .get("access_id")
            .or_else(|| self.params.get("client_id"))
    }

    pub fn set_access_id(&mut self, value: &str) {
        self.put("access_id", value);
    }

    /// 访问密钥，依次读取 `access_key`、`client_key`、`secret_key`
    pub fn access_key(&self) -> Option<&str> {
        self.params
            .get("access_key")
            .or_else(|| self.params.get("client_key"))
            .or_else(|| self.params.get("secret_key"))
    }

    pub fn set_access_key(&mut self, value: &str) {
        self.put("access_key", value);
    }

    pub fn override_with(&self, other: &CredentialParams) -> CredentialParams {
        Self::from_config(self.params.override_with(&other.params))
    }
}

impl From<ConfigParams> for CredentialParams {
    fn from(params: ConfigParams) -> Self {
        Self::from_config(params)
    }
}

impl fmt::Display for CredentialParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.params.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_keys() {
        let credential = CredentialParams::from_string("user=u1;pass=p1;client_id=id;secret_key=sk");

        assert_eq!(credential.username(), Some("u1"));
        assert_eq!(credential.password(), Some("p1"));
        assert_eq!(credential.access_id(), Some("id"));
        assert_eq!(credential.access_key(), Some("sk"));
        assert!(!credential.use_credential_store());
    }

    #[test]
    fn test_many_from_config() {
        let config = ConfigParams::from_string("credential.store_key=k1;credential.username=u");
        let credentials = CredentialParams::many_from_config(&config);

        assert_eq!(credentials.len(), 1);
        assert_eq!(credentials[0].store_key(), Some("k1"));
        assert!(credentials[0].use_credential_store());
    }
}

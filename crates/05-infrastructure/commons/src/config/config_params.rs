//! 配置参数

use serde_json::Value;
use std::fmt;

/// 配置参数
///
/// 有序的扁平键值集合。键使用 `.` 分隔层级，第一段称为分区名，
/// 例如 `connection.host` 属于 `connection` 分区。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigParams {
    entries: Vec<(String, String)>,
}

impl ConfigParams {
    /// 创建空配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从键值对创建配置
    pub fn from_tuples<I, K, V>(tuples: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        let mut config = Self::new();
        for (key, value) in tuples {
            config.put(key, value.to_string());
        }
        config
    }

    /// 解析 `key1=value1;key2=value2` 格式的字符串
    ///
    /// 没有 `=` 的片段作为空值键保存，空片段被忽略
    pub fn from_string(value: &str) -> Self {
        let mut config = Self::new();
        for token in value.split(';') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match token.split_once('=') {
                Some((key, value)) => config.put(key.trim(), value.trim()),
                None => config.put(token, ""),
            }
        }
        config
    }

    /// 从 JSON 值创建配置
    ///
    /// 嵌套对象和数组被展开为带点的键，数组元素以下标作为键段，空值被跳过
    pub fn from_value(value: &Value) -> Self {
        let mut config = Self::new();
        flatten_value("", value, &mut config);
        config
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按插入顺序遍历键
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// 按插入顺序遍历键值对
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 是否包含键
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// 读取原始字符串值
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 设置值，已有的键原位替换
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// 删除键，返回原值
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn get_as_nullable_string(&self, key: &str) -> Option<String> {
        self.get(key).map(ToString::to_string)
    }

    pub fn get_as_string_with_default(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    pub fn get_as_nullable_integer(&self, key: &str) -> Option<i64> {
        let value = self.get(key)?.trim();
        value
            .parse::<i64>()
            .ok()
            .or_else(|| value.parse::<f64>().ok().map(|f| f.trunc() as i64))
    }

    pub fn get_as_integer_with_default(&self, key: &str, default: i64) -> i64 {
        self.get_as_nullable_integer(key).unwrap_or(default)
    }

    pub fn get_as_nullable_float(&self, key: &str) -> Option<f64> {
        self.get(key)?.trim().parse::<f64>().ok()
    }

    pub fn get_as_float_with_default(&self, key: &str, default: f64) -> f64 {
        self.get_as_nullable_float(key).unwrap_or(default)
    }

    /// 读取布尔值，接受 `true/false`、`1/0`、`yes/no`、`y/n`、`t/f`
    pub fn get_as_nullable_boolean(&self, key: &str) -> Option<bool> {
        match self.get(key)?.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "y" | "t" => Some(true),
            "false" | "0" | "no" | "n" | "f" => Some(false),
            _ => None,
        }
    }

    pub fn get_as_boolean_with_default(&self, key: &str, default: bool) -> bool {
        self.get_as_nullable_boolean(key).unwrap_or(default)
    }

    /// 分区名称，按首次出现的顺序
    ///
    /// 不含 `.` 的键本身也是一个分区名
    pub fn get_section_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for (key, _) in &self.entries {
            let name = match key.find('.') {
                Some(pos) if pos > 0 => &key[..pos],
                _ => key.as_str(),
            };
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    /// 提取分区，返回的键去掉了分区前缀
    pub fn get_section(&self, name: &str) -> ConfigParams {
        let prefix = format!("{}.", name);
        let entries = self
            .entries
            .iter()
            .filter_map(|(k, v)| {
                k.strip_prefix(&prefix)
                    .map(|rest| (rest.to_string(), v.clone()))
            })
            .collect();
        Self { entries }
    }

    /// 以给定前缀添加分区
    pub fn add_section(&mut self, name: &str, section: &ConfigParams) {
        for (key, value) in section.iter() {
            let key = if name.is_empty() {
                key.to_string()
            } else {
                format!("{}.{}", name, key)
            };
            self.put(key, value);
        }
    }

    /// 用另一组参数覆盖当前参数，返回新配置
    pub fn override_with(&self, other: &ConfigParams) -> ConfigParams {
        let mut result = self.clone();
        for (key, value) in other.iter() {
            result.put(key, value);
        }
        result
    }

    /// 用默认值补齐缺失的键，返回新配置
    pub fn set_defaults(&self, defaults: &ConfigParams) -> ConfigParams {
        defaults.override_with(self)
    }
}

fn flatten_value(prefix: &str, value: &Value, config: &mut ConfigParams) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        }
    };

    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, value) in map {
                flatten_value(&join(key), value, config);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                flatten_value(&join(&index.to_string()), value, config);
            }
        }
        Value::String(s) => config.put(prefix, s.clone()),
        other => config.put(prefix, other.to_string()),
    }
}

impl fmt::Display for ConfigParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.entries {
            if !first {
                f.write_str(";")?;
            }
            first = false;
            if value.is_empty() {
                f.write_str(key)?;
            } else {
                write!(f, "{}={}", key, value)?;
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, String)> for ConfigParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::from_tuples(iter)
    }
}

//! 组件描述符

use crate::errors::ConfigError;
use std::fmt;
use std::str::FromStr;

/// 组件描述符
///
/// 由 group、type、kind、name、version 五个字段组成，
/// 任一字段为 `None`（字符串形式为 `*`）时视为通配符。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Descriptor {
    group: Option<String>,
    type_: Option<String>,
    kind: Option<String>,
    name: Option<String>,
    version: Option<String>,
}

fn field(value: &str) -> Option<String> {
    let value = value.trim();
    if value == "*" {
        None
    } else {
        Some(value.to_string())
    }
}

fn match_field(a: &Option<String>, b: &Option<String>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

impl Descriptor {
    /// 创建描述符，`*` 表示通配符，空字符串按普通值比较
    pub fn new(group: &str, type_: &str, kind: &str, name: &str, version: &str) -> Self {
        Self {
            group: field(group),
            type_: field(type_),
            kind: field(kind),
            name: field(name),
            version: field(version),
        }
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn type_(&self) -> Option<&str> {
        self.type_.as_deref()
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// 通配匹配：双方任一侧为通配符的字段不参与比较
    pub fn matches(&self, other: &Descriptor) -> bool {
        match_field(&self.group, &other.group)
            && match_field(&self.type_, &other.type_)
            && match_field(&self.kind, &other.kind)
            && match_field(&self.name, &other.name)
            && match_field(&self.version, &other.version)
    }

    /// 精确匹配，通配符只与通配符相等
    pub fn exact_match(&self, other: &Descriptor) -> bool {
        self == other
    }

    /// 是否所有字段都已指定
    pub fn is_complete(&self) -> bool {
        self.group.is_some()
            && self.type_.is_some()
            && self.kind.is_some()
            && self.name.is_some()
            && self.version.is_some()
    }

    /// 用另一个描述符补齐本描述符的通配字段
    pub fn fill_from(&self, other: &Descriptor) -> Descriptor {
        Descriptor {
            group: self.group.clone().or_else(|| other.group.clone()),
            type_: self.type_.clone().or_else(|| other.type_.clone()),
            kind: self.kind.clone().or_else(|| other.kind.clone()),
            name: self.name.clone().or_else(|| other.name.clone()),
            version: self.version.clone().or_else(|| other.version.clone()),
        }
    }
}

impl FromStr for Descriptor {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = value.split(':').collect();
        if parts.len() != 5 {
            return Err(ConfigError::BadDescriptor {
                value: value.to_string(),
            });
        }
        Ok(Self::new(parts[0], parts[1], parts[2], parts[3], parts[4]))
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "*".to_string());
        write!(
            f,
            "{}:{}:{}:{}:{}",
            show(&self.group),
            show(&self.type_),
            show(&self.kind),
            show(&self.name),
            show(&self.version)
        )
    }
}

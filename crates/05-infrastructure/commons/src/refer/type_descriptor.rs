//! 类型描述符

use crate::errors::ConfigError;
use std::fmt;
use std::str::FromStr;

/// 类型描述符
///
/// 字符串形式为 `name[,library]`，用于容器配置中的 `type` 声明
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    name: String,
    library: Option<String>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, library: Option<&str>) -> Self {
        Self {
            name: name.into(),
            library: library
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(ToString::to_string),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn library(&self) -> Option<&str> {
        self.library.as_deref()
    }
}

impl FromStr for TypeDescriptor {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.splitn(2, ',');
        let name = parts.next().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(ConfigError::invalid(
                "BAD_TYPE",
                format!("类型描述符格式错误: {}", value),
            ));
        }
        Ok(Self::new(name, parts.next()))
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.library {
            Some(library) => write!(f, "{},{}", self.name, library),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let plain: TypeDescriptor = "dummy".parse().unwrap();
        assert_eq!(plain.name(), "dummy");
        assert_eq!(plain.library(), None);

        let full: TypeDescriptor = "Dummy, my-lib".parse().unwrap();
        assert_eq!(full.library(), Some("my-lib"));
        assert_eq!(full.to_string(), "Dummy,my-lib");

        assert!(" ".parse::<TypeDescriptor>().is_err());
    }
}

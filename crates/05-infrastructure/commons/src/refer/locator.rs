//! 组件定位器

use super::{Descriptor, TypeDescriptor};
use crate::component::{AsAny, Component};
use std::fmt;
use std::sync::Arc;

/// 组件定位器
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// 五段描述符，支持通配符
    Descriptor(Descriptor),
    /// 类型标识
    Type(TypeDescriptor),
    /// 任意字符串键
    Key(String),
}

impl Locator {
    /// 描述符之间按通配规则匹配，其余情况只在同一变体内按相等匹配
    pub fn matches(&self, other: &Locator) -> bool {
        match (self, other) {
            (Self::Descriptor(a), Self::Descriptor(b)) => a.matches(b),
            (Self::Type(a), Self::Type(b)) => a == b,
            (Self::Key(a), Self::Key(b)) => a == b,
            _ => false,
        }
    }

    pub fn as_descriptor(&self) -> Option<&Descriptor> {
        match self {
            Self::Descriptor(descriptor) => Some(descriptor),
            _ => None,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Descriptor(descriptor) => descriptor.fmt(f),
            Self::Type(type_descriptor) => type_descriptor.fmt(f),
            Self::Key(key) => f.write_str(key),
        }
    }
}

impl From<Descriptor> for Locator {
    fn from(descriptor: Descriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}

impl From<TypeDescriptor> for Locator {
    fn from(type_descriptor: TypeDescriptor) -> Self {
        Self::Type(type_descriptor)
    }
}

impl From<&str> for Locator {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for Locator {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

/// 引用条目：定位器与组件实例
#[derive(Clone)]
pub struct Reference {
    locator: Locator,
    component: Arc<dyn Component>,
}

impl Reference {
    pub fn new(locator: Locator, component: Arc<dyn Component>) -> Self {
        Self { locator, component }
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn component(&self) -> &Arc<dyn Component> {
        &self.component
    }

    pub fn matches(&self, locator: &Locator) -> bool {
        self.locator.matches(locator)
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reference")
            .field("locator", &self.locator)
            .field("component", &self.component.as_ref().concrete_type_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_matching() {
        let descriptor = Locator::from(Descriptor::new("g", "t", "k", "n", "1.0"));
        let wildcard = Locator::from(Descriptor::new("*", "t", "*", "*", "*"));
        let key = Locator::from("g:t:k:n:1.0");
        let type_locator = Locator::from(TypeDescriptor::new("dummy", None));

        assert!(descriptor.matches(&wildcard));
        assert!(wildcard.matches(&descriptor));
        assert!(!descriptor.matches(&key));
        assert!(key.matches(&Locator::Key("g:t:k:n:1.0".to_string())));
        assert!(type_locator.matches(&Locator::from(TypeDescriptor::new("dummy", None))));
        assert!(!type_locator.matches(&Locator::from("dummy")));
    }
}

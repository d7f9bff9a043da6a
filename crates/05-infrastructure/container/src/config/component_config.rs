//! 组件声明

use pip_services_commons::{ConfigError, ConfigParams, ConfigResult, Descriptor, Locator, TypeDescriptor};

/// 单个组件声明
///
/// 必须且只能提供 `descriptor` 或 `type` 之一，声明中的全部键构成组件的配置分区
#[derive(Debug, Clone)]
pub struct ComponentConfig {
    descriptor: Option<Descriptor>,
    type_: Option<TypeDescriptor>,
    config: ConfigParams,
}

impl ComponentConfig {
    /// 按描述符声明组件
    pub fn from_descriptor(descriptor: Descriptor, config: ConfigParams) -> Self {
        Self {
            descriptor: Some(descriptor),
            type_: None,
            config,
        }
    }

    /// 按类型声明组件
    pub fn from_type(type_: TypeDescriptor, config: ConfigParams) -> Self {
        Self {
            descriptor: None,
            type_: Some(type_),
            config,
        }
    }

    /// 从配置分区读取声明
    pub fn from_config(config: ConfigParams) -> ConfigResult<Self> {
        let descriptor = config
            .get_as_nullable_string("descriptor")
            .map(|value| value.parse::<Descriptor>())
            .transpose()?;
        let type_ = config
            .get_as_nullable_string("type")
            .map(|value| value.parse::<TypeDescriptor>())
            .transpose()?;

        match (&descriptor, &type_) {
            (None, None) => Err(ConfigError::invalid(
                "BAD_COMPONENT_CONFIG",
                format!("组件声明缺少 descriptor 或 type: {}", config),
            )),
            (Some(_), Some(_)) => Err(ConfigError::invalid(
                "BAD_COMPONENT_CONFIG",
                format!("组件声明不能同时包含 descriptor 与 type: {}", config),
            )),
            _ => Ok(Self {
                descriptor,
                type_,
                config,
            }),
        }
    }

    pub fn descriptor(&self) -> Option<&Descriptor> {
        self.descriptor.as_ref()
    }

    pub fn type_(&self) -> Option<&TypeDescriptor> {
        self.type_.as_ref()
    }

    pub fn config(&self) -> &ConfigParams {
        &self.config
    }

    /// 组件登记时使用的定位器
    pub fn locator(&self) -> Locator {
        match (&self.descriptor, &self.type_) {
            (Some(descriptor), _) => descriptor.clone().into(),
            (None, Some(type_)) => type_.clone().into(),
            (None, None) => Locator::Key(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_declaration() {
        let config = ConfigParams::from_string(
            "descriptor=pip-services:logger:console:default:1.0;level=debug",
        );
        let component = ComponentConfig::from_config(config).unwrap();

        assert_eq!(
            component.locator().to_string(),
            "pip-services:logger:console:default:1.0"
        );
        assert_eq!(component.config().get("level"), Some("debug"));
        assert!(component.type_().is_none());
    }

    #[test]
    fn test_type_declaration() {
        let component =
            ComponentConfig::from_config(ConfigParams::from_string("type=dummy,my-lib")).unwrap();
        let type_ = component.type_().unwrap();

        assert_eq!(type_.name(), "dummy");
        assert_eq!(type_.library(), Some("my-lib"));
    }

    #[test]
    fn test_invalid_declarations() {
        let neither = ComponentConfig::from_config(ConfigParams::from_string("message=hi"));
        assert_eq!(neither.unwrap_err().code(), Some("BAD_COMPONENT_CONFIG"));

        let both = ComponentConfig::from_config(ConfigParams::from_string(
            "descriptor=a:b:c:d:1.0;type=dummy",
        ));
        assert!(both.is_err());

        let malformed = ComponentConfig::from_config(ConfigParams::from_string("descriptor=a:b"));
        assert!(matches!(malformed, Err(ConfigError::BadDescriptor { .. })));
    }
}

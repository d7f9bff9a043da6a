//! 容器配置

use super::ComponentConfig;
use pip_services_commons::{ConfigParams, ConfigResult};
use serde_json::Value;

/// 容器配置：按顺序排列的组件声明
#[derive(Debug, Clone, Default)]
pub struct ContainerConfig {
    components: Vec<ComponentConfig>,
}

impl ContainerConfig {
    pub fn new(components: Vec<ComponentConfig>) -> Self {
        Self { components }
    }

    /// 每个顶层分区是一个组件声明，分区名本身不影响登记
    pub fn from_config(config: &ConfigParams) -> ConfigResult<Self> {
        let components = config
            .get_section_names()
            .into_iter()
            .map(|name| ComponentConfig::from_config(config.get_section(&name)))
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self { components })
    }

    /// 从 JSON 值读取，数组按元素顺序登记
    pub fn from_value(value: &Value) -> ConfigResult<Self> {
        Self::from_config(&ConfigParams::from_value(value))
    }

    pub fn components(&self) -> &[ComponentConfig] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn push(&mut self, component: ComponentConfig) {
        self.components.push(component);
    }
}

impl<'a> IntoIterator for &'a ContainerConfig {
    type Item = &'a ComponentConfig;
    type IntoIter = std::slice::Iter<'a, ComponentConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

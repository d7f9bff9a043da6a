//! 容器引用集合

use super::ManagedReferences;
use crate::build::TypeRegistry;
use crate::config::{ComponentConfig, ContainerConfig};
use async_trait::async_trait;
use pip_services_commons::{
    clarify_locator, ApplicationResult, Component, Context, Locator, ReferenceError, References,
};
use std::sync::Arc;
use tracing::debug;

/// 容器引用集合
///
/// 在托管引用集合之上增加按容器配置登记组件的能力
pub struct ContainerReferences {
    managed: Arc<ManagedReferences>,
}

impl ContainerReferences {
    pub fn new() -> Self {
        Self {
            managed: ManagedReferences::new(),
        }
    }

    /// 组件拿到的最外层引用集合
    pub fn managed(&self) -> Arc<dyn References> {
        self.managed.clone()
    }

    pub fn is_open(&self) -> bool {
        self.managed.is_open()
    }

    pub async fn open(&self, context: Option<&Context>) -> ApplicationResult<()> {
        self.managed.open(context).await
    }

    pub async fn close(&self, context: Option<&Context>) -> ApplicationResult<()> {
        self.managed.close(context).await
    }

    /// 按声明顺序创建、登记并配置组件
    ///
    /// 任一组件失败即中止，错误包装为携带定位器的引用错误
    pub async fn put_from_config(
        &self,
        config: &ContainerConfig,
        types: &TypeRegistry,
    ) -> ApplicationResult<()> {
        for component_config in config {
            self.put_component(component_config, types)
                .await
                .map_err(|e| ReferenceError::RegistrationFailed {
                    locator: component_config.locator(),
                    source: Box::new(e),
                })?;
        }
        Ok(())
    }

    async fn put_component(
        &self,
        component_config: &ComponentConfig,
        types: &TypeRegistry,
    ) -> ApplicationResult<()> {
        let (locator, component) = self.create(component_config, types)?;
        debug!("登记组件: {}", locator);
        self.managed.put(locator, component.clone()).await?;

        if let Some(configurable) = component.as_configurable() {
            configurable.configure(component_config.config())?;
        }

        // 工厂在打开之前就需要引用，才能为后续声明创建组件
        if component.as_factory().is_some() {
            if let Some(referenceable) = component.as_referenceable() {
                referenceable.set_references(self.managed()).await?;
            }
        }
        Ok(())
    }

    fn create(
        &self,
        component_config: &ComponentConfig,
        types: &TypeRegistry,
    ) -> ApplicationResult<(Locator, Arc<dyn Component>)> {
        if let Some(type_) = component_config.type_() {
            return Ok((type_.clone().into(), types.create(type_)?));
        }

        let locator = component_config.locator();
        for component in self.managed.get_all() {
            let Some(factory) = component.as_factory() else {
                continue;
            };
            let Some(declared) = factory.can_create(&locator) else {
                continue;
            };
            let created = factory.create(&locator)?;
            return Ok((clarify_locator(&locator, &declared), created));
        }
        Err(ReferenceError::not_found(locator).into())
    }
}

impl Default for ContainerReferences {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl References for ContainerReferences {
    async fn put(&self, locator: Locator, component: Arc<dyn Component>) -> ApplicationResult<()> {
        self.managed.put(locator, component).await
    }

    async fn remove(&self, locator: &Locator) -> ApplicationResult<Option<Arc<dyn Component>>> {
        self.managed.remove(locator).await
    }

    async fn remove_all(&self, locator: &Locator) -> ApplicationResult<Vec<Arc<dyn Component>>> {
        self.managed.remove_all(locator).await
    }

    fn get_all_locators(&self) -> Vec<Locator> {
        self.managed.get_all_locators()
    }

    fn get_all(&self) -> Vec<Arc<dyn Component>> {
        self.managed.get_all()
    }

    async fn find(
        &self,
        locator: &Locator,
        required: bool,
    ) -> ApplicationResult<Vec<Arc<dyn Component>>> {
        self.managed.find(locator, required).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{DefaultContainerFactory, CONTAINER_FACTORY_DESCRIPTOR};
    use parking_lot::RwLock;
    use pip_services_commons::{
        ConfigParams, Configurable, Descriptor, LogLevel, Logger, ReferencesExt, TypeDescriptor,
    };
    use pip_services_components::ConsoleLogger;
    use serde_json::json;

    #[derive(Component, Default)]
    #[component(configurable)]
    struct Dummy {
        message: RwLock<String>,
    }

    impl Configurable for Dummy {
        fn configure(&self, config: &ConfigParams) -> ApplicationResult<()> {
            *self.message.write() = config.get_as_string_with_default("message", "");
            Ok(())
        }
    }

    async fn references() -> ContainerReferences {
        let references = ContainerReferences::new();
        references
            .put(
                CONTAINER_FACTORY_DESCRIPTOR.clone().into(),
                Arc::new(DefaultContainerFactory::new()),
            )
            .await
            .unwrap();
        references
    }

    #[tokio::test]
    async fn test_put_from_config() {
        let types = TypeRegistry::new();
        types.register_as_default::<Dummy>("dummy");
        let config = ContainerConfig::from_value(&json!([
            { "descriptor": "pip-services:logger:console:default:1.0", "level": "trace" },
            { "type": "dummy", "message": "hi" }
        ]))
        .unwrap();

        let references = references().await;
        references.put_from_config(&config, &types).await.unwrap();

        let logger = references
            .get_one_required_as::<ConsoleLogger>(
                &Descriptor::new("*", "logger", "console", "*", "*").into(),
            )
            .await
            .unwrap();
        assert_eq!(logger.level(), LogLevel::Trace);

        let dummy = references
            .get_one_required_as::<Dummy>(&TypeDescriptor::new("dummy", None).into())
            .await
            .unwrap();
        assert_eq!(*dummy.message.read(), "hi");
    }

    #[tokio::test]
    async fn test_unknown_descriptor_is_reference_error() {
        let config = ContainerConfig::from_value(&json!([
            { "descriptor": "my-app:controller:unknown:default:1.0" }
        ]))
        .unwrap();

        let references = references().await;
        let err = references
            .put_from_config(&config, &TypeRegistry::new())
            .await
            .unwrap_err();

        assert!(err.is_reference());
        assert!(err.to_string().contains("my-app:controller:unknown:default:1.0"));
    }
}

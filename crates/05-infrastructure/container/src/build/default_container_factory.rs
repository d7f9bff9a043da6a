//! 容器默认工厂

use once_cell::sync::Lazy;
use pip_services_commons::{ApplicationResult, Component, Descriptor, Factory, Locator};
use pip_services_components::build::{
    default_counters_factory, default_credential_store_factory, default_discovery_factory,
    default_info_factory, default_logger_factory, default_tracer_factory,
};
use pip_services_components::CompositeFactory;
use std::sync::Arc;

/// 容器默认工厂的保留描述符
pub static CONTAINER_FACTORY_DESCRIPTOR: Lazy<Descriptor> =
    Lazy::new(|| Descriptor::new("pip-services", "factory", "container", "default", "1.0"));

/// 容器默认工厂
///
/// 组合所有标准组件工厂，之后添加的工厂优先
#[derive(Component)]
#[component(factory)]
pub struct DefaultContainerFactory {
    factories: CompositeFactory,
}

impl DefaultContainerFactory {
    pub fn new() -> Self {
        let factories = CompositeFactory::new();
        factories.add(Arc::new(default_info_factory()));
        factories.add(Arc::new(default_logger_factory()));
        factories.add(Arc::new(default_counters_factory()));
        factories.add(Arc::new(default_tracer_factory()));
        factories.add(Arc::new(default_discovery_factory()));
        factories.add(Arc::new(default_credential_store_factory()));
        Self { factories }
    }

    /// 在默认工厂之外再组合其他工厂
    pub fn with_factories(factories: &[Arc<dyn Component>]) -> Self {
        let factory = Self::new();
        for component in factories {
            factory.add(component.clone());
        }
        factory
    }

    pub fn add(&self, factory: Arc<dyn Component>) {
        self.factories.add(factory);
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for DefaultContainerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl Factory for DefaultContainerFactory {
    fn can_create(&self, locator: &Locator) -> Option<Locator> {
        self.factories.can_create(locator)
    }

    fn create(&self, locator: &Locator) -> ApplicationResult<Arc<dyn Component>> {
        self.factories.create(locator)
    }
}

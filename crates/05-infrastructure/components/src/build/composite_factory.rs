//! 组合工厂

use parking_lot::RwLock;
use pip_services_commons::{
    ApplicationResult, Component, ComponentError, Factory, Locator,
};
use std::sync::Arc;

/// 组合工厂
///
/// 按添加顺序的逆序询问子工厂，后添加的工厂优先
#[derive(Component, Default)]
#[component(factory)]
pub struct CompositeFactory {
    factories: RwLock<Vec<Arc<dyn Component>>>,
}

impl CompositeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加子工厂，不具备工厂能力的组件被忽略
    pub fn add(&self, factory: Arc<dyn Component>) {
        if factory.as_factory().is_some() {
            self.factories.write().push(factory);
        }
    }

    /// 删除子工厂
    pub fn remove(&self, factory: &Arc<dyn Component>) {
        self.factories.write().retain(|f| !Arc::ptr_eq(f, factory));
    }

    pub fn len(&self) -> usize {
        self.factories.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.read().is_empty()
    }

    fn find(&self, locator: &Locator) -> Option<(Arc<dyn Component>, Locator)> {
        let factories = self.factories.read().clone();
        factories.into_iter().rev().find_map(|component| {
            let declared = component.as_factory()?.can_create(locator)?;
            Some((component, declared))
        })
    }
}

impl Factory for CompositeFactory {
    fn can_create(&self, locator: &Locator) -> Option<Locator> {
        self.find(locator).map(|(_, declared)| declared)
    }

    fn create(&self, locator: &Locator) -> ApplicationResult<Arc<dyn Component>> {
        let (component, _) = self.find(locator).ok_or_else(|| ComponentError::CannotCreate {
            locator: locator.clone(),
        })?;
        match component.as_factory() {
            Some(factory) => factory.create(locator),
            None => Err(ComponentError::CannotCreate {
                locator: locator.clone(),
            }
            .into()),
        }
    }
}

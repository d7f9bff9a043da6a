//! 按定位器登记构造函数的组件工厂

use parking_lot::RwLock;
use pip_services_commons::{
    ApplicationResult, Component, ComponentError, Factory, Locator,
};
use std::sync::Arc;
use tracing::debug;

type Constructor = Arc<dyn Fn(&Locator) -> ApplicationResult<Arc<dyn Component>> + Send + Sync>;

/// 组件工厂
///
/// 保存定位器到构造函数的登记表。`can_create` 返回登记时使用的定位器，
/// 调用方可以用它补齐查询中的通配字段。
#[derive(Component, Default)]
#[component(factory)]
pub struct ComponentFactory {
    registrations: RwLock<Vec<(Locator, Constructor)>>,
}

impl ComponentFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记构造函数
    pub fn register<F>(&self, locator: impl Into<Locator>, constructor: F)
    where
        F: Fn(&Locator) -> ApplicationResult<Arc<dyn Component>> + Send + Sync + 'static,
    {
        let locator = locator.into();
        let constructor: Constructor = Arc::new(constructor);
        debug!("登记组件构造函数: {}", locator);
        self.registrations.write().push((locator, constructor));
    }

    /// 登记使用 `Default` 构造的组件类型
    pub fn register_as_type<T>(&self, locator: impl Into<Locator>)
    where
        T: Component + Default,
    {
        self.register(locator, |_| Ok(Arc::new(T::default()) as Arc<dyn Component>));
    }

    pub fn len(&self) -> usize {
        self.registrations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.read().is_empty()
    }

    fn find(&self, locator: &Locator) -> Option<(Locator, Constructor)> {
        self.registrations
            .read()
            .iter()
            .find(|(registered, _)| registered.matches(locator))
            .map(|(registered, constructor)| (registered.clone(), constructor.clone()))
    }
}

impl Factory for ComponentFactory {
    fn can_create(&self, locator: &Locator) -> Option<Locator> {
        self.find(locator).map(|(registered, _)| registered)
    }

    fn create(&self, locator: &Locator) -> ApplicationResult<Arc<dyn Component>> {
        let (_, constructor) = self.find(locator).ok_or_else(|| ComponentError::CannotCreate {
            locator: locator.clone(),
        })?;
        constructor(locator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pip_services_commons::{downcast_component, Descriptor};

    #[derive(Component, Default)]
    struct Dummy;

    #[test]
    fn test_create_registered() {
        let factory = ComponentFactory::new();
        factory.register_as_type::<Dummy>(Descriptor::new("test", "dummy", "default", "*", "1.0"));

        let query: Locator = Descriptor::new("test", "dummy", "*", "*", "*").into();
        let declared = factory.can_create(&query).unwrap();
        assert_eq!(declared.to_string(), "test:dummy:default:*:1.0");

        let component = factory.create(&query).unwrap();
        assert!(downcast_component::<Dummy>(component).is_some());
    }

    #[test]
    fn test_unknown_locator() {
        let factory = ComponentFactory::new();
        let query: Locator = "missing".into();

        assert!(factory.can_create(&query).is_none());
        assert!(factory.create(&query).is_err());
    }
}

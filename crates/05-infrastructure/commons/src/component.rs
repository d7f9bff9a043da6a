//! 组件基础接口定义
//!
//! 组件是引用集合中保存的任意对象。它具备哪些行为由能力访问器决定，
//! 容器通过这些访问器在运行时探测组件是否可配置、可引用、可打开等。

use crate::auth::CredentialStore;
use crate::config::Configurable;
use crate::connect::Discovery;
use crate::observe::{Counters, Logger, Tracer};
use crate::refer::{Factory, Referenceable, Unreferenceable};
use crate::run::{Closable, Openable};
use std::any::Any;
use std::sync::Arc;

/// 类型擦除支持
///
/// 为所有 `Any + Send + Sync` 类型自动实现，使 `dyn Component` 能够向下转型
pub trait AsAny: Any + Send + Sync {
    /// 以 `&dyn Any` 形式访问
    fn as_any(&self) -> &dyn Any;

    /// 转换为 `Arc<dyn Any>`，用于按具体类型取回组件
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;

    /// 具体类型名称
    fn concrete_type_name(&self) -> &'static str;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn concrete_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// 组件基础 trait
///
/// 每个能力访问器默认返回 `None`。通常不手写实现，而是使用
/// `#[derive(Component)]` 并在 `#[component(...)]` 中列出能力。
pub trait Component: AsAny {
    fn as_configurable(&self) -> Option<&dyn Configurable> {
        None
    }

    fn as_referenceable(&self) -> Option<&dyn Referenceable> {
        None
    }

    fn as_unreferenceable(&self) -> Option<&dyn Unreferenceable> {
        None
    }

    fn as_openable(&self) -> Option<&dyn Openable> {
        None
    }

    fn as_closable(&self) -> Option<&dyn Closable> {
        None
    }

    fn as_factory(&self) -> Option<&dyn Factory> {
        None
    }

    fn as_logger(&self) -> Option<&dyn Logger> {
        None
    }

    fn as_counters(&self) -> Option<&dyn Counters> {
        None
    }

    fn as_tracer(&self) -> Option<&dyn Tracer> {
        None
    }

    fn as_discovery(&self) -> Option<&dyn Discovery> {
        None
    }

    fn as_credential_store(&self) -> Option<&dyn CredentialStore> {
        None
    }
}

/// 将组件向下转型为具体类型
pub fn downcast_component<T: Component>(component: Arc<dyn Component>) -> Option<Arc<T>> {
    component.into_any_arc().downcast::<T>().ok()
}

/// 组件的具体类型名称，用于日志
pub fn component_type_name(component: &Arc<dyn Component>) -> &'static str {
    component.as_ref().concrete_type_name()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ApplicationResult, Component, ConfigParams};
    use parking_lot::RwLock;

    #[derive(Component, Default)]
    #[component(configurable)]
    struct Settings {
        value: RwLock<String>,
    }

    impl Configurable for Settings {
        fn configure(&self, config: &ConfigParams) -> ApplicationResult<()> {
            *self.value.write() = config.get_as_string_with_default("value", "none");
            Ok(())
        }
    }

    #[derive(Component)]
    struct Plain;

    #[test]
    fn test_capability_accessors() {
        let settings: Arc<dyn Component> = Arc::new(Settings::default());
        let plain: Arc<dyn Component> = Arc::new(Plain);

        assert!(settings.as_configurable().is_some());
        assert!(settings.as_openable().is_none());
        assert!(plain.as_configurable().is_none());
    }

    #[test]
    fn test_downcast() {
        let settings: Arc<dyn Component> = Arc::new(Settings::default());
        settings
            .as_configurable()
            .unwrap()
            .configure(&ConfigParams::from_tuples([("value", "abc")]))
            .unwrap();

        let typed = downcast_component::<Settings>(settings.clone()).unwrap();
        assert_eq!(*typed.value.read(), "abc");
        assert!(downcast_component::<Plain>(settings.clone()).is_none());
        assert!(component_type_name(&settings).ends_with("Settings"));
    }
}

//! 类型登记表

use parking_lot::RwLock;
use pip_services_commons::{ApplicationResult, Component, ComponentError, TypeDescriptor};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

type TypeConstructor = Arc<dyn Fn() -> ApplicationResult<Arc<dyn Component>> + Send + Sync>;

/// 类型名到构造函数的登记表
///
/// 用于创建以 `type` 声明的组件，按类型名查找，库名只用于展示
#[derive(Default)]
pub struct TypeRegistry {
    types: RwLock<HashMap<String, TypeConstructor>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记构造函数，同名类型被替换
    pub fn register<F>(&self, name: impl Into<String>, constructor: F)
    where
        F: Fn() -> ApplicationResult<Arc<dyn Component>> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!("登记组件类型: {}", name);
        let constructor: TypeConstructor = Arc::new(constructor);
        self.types.write().insert(name, constructor);
    }

    /// 登记使用 `Default` 构造的类型
    pub fn register_as_default<T>(&self, name: impl Into<String>)
    where
        T: Component + Default,
    {
        self.register(name, || Ok(Arc::new(T::default()) as Arc<dyn Component>));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }

    /// 按类型描述符创建组件
    pub fn create(&self, type_: &TypeDescriptor) -> ApplicationResult<Arc<dyn Component>> {
        let constructor = self.types.read().get(type_.name()).cloned();
        let constructor = constructor.ok_or_else(|| ComponentError::UnknownType {
            type_name: type_.to_string(),
        })?;
        constructor()
    }
}

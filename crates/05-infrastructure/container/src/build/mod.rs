//! 容器的组件创建

mod default_container_factory;
mod type_registry;

pub use default_container_factory::{DefaultContainerFactory, CONTAINER_FACTORY_DESCRIPTOR};
pub use type_registry::TypeRegistry;

//! 组件工厂

mod component_factory;
mod composite_factory;
mod default_factories;

pub use component_factory::ComponentFactory;
pub use composite_factory::CompositeFactory;
pub use default_factories::*;

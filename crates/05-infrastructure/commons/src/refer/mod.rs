//! 组件定位与引用集合

mod dependency_resolver;
mod descriptor;
mod factory;
mod locator;
mod reference_set;
mod referenceable;
mod references;
mod type_descriptor;

pub use dependency_resolver::DependencyResolver;
pub use descriptor::Descriptor;
pub use factory::{clarify_locator, Factory};
pub use locator::{Locator, Reference};
pub use reference_set::ReferenceSet;
pub use referenceable::{Referenceable, Referencer, Unreferenceable};
pub use references::{References, ReferencesExt};
pub use type_descriptor::TypeDescriptor;

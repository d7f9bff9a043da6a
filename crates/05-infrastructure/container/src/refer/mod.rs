//! 引用集合装饰器与托管引用集合

mod build_references;
mod container_references;
mod link_references;
mod managed_references;
mod run_references;

pub use build_references::BuildReferences;
pub use container_references::ContainerReferences;
pub use link_references::LinkReferences;
pub use managed_references::ManagedReferences;
pub use run_references::RunReferences;

//! # Pip.Services Container
//!
//! 控制反转容器：
//!
//! - `refer`：自动创建、自动链接、自动运行装饰器与托管引用集合
//! - `config`：组件声明与配置文件读取
//! - `build`：类型登记表与容器默认工厂
//! - `container`：容器生命周期
//! - `process_container`：以进程方式运行的容器

pub mod build;
pub mod config;
pub mod container;
pub mod process_container;
pub mod refer;

pub use build::{DefaultContainerFactory, TypeRegistry, CONTAINER_FACTORY_DESCRIPTOR};
pub use config::{ComponentConfig, ContainerConfig, ContainerConfigReader};
pub use container::{Container, ContainerHooks, ContainerState};
pub use process_container::{shutdown_signal, ProcessContainer, DEFAULT_CONFIG_PATH};
pub use refer::{
    BuildReferences, ContainerReferences, LinkReferences, ManagedReferences, RunReferences,
};

//! 容器配置

mod component_config;
mod container_config;
mod container_config_reader;

pub use component_config::ComponentConfig;
pub use container_config::ContainerConfig;
pub use container_config_reader::ContainerConfigReader;

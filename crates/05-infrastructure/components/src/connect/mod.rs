//! 连接解析与服务发现

mod connection_resolver;
mod memory_discovery;

pub use connection_resolver::{ConnectionResolver, DISCOVERY_DESCRIPTOR};
pub use memory_discovery::MemoryDiscovery;

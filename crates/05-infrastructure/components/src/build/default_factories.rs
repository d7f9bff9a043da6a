//! 标准组件的默认工厂

use super::ComponentFactory;
use crate::auth::MemoryCredentialStore;
use crate::connect::MemoryDiscovery;
use crate::count::{CompositeCounters, LogCounters, NullCounters};
use crate::info::ContextInfo;
use crate::log::{CompositeLogger, ConsoleLogger, NullLogger};
use crate::trace::{CompositeTracer, LogTracer, NullTracer};
use once_cell::sync::Lazy;
use pip_services_commons::Descriptor;

fn descriptor(type_: &str, kind: &str) -> Descriptor {
    Descriptor::new("pip-services", type_, kind, "*", "1.0")
}

fn factory_descriptor(kind: &str) -> Descriptor {
    Descriptor::new("pip-services", "factory", kind, "default", "1.0")
}

pub static INFO_FACTORY_DESCRIPTOR: Lazy<Descriptor> = Lazy::new(|| factory_descriptor("info"));
pub static LOGGER_FACTORY_DESCRIPTOR: Lazy<Descriptor> = Lazy::new(|| factory_descriptor("logger"));
pub static COUNTERS_FACTORY_DESCRIPTOR: Lazy<Descriptor> =
    Lazy::new(|| factory_descriptor("counters"));
pub static TRACER_FACTORY_DESCRIPTOR: Lazy<Descriptor> = Lazy::new(|| factory_descriptor("tracer"));
pub static DISCOVERY_FACTORY_DESCRIPTOR: Lazy<Descriptor> =
    Lazy::new(|| factory_descriptor("discovery"));
pub static CREDENTIAL_STORE_FACTORY_DESCRIPTOR: Lazy<Descriptor> =
    Lazy::new(|| factory_descriptor("credential-store"));

/// 上下文信息工厂
pub fn default_info_factory() -> ComponentFactory {
    let factory = ComponentFactory::new();
    factory.register_as_type::<ContextInfo>(descriptor("context-info", "default"));
    factory.register_as_type::<ContextInfo>(descriptor("container-info", "default"));
    factory
}

/// 日志工厂：`null`、`console`、`composite`
pub fn default_logger_factory() -> ComponentFactory {
    let factory = ComponentFactory::new();
    factory.register_as_type::<NullLogger>(descriptor("logger", "null"));
    factory.register_as_type::<ConsoleLogger>(descriptor("logger", "console"));
    factory.register_as_type::<CompositeLogger>(descriptor("logger", "composite"));
    factory
}

/// 计数器工厂：`null`、`log`、`composite`
pub fn default_counters_factory() -> ComponentFactory {
    let factory = ComponentFactory::new();
    factory.register_as_type::<NullCounters>(descriptor("counters", "null"));
    factory.register_as_type::<LogCounters>(descriptor("counters", "log"));
    factory.register_as_type::<CompositeCounters>(descriptor("counters", "composite"));
    factory
}

/// 跟踪器工厂：`null`、`log`、`composite`
pub fn default_tracer_factory() -> ComponentFactory {
    let factory = ComponentFactory::new();
    factory.register_as_type::<NullTracer>(descriptor("tracer", "null"));
    factory.register_as_type::<LogTracer>(descriptor("tracer", "log"));
    factory.register_as_type::<CompositeTracer>(descriptor("tracer", "composite"));
    factory
}

/// 服务发现工厂：`memory`
pub fn default_discovery_factory() -> ComponentFactory {
    let factory = ComponentFactory::new();
    factory.register_as_type::<MemoryDiscovery>(descriptor("discovery", "memory"));
    factory
}

/// 凭据存储工厂：`memory`
pub fn default_credential_store_factory() -> ComponentFactory {
    let factory = ComponentFactory::new();
    factory.register_as_type::<MemoryCredentialStore>(descriptor("credential-store", "memory"));
    factory
}

#[cfg(test)]
mod tests {
    use super::*;
    use pip_services_commons::{downcast_component, Factory, Locator};

    #[test]
    fn test_logger_factory_fills_wildcards() {
        let factory = default_logger_factory();
        let query: Locator = Descriptor::new("*", "logger", "console", "*", "*").into();

        let declared = factory.can_create(&query).unwrap();
        assert_eq!(declared.to_string(), "pip-services:logger:console:*:1.0");

        let logger = factory.create(&query).unwrap();
        assert!(logger.as_logger().is_some());
        assert!(downcast_component::<ConsoleLogger>(logger).is_some());
    }

    #[test]
    fn test_every_default_factory_creates() {
        let cases = [
            (default_info_factory(), descriptor("context-info", "default")),
            (default_counters_factory(), descriptor("counters", "log")),
            (default_tracer_factory(), descriptor("tracer", "log")),
            (default_discovery_factory(), descriptor("discovery", "memory")),
            (default_credential_store_factory(), descriptor("credential-store", "memory")),
        ];

        for (factory, descriptor) in cases {
            let locator: Locator = descriptor.into();
            assert!(factory.create(&locator).is_ok(), "无法创建 {}", locator);
        }
    }
}

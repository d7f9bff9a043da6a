//! # Pip.Services Commons
//!
//! 基础契约层：组件能力、定位器与引用集合、配置参数、
//! 连接与凭据参数以及可观测性接口。
//!
//! 其他基础设施 crate 都建立在这些契约之上。

extern crate self as pip_services_commons;

pub mod auth;
pub mod component;
pub mod config;
pub mod connect;
pub mod context;
pub mod errors;
pub mod observe;
pub mod refer;
pub mod run;

pub use auth::{CredentialParams, CredentialStore};
pub use component::{component_type_name, downcast_component, AsAny, Component};
pub use config::{ConfigParams, Configurable};
pub use connect::{ConnectionParams, Discovery};
pub use context::{trace_id_of, Context};
pub use errors::*;
pub use observe::{
    Counter, CounterTiming, CounterType, Counters, LogLevel, Logger, TraceTiming, Tracer,
};
pub use refer::{
    clarify_locator, DependencyResolver, Descriptor, Factory, Locator, Reference, ReferenceSet,
    Referenceable, Referencer, References, ReferencesExt, TypeDescriptor, Unreferenceable,
};
pub use run::{Closable, Closer, Openable, Opener};

/// 派生宏，见 `pip_services_macros::Component`
pub use pip_services_macros::Component;

/// 常用类型预导入
pub mod prelude {
    pub use crate::{
        ApplicationError, ApplicationResult, Closable, Component, ConfigParams, Configurable,
        Context, Descriptor, Factory, Locator, Openable, Referenceable, References, ReferencesExt,
        Unreferenceable,
    };
    pub use async_trait::async_trait;
}

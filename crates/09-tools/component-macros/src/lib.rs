//! # Component Macros
//!
//! 这个 crate 提供了为组件声明能力的派生宏。
//!
//! 容器在运行时通过 `Component` trait 上的能力访问器（`as_configurable`、
//! `as_openable` 等）探测组件实现了哪些行为契约。手写这些访问器很繁琐，
//! `#[derive(Component)]` 根据 `#[component(...)]` 中列出的能力自动生成它们。
//!
//! ## 支持的能力
//!
//! | 参数 | 访问器 | 需要实现的 trait |
//! |------|--------|------------------|
//! | `configurable` | `as_configurable` | `Configurable` |
//! | `referenceable` | `as_referenceable` | `Referenceable` |
//! | `unreferenceable` | `as_unreferenceable` | `Unreferenceable` |
//! | `openable` | `as_openable` + `as_closable` | `Openable` |
//! | `closable` | `as_closable` | `Closable` |
//! | `factory` | `as_factory` | `Factory` |
//! | `logger` | `as_logger` | `Logger` |
//! | `counters` | `as_counters` | `Counters` |
//! | `tracer` | `as_tracer` | `Tracer` |
//! | `discovery` | `as_discovery` | `Discovery` |
//! | `credential_store` | `as_credential_store` | `CredentialStore` |
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use pip_services_commons::{Component, ConfigParams, Configurable, ApplicationResult};
//!
//! #[derive(Component, Default)]
//! #[component(configurable)]
//! pub struct MyService {
//!     message: parking_lot::RwLock<String>,
//! }
//!
//! impl Configurable for MyService {
//!     fn configure(&self, config: &ConfigParams) -> ApplicationResult<()> {
//!         *self.message.write() = config.get_as_string_with_default("message", "");
//!         Ok(())
//!     }
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod component;
mod utils;

/// 组件派生宏
///
/// 为结构体实现 `pip_services_commons::Component`，并为 `#[component(...)]`
/// 中列出的每个能力生成返回 `Some(self)` 的访问器。未列出的能力保持默认的
/// `None`。
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Component)]
/// #[component(configurable, referenceable, openable)]
/// pub struct MyService {
///     // 字段
/// }
/// ```
#[proc_macro_derive(Component, attributes(component))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    component::derive_component_impl(input)
}

//! 宏工具函数

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::Ident;

/// 组件能力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Configurable,
    Referenceable,
    Unreferenceable,
    Openable,
    Closable,
    Factory,
    Logger,
    Counters,
    Tracer,
    Discovery,
    CredentialStore,
}

impl Capability {
    /// 按属性参数名查找能力
    pub fn from_ident(ident: &str) -> Option<Self> {
        match ident {
            "configurable" => Some(Self::Configurable),
            "referenceable" => Some(Self::Referenceable),
            "unreferenceable" => Some(Self::Unreferenceable),
            "openable" => Some(Self::Openable),
            "closable" => Some(Self::Closable),
            "factory" => Some(Self::Factory),
            "logger" => Some(Self::Logger),
            "counters" => Some(Self::Counters),
            "tracer" => Some(Self::Tracer),
            "discovery" => Some(Self::Discovery),
            "credential_store" => Some(Self::CredentialStore),
            _ => None,
        }
    }

    /// 所有合法的参数名，用于错误提示
    pub fn names() -> &'static str {
        "configurable, referenceable, unreferenceable, openable, closable, factory, \
         logger, counters, tracer, discovery, credential_store"
    }

    /// 访问器方法名与 trait 名
    fn accessor(self) -> (&'static str, &'static str) {
        match self {
            Self::Configurable => ("as_configurable", "Configurable"),
            Self::Referenceable => ("as_referenceable", "Referenceable"),
            Self::Unreferenceable => ("as_unreferenceable", "Unreferenceable"),
            Self::Openable => ("as_openable", "Openable"),
            Self::Closable => ("as_closable", "Closable"),
            Self::Factory => ("as_factory", "Factory"),
            Self::Logger => ("as_logger", "Logger"),
            Self::Counters => ("as_counters", "Counters"),
            Self::Tracer => ("as_tracer", "Tracer"),
            Self::Discovery => ("as_discovery", "Discovery"),
            Self::CredentialStore => ("as_credential_store", "CredentialStore"),
        }
    }

    /// 生成访问器实现
    pub fn accessor_tokens(self) -> TokenStream {
        let (method, trait_name) = self.accessor();
        let method = Ident::new(method, Span::call_site());
        let trait_name = Ident::new(trait_name, Span::call_site());

        quote! {
            fn #method(&self) -> ::core::option::Option<&dyn ::pip_services_commons::#trait_name> {
                ::core::option::Option::Some(self)
            }
        }
    }
}

/// 展开能力之间的隐含关系并去重
///
/// `openable` 隐含 `closable`，因为 `Openable` 是 `Closable` 的子 trait。
pub fn normalize(capabilities: Vec<Capability>) -> Vec<Capability> {
    let mut result: Vec<Capability> = Vec::new();

    for capability in capabilities {
        if !result.contains(&capability) {
            result.push(capability);
        }
        if capability == Capability::Openable && !result.contains(&Capability::Closable) {
            result.push(Capability::Closable);
        }
    }

    result
}

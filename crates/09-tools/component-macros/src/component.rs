//! 组件派生宏实现

use crate::utils::{normalize, Capability};
use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result};

/// 从 `#[component(...)]` 属性中解析能力列表
fn parse_capabilities(input: &DeriveInput) -> Result<Vec<Capability>> {
    let mut capabilities = Vec::new();

    for attr in &input.attrs {
        if !attr.path().is_ident("component") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            let ident = meta
                .path
                .get_ident()
                .map(ToString::to_string)
                .unwrap_or_default();

            match Capability::from_ident(&ident) {
                Some(capability) => {
                    capabilities.push(capability);
                    Ok(())
                }
                None => Err(meta.error(format!(
                    "未知的组件能力 `{}`，可选值: {}",
                    ident,
                    Capability::names()
                ))),
            }
        })?;
    }

    Ok(normalize(capabilities))
}

/// 实现 #[derive(Component)] 宏
pub fn derive_component_impl(input: DeriveInput) -> TokenStream {
    let capabilities = match parse_capabilities(&input) {
        Ok(capabilities) => capabilities,
        Err(e) => return e.to_compile_error().into(),
    };

    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let accessors = capabilities.iter().map(|c| c.accessor_tokens());

    let expanded = quote! {
        impl #impl_generics ::pip_services_commons::Component for #struct_name #ty_generics #where_clause {
            #(#accessors)*
        }
    };

    TokenStream::from(expanded)
}

//! 凭据解析与凭据存储

mod credential_resolver;
mod memory_credential_store;

pub use credential_resolver::{CredentialResolver, CREDENTIAL_STORE_DESCRIPTOR};
pub use memory_credential_store::MemoryCredentialStore;

//! Azure Functions 适配

mod azure_connection_params;
mod azure_connection_resolver;
mod azure_function;

pub use azure_connection_params::AzureConnectionParams;
pub use azure_connection_resolver::AzureConnectionResolver;
pub use azure_function::{AzureFunction, AzureRequest, AzureResponse};

//! # Pip.Services Functions
//!
//! 云函数容器：
//!
//! - `action`：动作登记表与动作登记器
//! - `schema`：动作参数校验
//! - `function_container`：按命令名分发调用的函数容器
//! - `aws`：AWS Lambda 连接参数、连接解析器与函数适配器
//! - `azure`：Azure Functions 连接参数、连接解析器与函数适配器

pub mod action;
pub mod aws;
pub mod azure;
pub mod function_container;
pub mod schema;

pub use action::{ActionHandler, ActionRegistry, FunctionAction, FunctionRegistrar};
pub use aws::{AwsConnectionParams, AwsConnectionResolver, LambdaFunction};
pub use azure::{
    AzureConnectionParams, AzureConnectionResolver, AzureFunction, AzureRequest, AzureResponse,
};
pub use function_container::FunctionContainer;
pub use schema::{ObjectSchema, PropertyType};

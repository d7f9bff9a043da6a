//! AWS Lambda 适配

mod aws_connection_params;
mod aws_connection_resolver;
mod lambda_function;

pub use aws_connection_params::AwsConnectionParams;
pub use aws_connection_resolver::AwsConnectionResolver;
pub use lambda_function::LambdaFunction;

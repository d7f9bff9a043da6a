//! 调用跟踪组件

mod composite_tracer;
mod log_tracer;
mod null_tracer;

pub use composite_tracer::{CompositeTracer, TRACER_DESCRIPTOR};
pub use log_tracer::LogTracer;
pub use null_tracer::NullTracer;

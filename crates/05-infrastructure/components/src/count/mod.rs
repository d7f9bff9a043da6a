//! 性能计数器组件

mod composite_counters;
mod log_counters;
mod null_counters;

pub use composite_counters::{CompositeCounters, COUNTERS_DESCRIPTOR};
pub use log_counters::LogCounters;
pub use null_counters::NullCounters;

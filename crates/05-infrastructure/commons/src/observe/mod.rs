//! 可观测性契约：日志、计数器、跟踪

mod counters;
mod log;
mod trace;

pub use counters::{Counter, CounterTiming, CounterType, Counters};
pub use log::{LogLevel, Logger};
pub use trace::{TraceTiming, Tracer};

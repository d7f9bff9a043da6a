use chrono::{DateTime, Utc};
use pip_services_commons::{Component, Counters};

/// 空计数器，丢弃所有测量值
#[derive(Component, Default)]
#[component(counters)]
pub struct NullCounters;

impl NullCounters {
    pub fn new() -> Self {
        Self
    }
}

impl Counters for NullCounters {
    fn end_timing(&self, _name: &str, _elapsed_ms: f64) {}

    fn stats(&self, _name: &str, _value: f64) {}

    fn last(&self, _name: &str, _value: f64) {}

    fn timestamp(&self, _name: &str, _value: DateTime<Utc>) {}

    fn increment(&self, _name: &str, _value: i64) {}
}

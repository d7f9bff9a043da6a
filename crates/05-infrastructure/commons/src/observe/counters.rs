//! 性能计数器契约

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// 计数器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterType {
    /// 耗时统计
    Interval,
    /// 最近一次值
    LastValue,
    /// 最小、最大、平均值
    Statistics,
    /// 时间戳
    Timestamp,
    /// 累加值
    Increment,
}

/// 计数器快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counter {
    pub name: String,
    #[serde(rename = "type")]
    pub counter_type: CounterType,
    pub last: Option<f64>,
    pub count: Option<i64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub average: Option<f64>,
    pub time: Option<DateTime<Utc>>,
}

impl Counter {
    pub fn new(name: impl Into<String>, counter_type: CounterType) -> Self {
        Self {
            name: name.into(),
            counter_type,
            last: None,
            count: None,
            min: None,
            max: None,
            average: None,
            time: None,
        }
    }

    /// 累计一个统计值
    pub fn calculate_stats(&mut self, value: f64) {
        let count = self.count.unwrap_or(0);
        let average = self.average.unwrap_or(0.0);
        self.last = Some(value);
        self.count = Some(count + 1);
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.average = Some((average * count as f64 + value) / (count + 1) as f64);
    }
}

/// 性能计数器
pub trait Counters: Send + Sync {
    /// 结束一次计时，`elapsed_ms` 为毫秒数
    fn end_timing(&self, name: &str, elapsed_ms: f64);

    fn stats(&self, name: &str, value: f64);

    fn last(&self, name: &str, value: f64);

    fn timestamp(&self, name: &str, value: DateTime<Utc>);

    fn timestamp_now(&self, name: &str) {
        self.timestamp(name, Utc::now());
    }

    fn increment(&self, name: &str, value: i64);

    fn increment_one(&self, name: &str) {
        self.increment(name, 1);
    }
}

/// 计时器
///
/// 创建时开始计时，`end_timing` 时把耗时写入计数器
pub struct CounterTiming {
    name: String,
    start: Instant,
    counters: Arc<dyn Counters>,
}

impl CounterTiming {
    pub fn new(name: impl Into<String>, counters: Arc<dyn Counters>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            counters,
        }
    }

    pub fn end_timing(self) {
        let elapsed = self.start.elapsed().as_secs_f64() * 1000.0;
        self.counters.end_timing(&self.name, elapsed);
    }
}

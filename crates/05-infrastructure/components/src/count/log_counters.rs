//! 缓存并输出到日志的计数器

use crate::log::CompositeLogger;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use pip_services_commons::{
    ApplicationResult, Component, ConfigParams, Configurable, Counter, CounterType, Counters,
    Logger, Referenceable, References,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 日志计数器
///
/// 在内存中缓存计数器快照，超过输出间隔后把所有计数器写入日志。
///
/// 配置参数：
/// - `interval`：输出间隔毫秒数，默认 300000
/// - `reset_timeout`：快照重置超时毫秒数，0 表示不重置
#[derive(Component)]
#[component(configurable, referenceable, counters)]
pub struct LogCounters {
    cache: DashMap<String, Counter>,
    interval: RwLock<Duration>,
    reset_timeout: RwLock<Duration>,
    last_dump: RwLock<Instant>,
    last_reset: RwLock<Instant>,
    logger: RwLock<Arc<CompositeLogger>>,
}

impl Default for LogCounters {
    fn default() -> Self {
        Self {
            cache: DashMap::new(),
            interval: RwLock::new(Duration::from_millis(300_000)),
            reset_timeout: RwLock::new(Duration::ZERO),
            last_dump: RwLock::new(Instant::now()),
            last_reset: RwLock::new(Instant::now()),
            logger: RwLock::new(Arc::new(CompositeLogger::new())),
        }
    }
}

impl LogCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有计数器快照，按名称排序
    pub fn get_all(&self) -> Vec<Counter> {
        let mut counters: Vec<Counter> = self.cache.iter().map(|e| e.value().clone()).collect();
        counters.sort_by(|a, b| a.name.cmp(&b.name));
        counters
    }

    pub fn get(&self, name: &str) -> Option<Counter> {
        self.cache.get(name).map(|e| e.value().clone())
    }

    pub fn clear(&self, name: &str) {
        self.cache.remove(name);
    }

    pub fn clear_all(&self) {
        self.cache.clear();
    }

    /// 把所有计数器写入日志
    pub fn dump(&self) {
        let logger = self.logger.read().clone();
        for counter in self.get_all() {
            logger.info(None, &format_counter(&counter));
        }
        *self.last_dump.write() = Instant::now();
    }

    fn reset_if_needed(&self) {
        let timeout = *self.reset_timeout.read();
        if timeout.is_zero() {
            return;
        }
        if self.last_reset.read().elapsed() > timeout {
            self.cache.clear();
            *self.last_reset.write() = Instant::now();
        }
    }

    fn update(&self) {
        if self.last_dump.read().elapsed() > *self.interval.read() {
            self.dump();
        }
    }

    fn with_counter(&self, name: &str, counter_type: CounterType, apply: impl FnOnce(&mut Counter)) {
        self.reset_if_needed();
        {
            let mut entry = self
                .cache
                .entry(name.to_string())
                .or_insert_with(|| Counter::new(name, counter_type));
            apply(entry.value_mut());
        }
        self.update();
    }
}

fn format_counter(counter: &Counter) -> String {
    let stats = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v));
    match counter.counter_type {
        CounterType::Increment => format!("计数器 {} = {}", counter.name, counter.count.unwrap_or(0)),
        CounterType::LastValue => format!("计数器 {} = {}", counter.name, stats(counter.last)),
        CounterType::Timestamp => format!(
            "计数器 {} = {}",
            counter.name,
            counter.time.map(|t| t.to_rfc3339()).unwrap_or_default()
        ),
        CounterType::Interval | CounterType::Statistics => format!(
            "计数器 {} 次数={} 最小={} 最大={} 平均={}",
            counter.name,
            counter.count.unwrap_or(0),
            stats(counter.min),
            stats(counter.max),
            stats(counter.average)
        ),
    }
}

impl Configurable for LogCounters {
    fn configure(&self, config: &ConfigParams) -> ApplicationResult<()> {
        let interval = self.interval.read().as_millis() as i64;
        let interval = config.get_as_integer_with_default(
            "interval",
            config.get_as_integer_with_default("options.interval", interval),
        );
        *self.interval.write() = Duration::from_millis(interval.max(0) as u64);

        let reset = config.get_as_integer_with_default(
            "reset_timeout",
            config.get_as_integer_with_default("options.reset_timeout", 0),
        );
        *self.reset_timeout.write() = Duration::from_millis(reset.max(0) as u64);
        Ok(())
    }
}

#[async_trait]
impl Referenceable for LogCounters {
    async fn set_references(&self, references: Arc<dyn References>) -> ApplicationResult<()> {
        let logger = CompositeLogger::from_references(&references).await;
        *self.logger.write() = Arc::new(logger);
        Ok(())
    }
}

impl Counters for LogCounters {
    fn end_timing(&self, name: &str, elapsed_ms: f64) {
        self.with_counter(name, CounterType::Interval, |c| c.calculate_stats(elapsed_ms));
    }

    fn stats(&self, name: &str, value: f64) {
        self.with_counter(name, CounterType::Statistics, |c| c.calculate_stats(value));
    }

    fn last(&self, name: &str, value: f64) {
        self.with_counter(name, CounterType::LastValue, |c| c.last = Some(value));
    }

    fn timestamp(&self, name: &str, value: DateTime<Utc>) {
        self.with_counter(name, CounterType::Timestamp, |c| c.time = Some(value));
    }

    fn increment(&self, name: &str, value: i64) {
        self.with_counter(name, CounterType::Increment, |c| {
            c.count = Some(c.count.unwrap_or(0) + value)
        });
    }
}

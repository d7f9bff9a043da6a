//! 组合计数器

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use pip_services_commons::{
    ApplicationResult, Component, CounterTiming, Counters, Descriptor, Locator, Referenceable,
    References,
};
use std::sync::Arc;

/// 匹配所有计数器组件的描述符
pub static COUNTERS_DESCRIPTOR: Lazy<Locator> =
    Lazy::new(|| Descriptor::new("*", "counters", "*", "*", "*").into());

/// 组合计数器
///
/// 把测量值转发给引用集合中的所有计数器组件
#[derive(Component, Default)]
#[component(referenceable, counters)]
pub struct CompositeCounters {
    counters: RwLock<Vec<Arc<dyn Component>>>,
}

impl CompositeCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn from_references(references: &Arc<dyn References>) -> Self {
        let composite = Self::new();
        for component in references.get_optional(&COUNTERS_DESCRIPTOR).await {
            composite.add(component);
        }
        composite
    }

    pub fn add(&self, component: Arc<dyn Component>) {
        if component.as_counters().is_some() {
            self.counters.write().push(component);
        }
    }

    pub fn len(&self) -> usize {
        self.counters.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.read().is_empty()
    }

    /// 开始计时
    pub fn begin_timing(self: &Arc<Self>, name: impl Into<String>) -> CounterTiming {
        CounterTiming::new(name, self.clone())
    }

    fn each(&self, apply: impl Fn(&dyn Counters)) {
        let counters = self.counters.read().clone();
        for component in &counters {
            if let Some(counter) = component.as_counters() {
                apply(counter);
            }
        }
    }
}

#[async_trait]
impl Referenceable for CompositeCounters {
    async fn set_references(&self, references: Arc<dyn References>) -> ApplicationResult<()> {
        let found = references.get_optional(&COUNTERS_DESCRIPTOR).await;
        let mut counters = self.counters.write();
        for component in found {
            if component.as_counters().is_some()
                && !counters.iter().any(|c| Arc::ptr_eq(c, &component))
            {
                counters.push(component);
            }
        }
        Ok(())
    }
}

impl Counters for CompositeCounters {
    fn end_timing(&self, name: &str, elapsed_ms: f64) {
        self.each(|c| c.end_timing(name, elapsed_ms));
    }

    fn stats(&self, name: &str, value: f64) {
        self.each(|c| c.stats(name, value));
    }

    fn last(&self, name: &str, value: f64) {
        self.each(|c| c.last(name, value));
    }

    fn timestamp(&self, name: &str, value: DateTime<Utc>) {
        self.each(|c| c.timestamp(name, value));
    }

    fn increment(&self, name: &str, value: i64) {
        self.each(|c| c.increment(name, value));
    }
}

//! 组合跟踪器

use async_trait::async_trait;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use pip_services_commons::{
    ApplicationResult, Component, Context, Descriptor, Locator, Referenceable, References,
    TraceTiming, Tracer,
};
use std::error::Error;
use std::sync::Arc;

/// 匹配所有跟踪器组件的描述符
pub static TRACER_DESCRIPTOR: Lazy<Locator> =
    Lazy::new(|| Descriptor::new("*", "tracer", "*", "*", "*").into());

/// 组合跟踪器
#[derive(Component, Default)]
#[component(referenceable, tracer)]
pub struct CompositeTracer {
    tracers: RwLock<Vec<Arc<dyn Component>>>,
}

impl CompositeTracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn from_references(references: &Arc<dyn References>) -> Self {
        let composite = Self::new();
        for component in references.get_optional(&TRACER_DESCRIPTOR).await {
            composite.add(component);
        }
        composite
    }

    pub fn add(&self, component: Arc<dyn Component>) {
        if component.as_tracer().is_some() {
            self.tracers.write().push(component);
        }
    }

    pub fn len(&self) -> usize {
        self.tracers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracers.read().is_empty()
    }

    /// 开始跟踪一次调用
    pub fn begin_trace(
        self: &Arc<Self>,
        context: Option<&Context>,
        component: &str,
        operation: &str,
    ) -> TraceTiming {
        TraceTiming::new(context, component, operation, self.clone())
    }

    fn each(&self, apply: impl Fn(&dyn Tracer)) {
        let tracers = self.tracers.read().clone();
        for component in &tracers {
            if let Some(tracer) = component.as_tracer() {
                apply(tracer);
            }
        }
    }
}

#[async_trait]
impl Referenceable for CompositeTracer {
    async fn set_references(&self, references: Arc<dyn References>) -> ApplicationResult<()> {
        let found = references.get_optional(&TRACER_DESCRIPTOR).await;
        let mut tracers = self.tracers.write();
        for component in found {
            if component.as_tracer().is_some() && !tracers.iter().any(|t| Arc::ptr_eq(t, &component)) {
                tracers.push(component);
            }
        }
        Ok(())
    }
}

impl Tracer for CompositeTracer {
    fn trace(&self, context: Option<&Context>, component: &str, operation: &str, duration_ms: f64) {
        self.each(|t| t.trace(context, component, operation, duration_ms));
    }

    fn failure(
        &self,
        context: Option<&Context>,
        component: &str,
        operation: &str,
        error: &(dyn Error + 'static),
        duration_ms: f64,
    ) {
        self.each(|t| t.failure(context, component, operation, error, duration_ms));
    }
}

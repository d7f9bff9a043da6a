use pip_services_commons::{Component, Context, Tracer};
use std::error::Error;

/// 空跟踪器
#[derive(Component, Default)]
#[component(tracer)]
pub struct NullTracer;

impl NullTracer {
    pub fn new() -> Self {
        Self
    }
}

impl Tracer for NullTracer {
    fn trace(&self, _context: Option<&Context>, _component: &str, _operation: &str, _duration_ms: f64) {}

    fn failure(
        &self,
        _context: Option<&Context>,
        _component: &str,
        _operation: &str,
        _error: &(dyn Error + 'static),
        _duration_ms: f64,
    ) {
    }
}

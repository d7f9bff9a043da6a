//! 调用跟踪契约

use crate::context::Context;
use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

/// 调用跟踪器
pub trait Tracer: Send + Sync {
    /// 记录一次成功调用
    fn trace(&self, context: Option<&Context>, component: &str, operation: &str, duration_ms: f64);

    /// 记录一次失败调用
    fn failure(
        &self,
        context: Option<&Context>,
        component: &str,
        operation: &str,
        error: &(dyn Error + 'static),
        duration_ms: f64,
    );
}

/// 跟踪计时
///
/// 创建时开始计时，结束时按结果调用 `trace` 或 `failure`
pub struct TraceTiming {
    context: Option<Context>,
    component: String,
    operation: String,
    start: Instant,
    tracer: Arc<dyn Tracer>,
}

impl TraceTiming {
    pub fn new(
        context: Option<&Context>,
        component: impl Into<String>,
        operation: impl Into<String>,
        tracer: Arc<dyn Tracer>,
    ) -> Self {
        Self {
            context: context.cloned(),
            component: component.into(),
            operation: operation.into(),
            start: Instant::now(),
            tracer,
        }
    }

    fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn end_trace(self) {
        let elapsed = self.elapsed_ms();
        self.tracer
            .trace(self.context.as_ref(), &self.component, &self.operation, elapsed);
    }

    pub fn end_failure(self, error: &(dyn Error + 'static)) {
        let elapsed = self.elapsed_ms();
        self.tracer.failure(
            self.context.as_ref(),
            &self.component,
            &self.operation,
            error,
            elapsed,
        );
    }
}

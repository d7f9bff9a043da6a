//! 调用上下文

use serde_json::Value;
use std::collections::HashMap;

/// 调用上下文
///
/// 在生命周期调用和业务调用之间传递跟踪 ID 等信息
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    values: HashMap<String, Value>,
}

impl Context {
    /// 创建空上下文
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用跟踪 ID 创建上下文
    pub fn from_trace_id(trace_id: impl Into<String>) -> Self {
        let mut context = Self::new();
        context
            .values
            .insert("trace_id".to_string(), Value::String(trace_id.into()));
        context
    }

    /// 从 JSON 对象创建上下文
    pub fn from_value(value: &Value) -> Self {
        let values = value
            .as_object()
            .map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();
        Self { values }
    }

    /// 跟踪 ID
    pub fn trace_id(&self) -> Option<&str> {
        self.values.get("trace_id").and_then(Value::as_str)
    }

    /// 读取上下文值
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// 添加上下文值
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

/// 取出可选上下文中的跟踪 ID，用于日志
pub fn trace_id_of(context: Option<&Context>) -> &str {
    context.and_then(Context::trace_id).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_id() {
        let context = Context::from_trace_id("123").with("user", "admin");

        assert_eq!(context.trace_id(), Some("123"));
        assert_eq!(context.get("user"), Some(&Value::from("admin")));
        assert_eq!(trace_id_of(Some(&context)), "123");
        assert_eq!(trace_id_of(None), "");
    }

    #[test]
    fn test_from_value() {
        let context = Context::from_value(&serde_json::json!({ "trace_id": "abc", "n": 1 }));
        assert_eq!(context.trace_id(), Some("abc"));
        assert_eq!(context.get("n"), Some(&Value::from(1)));
    }
}

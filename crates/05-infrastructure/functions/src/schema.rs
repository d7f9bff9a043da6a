//! 动作参数校验

use pip_services_commons::{ApplicationResult, InvocationError};
use serde_json::Value;
use std::fmt;

/// 属性类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    Any,
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

impl PropertyType {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Any => "any",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
struct PropertySchema {
    name: String,
    property_type: PropertyType,
    required: bool,
}

/// 对象参数校验规则
///
/// 只检查值是否为对象、必需属性是否存在以及属性类型。
/// 默认允许未声明的属性，因为调用参数里通常带有 `cmd`、`trace_id` 等字段。
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    properties: Vec<PropertySchema>,
    allow_undefined: bool,
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self {
            properties: Vec::new(),
            allow_undefined: true,
        }
    }
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_required_property(mut self, name: impl Into<String>, property_type: PropertyType) -> Self {
        self.properties.push(PropertySchema {
            name: name.into(),
            property_type,
            required: true,
        });
        self
    }

    pub fn with_optional_property(mut self, name: impl Into<String>, property_type: PropertyType) -> Self {
        self.properties.push(PropertySchema {
            name: name.into(),
            property_type,
            required: false,
        });
        self
    }

    /// 是否允许未声明的属性
    pub fn allow_undefined(mut self, allow: bool) -> Self {
        self.allow_undefined = allow;
        self
    }

    /// 校验并返回全部问题，没有问题时为空
    pub fn validate(&self, value: &Value) -> Vec<String> {
        let Some(object) = value.as_object() else {
            return vec![format!("参数必须是对象，实际为 {}", value)];
        };

        let mut errors = Vec::new();
        for property in &self.properties {
            match object.get(&property.name) {
                None | Some(Value::Null) if property.required => {
                    errors.push(format!("缺少必需属性 {}", property.name));
                }
                Some(value) if !value.is_null() && !property.property_type.accepts(value) => {
                    errors.push(format!(
                        "属性 {} 的类型应为 {}",
                        property.name, property.property_type
                    ));
                }
                _ => {}
            }
        }

        if !self.allow_undefined {
            for key in object.keys() {
                if !self.properties.iter().any(|p| &p.name == key) {
                    errors.push(format!("不允许的属性 {}", key));
                }
            }
        }
        errors
    }

    /// 校验失败时返回请求无效错误
    pub fn validate_and_return_error(&self, value: &Value) -> ApplicationResult<()> {
        let errors = self.validate(value);
        if errors.is_empty() {
            return Ok(());
        }
        Err(InvocationError::bad_request("INVALID_DATA", errors.join("; ")).into())
    }
}

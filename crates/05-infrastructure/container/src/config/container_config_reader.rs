//! 容器配置文件读取

use super::ContainerConfig;
use once_cell::sync::Lazy;
use pip_services_commons::{trace_id_of, ConfigError, ConfigParams, ConfigResult, Context};
use regex::{Captures, Regex};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

static PARAMETER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([\w.\-]+)\s*\}\}").expect("占位符正则无效"));

/// 容器配置读取器
///
/// 根据扩展名按 YAML（`.yml`、`.yaml`）或 JSON 解析文件，
/// 解析前用参数替换文本中的 `{{name}}` 占位符，找不到的参数替换为空串。
pub struct ContainerConfigReader;

impl ContainerConfigReader {
    /// 读取配置文件
    pub fn read_from_file(
        context: Option<&Context>,
        path: impl AsRef<Path>,
        parameters: Option<&ConfigParams>,
    ) -> ConfigResult<ContainerConfig> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        debug!(trace_id = %trace_id_of(context), "读取容器配置: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let content = Self::parameterize(&content, parameters);

        let value = if Self::is_yaml(path) {
            Self::parse_yaml(&content)?
        } else {
            Self::parse_json(&content)?
        };
        ContainerConfig::from_value(&value)
    }

    /// 替换文本中的参数占位符
    pub fn parameterize(content: &str, parameters: Option<&ConfigParams>) -> String {
        PARAMETER_PATTERN
            .replace_all(content, |captures: &Captures<'_>| {
                parameters
                    .and_then(|p| p.get(&captures[1]))
                    .unwrap_or_default()
                    .to_string()
            })
            .into_owned()
    }

    pub fn parse_json(content: &str) -> ConfigResult<Value> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError { source: Box::new(e) })
    }

    pub fn parse_yaml(content: &str) -> ConfigResult<Value> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError { source: Box::new(e) })
    }

    fn is_yaml(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
    }
}

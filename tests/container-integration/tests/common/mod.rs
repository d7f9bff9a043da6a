//! 集成测试共用的示例组件

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::RwLock;
use pip_services_commons::{
    ApplicationResult, Closable, Component, ConfigParams, Configurable, Context, Descriptor,
    DependencyResolver, InvocationError, Locator, Openable, Referenceable, References,
    Unreferenceable,
};
use pip_services_components::ComponentFactory;
use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};
use tempfile::{Builder, NamedTempFile};

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志系统（只初始化一次）
pub fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .try_init()
            .ok();
    });
}

/// 写入临时 YAML 配置文件
pub fn write_config(content: &str) -> anyhow::Result<NamedTempFile> {
    let mut file = Builder::new().suffix(".yml").tempfile()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

pub fn persistence_descriptor() -> Locator {
    Descriptor::new("sample", "persistence", "memory", "*", "1.0").into()
}

pub fn controller_descriptor() -> Locator {
    Descriptor::new("sample", "controller", "default", "*", "1.0").into()
}

/// 内存中的键值存储
#[derive(Component, Default)]
#[component(configurable, openable)]
pub struct DummyPersistence {
    max_items: RwLock<i64>,
    items: RwLock<HashMap<String, String>>,
    opened: AtomicBool,
}

impl DummyPersistence {
    pub fn max_items(&self) -> i64 {
        *self.max_items.read()
    }

    pub fn set(&self, key: &str, value: &str) -> ApplicationResult<()> {
        let mut items = self.items.write();
        if items.len() as i64 >= self.max_items() && !items.contains_key(key) {
            return Err(InvocationError::Conflict {
                code: "TOO_MANY_ITEMS".to_string(),
                message: format!("最多保存 {} 项", self.max_items()),
            }
            .into());
        }
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.items.read().get(key).cloned()
    }
}

impl Configurable for DummyPersistence {
    fn configure(&self, config: &ConfigParams) -> ApplicationResult<()> {
        *self.max_items.write() = config.get_as_integer_with_default("max_items", 100);
        Ok(())
    }
}

#[async_trait]
impl Closable for DummyPersistence {
    async fn close(&self, _context: Option<&Context>) -> ApplicationResult<()> {
        self.items.write().clear();
        self.opened.store(false, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl Openable for DummyPersistence {
    fn is_open(&self) -> bool {
        self.opened.load(Ordering::SeqCst)
    }

    async fn open(&self, _context: Option<&Context>) -> ApplicationResult<()> {
        self.opened.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// 通过命名依赖使用存储的控制器
#[derive(Component)]
#[component(configurable, referenceable, unreferenceable, openable)]
pub struct DummyController {
    message: RwLock<String>,
    dependencies: DependencyResolver,
    persistence: RwLock<Option<Arc<DummyPersistence>>>,
    opened: AtomicBool,
}

impl Default for DummyController {
    fn default() -> Self {
        Self {
            message: RwLock::new(String::new()),
            dependencies: DependencyResolver::from_tuples([(
                "persistence",
                Descriptor::new("sample", "persistence", "*", "*", "1.0").into(),
            )]),
            persistence: RwLock::new(None),
            opened: AtomicBool::new(false),
        }
    }
}

impl DummyController {
    pub fn message(&self) -> String {
        self.message.read().clone()
    }

    pub fn persistence(&self) -> Option<Arc<DummyPersistence>> {
        self.persistence.read().clone()
    }

    /// 保存一项并返回问候语
    pub fn greet(&self, name: &str) -> ApplicationResult<String> {
        if let Some(persistence) = self.persistence() {
            persistence.set(name, &self.message())?;
        }
        Ok(format!("{}, {}", self.message(), name))
    }
}

impl Configurable for DummyController {
    fn configure(&self, config: &ConfigParams) -> ApplicationResult<()> {
        *self.message.write() = config.get_as_string_with_default("message", "你好");
        self.dependencies.configure(config);
        Ok(())
    }
}

#[async_trait]
impl Referenceable for DummyController {
    async fn set_references(&self, references: Arc<dyn References>) -> ApplicationResult<()> {
        self.dependencies.set_references(references);
        let persistence = self
            .dependencies
            .get_one_required_as::<DummyPersistence>("persistence")
            .await?;
        *self.persistence.write() = Some(persistence);
        Ok(())
    }
}

#[async_trait]
impl Unreferenceable for DummyController {
    async fn unset_references(&self) -> ApplicationResult<()> {
        self.dependencies.unset_references();
        *self.persistence.write() = None;
        Ok(())
    }
}

#[async_trait]
impl Closable for DummyController {
    async fn close(&self, _context: Option<&Context>) -> ApplicationResult<()> {
        self.opened.store(false, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl Openable for DummyController {
    fn is_open(&self) -> bool {
        self.opened.load(Ordering::SeqCst)
    }

    async fn open(&self, _context: Option<&Context>) -> ApplicationResult<()> {
        self.opened.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// 创建示例组件的工厂
pub fn sample_factory() -> Arc<dyn Component> {
    let factory = ComponentFactory::new();
    factory.register_as_type::<DummyPersistence>(persistence_descriptor());
    factory.register_as_type::<DummyController>(controller_descriptor());
    Arc::new(factory)
}

/// 示例服务的配置，`{{MESSAGE}}` 与 `{{LOG_LEVEL}}` 由参数替换
pub const SAMPLE_CONFIG: &str = r#"---
- descriptor: "pip-services:context-info:default:default:1.0"
  name: "sample"
  description: "示例服务"

- descriptor: "pip-services:logger:console:default:1.0"
  level: "{{LOG_LEVEL}}"

- descriptor: "pip-services:counters:log:default:1.0"

- descriptor: "sample:persistence:memory:default:1.0"
  max_items: 2

- descriptor: "sample:controller:default:default:1.0"
  message: "{{ MESSAGE }}"
"#;

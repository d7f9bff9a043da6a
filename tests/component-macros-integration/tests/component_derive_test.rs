//! 组件派生宏集成测试

use async_trait::async_trait;
use parking_lot::RwLock;
use pip_services_commons::{
    downcast_component, ApplicationResult, Closable, Closer, Component, ConfigParams, Configurable,
    Context, Openable, Opener, Referenceable, Referencer, ReferenceSet, References,
    Unreferenceable,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// 具备全部生命周期能力的测试服务
#[derive(Component, Default)]
#[component(configurable, referenceable, unreferenceable, openable)]
struct FullService {
    message: RwLock<String>,
    linked: AtomicBool,
    opened: AtomicBool,
}

impl Configurable for FullService {
    fn configure(&self, config: &ConfigParams) -> ApplicationResult<()> {
        *self.message.write() = config.get_as_string_with_default("message", "");
        Ok(())
    }
}

#[async_trait]
impl Referenceable for FullService {
    async fn set_references(&self, _references: Arc<dyn References>) -> ApplicationResult<()> {
        self.linked.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl Unreferenceable for FullService {
    async fn unset_references(&self) -> ApplicationResult<()> {
        self.linked.store(false, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl Closable for FullService {
    async fn close(&self, _context: Option<&Context>) -> ApplicationResult<()> {
        self.opened.store(false, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl Openable for FullService {
    fn is_open(&self) -> bool {
        self.opened.load(Ordering::SeqCst)
    }

    async fn open(&self, _context: Option<&Context>) -> ApplicationResult<()> {
        self.opened.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// 只能关闭的测试组件
#[derive(Component, Default)]
#[component(closable)]
struct CloseOnly {
    close_calls: AtomicUsize,
}

#[async_trait]
impl Closable for CloseOnly {
    async fn close(&self, _context: Option<&Context>) -> ApplicationResult<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// 没有任何能力的组件
#[derive(Component)]
struct Passive;

#[test]
fn test_listed_capabilities_are_exposed() {
    let service = FullService::default();

    assert!(service.as_configurable().is_some());
    assert!(service.as_referenceable().is_some());
    assert!(service.as_unreferenceable().is_some());
    assert!(service.as_openable().is_some());
    // 可打开意味着可关闭
    assert!(service.as_closable().is_some());
    assert!(service.as_factory().is_none());
    assert!(service.as_logger().is_none());
}

#[test]
fn test_unlisted_capabilities_are_hidden() {
    let passive = Passive;
    assert!(passive.as_configurable().is_none());
    assert!(passive.as_closable().is_none());

    let close_only = CloseOnly::default();
    assert!(close_only.as_closable().is_some());
    assert!(close_only.as_openable().is_none());
}

#[test]
fn test_configure_through_accessor() {
    let component: Arc<dyn Component> = Arc::new(FullService::default());

    component
        .as_configurable()
        .unwrap()
        .configure(&ConfigParams::from_string("message=hello"))
        .unwrap();

    let service = downcast_component::<FullService>(component).unwrap();
    assert_eq!(*service.message.read(), "hello");
}

#[tokio::test]
async fn test_lifecycle_helpers_use_accessors() {
    let service = Arc::new(FullService::default());
    let close_only = Arc::new(CloseOnly::default());
    let components: Vec<Arc<dyn Component>> = vec![
        service.clone() as Arc<dyn Component>,
        close_only.clone() as Arc<dyn Component>,
        Arc::new(Passive) as Arc<dyn Component>,
    ];
    let references: Arc<dyn References> = Arc::new(ReferenceSet::new());

    Referencer::set_references(&references, &components).await.unwrap();
    Opener::open(None, &components).await.unwrap();
    assert!(service.linked.load(Ordering::SeqCst));
    assert!(Opener::is_open(&components));

    Closer::close(None, &components).await.unwrap();
    Referencer::unset_references(&components).await.unwrap();
    assert!(!service.is_open());
    assert!(!service.linked.load(Ordering::SeqCst));
    assert_eq!(close_only.close_calls.load(Ordering::SeqCst), 1);
}

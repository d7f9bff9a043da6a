//! 自动运行装饰器

use async_trait::async_trait;
use pip_services_commons::{
    ApplicationResult, Closer, Component, Context, Locator, Opener, References,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// 自动运行装饰器
///
/// 打开与关闭都按登记顺序进行，关闭顺序不是打开顺序的逆序。
/// 打开期间新加入的组件立即打开，被删除的组件立即关闭。
pub struct RunReferences {
    next: Arc<dyn References>,
    opened: AtomicBool,
}

impl RunReferences {
    pub fn new(next: Arc<dyn References>) -> Self {
        Self {
            next,
            opened: AtomicBool::new(false),
        }
    }

    pub fn is_open(&self) -> bool {
        self.opened.load(Ordering::SeqCst)
    }

    /// 依次打开所有可打开组件，第一个错误即中止
    pub async fn open(&self, context: Option<&Context>) -> ApplicationResult<()> {
        if self.opened.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let components = self.next.get_all();
        debug!("打开 {} 个组件", components.len());
        Opener::open(context, &components).await
    }

    /// 依次关闭所有可关闭组件，失败不中断，错误汇总返回
    pub async fn close(&self, context: Option<&Context>) -> ApplicationResult<()> {
        if !self.opened.swap(false, Ordering::SeqCst) {
            return Ok(());
        }

        let components = self.next.get_all();
        debug!("关闭 {} 个组件", components.len());
        Closer::close(context, &components).await
    }
}

#[async_trait]
impl References for RunReferences {
    async fn put(&self, locator: Locator, component: Arc<dyn Component>) -> ApplicationResult<()> {
        self.next.put(locator, component.clone()).await?;
        if self.is_open() {
            Opener::open_one(None, &component).await?;
        }
        Ok(())
    }

    async fn remove(&self, locator: &Locator) -> ApplicationResult<Option<Arc<dyn Component>>> {
        let removed = self.next.remove(locator).await?;
        if let (true, Some(component)) = (self.is_open(), &removed) {
            Closer::close_one(None, component).await?;
        }
        Ok(removed)
    }

    async fn remove_all(&self, locator: &Locator) -> ApplicationResult<Vec<Arc<dyn Component>>> {
        let removed = self.next.remove_all(locator).await?;
        if self.is_open() {
            Closer::close(None, &removed).await?;
        }
        Ok(removed)
    }

    fn get_all_locators(&self) -> Vec<Locator> {
        self.next.get_all_locators()
    }

    fn get_all(&self) -> Vec<Arc<dyn Component>> {
        self.next.get_all()
    }

    async fn find(
        &self,
        locator: &Locator,
        required: bool,
    ) -> ApplicationResult<Vec<Arc<dyn Component>>> {
        self.next.find(locator, required).await
    }
}

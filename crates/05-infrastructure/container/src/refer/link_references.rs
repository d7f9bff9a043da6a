//! 自动链接装饰器

use async_trait::async_trait;
use pip_services_commons::{
    ApplicationResult, Component, Context, Locator, ReferenceError, Referencer, References,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tracing::debug;

/// 自动链接装饰器
///
/// 打开后把最外层集合推送给每个可引用组件；
/// 打开期间新加入的组件立即链接，被删除的组件立即解除链接。
pub struct LinkReferences {
    next: Arc<dyn References>,
    top: Weak<dyn References>,
    opened: AtomicBool,
}

impl LinkReferences {
    pub fn new(next: Arc<dyn References>, top: Weak<dyn References>) -> Self {
        Self {
            next,
            top,
            opened: AtomicBool::new(false),
        }
    }

    pub fn is_open(&self) -> bool {
        self.opened.load(Ordering::SeqCst)
    }

    fn top(&self) -> ApplicationResult<Arc<dyn References>> {
        self.top
            .upgrade()
            .ok_or_else(|| ReferenceError::Released.into())
    }

    /// 按登记顺序为所有组件设置引用，第一个错误即中止
    pub async fn open(&self, _context: Option<&Context>) -> ApplicationResult<()> {
        if self.opened.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let top = self.top()?;
        let components = self.next.get_all();
        debug!("链接 {} 个组件", components.len());
        Referencer::set_references(&top, &components).await
    }

    /// 按登记顺序解除所有组件的引用，失败不中断，错误汇总返回
    pub async fn close(&self, _context: Option<&Context>) -> ApplicationResult<()> {
        if !self.opened.swap(false, Ordering::SeqCst) {
            return Ok(());
        }

        let components = self.next.get_all();
        debug!("解除 {} 个组件的链接", components.len());
        Referencer::unset_references(&components).await
    }
}

#[async_trait]
impl References for LinkReferences {
    async fn put(&self, locator: Locator, component: Arc<dyn Component>) -> ApplicationResult<()> {
        self.next.put(locator, component.clone()).await?;
        if self.is_open() {
            let top = self.top()?;
            Referencer::set_references_for_one(&top, &component).await?;
        }
        Ok(())
    }

    async fn remove(&self, locator: &Locator) -> ApplicationResult<Option<Arc<dyn Component>>> {
        let removed = self.next.remove(locator).await?;
        if let (true, Some(component)) = (self.is_open(), &removed) {
            Referencer::unset_references_for_one(component).await?;
        }
        Ok(removed)
    }

    async fn remove_all(&self, locator: &Locator) -> ApplicationResult<Vec<Arc<dyn Component>>> {
        let removed = self.next.remove_all(locator).await?;
        if self.is_open() {
            Referencer::unset_references(&removed).await?;
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

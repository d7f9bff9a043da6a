//! 托管引用集合

use super::{BuildReferences, LinkReferences, RunReferences};
use async_trait::async_trait;
use pip_services_commons::{
    ApplicationError, ApplicationResult, Component, Context, Locator, ReferenceSet, References,
};
use std::sync::{Arc, Weak};
use tracing::debug;

/// 托管引用集合
///
/// 由内到外依次组合基础集合、自动创建、自动链接与自动运行装饰器。
/// 所有集合操作都转发给最外层的自动运行装饰器，各装饰器持有内层集合，
/// 并以弱引用观察本对象。
pub struct ManagedReferences {
    link: Arc<LinkReferences>,
    run: Arc<RunReferences>,
}

impl ManagedReferences {
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|weak: &Weak<Self>| {
            let top: Weak<dyn References> = weak.clone();
            let base: Arc<dyn References> = Arc::new(ReferenceSet::new());
            let build = Arc::new(BuildReferences::new(base, top.clone()));
            let link = Arc::new(LinkReferences::new(build, top));
            let run = Arc::new(RunReferences::new(link.clone()));
            Self { link, run }
        })
    }

    /// 链接与运行都已打开
    pub fn is_open(&self) -> bool {
        self.link.is_open() && self.run.is_open()
    }

    /// 先链接再运行，链接失败时不会尝试运行
    pub async fn open(&self, context: Option<&Context>) -> ApplicationResult<()> {
        if self.is_open() {
            return Ok(());
        }
        debug!("打开托管引用集合");
        self.link.open(context).await?;
        self.run.open(context).await
    }

    /// 先停止运行再解除链接
    ///
    /// 停止失败时仍会解除链接，两步的错误汇总返回
    pub async fn close(&self, context: Option<&Context>) -> ApplicationResult<()> {
        debug!("关闭托管引用集合");
        let mut errors = Vec::new();
        if let Err(e) = self.run.close(context).await {
            errors.push(e);
        }
        if let Err(e) = self.link.close(context).await {
            errors.push(e);
        }
        ApplicationError::aggregate(errors)
    }
}

#[async_trait]
impl References for ManagedReferences {
    async fn put(&self, locator: Locator, component: Arc<dyn Component>) -> ApplicationResult<()> {
        self.run.put(locator, component).await
    }

    async fn remove(&self, locator: &Locator) -> ApplicationResult<Option<Arc<dyn Component>>> {
        self.run.remove(locator).await
    }

    async fn remove_all(&self, locator: &Locator) -> ApplicationResult<Vec<Arc<dyn Component>>> {
        self.run.remove_all(locator).await
    }

    fn get_all_locators(&self) -> Vec<Locator> {
        self.run.get_all_locators()
    }

    fn get_all(&self) -> Vec<Arc<dyn Component>> {
        self.run.get_all()
    }

    async fn find(
        &self,
        locator: &Locator,
        required: bool,
    ) -> ApplicationResult<Vec<Arc<dyn Component>>> {
        self.run.find(locator, required).await
    }
}

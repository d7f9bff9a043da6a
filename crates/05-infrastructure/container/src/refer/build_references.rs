//! 自动创建装饰器

use async_trait::async_trait;
use pip_services_commons::{
    clarify_locator, component_type_name, ApplicationResult, Component, Locator, ReferenceError,
    References,
};
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

/// 自动创建装饰器
///
/// 必需查询找不到组件时，用引用集合中的工厂创建组件，
/// 并以补齐后的定位器通过最外层集合登记。
pub struct BuildReferences {
    next: Arc<dyn References>,
    top: Weak<dyn References>,
}

impl BuildReferences {
    pub fn new(next: Arc<dyn References>, top: Weak<dyn References>) -> Self {
        Self { next, top }
    }

    /// 依次尝试所有能处理该定位器的工厂
    ///
    /// 创建失败只记录警告，继续尝试下一个工厂
    fn create(&self, locator: &Locator) -> Option<(Locator, Arc<dyn Component>)> {
        for component in self.next.get_all() {
            let Some(factory) = component.as_factory() else {
                continue;
            };
            let Some(declared) = factory.can_create(locator) else {
                continue;
            };

            match factory.create(locator) {
                Ok(created) => return Some((clarify_locator(locator, &declared), created)),
                Err(e) => warn!(
                    "工厂 {} 创建组件失败: {}, 错误: {}",
                    component_type_name(&component),
                    locator,
                    e
                ),
            }
        }
        None
    }
}

#[async_trait]
impl References for BuildReferences {
    async fn put(&self, locator: Locator, component: Arc<dyn Component>) -> ApplicationResult<()> {
        self.next.put(locator, component).await
    }

    async fn remove(&self, locator: &Locator) -> ApplicationResult<Option<Arc<dyn Component>>> {
        self.next.remove(locator).await
    }

    async fn remove_all(&self, locator: &Locator) -> ApplicationResult<Vec<Arc<dyn Component>>> {
        self.next.remove_all(locator).await
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
        let found = self.next.find(locator, false).await?;
        if !found.is_empty() || !required {
            return Ok(found);
        }

        let Some((clarified, component)) = self.create(locator) else {
            return Err(ReferenceError::not_found(locator.clone()).into());
        };
        debug!("自动创建组件: {}", clarified);

        // 经由最外层集合登记，已打开时新组件同样会被链接和打开
        let Some(top) = self.top.upgrade() else {
            self.next.put(clarified, component.clone()).await?;
            return Ok(vec![component]);
        };
        if let Err(e) = top.put(clarified.clone(), component.clone()).await {
            // 链接或打开失败的组件不留在集合中
            warn!("自动创建的组件 {} 登记失败，撤销登记: {}", clarified, e);
            self.next.remove(&clarified).await?;
            return Err(e);
        }
        Ok(vec![component])
    }
}

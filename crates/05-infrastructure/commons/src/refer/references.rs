//! 引用集合接口

use super::Locator;
use crate::component::{downcast_component, Component};
use crate::errors::{ApplicationResult, ReferenceError};
use async_trait::async_trait;
use std::sync::Arc;

/// 引用集合
///
/// 定位器到组件实例的有序多重映射。同一定位器可以对应多个组件，
/// 查询结果按插入顺序返回。
#[async_trait]
pub trait References: Send + Sync {
    /// 添加组件，不做唯一性检查
    async fn put(&self, locator: Locator, component: Arc<dyn Component>) -> ApplicationResult<()>;

    /// 删除第一个匹配的组件
    async fn remove(&self, locator: &Locator) -> ApplicationResult<Option<Arc<dyn Component>>>;

    /// 删除所有匹配的组件
    async fn remove_all(&self, locator: &Locator) -> ApplicationResult<Vec<Arc<dyn Component>>>;

    /// 所有定位器，按插入顺序
    fn get_all_locators(&self) -> Vec<Locator>;

    /// 所有组件，按插入顺序
    fn get_all(&self) -> Vec<Arc<dyn Component>>;

    /// 查找所有匹配的组件
    ///
    /// `required` 为真且没有匹配时返回携带定位器的引用错误
    async fn find(
        &self,
        locator: &Locator,
        required: bool,
    ) -> ApplicationResult<Vec<Arc<dyn Component>>>;

    async fn get_optional(&self, locator: &Locator) -> Vec<Arc<dyn Component>> {
        self.find(locator, false).await.unwrap_or_default()
    }

    async fn get_required(&self, locator: &Locator) -> ApplicationResult<Vec<Arc<dyn Component>>> {
        self.find(locator, true).await
    }

    async fn get_one_optional(&self, locator: &Locator) -> Option<Arc<dyn Component>> {
        self.find(locator, false)
            .await
            .ok()
            .and_then(|components| components.into_iter().next())
    }

    async fn get_one_required(&self, locator: &Locator) -> ApplicationResult<Arc<dyn Component>> {
        self.find(locator, true)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ReferenceError::not_found(locator.clone()).into())
    }
}

/// 按具体类型取回组件的扩展方法
#[async_trait]
pub trait ReferencesExt: References {
    /// 取回一个必需组件并转换为具体类型
    async fn get_one_required_as<T: Component>(&self, locator: &Locator) -> ApplicationResult<Arc<T>> {
        let component = self.get_one_required(locator).await?;
        downcast_component::<T>(component).ok_or_else(|| {
            ReferenceError::UnexpectedType {
                locator: locator.clone(),
                expected: std::any::type_name::<T>(),
            }
            .into()
        })
    }

    /// 取回一个可选组件，类型不符时视为不存在
    async fn get_one_optional_as<T: Component>(&self, locator: &Locator) -> Option<Arc<T>> {
        self.get_optional(locator)
            .await
            .into_iter()
            .find_map(downcast_component::<T>)
    }

    /// 取回所有匹配且类型相符的组件
    async fn get_optional_as<T: Component>(&self, locator: &Locator) -> Vec<Arc<T>> {
        self.get_optional(locator)
            .await
            .into_iter()
            .filter_map(downcast_component::<T>)
            .collect()
    }
}

impl<R: References + ?Sized> ReferencesExt for R {}

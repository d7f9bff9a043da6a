//! 组件工厂能力

use super::Locator;
use crate::component::Component;
use crate::errors::ApplicationResult;
use std::sync::Arc;

/// 组件工厂
///
/// 工厂本身也是组件，保存在引用集合中，
/// 在必需查询找不到组件时被用来按定位器创建组件。
pub trait Factory: Send + Sync {
    /// 判断能否创建定位器对应的组件
    ///
    /// 返回工厂自己登记的定位器，可用于补齐查询中的通配字段
    fn can_create(&self, locator: &Locator) -> Option<Locator>;

    /// 创建组件
    fn create(&self, locator: &Locator) -> ApplicationResult<Arc<dyn Component>>;
}

/// 合并查询定位器与工厂登记的定位器
///
/// 描述符的每个字段优先取查询中的具体值，查询为通配符时取工厂的值；
/// 非描述符定位器保持查询原样。
pub fn clarify_locator(locator: &Locator, declared: &Locator) -> Locator {
    match (locator, declared) {
        (Locator::Descriptor(query), Locator::Descriptor(declared)) => {
            Locator::Descriptor(query.fill_from(declared))
        }
        _ => locator.clone(),
    }
}

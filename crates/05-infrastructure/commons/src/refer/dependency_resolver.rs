//! 命名依赖解析

use super::{Descriptor, Locator, References, ReferencesExt};
use crate::component::Component;
use crate::config::ConfigParams;
use crate::errors::{ApplicationResult, ReferenceError};
use parking_lot::RwLock;
use std::sync::Arc;

/// 命名依赖解析器
///
/// 组件在配置的 `dependencies` 分区中为依赖起名，例如
/// `dependencies.persistence=my-app:persistence:*:*:1.0`，
/// 然后在 `set_references` 之后按名称取回依赖。
#[derive(Default)]
pub struct DependencyResolver {
    dependencies: RwLock<Vec<(String, Locator)>>,
    references: RwLock<Option<Arc<dyn References>>>,
}

impl DependencyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用默认依赖创建
    pub fn from_tuples<I, N>(tuples: I) -> Self
    where
        I: IntoIterator<Item = (N, Locator)>,
        N: Into<String>,
    {
        let resolver = Self::new();
        for (name, locator) in tuples {
            resolver.put(name, locator);
        }
        resolver
    }

    /// 读取 `dependencies` 分区
    ///
    /// 值能解析为描述符时按描述符保存，否则作为字符串键保存
    pub fn configure(&self, config: &ConfigParams) {
        let dependencies = config.get_section("dependencies");
        for (name, value) in dependencies.iter() {
            let locator = value
                .parse::<Descriptor>()
                .map(Locator::from)
                .unwrap_or_else(|_| Locator::from(value));
            self.put(name, locator);
        }
    }

    /// 登记或替换命名依赖
    pub fn put(&self, name: impl Into<String>, locator: Locator) {
        let name = name.into();
        let mut dependencies = self.dependencies.write();
        match dependencies.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = locator,
            None => dependencies.push((name, locator)),
        }
    }

    /// 保存引用集合
    pub fn set_references(&self, references: Arc<dyn References>) {
        *self.references.write() = Some(references);
    }

    /// 清除引用集合
    pub fn unset_references(&self) {
        *self.references.write() = None;
    }

    fn locate(&self, name: &str) -> Result<Locator, ReferenceError> {
        self.dependencies
            .read()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, locator)| locator.clone())
            .ok_or_else(|| ReferenceError::not_found(name))
    }

    fn references(&self, locator: &Locator) -> Result<Arc<dyn References>, ReferenceError> {
        self.references
            .read()
            .clone()
            .ok_or_else(|| ReferenceError::not_found(locator.clone()))
    }

    pub async fn get_optional(&self, name: &str) -> Vec<Arc<dyn Component>> {
        let Ok(locator) = self.locate(name) else {
            return Vec::new();
        };
        match self.references(&locator) {
            Ok(references) => references.get_optional(&locator).await,
            Err(_) => Vec::new(),
        }
    }

    pub async fn get_required(&self, name: &str) -> ApplicationResult<Vec<Arc<dyn Component>>> {
        let locator = self.locate(name)?;
        let references = self.references(&locator)?;
        references.get_required(&locator).await
    }

    pub async fn get_one_optional(&self, name: &str) -> Option<Arc<dyn Component>> {
        self.get_optional(name).await.into_iter().next()
    }

    pub async fn get_one_required(&self, name: &str) -> ApplicationResult<Arc<dyn Component>> {
        let locator = self.locate(name)?;
        let references = self.references(&locator)?;
        references.get_one_required(&locator).await
    }

    /// 按名称取回必需依赖并转换为具体类型
    pub async fn get_one_required_as<T: Component>(&self, name: &str) -> ApplicationResult<Arc<T>> {
        let locator = self.locate(name)?;
        let references = self.references(&locator)?;
        references.get_one_required_as::<T>(&locator).await
    }
}

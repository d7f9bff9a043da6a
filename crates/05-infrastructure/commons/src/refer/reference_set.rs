//! 基础引用集合实现

use super::{Locator, Reference, References};
use crate::component::Component;
use crate::errors::{ApplicationResult, ReferenceError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

/// 基础引用集合
///
/// 只保存条目，不做自动创建、链接或打开
#[derive(Default)]
pub struct ReferenceSet {
    references: RwLock<Vec<Reference>>,
}

impl ReferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从定位器与组件对创建
    pub fn from_tuples(tuples: impl IntoIterator<Item = (Locator, Arc<dyn Component>)>) -> Self {
        let references = tuples
            .into_iter()
            .map(|(locator, component)| Reference::new(locator, component))
            .collect();
        Self {
            references: RwLock::new(references),
        }
    }

    pub fn len(&self) -> usize {
        self.references.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.read().is_empty()
    }

    /// 同步添加
    pub fn insert(&self, locator: Locator, component: Arc<dyn Component>) {
        self.references.write().push(Reference::new(locator, component));
    }
}

#[async_trait]
impl References for ReferenceSet {
    async fn put(&self, locator: Locator, component: Arc<dyn Component>) -> ApplicationResult<()> {
        self.insert(locator, component);
        Ok(())
    }

    async fn remove(&self, locator: &Locator) -> ApplicationResult<Option<Arc<dyn Component>>> {
        let mut references = self.references.write();
        let removed = references
            .iter()
            .position(|r| r.matches(locator))
            .map(|index| references.remove(index).component().clone());
        Ok(removed)
    }

    async fn remove_all(&self, locator: &Locator) -> ApplicationResult<Vec<Arc<dyn Component>>> {
        let mut references = self.references.write();
        let mut removed = Vec::new();
        references.retain(|r| {
            if r.matches(locator) {
                removed.push(r.component().clone());
                false
            } else {
                true
            }
        });
        Ok(removed)
    }

    fn get_all_locators(&self) -> Vec<Locator> {
        self.references
            .read()
            .iter()
            .map(|r| r.locator().clone())
            .collect()
    }

    fn get_all(&self) -> Vec<Arc<dyn Component>> {
        self.references
            .read()
            .iter()
            .map(|r| r.component().clone())
            .collect()
    }

    async fn find(
        &self,
        locator: &Locator,
        required: bool,
    ) -> ApplicationResult<Vec<Arc<dyn Component>>> {
        let found: Vec<Arc<dyn Component>> = self
            .references
            .read()
            .iter()
            .filter(|r| r.matches(locator))
            .map(|r| r.component().clone())
            .collect();

        if required && found.is_empty() {
            return Err(ReferenceError::not_found(locator.clone()).into());
        }
        Ok(found)
    }
}

//! 可引用能力

use super::References;
use crate::component::{component_type_name, Component};
use crate::errors::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// 可引用能力
///
/// 组件在链接阶段收到完整的引用集合，从中取出自己的依赖
#[async_trait]
pub trait Referenceable: Send + Sync {
    async fn set_references(&self, references: Arc<dyn References>) -> ApplicationResult<()>;
}

/// 可解除引用能力
#[async_trait]
pub trait Unreferenceable: Send + Sync {
    async fn unset_references(&self) -> ApplicationResult<()>;
}

/// 批量设置与解除引用的辅助工具
pub struct Referencer;

impl Referencer {
    /// 为单个组件设置引用，不具备该能力的组件被跳过
    pub async fn set_references_for_one(
        references: &Arc<dyn References>,
        component: &Arc<dyn Component>,
    ) -> ApplicationResult<()> {
        match component.as_referenceable() {
            Some(referenceable) => referenceable.set_references(references.clone()).await,
            None => Ok(()),
        }
    }

    /// 按顺序为多个组件设置引用，第一个错误即中止
    pub async fn set_references(
        references: &Arc<dyn References>,
        components: &[Arc<dyn Component>],
    ) -> ApplicationResult<()> {
        for component in components {
            Self::set_references_for_one(references, component).await?;
        }
        Ok(())
    }

    /// 解除单个组件的引用
    pub async fn unset_references_for_one(component: &Arc<dyn Component>) -> ApplicationResult<()> {
        match component.as_unreferenceable() {
            Some(unreferenceable) => unreferenceable.unset_references().await,
            None => Ok(()),
        }
    }

    /// 按顺序解除多个组件的引用
    ///
    /// 某个组件失败不影响后续组件，所有错误最后汇总返回
    pub async fn unset_references(components: &[Arc<dyn Component>]) -> ApplicationResult<()> {
        let mut errors = Vec::new();
        for component in components {
            if let Err(e) = Self::unset_references_for_one(component).await {
                warn!("解除组件引用失败: {}, 错误: {}", component_type_name(component), e);
                errors.push(e);
            }
        }
        ApplicationError::aggregate(errors)
    }
}

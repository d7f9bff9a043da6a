//! 组件运行生命周期

use crate::component::{component_type_name, Component};
use crate::context::Context;
use crate::errors::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// 可关闭能力
///
/// `close` 必须能在组件从未打开或只打开了一部分时安全调用
#[async_trait]
pub trait Closable: Send + Sync {
    async fn close(&self, context: Option<&Context>) -> ApplicationResult<()>;
}

/// 可打开能力
#[async_trait]
pub trait Openable: Closable {
    fn is_open(&self) -> bool;

    async fn open(&self, context: Option<&Context>) -> ApplicationResult<()>;
}

/// 批量打开组件的辅助工具
pub struct Opener;

impl Opener {
    /// 不具备打开能力的组件视为已打开
    pub fn is_open_one(component: &Arc<dyn Component>) -> bool {
        component.as_openable().map_or(true, |o| o.is_open())
    }

    pub fn is_open(components: &[Arc<dyn Component>]) -> bool {
        components.iter().all(Self::is_open_one)
    }

    pub async fn open_one(
        context: Option<&Context>,
        component: &Arc<dyn Component>,
    ) -> ApplicationResult<()> {
        match component.as_openable() {
            Some(openable) => openable.open(context).await,
            None => Ok(()),
        }
    }

    /// 按顺序依次打开，第一个错误即中止
    pub async fn open(
        context: Option<&Context>,
        components: &[Arc<dyn Component>],
    ) -> ApplicationResult<()> {
        for component in components {
            Self::open_one(context, component).await?;
        }
        Ok(())
    }
}

/// 批量关闭组件的辅助工具
pub struct Closer;

impl Closer {
    pub async fn close_one(
        context: Option<&Context>,
        component: &Arc<dyn Component>,
    ) -> ApplicationResult<()> {
        match component.as_closable() {
            Some(closable) => closable.close(context).await,
            None => Ok(()),
        }
    }

    /// 按顺序依次关闭
    ///
    /// 某个组件关闭失败不影响后续组件，所有错误最后汇总返回
    pub async fn close(
        context: Option<&Context>,
        components: &[Arc<dyn Component>],
    ) -> ApplicationResult<()> {
        let mut errors = Vec::new();
        for component in components {
            if let Err(e) = Self::close_one(context, component).await {
                warn!("关闭组件失败: {}, 错误: {}", component_type_name(component), e);
                errors.push(e);
            }
        }
        ApplicationError::aggregate(errors)
    }
}

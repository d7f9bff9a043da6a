//! 控制反转容器

use crate::build::{DefaultContainerFactory, TypeRegistry, CONTAINER_FACTORY_DESCRIPTOR};
use crate::config::{ContainerConfig, ContainerConfigReader};
use crate::refer::ContainerReferences;
use async_trait::async_trait;
use parking_lot::RwLock;
use pip_services_commons::{
    downcast_component, ApplicationError, ApplicationResult, Closable, Component, ConfigParams,
    Configurable, Context, LifecycleError, Logger, Openable, References, ReferencesExt,
};
use pip_services_components::info::{ANY_CONTEXT_INFO, CONTEXT_INFO_DESCRIPTOR};
use pip_services_components::{CompositeLogger, ContextInfo, NullLogger};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// 容器生命周期钩子
///
/// 在组件登记完成后、打开之前调用 `set_references`，在关闭之前调用 `unset_references`
#[async_trait]
pub trait ContainerHooks: Send + Sync {
    async fn set_references(&self, _references: Arc<dyn References>) -> ApplicationResult<()> {
        Ok(())
    }

    async fn unset_references(&self) -> ApplicationResult<()> {
        Ok(())
    }
}

struct NoHooks;

impl ContainerHooks for NoHooks {}

/// 容器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Unconfigured,
    Configured,
    Opened,
    Closed,
}

/// 控制反转容器
///
/// 读取组件声明列表，打开时创建新的引用集合，按声明顺序创建、配置并登记组件，
/// 然后依次链接和打开所有组件。关闭后引用集合被丢弃，可以用同一配置再次打开。
#[derive(Component)]
#[component(configurable, openable)]
pub struct Container {
    logger: RwLock<Arc<dyn Logger>>,
    info: RwLock<Arc<ContextInfo>>,
    config: RwLock<Option<ContainerConfig>>,
    references: RwLock<Option<Arc<ContainerReferences>>>,
    state: RwLock<ContainerState>,
    factories: Arc<DefaultContainerFactory>,
    types: TypeRegistry,
    hooks: RwLock<Arc<dyn ContainerHooks>>,
}

impl Container {
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            logger: RwLock::new(Arc::new(NullLogger::new())),
            info: RwLock::new(Arc::new(ContextInfo::new(name, description))),
            config: RwLock::new(None),
            references: RwLock::new(None),
            state: RwLock::new(ContainerState::Unconfigured),
            factories: Arc::new(DefaultContainerFactory::new()),
            types: TypeRegistry::new(),
            hooks: RwLock::new(Arc::new(NoHooks)),
        }
    }

    pub fn set_hooks(&self, hooks: Arc<dyn ContainerHooks>) {
        *self.hooks.write() = hooks;
    }

    pub fn logger(&self) -> Arc<dyn Logger> {
        self.logger.read().clone()
    }

    pub fn set_logger(&self, logger: Arc<dyn Logger>) {
        *self.logger.write() = logger;
    }

    pub fn info(&self) -> Arc<ContextInfo> {
        self.info.read().clone()
    }

    pub fn state(&self) -> ContainerState {
        *self.state.read()
    }

    pub fn config(&self) -> Option<ContainerConfig> {
        self.config.read().clone()
    }

    /// 直接设置已解析的容器配置
    pub fn set_config(&self, config: ContainerConfig) {
        *self.config.write() = Some(config);
        if self.state() == ContainerState::Unconfigured {
            *self.state.write() = ContainerState::Configured;
        }
    }

    /// 从配置分区读取组件声明，不创建任何组件
    pub fn configure(&self, config: &ConfigParams) -> ApplicationResult<()> {
        let config = ContainerConfig::from_config(config)?;
        self.set_config(config);
        Ok(())
    }

    /// 从 JSON 或 YAML 文件读取组件声明
    pub fn read_config_from_file(
        &self,
        context: Option<&Context>,
        path: impl AsRef<Path>,
        parameters: Option<&ConfigParams>,
    ) -> ApplicationResult<()> {
        let config = ContainerConfigReader::read_from_file(context, path, parameters)?;
        self.set_config(config);
        Ok(())
    }

    /// 在默认工厂之外添加工厂，后添加的优先
    pub fn add_factory(&self, factory: Arc<dyn Component>) {
        self.factories.add(factory);
    }

    /// 登记以 `type` 声明的组件类型
    pub fn register_type<T>(&self, name: impl Into<String>)
    where
        T: Component + Default,
    {
        self.types.register_as_default::<T>(name);
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// 当前引用集合，未打开时为 `None`
    pub fn references(&self) -> Option<Arc<dyn References>> {
        self.references
            .read()
            .as_ref()
            .map(|references| references.managed())
    }

    pub fn is_open(&self) -> bool {
        self.references
            .read()
            .as_ref()
            .map_or(false, |references| references.is_open())
    }

    /// 打开容器
    ///
    /// 任一步骤失败时记录致命日志，关闭已经打开的部分，再返回原始错误
    pub async fn open(&self, context: Option<&Context>) -> ApplicationResult<()> {
        if self.references.read().is_some() {
            return Err(LifecycleError::AlreadyOpened {
                component: self.info().name(),
            }
            .into());
        }

        if let Err(e) = self.open_references(context).await {
            self.logger().fatal(context, Some(&e), "打开容器失败");
            if let Err(close_error) = self.close(context).await {
                debug!("打开失败后关闭容器出错: {}", close_error);
            }
            return Err(e);
        }

        // 改用所有已登记日志记录器的组合
        if let Some(references) = self.references() {
            let logger = CompositeLogger::from_references(&references).await;
            self.set_logger(Arc::new(logger));
        }

        *self.state.write() = ContainerState::Opened;
        let info = self.info();
        self.logger()
            .info(context, &format!("容器 {} 已启动", info.name()));
        Ok(())
    }

    async fn open_references(&self, context: Option<&Context>) -> ApplicationResult<()> {
        let config = self.config().unwrap_or_default();
        self.logger()
            .trace(context, &format!("正在启动容器 {}", self.info().name()));

        // 第一步：创建新的引用集合
        let references = Arc::new(ContainerReferences::new());
        *self.references.write() = Some(references.clone());

        // 第二步：配置中没有声明上下文信息时登记容器自带的
        let declares_info = config
            .components()
            .iter()
            .any(|component| component.locator().matches(&ANY_CONTEXT_INFO));
        if !declares_info {
            let info: Arc<dyn Component> = self.info();
            references
                .put(CONTEXT_INFO_DESCRIPTOR.clone().into(), info)
                .await?;
        }

        // 第三步：登记容器默认工厂
        let factories: Arc<dyn Component> = self.factories.clone();
        references
            .put(CONTAINER_FACTORY_DESCRIPTOR.clone().into(), factories)
            .await?;

        // 第四步：按声明创建并登记组件
        references.put_from_config(&config, &self.types).await?;
        debug!("已登记 {} 个组件", references.get_all().len());

        // 以类型声明的上下文信息取代容器自带的
        if !declares_info {
            let own = self.info();
            let declared = references.get_all().into_iter().find_map(|component| {
                downcast_component::<ContextInfo>(component).filter(|info| !Arc::ptr_eq(info, &own))
            });
            if let Some(info) = declared {
                references
                    .remove(&CONTEXT_INFO_DESCRIPTOR.clone().into())
                    .await?;
                *self.info.write() = info;
            }
        }

        // 第五步：调用钩子
        let hooks = self.hooks.read().clone();
        hooks.set_references(references.managed()).await?;

        // 第六步：重新取得上下文信息
        if let Some(info) = references
            .get_one_optional_as::<ContextInfo>(&ANY_CONTEXT_INFO)
            .await
        {
            *self.info.write() = info;
        }

        // 第七步：链接并打开所有组件
        references.open(context).await
    }

    /// 关闭容器
    ///
    /// 未打开时直接返回。关闭失败时所有组件仍然被尝试关闭，引用集合照常丢弃
    pub async fn close(&self, context: Option<&Context>) -> ApplicationResult<()> {
        let Some(references) = self.references.read().clone() else {
            return Ok(());
        };

        let logger = self.logger();
        let name = self.info().name();
        logger.trace(context, &format!("正在关闭容器 {}", name));

        let mut errors = Vec::new();
        let hooks = self.hooks.read().clone();
        if let Err(e) = hooks.unset_references().await {
            errors.push(e);
        }
        if let Err(e) = references.close(context).await {
            errors.push(e);
        }

        *self.references.write() = None;
        *self.state.write() = ContainerState::Closed;

        match ApplicationError::aggregate(errors) {
            Ok(()) => {
                logger.info(context, &format!("容器 {} 已关闭", name));
                Ok(())
            }
            Err(e) => {
                logger.error(context, Some(&e), &format!("关闭容器 {} 失败", name));
                Err(e)
            }
        }
    }
}

impl Configurable for Container {
    fn configure(&self, config: &ConfigParams) -> ApplicationResult<()> {
        Container::configure(self, config)
    }
}

#[async_trait]
impl Closable for Container {
    async fn close(&self, context: Option<&Context>) -> ApplicationResult<()> {
        Container::close(self, context).await
    }
}

#[async_trait]
impl Openable for Container {
    fn is_open(&self) -> bool {
        Container::is_open(self)
    }

    async fn open(&self, context: Option<&Context>) -> ApplicationResult<()> {
        Container::open(self, context).await
    }
}

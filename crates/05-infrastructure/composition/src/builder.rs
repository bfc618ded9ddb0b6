//! 装配体构建器

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use autowire_abstractions::{DefinitionRegistry, DependencyTargetSource, InstanceProvider};
use autowire_impl::InMemoryDefinitionRegistry;

use crate::assembly::{AssemblyTargetSource, AutowireAssembly};
use crate::chain::ResolverChainBuilder;
use crate::options::AutowireOptions;
use crate::selection::CandidateSelector;

/// 装配体构建器
///
/// 使用建造者模式组装完整的自动装配装配体：加载选项、绑定注册表与
/// 实例提供者、组合解析器链并回填目标解析源。
pub struct AutowireAssemblyBuilder {
    /// 自动装配选项
    options: AutowireOptions,
    /// 候选定义注册表
    registry: Option<Arc<dyn DefinitionRegistry>>,
    /// 实例提供者
    instance_provider: Option<Arc<dyn InstanceProvider>>,
    /// 是否启用日志初始化
    logging_enabled: bool,
    /// 日志配置
    logging_config: LoggingConfig,
}

impl AutowireAssemblyBuilder {
    /// 创建新的装配体构建器
    pub fn new() -> Self {
        Self {
            options: AutowireOptions::default(),
            registry: None,
            instance_provider: None,
            logging_enabled: false, // 默认不启用日志初始化
            logging_config: LoggingConfig::default(),
        }
    }

    /// 从 TOML 文件加载选项
    ///
    /// 整体替换当前选项；需要环境变量覆盖时在其后调用
    /// [`add_options_env_vars`](Self::add_options_env_vars)。
    pub fn add_options_toml<P: AsRef<Path>>(
        mut self,
        path: P,
    ) -> Result<Self, autowire_common::AutowireError> {
        let path = path.as_ref();
        info!("加载 TOML 选项文件: {}", path.display());
        self.options = AutowireOptions::from_toml_file(path)?;
        Ok(self)
    }

    /// 叠加环境变量选项
    pub fn add_options_env_vars<S: Into<String>>(mut self, prefix: S) -> Self {
        let prefix = prefix.into();
        info!("叠加环境变量选项，前缀: {}", prefix);
        self.options.merge_env(&prefix);
        self
    }

    /// 直接设定整组选项
    pub fn with_options(mut self, options: AutowireOptions) -> Self {
        self.options = options;
        self
    }

    /// 注册额外参与决策的限定符类别
    pub fn register_qualifier_kind(mut self, kind: impl Into<String>) -> Self {
        let kind = kind.into();
        debug!("注册限定符类别: {}", kind);
        self.options.qualifier_kinds.push(kind);
        self
    }

    /// 绑定候选定义注册表
    ///
    /// 未绑定时构建阶段会创建空的内存注册表。
    pub fn with_registry(mut self, registry: Arc<dyn DefinitionRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// 绑定实例提供者
    pub fn with_instance_provider(mut self, provider: Arc<dyn InstanceProvider>) -> Self {
        self.instance_provider = Some(provider);
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = config;
        self.logging_enabled = true; // 启用日志初始化
        self
    }

    /// 构建装配体实例
    pub fn build(self) -> autowire_common::AutowireResult<AutowireAssembly> {
        info!("开始构建自动装配装配体");

        // 只有在明确配置了日志时才初始化日志
        // 避免在测试环境中重复初始化
        if self.logging_enabled {
            self.initialize_logging()?;
        }

        self.options.validate()?;

        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(InMemoryDefinitionRegistry::new()));

        // 目标解析源先于解析器链创建，选择器在尾声回填
        let target_source = Arc::new(AssemblyTargetSource::new(self.instance_provider.clone()));
        let resolver = ResolverChainBuilder::new()
            .with_options(self.options)
            .with_target_source(Arc::clone(&target_source) as Arc<dyn DependencyTargetSource>)
            .build();

        let selector = Arc::new(CandidateSelector::new(
            Arc::clone(&registry),
            Arc::clone(&resolver),
        ));
        target_source.bind_selector(Arc::clone(&selector));

        let assembly =
            AutowireAssembly::new(registry, resolver, selector, self.instance_provider);

        info!("装配体构建完成");
        Ok(assembly)
    }

    /// 初始化日志系统
    fn initialize_logging(&self) -> autowire_common::AutowireResult<()> {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(self.logging_config.level)
            .with_target(self.logging_config.show_target);

        if self.logging_config.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| autowire_common::AutowireError::BuildFailed {
            message: format!("日志初始化失败: {}", e),
        })?;

        info!("日志系统初始化完成");
        Ok(())
    }
}

impl Default for AutowireAssemblyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: tracing::Level,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: true,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            show_target: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: false,
            json_format: true,
        }
    }
}

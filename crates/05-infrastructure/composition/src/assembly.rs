//! 自动装配装配体
//!
//! 把解析器链、注册表与选择器组合为统一门面，供容器的解析循环调用。

use std::any::Any;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use autowire_abstractions::{
    AutowireCandidateResolver, DefinitionRegistry, DependencyTargetSource, InstanceProvider,
    LazyDependencyHandle,
};
use autowire_common::{
    CandidateHolder, DependencyDescriptor, DependencyError, DependencyResult, SelectionResult,
};

use crate::builder::AutowireAssemblyBuilder;
use crate::selection::{CandidateSelector, SelectionOutcome};

/// 注入点的解析结论
#[derive(Debug)]
pub enum DependencyResolution {
    /// 注入点以延迟句柄满足，真实解析推迟到首次访问
    Deferred(LazyDependencyHandle),
    /// 已选出唯一候选
    Selected(CandidateHolder),
    /// 描述符声明了默认值表达式，由容器求值
    DefaultValue(String),
    /// 非必需注入点无法确定候选，跳过注入
    Skipped,
}

/// 自动装配装配体
///
/// 系统的核心门面实例：持有构建完成的解析器链、候选定义注册表与
/// 候选选择器，并维护解析统计信息。构建完成后不可变，可跨线程共享。
pub struct AutowireAssembly {
    /// 候选定义注册表
    registry: Arc<dyn DefinitionRegistry>,
    /// 解析器链
    resolver: Arc<dyn AutowireCandidateResolver>,
    /// 候选选择器
    selector: Arc<CandidateSelector>,
    /// 实例提供者
    instance_provider: Option<Arc<dyn InstanceProvider>>,
    /// 统计信息
    metrics: RwLock<AssemblyMetrics>,
}

impl AutowireAssembly {
    /// 创建装配体构建器
    pub fn builder() -> AutowireAssemblyBuilder {
        AutowireAssemblyBuilder::new()
    }

    /// 内部构造函数
    pub(crate) fn new(
        registry: Arc<dyn DefinitionRegistry>,
        resolver: Arc<dyn AutowireCandidateResolver>,
        selector: Arc<CandidateSelector>,
        instance_provider: Option<Arc<dyn InstanceProvider>>,
    ) -> Self {
        let metrics = AssemblyMetrics {
            built_at: Some(chrono::Utc::now()),
            registered_candidates_count: registry.candidate_keys().len(),
            ..AssemblyMetrics::default()
        };
        Self {
            registry,
            resolver,
            selector,
            instance_provider,
            metrics: RwLock::new(metrics),
        }
    }

    /// 为注入点给出解析结论
    ///
    /// 懒解析句柄优先于立即选型；其余路径执行完整的默认值短路、候选
    /// 收窄与歧义仲裁。
    pub fn resolve_injection_point(
        &self,
        descriptor: &DependencyDescriptor,
    ) -> SelectionResult<DependencyResolution> {
        if let Some(handle) = self
            .resolver
            .lazy_resolution_handle(descriptor, descriptor.containing_component())
        {
            debug!(
                descriptor = %descriptor,
                handle_id = %handle.handle_id(),
                "注入点以延迟句柄满足"
            );
            self.metrics.write().deferred_count += 1;
            return Ok(DependencyResolution::Deferred(handle));
        }

        let outcome = self.selector.select(descriptor)?;
        self.metrics.write().resolution_count += 1;
        Ok(match outcome {
            SelectionOutcome::Selected(holder) => DependencyResolution::Selected(holder),
            SelectionOutcome::DefaultValue(expression) => {
                DependencyResolution::DefaultValue(expression)
            }
            SelectionOutcome::Skipped => DependencyResolution::Skipped,
        })
    }

    /// 为注入点解析出共享实例
    ///
    /// 在解析结论之上立即兑现实例：延迟句柄当场触发解析，跳过的注入
    /// 点返回 `None`，默认值表达式因需要容器求值而报错。
    pub fn resolve_instance(
        &self,
        descriptor: &DependencyDescriptor,
    ) -> DependencyResult<Option<Arc<dyn Any + Send + Sync>>> {
        match self.resolve_injection_point(descriptor)? {
            DependencyResolution::Deferred(handle) => handle.get().map(Some),
            DependencyResolution::Selected(holder) => self.instance_of(&holder).map(Some),
            DependencyResolution::DefaultValue(expression) => {
                Err(DependencyError::TargetResolutionFailed {
                    descriptor: descriptor.to_string(),
                    message: format!("默认值表达式需由容器求值: {}", expression),
                })
            }
            DependencyResolution::Skipped => Ok(None),
        }
    }

    /// 候选定义注册表
    pub fn registry(&self) -> &Arc<dyn DefinitionRegistry> {
        &self.registry
    }

    /// 解析器链
    pub fn resolver(&self) -> &Arc<dyn AutowireCandidateResolver> {
        &self.resolver
    }

    /// 候选选择器
    pub fn selector(&self) -> &Arc<CandidateSelector> {
        &self.selector
    }

    /// 获取统计信息快照
    pub fn metrics(&self) -> AssemblyMetrics {
        self.metrics.read().clone()
    }

    fn instance_of(&self, holder: &CandidateHolder) -> DependencyResult<Arc<dyn Any + Send + Sync>> {
        match &self.instance_provider {
            Some(provider) => provider.instance_of(holder),
            None => Err(DependencyError::InstanceUnavailable {
                key: holder.key().to_string(),
                message: "未配置实例提供者".to_string(),
            }),
        }
    }
}

/// 装配体侧的目标解析源
///
/// 延迟句柄首次访问时回调至此：执行完整选型并向实例提供者兑现实例。
/// 选择器在装配体构建尾声回填，构建完成前的访问以错误报告。
pub(crate) struct AssemblyTargetSource {
    selector: OnceCell<Arc<CandidateSelector>>,
    instance_provider: Option<Arc<dyn InstanceProvider>>,
}

impl AssemblyTargetSource {
    pub(crate) fn new(instance_provider: Option<Arc<dyn InstanceProvider>>) -> Self {
        Self {
            selector: OnceCell::new(),
            instance_provider,
        }
    }

    /// 回填选择器，仅首次调用生效
    pub(crate) fn bind_selector(&self, selector: Arc<CandidateSelector>) {
        if self.selector.set(selector).is_err() {
            debug!("目标解析源已绑定选择器，忽略重复绑定");
        }
    }
}

impl DependencyTargetSource for AssemblyTargetSource {
    fn resolve_target(
        &self,
        descriptor: &DependencyDescriptor,
        requesting_key: Option<&str>,
    ) -> DependencyResult<Arc<dyn Any + Send + Sync>> {
        let selector = self.selector.get().ok_or_else(|| {
            DependencyError::TargetResolutionFailed {
                descriptor: descriptor.to_string(),
                message: "目标解析源尚未绑定选择器".to_string(),
            }
        })?;

        // 延迟解析的描述符保留所属组件身份，自引用过滤照常生效
        let descriptor = match (descriptor.containing_component(), requesting_key) {
            (None, Some(owner)) => descriptor.clone().with_containing_component(owner),
            _ => descriptor.clone(),
        };

        match selector.select(&descriptor)? {
            SelectionOutcome::Selected(holder) => match &self.instance_provider {
                Some(provider) => provider.instance_of(&holder),
                None => Err(DependencyError::InstanceUnavailable {
                    key: holder.key().to_string(),
                    message: "未配置实例提供者".to_string(),
                }),
            },
            SelectionOutcome::DefaultValue(expression) => {
                Err(DependencyError::TargetResolutionFailed {
                    descriptor: descriptor.to_string(),
                    message: format!("默认值表达式需由容器求值: {}", expression),
                })
            }
            SelectionOutcome::Skipped => Err(DependencyError::TargetResolutionFailed {
                descriptor: descriptor.to_string(),
                message: "未找到可用候选".to_string(),
            }),
        }
    }
}

/// 装配体统计信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyMetrics {
    /// 构建完成时间
    pub built_at: Option<chrono::DateTime<chrono::Utc>>,
    /// 构建时已注册的候选数量
    pub registered_candidates_count: usize,
    /// 立即选型次数
    pub resolution_count: u64,
    /// 延迟句柄发放次数
    pub deferred_count: u64,
}

impl Default for AssemblyMetrics {
    fn default() -> Self {
        Self {
            built_at: None,
            registered_candidates_count: 0,
            resolution_count: 0,
            deferred_count: 0,
        }
    }
}

impl AssemblyMetrics {
    /// 构建以来经过的时间
    pub fn age(&self) -> Option<chrono::Duration> {
        self.built_at.map(|built_at| chrono::Utc::now() - built_at)
    }
}

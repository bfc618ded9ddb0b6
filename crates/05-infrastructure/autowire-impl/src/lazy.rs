//! 懒句柄候选解析器

use std::sync::Arc;

use autowire_abstractions::{
    AutowireCandidateResolver, DependencyTargetSource, LazyDependencyHandle,
};
use autowire_common::{CandidateHolder, DependencyDescriptor};

/// 懒句柄候选解析器
///
/// 解析器链的最外层：注入点携带懒解析标记时构造延迟解析句柄，其余
/// 问题全部委托内层。句柄构造只复制描述符并绑定解析源，不触碰注册表，
/// 也不提前挑选候选。
pub struct LazyHandleCandidateResolver {
    inner: Box<dyn AutowireCandidateResolver>,
    target_source: Arc<dyn DependencyTargetSource>,
}

impl LazyHandleCandidateResolver {
    /// 包装内层解析器并绑定目标解析源
    pub fn new(
        inner: Box<dyn AutowireCandidateResolver>,
        target_source: Arc<dyn DependencyTargetSource>,
    ) -> Self {
        Self {
            inner,
            target_source,
        }
    }
}

impl AutowireCandidateResolver for LazyHandleCandidateResolver {
    fn is_autowire_candidate(
        &self,
        candidate: &CandidateHolder,
        descriptor: &DependencyDescriptor,
    ) -> bool {
        self.inner.is_autowire_candidate(candidate, descriptor)
    }

    fn is_required(&self, descriptor: &DependencyDescriptor) -> bool {
        self.inner.is_required(descriptor)
    }

    fn has_qualifier(&self, descriptor: &DependencyDescriptor) -> bool {
        self.inner.has_qualifier(descriptor)
    }

    fn suggested_value(&self, descriptor: &DependencyDescriptor) -> Option<String> {
        self.inner.suggested_value(descriptor)
    }

    fn lazy_resolution_handle(
        &self,
        descriptor: &DependencyDescriptor,
        owner: Option<&str>,
    ) -> Option<LazyDependencyHandle> {
        if !descriptor.metadata().has_lazy() {
            return self.inner.lazy_resolution_handle(descriptor, owner);
        }
        if !descriptor.declared_type().is_resolvable() {
            tracing::warn!(
                descriptor = %descriptor,
                "注入点声明类型不可解析，忽略懒解析标记"
            );
            return self.inner.lazy_resolution_handle(descriptor, owner);
        }
        Some(LazyDependencyHandle::new(
            descriptor.clone(),
            owner.map(str::to_string),
            Arc::clone(&self.target_source),
        ))
    }
}

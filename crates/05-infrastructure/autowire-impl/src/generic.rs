//! 泛型感知候选解析器

use autowire_abstractions::{AutowireCandidateResolver, LazyDependencyHandle};
use autowire_common::{CandidateHolder, DependencyDescriptor};

/// 泛型感知候选解析器
///
/// 在内层结论之上按声明类型的泛型参数进一步收窄候选集。候选自身类型
/// 与声明原始类型同名时逐位比较泛型参数；候选以服务类型的身份提供时
/// 泛型信息不可得，按宽松语义放行。
pub struct GenericTypeAwareCandidateResolver {
    inner: Box<dyn AutowireCandidateResolver>,
}

impl GenericTypeAwareCandidateResolver {
    /// 包装内层解析器
    pub fn new(inner: Box<dyn AutowireCandidateResolver>) -> Self {
        Self { inner }
    }

    /// 判断候选与声明类型在泛型参数层面是否兼容
    fn generic_type_matches(candidate: &CandidateHolder, descriptor: &DependencyDescriptor) -> bool {
        let declared = descriptor.declared_type();
        // 声明侧不携带泛型参数时无需检查
        if declared.args().is_empty() {
            return true;
        }
        let candidate_spec = candidate.definition().type_spec();
        if candidate_spec.raw().same_type(declared.raw()) {
            return declared.compatible_with(candidate_spec);
        }
        // 服务类型列表只携带原始类型信息，无从比较泛型参数
        true
    }
}

impl AutowireCandidateResolver for GenericTypeAwareCandidateResolver {
    fn is_autowire_candidate(
        &self,
        candidate: &CandidateHolder,
        descriptor: &DependencyDescriptor,
    ) -> bool {
        if !self.inner.is_autowire_candidate(candidate, descriptor) {
            return false;
        }
        let matched = Self::generic_type_matches(candidate, descriptor);
        if !matched {
            tracing::debug!(
                candidate = candidate.key(),
                descriptor = %descriptor,
                "候选泛型参数与声明类型不兼容，予以排除"
            );
        }
        matched
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
        self.inner.lazy_resolution_handle(descriptor, owner)
    }
}

//! 限定符感知候选解析器

use std::collections::HashSet;

use autowire_abstractions::{AutowireCandidateResolver, LazyDependencyHandle};
use autowire_common::{
    CandidateHolder, DependencyDescriptor, QualifierSpec, QUALIFIER_KIND,
};

/// 限定符感知候选解析器
///
/// 识别描述符上的限定符标记并据此收窄候选集，同时结合可选标记与默认值
/// 标记修正注入点的实际必需性。只有已注册类别的限定符参与决策，其余
/// 类别保持中立。
pub struct QualifierAwareCandidateResolver {
    inner: Box<dyn AutowireCandidateResolver>,
    /// 参与决策的限定符类别
    qualifier_kinds: HashSet<String>,
}

impl QualifierAwareCandidateResolver {
    /// 包装内层解析器，默认只识别标准限定符类别
    pub fn new(inner: Box<dyn AutowireCandidateResolver>) -> Self {
        let mut qualifier_kinds = HashSet::new();
        qualifier_kinds.insert(QUALIFIER_KIND.to_string());
        Self {
            inner,
            qualifier_kinds,
        }
    }

    /// 注册额外参与决策的限定符类别
    pub fn with_qualifier_kind(mut self, kind: impl Into<String>) -> Self {
        self.qualifier_kinds.insert(kind.into());
        self
    }

    /// 已注册的限定符类别集合
    pub fn qualifier_kinds(&self) -> &HashSet<String> {
        &self.qualifier_kinds
    }

    /// 描述符上已识别类别的限定符是否全部被候选满足
    fn qualifiers_match(
        &self,
        candidate: &CandidateHolder,
        descriptor: &DependencyDescriptor,
    ) -> bool {
        descriptor
            .metadata()
            .qualifiers()
            .filter(|request| self.qualifier_kinds.contains(&request.kind))
            .all(|request| Self::candidate_satisfies(candidate, request))
    }

    /// 候选是否满足单个限定符请求
    ///
    /// 先按候选的同类别标记匹配：请求不带值时仅要求类别存在，带值时
    /// 要求值相等；均未命中时回退到请求值与候选键、别名的比对。
    fn candidate_satisfies(candidate: &CandidateHolder, request: &QualifierSpec) -> bool {
        for marker in candidate.definition().metadata().qualifiers() {
            if marker.kind != request.kind {
                continue;
            }
            match &request.value {
                None => return true,
                Some(value) => {
                    if marker.value.as_deref() == Some(value.as_str()) {
                        return true;
                    }
                }
            }
        }
        match &request.value {
            Some(value) => candidate.matches_key(value),
            None => false,
        }
    }

    /// 描述符是否携带已识别类别的限定符
    fn has_recognized_qualifier(&self, descriptor: &DependencyDescriptor) -> bool {
        descriptor
            .metadata()
            .qualifiers()
            .any(|request| self.qualifier_kinds.contains(&request.kind))
    }
}

impl AutowireCandidateResolver for QualifierAwareCandidateResolver {
    fn is_autowire_candidate(
        &self,
        candidate: &CandidateHolder,
        descriptor: &DependencyDescriptor,
    ) -> bool {
        if !self.inner.is_autowire_candidate(candidate, descriptor) {
            return false;
        }
        let matched = self.qualifiers_match(candidate, descriptor);
        if !matched {
            tracing::debug!(
                candidate = candidate.key(),
                descriptor = %descriptor,
                "候选不满足限定符要求，予以排除"
            );
        }
        matched
    }

    fn is_required(&self, descriptor: &DependencyDescriptor) -> bool {
        if !self.inner.is_required(descriptor) {
            return false;
        }
        // 可选标记与默认值标记都会取消注入点的必需性
        if descriptor.metadata().has_optional() {
            return false;
        }
        descriptor.metadata().first_default_value().is_none()
    }

    fn has_qualifier(&self, descriptor: &DependencyDescriptor) -> bool {
        self.inner.has_qualifier(descriptor) || self.has_recognized_qualifier(descriptor)
    }

    fn suggested_value(&self, descriptor: &DependencyDescriptor) -> Option<String> {
        descriptor
            .metadata()
            .first_default_value()
            .map(str::to_string)
            .or_else(|| self.inner.suggested_value(descriptor))
    }

    fn lazy_resolution_handle(
        &self,
        descriptor: &DependencyDescriptor,
        owner: Option<&str>,
    ) -> Option<LazyDependencyHandle> {
        self.inner.lazy_resolution_handle(descriptor, owner)
    }
}

//! 解析器链构建
//!
//! 按选项把各解析器装饰层从内到外组合成一条不可变的链。

use std::sync::Arc;

use tracing::{info, warn};

use autowire_abstractions::{AutowireCandidateResolver, DependencyTargetSource};
use autowire_impl::{
    GenericTypeAwareCandidateResolver, LazyHandleCandidateResolver,
    QualifierAwareCandidateResolver, SimpleCandidateResolver,
};

use crate::options::AutowireOptions;

/// 解析器链构建器
///
/// 标准链从内到外为基础、泛型感知、限定符感知与懒句柄四层；泛型感知
/// 与懒句柄两层可由选项关闭。构建结果共享、不可变。
pub struct ResolverChainBuilder {
    options: AutowireOptions,
    target_source: Option<Arc<dyn DependencyTargetSource>>,
}

impl ResolverChainBuilder {
    /// 创建默认选项的链构建器
    pub fn new() -> Self {
        Self {
            options: AutowireOptions::default(),
            target_source: None,
        }
    }

    /// 替换整组选项
    pub fn with_options(mut self, options: AutowireOptions) -> Self {
        self.options = options;
        self
    }

    /// 注册额外参与决策的限定符类别
    pub fn register_qualifier_kind(mut self, kind: impl Into<String>) -> Self {
        self.options.qualifier_kinds.push(kind.into());
        self
    }

    /// 绑定懒句柄使用的目标解析源
    pub fn with_target_source(mut self, target_source: Arc<dyn DependencyTargetSource>) -> Self {
        self.target_source = Some(target_source);
        self
    }

    /// 组合解析器链
    pub fn build(self) -> Arc<dyn AutowireCandidateResolver> {
        let mut layers = vec!["simple"];
        let mut resolver: Box<dyn AutowireCandidateResolver> =
            Box::new(SimpleCandidateResolver::new());

        if self.options.generics_matching {
            resolver = Box::new(GenericTypeAwareCandidateResolver::new(resolver));
            layers.push("generic");
        }

        let mut qualifier = QualifierAwareCandidateResolver::new(resolver);
        for kind in self.options.qualifier_kinds {
            qualifier = qualifier.with_qualifier_kind(kind);
        }
        resolver = Box::new(qualifier);
        layers.push("qualifier");

        if self.options.lazy_handles {
            match self.target_source {
                Some(target_source) => {
                    resolver = Box::new(LazyHandleCandidateResolver::new(resolver, target_source));
                    layers.push("lazy");
                }
                None => {
                    warn!("未绑定目标解析源，跳过懒句柄解析层");
                }
            }
        }

        info!("解析器链构建完成: {}", layers.join(" -> "));
        Arc::from(resolver)
    }
}

impl Default for ResolverChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

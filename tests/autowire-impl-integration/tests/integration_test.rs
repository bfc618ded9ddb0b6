//! autowire-impl crate 的集中集成测试
//!
//! 手工组装全量解析器链，验证各层协作时的收窄、必需性、建议值与
//! 懒句柄行为。

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use autowire_abstractions::{
    AutowireCandidateResolver, DefinitionRegistry, DependencyTargetSource,
};
use autowire_common::{
    CandidateDefinition, CandidateHolder, DependencyDescriptor, DependencyError, DependencyResult,
    InjectionPoint, MetadataMarker, QualifierSpec, TypeInfo, TypeSpec,
};
use autowire_impl::{
    GenericTypeAwareCandidateResolver, InMemoryDefinitionRegistry, LazyHandleCandidateResolver,
    QualifierAwareCandidateResolver, SimpleCandidateResolver,
};

/// 记录解析次数的测试解析源
#[derive(Default)]
struct CountingTargetSource {
    calls: AtomicUsize,
}

impl DependencyTargetSource for CountingTargetSource {
    fn resolve_target(
        &self,
        _descriptor: &DependencyDescriptor,
        _requesting_key: Option<&str>,
    ) -> DependencyResult<Arc<dyn Any + Send + Sync>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new("redis".to_string()))
    }
}

/// 首次解析失败、之后成功的测试解析源
#[derive(Default)]
struct FlakyTargetSource {
    calls: AtomicUsize,
}

impl DependencyTargetSource for FlakyTargetSource {
    fn resolve_target(
        &self,
        descriptor: &DependencyDescriptor,
        _requesting_key: Option<&str>,
    ) -> DependencyResult<Arc<dyn Any + Send + Sync>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call == 0 {
            Err(DependencyError::TargetResolutionFailed {
                descriptor: descriptor.to_string(),
                message: "后端暂不可用".to_string(),
            })
        } else {
            Ok(Arc::new("redis".to_string()))
        }
    }
}

/// 按全量层次手工组装解析器链
fn full_chain(target_source: Arc<dyn DependencyTargetSource>) -> LazyHandleCandidateResolver {
    let simple = Box::new(SimpleCandidateResolver::new());
    let generic = Box::new(GenericTypeAwareCandidateResolver::new(simple));
    let qualifier = Box::new(QualifierAwareCandidateResolver::new(generic));
    LazyHandleCandidateResolver::new(qualifier, target_source)
}

fn cache_descriptor() -> DependencyDescriptor {
    DependencyDescriptor::new(
        TypeSpec::from_name("CacheService"),
        InjectionPoint::field("cache"),
    )
}

fn cache_holder(key: &str) -> CandidateHolder {
    CandidateHolder::new(
        key,
        CandidateDefinition::new(TypeSpec::from_name("RedisCache"))
            .provides_type(TypeInfo::from_name("CacheService")),
    )
}

#[test]
fn test_full_chain_qualifier_narrowing() {
    let chain = full_chain(Arc::new(CountingTargetSource::default()));
    let descriptor =
        cache_descriptor().with_marker(MetadataMarker::Qualifier(QualifierSpec::named("primary")));

    let qualified = CandidateHolder::new(
        "cache_a",
        CandidateDefinition::new(TypeSpec::from_name("RedisCache"))
            .provides_type(TypeInfo::from_name("CacheService"))
            .with_marker(MetadataMarker::Qualifier(QualifierSpec::named("primary"))),
    );
    let unqualified = cache_holder("cache_b");

    assert!(chain.is_autowire_candidate(&qualified, &descriptor));
    assert!(!chain.is_autowire_candidate(&unqualified, &descriptor));
}

#[test]
fn test_rejection_is_monotonic_across_layers() {
    let descriptor = cache_descriptor();
    let opted_out = CandidateHolder::new(
        "cache_a",
        CandidateDefinition::new(TypeSpec::from_name("RedisCache"))
            .provides_type(TypeInfo::from_name("CacheService"))
            .with_autowire_candidate(false),
    );

    let simple = SimpleCandidateResolver::new();
    assert!(!simple.is_autowire_candidate(&opted_out, &descriptor));

    let generic = GenericTypeAwareCandidateResolver::new(Box::new(SimpleCandidateResolver::new()));
    assert!(!generic.is_autowire_candidate(&opted_out, &descriptor));

    let qualifier = QualifierAwareCandidateResolver::new(Box::new(
        GenericTypeAwareCandidateResolver::new(Box::new(SimpleCandidateResolver::new())),
    ));
    assert!(!qualifier.is_autowire_candidate(&opted_out, &descriptor));

    let chain = full_chain(Arc::new(CountingTargetSource::default()));
    assert!(!chain.is_autowire_candidate(&opted_out, &descriptor));
}

#[test]
fn test_generic_narrowing_through_full_chain() {
    let chain = full_chain(Arc::new(CountingTargetSource::default()));
    let descriptor = DependencyDescriptor::new(
        TypeSpec::from_name("Repository").with_arg(TypeSpec::from_name("User")),
        InjectionPoint::field("repository"),
    );

    let matching = CandidateHolder::new(
        "user_repository",
        CandidateDefinition::new(
            TypeSpec::from_name("Repository").with_arg(TypeSpec::from_name("User")),
        ),
    );
    let mismatched = CandidateHolder::new(
        "order_repository",
        CandidateDefinition::new(
            TypeSpec::from_name("Repository").with_arg(TypeSpec::from_name("Order")),
        ),
    );

    assert!(chain.is_autowire_candidate(&matching, &descriptor));
    assert!(!chain.is_autowire_candidate(&mismatched, &descriptor));
}

#[test]
fn test_requiredness_through_full_chain() {
    let chain = full_chain(Arc::new(CountingTargetSource::default()));

    assert!(chain.is_required(&cache_descriptor()));
    assert!(!chain.is_required(&cache_descriptor().with_required(false)));
    assert!(!chain.is_required(&cache_descriptor().with_marker(MetadataMarker::Optional)));
    assert!(!chain.is_required(&cache_descriptor().with_marker(
        MetadataMarker::DefaultValue {
            expression: "42".to_string(),
        }
    )));
}

#[test]
fn test_suggested_value_through_full_chain() {
    let chain = full_chain(Arc::new(CountingTargetSource::default()));

    assert_eq!(chain.suggested_value(&cache_descriptor()), None);
    assert_eq!(
        chain.suggested_value(&cache_descriptor().with_marker(MetadataMarker::DefaultValue {
            expression: "42".to_string(),
        })),
        Some("42".to_string())
    );
}

#[test]
fn test_custom_markers_are_inert() {
    let chain = full_chain(Arc::new(CountingTargetSource::default()));
    let descriptor = cache_descriptor().with_marker(MetadataMarker::Custom {
        kind: "audit".to_string(),
        value: None,
    });

    assert!(chain.is_autowire_candidate(&cache_holder("cache_a"), &descriptor));
    assert!(!chain.has_qualifier(&descriptor));
}

#[test]
fn test_handle_creation_does_not_resolve() {
    let source = Arc::new(CountingTargetSource::default());
    let chain = full_chain(Arc::clone(&source) as Arc<dyn DependencyTargetSource>);
    let descriptor = cache_descriptor().with_marker(MetadataMarker::Lazy);

    let handle = chain
        .lazy_resolution_handle(&descriptor, Some("order_service"))
        .expect("应产生懒句柄");

    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    assert!(!handle.is_resolved());
    assert_eq!(handle.owner(), Some("order_service"));
    assert_eq!(
        handle.descriptor().declared_type().raw().short_name(),
        "CacheService"
    );
}

#[test]
fn test_lazy_handle_resolves_once_across_threads() {
    let source = Arc::new(CountingTargetSource::default());
    let chain = full_chain(Arc::clone(&source) as Arc<dyn DependencyTargetSource>);
    let descriptor = cache_descriptor().with_marker(MetadataMarker::Lazy);
    let handle = Arc::new(
        chain
            .lazy_resolution_handle(&descriptor, None)
            .expect("应产生懒句柄"),
    );

    let barrier = Arc::new(Barrier::new(8));
    let mut workers = Vec::new();
    for _ in 0..8 {
        let handle = Arc::clone(&handle);
        let barrier = Arc::clone(&barrier);
        workers.push(thread::spawn(move || {
            barrier.wait();
            handle.get().expect("解析应成功")
        }));
    }

    let values: Vec<_> = workers
        .into_iter()
        .map(|worker| worker.join().expect("线程不应崩溃"))
        .collect();

    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    for value in &values[1..] {
        assert!(Arc::ptr_eq(&values[0], value));
    }
}

#[test]
fn test_lazy_handle_failure_is_not_cached() {
    let source = Arc::new(FlakyTargetSource::default());
    let chain = full_chain(Arc::clone(&source) as Arc<dyn DependencyTargetSource>);
    let descriptor = cache_descriptor().with_marker(MetadataMarker::Lazy);
    let handle = chain
        .lazy_resolution_handle(&descriptor, None)
        .expect("应产生懒句柄");

    assert!(handle.get().is_err());
    assert!(!handle.is_resolved());

    let typed = handle.get_typed::<String>().expect("重试应成功");
    assert_eq!(typed.as_str(), "redis");
    assert!(handle.is_resolved());
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);

    // 类型不匹配在解析成功之后报告，不会重新触发解析
    assert!(handle.get_typed::<u64>().is_err());
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_chain_decisions_are_deterministic() {
    let chain = full_chain(Arc::new(CountingTargetSource::default()));
    let descriptor =
        cache_descriptor().with_marker(MetadataMarker::Qualifier(QualifierSpec::named("primary")));
    let unqualified = cache_holder("cache_b");

    for _ in 0..3 {
        assert!(!chain.is_autowire_candidate(&unqualified, &descriptor));
        assert!(chain.is_required(&descriptor));
        assert_eq!(chain.suggested_value(&descriptor), None);
    }
}

#[test]
fn test_registry_key_and_alias_invariants() -> anyhow::Result<()> {
    let registry = InMemoryDefinitionRegistry::new();
    registry.register(cache_holder("redis_cache").with_alias("cache"))?;

    assert!(registry.contains("redis_cache"));
    let by_alias = registry.candidate("cache").expect("别名应可命中");
    assert_eq!(by_alias.key(), "redis_cache");

    // 重复键
    assert!(registry.register(cache_holder("redis_cache")).is_err());
    // 别名与既有键冲突
    assert!(registry
        .register(cache_holder("memory_cache").with_alias("redis_cache"))
        .is_err());
    // 不符合命名约定的键
    assert!(registry.register(cache_holder("Bad-Key")).is_err());

    assert_eq!(registry.len(), 1);
    Ok(())
}

#[test]
fn test_registry_lookup_by_type() -> anyhow::Result<()> {
    let registry = InMemoryDefinitionRegistry::new();
    registry.register(cache_holder("redis_cache"))?;
    registry.register(cache_holder("memory_cache"))?;
    registry.register(CandidateHolder::new(
        "order_service",
        CandidateDefinition::new(TypeSpec::from_name("OrderService")),
    ))?;

    let caches = registry.candidates_of_type(&TypeSpec::from_name("CacheService"));
    let keys: Vec<_> = caches.iter().map(|holder| holder.key()).collect();
    assert_eq!(keys, vec!["memory_cache", "redis_cache"]);

    let everything = registry.candidates_of_type(&TypeSpec::wildcard());
    assert_eq!(everything.len(), 3);
    Ok(())
}

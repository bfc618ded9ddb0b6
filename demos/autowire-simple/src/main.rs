//! 自动装配候选解析简化示例
//!
//! 演示如何注册候选定义、构建装配体并为注入点给出解析结论

use std::sync::Arc;

use autowire_common::{
    CandidateDefinition, CandidateHolder, DependencyDescriptor, InjectionPoint, MetadataMarker,
    QualifierSpec, TypeInfo, TypeSpec,
};
use autowire_composition::{AutowireAssembly, DependencyResolution};
use autowire_impl::InMemoryDefinitionRegistry;
use tracing::info;

/// 唯一候选与首选仲裁示例
pub fn candidate_selection_example() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Arc::new(InMemoryDefinitionRegistry::new());

    // 两个缓存实现提供同一服务类型，redis_cache 标记为首选
    registry.register(
        CandidateHolder::new(
            "redis_cache",
            CandidateDefinition::new(TypeSpec::from_name("RedisCache"))
                .provides_type(TypeInfo::from_name("CacheService"))
                .as_primary(),
        )
        .with_alias("cache"),
    )?;
    registry.register(CandidateHolder::new(
        "memory_cache",
        CandidateDefinition::new(TypeSpec::from_name("MemoryCache"))
            .provides_type(TypeInfo::from_name("CacheService")),
    ))?;

    let assembly = AutowireAssembly::builder()
        .with_registry(registry)
        .build()?;

    let descriptor = DependencyDescriptor::new(
        TypeSpec::from_name("CacheService"),
        InjectionPoint::field("cache"),
    );
    match assembly.resolve_injection_point(&descriptor)? {
        DependencyResolution::Selected(holder) => {
            println!("注入点 {} 选中候选: {}", descriptor, holder.key());
        }
        other => println!("解析结论: {:?}", other),
    }

    info!("候选选型示例完成");
    Ok(())
}

/// 限定符收窄示例
pub fn qualifier_example() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Arc::new(InMemoryDefinitionRegistry::new());
    registry.register(CandidateHolder::new(
        "east_gateway",
        CandidateDefinition::new(TypeSpec::from_name("EastGateway"))
            .provides_type(TypeInfo::from_name("GatewayService"))
            .with_marker(MetadataMarker::Qualifier(
                QualifierSpec::of_kind("region").with_value("east"),
            )),
    ))?;
    registry.register(CandidateHolder::new(
        "west_gateway",
        CandidateDefinition::new(TypeSpec::from_name("WestGateway"))
            .provides_type(TypeInfo::from_name("GatewayService"))
            .with_marker(MetadataMarker::Qualifier(
                QualifierSpec::of_kind("region").with_value("west"),
            )),
    ))?;

    // region 类别需要显式注册后才参与收窄
    let assembly = AutowireAssembly::builder()
        .register_qualifier_kind("region")
        .with_registry(registry)
        .build()?;

    let descriptor = DependencyDescriptor::new(
        TypeSpec::from_name("GatewayService"),
        InjectionPoint::field("gateway"),
    )
    .with_marker(MetadataMarker::Qualifier(
        QualifierSpec::of_kind("region").with_value("east"),
    ));
    match assembly.resolve_injection_point(&descriptor)? {
        DependencyResolution::Selected(holder) => {
            println!("region=east 收窄到候选: {}", holder.key());
        }
        other => println!("解析结论: {:?}", other),
    }
    Ok(())
}

/// 可选注入点与默认值示例
pub fn optional_and_default_example() -> Result<(), Box<dyn std::error::Error>> {
    // 空注册表也能构建装配体
    let assembly = AutowireAssembly::builder().build()?;

    let optional = DependencyDescriptor::new(
        TypeSpec::from_name("MetricsSink"),
        InjectionPoint::field("metrics"),
    )
    .with_marker(MetadataMarker::Optional);
    match assembly.resolve_injection_point(&optional)? {
        DependencyResolution::Skipped => println!("可选注入点无候选，跳过注入"),
        other => println!("解析结论: {:?}", other),
    }

    let defaulted = DependencyDescriptor::new(
        TypeSpec::from_name("u32"),
        InjectionPoint::constructor_parameter(0).with_parameter_name("max_retries"),
    )
    .with_marker(MetadataMarker::DefaultValue {
        expression: "42".to_string(),
    });
    match assembly.resolve_injection_point(&defaulted)? {
        DependencyResolution::DefaultValue(expression) => {
            println!("注入点以默认值表达式满足: {}", expression);
        }
        other => println!("解析结论: {:?}", other),
    }
    Ok(())
}

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== 候选选型示例 ===");
    candidate_selection_example()?;

    println!("\n=== 限定符收窄示例 ===");
    qualifier_example()?;

    println!("\n=== 可选与默认值示例 ===");
    optional_and_default_example()?;

    Ok(())
}

//! 自动装配进阶示例
//!
//! 演示标记宏注册、延迟句柄、实例提供者与跨任务共享装配体

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use autowire_abstractions::InstanceProvider;
use autowire_common::{
    CandidateDefinition, CandidateHolder, DependencyDescriptor, DependencyError, DependencyResult,
    InjectionPoint, MetadataMarker, QualifierSpec, TypeInfo, TypeSpec,
};
use autowire_composition::{
    primary, qualified, AutowireAssembly, DependencyResolution, LoggingConfig,
};
use autowire_impl::InMemoryDefinitionRegistry;
use tracing::info;

/// 标记为首选的缓存实现
#[qualified("primary")]
#[primary]
#[derive(Debug)]
pub struct RedisCache;

/// 未加标记的缓存实现
#[derive(Debug)]
pub struct MemoryCache;

/// 以键值映射兑现实例的提供者
struct DemoInstanceProvider {
    instances: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl DemoInstanceProvider {
    fn new() -> Self {
        let mut instances: HashMap<String, Arc<dyn Any + Send + Sync>> = HashMap::new();
        instances.insert("redis_cache".to_string(), Arc::new(RedisCache));
        instances.insert("memory_cache".to_string(), Arc::new(MemoryCache));
        Self { instances }
    }
}

impl InstanceProvider for DemoInstanceProvider {
    fn instance_of(
        &self,
        holder: &CandidateHolder,
    ) -> DependencyResult<Arc<dyn Any + Send + Sync>> {
        self.instances
            .get(holder.key())
            .map(Arc::clone)
            .ok_or_else(|| DependencyError::InstanceUnavailable {
                key: holder.key().to_string(),
                message: "示例提供者中无此实例".to_string(),
            })
    }
}

fn cache_descriptor() -> DependencyDescriptor {
    DependencyDescriptor::new(
        TypeSpec::from_name("CacheService"),
        InjectionPoint::field("cache"),
    )
}

/// 组装带日志、实例提供者与宏登记候选的装配体
fn build_assembly() -> Result<AutowireAssembly, Box<dyn std::error::Error>> {
    let registry = Arc::new(InMemoryDefinitionRegistry::new());

    // register_type 合并宏登记的类型级标记，键按命名约定生成
    let redis = registry.register_type::<RedisCache>(
        CandidateDefinition::of::<RedisCache>().provides_type(TypeInfo::from_name("CacheService")),
    )?;
    info!(
        "已注册候选: {} (首选: {})",
        redis.key(),
        redis.definition().is_primary()
    );
    registry.register_type::<MemoryCache>(
        CandidateDefinition::of::<MemoryCache>().provides_type(TypeInfo::from_name("CacheService")),
    )?;

    let assembly = AutowireAssembly::builder()
        .with_logging(LoggingConfig::development())
        .with_registry(registry)
        .with_instance_provider(Arc::new(DemoInstanceProvider::new()))
        .build()?;
    Ok(assembly)
}

/// 宏登记的首选标志与限定符参与仲裁
fn marker_selection_example(assembly: &AutowireAssembly) -> Result<(), Box<dyn std::error::Error>> {
    let descriptor = cache_descriptor();
    match assembly.resolve_injection_point(&descriptor)? {
        DependencyResolution::Selected(holder) => {
            println!("首选标志仲裁选中: {}", holder.key());
        }
        other => println!("解析结论: {:?}", other),
    }

    let qualified_descriptor =
        cache_descriptor().with_marker(MetadataMarker::Qualifier(QualifierSpec::named("primary")));
    match assembly.resolve_injection_point(&qualified_descriptor)? {
        DependencyResolution::Selected(holder) => {
            println!("限定符收窄选中: {}", holder.key());
        }
        other => println!("解析结论: {:?}", other),
    }

    let instance = assembly
        .resolve_instance(&descriptor)?
        .ok_or("注入点被跳过")?;
    let cache = instance.downcast::<RedisCache>().map_err(|_| "类型不匹配")?;
    println!("立即兑现实例: {:?}", cache);
    Ok(())
}

/// 延迟句柄在首次访问时解析并缓存
fn lazy_handle_example(assembly: &AutowireAssembly) -> Result<(), Box<dyn std::error::Error>> {
    let descriptor = cache_descriptor().with_marker(MetadataMarker::Lazy);
    match assembly.resolve_injection_point(&descriptor)? {
        DependencyResolution::Deferred(handle) => {
            println!(
                "发放延迟句柄: {} (已解析: {})",
                handle.handle_id(),
                handle.is_resolved()
            );
            let cache = handle.get_typed::<RedisCache>()?;
            println!("首次访问兑现: {:?} (已解析: {})", cache, handle.is_resolved());
        }
        other => println!("解析结论: {:?}", other),
    }
    Ok(())
}

/// 多个阻塞任务共享同一装配体
async fn concurrent_example(
    assembly: Arc<AutowireAssembly>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut tasks = Vec::new();
    for worker in 0..4 {
        let assembly = Arc::clone(&assembly);
        tasks.push(tokio::task::spawn_blocking(move || {
            let resolution = assembly.resolve_injection_point(&cache_descriptor());
            (worker, resolution)
        }));
    }

    for task in tasks {
        let (worker, resolution) = task.await?;
        match resolution? {
            DependencyResolution::Selected(holder) => {
                println!("任务 #{} 选中候选: {}", worker, holder.key());
            }
            other => println!("任务 #{} 解析结论: {:?}", worker, other),
        }
    }
    Ok(())
}

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let assembly = Arc::new(build_assembly()?);

    println!("=== 标记宏注册示例 ===");
    marker_selection_example(&assembly)?;

    println!("\n=== 延迟句柄示例 ===");
    lazy_handle_example(&assembly)?;

    println!("\n=== 并发共享示例 ===");
    concurrent_example(Arc::clone(&assembly)).await?;

    let metrics = assembly.metrics();
    println!(
        "\n装配体统计: 候选 {} 个, 立即选型 {} 次, 延迟句柄 {} 次",
        metrics.registered_candidates_count, metrics.resolution_count, metrics.deferred_count
    );
    Ok(())
}

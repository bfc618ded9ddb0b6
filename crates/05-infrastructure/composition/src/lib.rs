//! # 自动装配组合层
//!
//! 这个 crate 是 Lorn Autowire 的组合层，负责把候选解析器链、候选定义
//! 注册表与选型仲裁组合成一个完整的、可直接使用的装配体。
//!
//! ## 主要功能
//!
//! - **装配体构建器**: 使用建造者模式装配解析器链与注册表
//! - **选项管理**: 从 TOML 文件与环境变量加载自动装配选项
//! - **候选选择**: 默认值短路、自引用过滤与歧义仲裁
//! - **延迟解析**: 懒句柄在首次访问时回调装配体完成真实解析
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use autowire_common::{
//!     CandidateDefinition, CandidateHolder, DependencyDescriptor, InjectionPoint, TypeSpec,
//! };
//! use autowire_composition::AutowireAssembly;
//! use autowire_impl::InMemoryDefinitionRegistry;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 注册候选定义
//!     let registry = Arc::new(InMemoryDefinitionRegistry::new());
//!     registry.register(CandidateHolder::new(
//!         "redis_cache",
//!         CandidateDefinition::new(TypeSpec::from_name("RedisCache")),
//!     ))?;
//!
//!     // 构建装配体
//!     let assembly = AutowireAssembly::builder()
//!         .with_registry(registry)
//!         .build()?;
//!
//!     // 为注入点给出解析结论
//!     let descriptor = DependencyDescriptor::new(
//!         TypeSpec::from_name("RedisCache"),
//!         InjectionPoint::field("cache"),
//!     );
//!     let resolution = assembly.resolve_injection_point(&descriptor)?;
//!     println!("解析结论: {:?}", resolution);
//!
//!     Ok(())
//! }
//! ```

pub mod assembly;
pub mod builder;
pub mod chain;
pub mod options;
pub mod selection;

// 重新导出主要类型
pub use assembly::{AssemblyMetrics, AutowireAssembly, DependencyResolution};
pub use builder::{AutowireAssemblyBuilder, LoggingConfig};
pub use chain::ResolverChainBuilder;
pub use options::AutowireOptions;
pub use selection::{CandidateSelector, SelectionOutcome};

// 重新导出标记宏，使用方只需引入组合层
pub use marker_macros::{primary, qualified};

// 重新导出错误类型
pub use autowire_common::AutowireError;

//! # 自动装配抽象接口
//!
//! 这个 crate 定义了自动装配候选解析的核心契约：
//!
//! - [`AutowireCandidateResolver`] - 候选解析策略契约，含宽松的默认语义
//! - [`DefinitionRegistry`] - 注册表协作方的只读视图
//! - [`LazyDependencyHandle`] / [`DependencyTargetSource`] - 懒解析句柄及其目标源
//! - [`InstanceProvider`] - 实例提供者协作方接口
//!
//! 五项决策操作全部同步、无副作用（懒解析句柄构造除外）、永不失败：
//! 无答案以 `false` / `None` 表达，而不是错误。

pub mod handle;
pub mod provider;
pub mod registry;
pub mod resolver;

pub use handle::*;
pub use provider::*;
pub use registry::*;
pub use resolver::*;

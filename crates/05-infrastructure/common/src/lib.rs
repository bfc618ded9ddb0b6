//! # Autowire Common
//!
//! 这个 crate 提供了 Lorn Autowire 框架的公共数据模型与工具。
//!
//! ## 核心组件
//!
//! - [`DependencyDescriptor`] - 注入点的不可变描述
//! - [`CandidateDefinition`] / [`CandidateHolder`] - 候选定义及其注册视图
//! - [`MetadataBag`] / [`MetadataMarker`] - 有序的元数据标记集合
//! - [`TypeSpec`] - 携带泛型参数的类型规格
//! - [`NamingConventions`] - 候选键命名约定
//!
//! ## 设计原则
//!
//! - 描述符与候选视图构造后不可变，解析器只读取
//! - 已识别的标记种类封闭，未识别标记原样保留、不参与决策
//! - 决策路径完全同步，共享只依赖 `Send + Sync`

pub mod candidate;
pub mod conventions;
pub mod descriptor;
pub mod errors;
pub mod metadata;

pub use candidate::*;
pub use conventions::*;
pub use descriptor::*;
pub use errors::*;
pub use metadata::*;

use std::any::TypeId;

/// 类型级标记集合
///
/// 过程宏在程序启动时为标注的类型注册的标记；注册表在以类型为中心
/// 注册候选定义时将其合并进定义的元数据。
#[derive(Debug, Clone, Default)]
pub struct TypeMarkers {
    /// 附加到候选定义元数据的标记
    pub markers: Vec<MetadataMarker>,
    /// 是否标记为同类型候选中的首选
    pub primary: bool,
}

/// 全局类型级标记注册表
static GLOBAL_TYPE_MARKERS: once_cell::sync::Lazy<dashmap::DashMap<TypeId, TypeMarkers>> =
    once_cell::sync::Lazy::new(dashmap::DashMap::new);

/// 注册类型级标记（通常由过程宏在程序启动时调用）
///
/// 同一类型多次注册时标记累加、首选标志按或合并。
pub fn register_type_markers(type_id: TypeId, type_markers: TypeMarkers) {
    tracing::debug!(
        "注册类型级标记: {:?}, 标记数: {}, 首选: {}",
        type_id,
        type_markers.markers.len(),
        type_markers.primary
    );
    let mut entry = GLOBAL_TYPE_MARKERS.entry(type_id).or_default();
    entry.markers.extend(type_markers.markers);
    entry.primary |= type_markers.primary;
}

/// 获取指定类型的类型级标记
pub fn type_markers_of(type_id: TypeId) -> TypeMarkers {
    GLOBAL_TYPE_MARKERS
        .get(&type_id)
        .map(|entry| entry.clone())
        .unwrap_or_default()
}

//! 候选定义
//!
//! 描述一个已注册组件参与自动装配所需的元数据视图

use std::collections::HashMap;
use std::sync::Arc;

use crate::metadata::{MetadataBag, MetadataMarker, TypeInfo, TypeSpec};

/// 候选定义
///
/// 注册表中单个组件定义面向候选解析的视图：声明类型、自声明的
/// 候选资格标志、类型级元数据标记以及对外提供的服务类型列表。
#[derive(Debug, Clone)]
pub struct CandidateDefinition {
    /// 组件自身的类型规格
    type_spec: TypeSpec,
    /// 自声明的候选资格标志
    autowire_candidate: bool,
    /// 是否为同类型候选中的首选
    primary: bool,
    /// 候选优先级，数值越高优先级越高
    priority: Option<i32>,
    /// 类型级元数据标记
    metadata: MetadataBag,
    /// 对外提供的服务类型，始终包含自身类型
    provided_types: Vec<TypeInfo>,
    /// 自定义属性
    properties: HashMap<String, String>,
}

impl CandidateDefinition {
    /// 创建新的候选定义，默认参与自动装配
    pub fn new(type_spec: TypeSpec) -> Self {
        let own_type = type_spec.raw().clone();
        Self {
            type_spec,
            autowire_candidate: true,
            primary: false,
            priority: None,
            metadata: MetadataBag::new(),
            provided_types: vec![own_type],
            properties: HashMap::new(),
        }
    }

    /// 从类型创建候选定义
    pub fn of<T: 'static>() -> Self {
        Self::new(TypeSpec::of::<T>())
    }

    /// 设置自声明的候选资格标志
    pub fn with_autowire_candidate(mut self, autowire_candidate: bool) -> Self {
        self.autowire_candidate = autowire_candidate;
        self
    }

    /// 标记为同类型候选中的首选
    pub fn as_primary(mut self) -> Self {
        self.primary = true;
        self
    }

    /// 设置候选优先级
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// 追加一个类型级元数据标记
    pub fn with_marker(mut self, marker: MetadataMarker) -> Self {
        self.metadata.push(marker);
        self
    }

    /// 追加一组类型级元数据标记
    pub fn with_markers(mut self, markers: &[MetadataMarker]) -> Self {
        self.metadata.extend_from(markers);
        self
    }

    /// 声明提供指定类型的服务
    pub fn provides<T: 'static>(mut self) -> Self {
        self.provided_types.push(TypeInfo::of::<T>());
        self
    }

    /// 声明提供指定 trait object 类型的服务
    pub fn provides_trait<T: ?Sized + 'static>(mut self) -> Self {
        self.provided_types.push(TypeInfo::of_trait::<T>());
        self
    }

    /// 声明提供指定类型信息的服务
    pub fn provides_type(mut self, type_info: TypeInfo) -> Self {
        self.provided_types.push(type_info);
        self
    }

    /// 添加自定义属性
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// 组件自身的类型规格
    pub fn type_spec(&self) -> &TypeSpec {
        &self.type_spec
    }

    /// 自声明的候选资格标志
    pub fn is_autowire_candidate(&self) -> bool {
        self.autowire_candidate
    }

    /// 是否为同类型候选中的首选
    pub fn is_primary(&self) -> bool {
        self.primary
    }

    /// 候选优先级
    pub fn priority(&self) -> Option<i32> {
        self.priority
    }

    /// 类型级元数据标记
    pub fn metadata(&self) -> &MetadataBag {
        &self.metadata
    }

    /// 对外提供的服务类型列表
    pub fn provided_types(&self) -> &[TypeInfo] {
        &self.provided_types
    }

    /// 是否提供指定类型的服务
    pub fn provides_service(&self, wanted: &TypeInfo) -> bool {
        self.provided_types
            .iter()
            .any(|provided| provided.same_type(wanted))
    }

    /// 读取自定义属性
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// 所有自定义属性
    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }
}

/// 候选持有者
///
/// 将候选定义与其注册键、别名绑定。键在注册表内唯一；别名不得与
/// 其他定义的键或别名冲突（由注册表在注册时保证）。
#[derive(Debug, Clone)]
pub struct CandidateHolder {
    /// 注册键
    key: String,
    /// 别名列表
    aliases: Vec<String>,
    /// 候选定义
    definition: Arc<CandidateDefinition>,
}

impl CandidateHolder {
    /// 创建新的候选持有者
    pub fn new(key: impl Into<String>, definition: CandidateDefinition) -> Self {
        Self {
            key: key.into(),
            aliases: Vec::new(),
            definition: Arc::new(definition),
        }
    }

    /// 添加别名
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// 注册键
    pub fn key(&self) -> &str {
        &self.key
    }

    /// 别名列表
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// 候选定义
    pub fn definition(&self) -> &CandidateDefinition {
        &self.definition
    }

    /// 名称是否命中键或任一别名
    pub fn matches_key(&self, name: &str) -> bool {
        self.key == name || self.aliases.iter().any(|alias| alias == name)
    }
}

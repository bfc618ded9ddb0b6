//! 元数据定义
//!
//! 提供类型信息、限定符与注入点标记的数据模型

use serde::{Deserialize, Serialize};
use std::any::TypeId;
use std::fmt;

use crate::conventions::QUALIFIER_KIND;

/// 通配类型名称，表示"任意类型"的占位
const WILDCARD_NAME: &str = "_";

/// 类型信息
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 类型名称
    pub name: String,
    /// 类型ID
    pub id: TypeId,
    /// 模块路径
    pub module_path: String,
}

impl TypeInfo {
    /// 创建新的类型信息
    pub fn new(type_id: TypeId, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: type_id,
            module_path: std::module_path!().to_string(),
        }
    }

    /// 从类型获取类型信息
    pub fn of<T: 'static>() -> Self {
        Self {
            name: std::any::type_name::<T>()
                .split("::")
                .last()
                .unwrap_or("Unknown")
                .to_string(),
            id: TypeId::of::<T>(),
            module_path: std::any::type_name::<T>().to_string(),
        }
    }

    /// 从 trait object 类型获取类型信息
    pub fn of_trait<T: ?Sized + 'static>() -> Self {
        Self {
            name: std::any::type_name::<T>()
                .split("::")
                .last()
                .unwrap_or("Unknown")
                .to_string(),
            id: TypeId::of::<T>(),
            module_path: std::any::type_name::<T>().to_string(),
        }
    }

    /// 从类型名称创建类型信息（用于配置或外部注册）
    pub fn from_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            id: TypeId::of::<()>(), // 占位符，实际应该由运行时解析
            module_path: name.to_string(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        self.name.split("::").last().unwrap_or(&self.name)
    }

    /// 判断两个类型信息是否指向同一个类型
    ///
    /// 名称注册的类型信息不携带真实的 `TypeId`，因此按名称比较。
    pub fn same_type(&self, other: &TypeInfo) -> bool {
        self.short_name() == other.short_name()
    }
}

/// 类型规格
///
/// 在 [`TypeInfo`] 之上附加泛型参数信息，供泛型感知的候选收窄使用。
/// 不携带泛型参数时表示原始类型使用，匹配时按宽松语义放行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    /// 原始类型信息
    raw: TypeInfo,
    /// 泛型参数列表
    args: Vec<TypeSpec>,
}

impl TypeSpec {
    /// 从类型信息创建类型规格
    pub fn new(raw: TypeInfo) -> Self {
        Self {
            raw,
            args: Vec::new(),
        }
    }

    /// 从类型获取类型规格
    pub fn of<T: 'static>() -> Self {
        Self::new(TypeInfo::of::<T>())
    }

    /// 从 trait object 类型获取类型规格
    pub fn of_trait<T: ?Sized + 'static>() -> Self {
        Self::new(TypeInfo::of_trait::<T>())
    }

    /// 从类型名称创建类型规格
    pub fn from_name(name: &str) -> Self {
        Self::new(TypeInfo::from_name(name))
    }

    /// 创建通配类型规格，匹配任意类型
    pub fn wildcard() -> Self {
        Self::from_name(WILDCARD_NAME)
    }

    /// 追加一个泛型参数
    pub fn with_arg(mut self, arg: TypeSpec) -> Self {
        self.args.push(arg);
        self
    }

    /// 获取原始类型信息
    pub fn raw(&self) -> &TypeInfo {
        &self.raw
    }

    /// 获取泛型参数列表
    pub fn args(&self) -> &[TypeSpec] {
        &self.args
    }

    /// 是否为通配类型
    pub fn is_wildcard(&self) -> bool {
        self.raw.name == WILDCARD_NAME
    }

    /// 类型是否结构上已知，可以作为解析目标
    pub fn is_resolvable(&self) -> bool {
        !self.is_wildcard() && !self.raw.name.is_empty()
    }

    /// 判断候选类型规格与本规格（声明侧）是否兼容
    ///
    /// 任一侧为通配或未携带泛型参数时放行；原始类型名不同视为不兼容；
    /// 参数个数不同视为不兼容，否则逐位递归比较。
    pub fn compatible_with(&self, candidate: &TypeSpec) -> bool {
        if self.is_wildcard() || candidate.is_wildcard() {
            return true;
        }
        if !self.raw.same_type(&candidate.raw) {
            return false;
        }
        if self.args.is_empty() || candidate.args.is_empty() {
            return true;
        }
        if self.args.len() != candidate.args.len() {
            return false;
        }
        self.args
            .iter()
            .zip(candidate.args.iter())
            .all(|(declared, supplied)| declared.compatible_with(supplied))
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw.short_name())?;
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (index, arg) in self.args.iter().enumerate() {
                if index > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

/// 限定符规格
///
/// `kind` 标识限定符类别（标准类别见 [`QUALIFIER_KIND`]），
/// `value` 为可选的限定值；不携带值时仅按类别存在性匹配。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifierSpec {
    /// 限定符类别
    pub kind: String,
    /// 限定值
    pub value: Option<String>,
}

impl QualifierSpec {
    /// 创建标准类别的限定符
    pub fn named(value: impl Into<String>) -> Self {
        Self {
            kind: QUALIFIER_KIND.to_string(),
            value: Some(value.into()),
        }
    }

    /// 创建指定类别的限定符（不携带值）
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: None,
        }
    }

    /// 设置限定值
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for QualifierSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.kind, value),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// 元数据标记
///
/// 注入点与候选定义上可附加的标记集合。已识别的标记种类是封闭的；
/// 未识别的标记以 [`MetadataMarker::Custom`] 原样保留，不参与决策。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetadataMarker {
    /// 限定符标记，按类别和值收窄候选集
    Qualifier(QualifierSpec),
    /// 可选标记，覆盖结构上的必需声明
    Optional,
    /// 默认值标记，携带由容器稍后求值的字面表达式
    DefaultValue {
        /// 默认值表达式
        expression: String,
    },
    /// 懒解析标记，要求以延迟句柄替代立即解析
    Lazy,
    /// 自定义标记，保留原始数据
    Custom {
        /// 标记类别
        kind: String,
        /// 标记值
        value: Option<String>,
    },
}

/// 元数据标记集合
///
/// 保持插入顺序的有序集合；顺序只影响扫描的确定性（例如多个默认值
/// 标记时首个胜出），不承载其他语义。构造完成后不再修改。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataBag {
    markers: Vec<MetadataMarker>,
}

impl MetadataBag {
    /// 创建空的标记集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 从标记列表创建集合
    pub fn from_markers(markers: Vec<MetadataMarker>) -> Self {
        Self { markers }
    }

    /// 追加一个标记
    pub fn push(&mut self, marker: MetadataMarker) {
        self.markers.push(marker);
    }

    /// 追加一组标记，保持相对顺序
    pub fn extend_from(&mut self, markers: &[MetadataMarker]) {
        self.markers.extend_from_slice(markers);
    }

    /// 标记数量
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// 按插入顺序遍历标记
    pub fn iter(&self) -> impl Iterator<Item = &MetadataMarker> {
        self.markers.iter()
    }

    /// 按插入顺序遍历限定符标记
    pub fn qualifiers(&self) -> impl Iterator<Item = &QualifierSpec> {
        self.markers.iter().filter_map(|marker| match marker {
            MetadataMarker::Qualifier(spec) => Some(spec),
            _ => None,
        })
    }

    /// 是否携带可选标记
    pub fn has_optional(&self) -> bool {
        self.markers
            .iter()
            .any(|marker| matches!(marker, MetadataMarker::Optional))
    }

    /// 是否携带懒解析标记
    pub fn has_lazy(&self) -> bool {
        self.markers
            .iter()
            .any(|marker| matches!(marker, MetadataMarker::Lazy))
    }

    /// 首个默认值标记的表达式
    ///
    /// 同一注入点出现多个默认值标记时，按插入顺序首个胜出。
    pub fn first_default_value(&self) -> Option<&str> {
        self.markers.iter().find_map(|marker| match marker {
            MetadataMarker::DefaultValue { expression } => Some(expression.as_str()),
            _ => None,
        })
    }
}

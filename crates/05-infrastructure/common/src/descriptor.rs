//! 依赖描述符定义
//!
//! 容器检视注入点时产生的不可变描述，本框架只读取、从不构造或修改

use std::fmt;

use crate::metadata::{MetadataBag, MetadataMarker, TypeSpec};

/// 注入点
///
/// 标识容器需要注入值的位置：字段、构造函数参数或方法参数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectionPoint {
    /// 字段注入点
    Field {
        /// 字段名称
        name: String,
    },
    /// 构造函数参数注入点
    ConstructorParameter {
        /// 参数序号
        index: usize,
        /// 参数名称（可得时）
        name: Option<String>,
    },
    /// 方法参数注入点
    MethodParameter {
        /// 方法名称
        method: String,
        /// 参数序号
        index: usize,
        /// 参数名称（可得时）
        name: Option<String>,
    },
}

impl InjectionPoint {
    /// 创建字段注入点
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field { name: name.into() }
    }

    /// 创建构造函数参数注入点
    pub fn constructor_parameter(index: usize) -> Self {
        Self::ConstructorParameter { index, name: None }
    }

    /// 创建方法参数注入点
    pub fn method_parameter(method: impl Into<String>, index: usize) -> Self {
        Self::MethodParameter {
            method: method.into(),
            index,
            name: None,
        }
    }

    /// 设置参数名称
    ///
    /// 对字段注入点无效果，字段名在创建时给定。
    pub fn with_parameter_name(mut self, parameter_name: impl Into<String>) -> Self {
        match &mut self {
            Self::Field { .. } => {}
            Self::ConstructorParameter { name, .. } | Self::MethodParameter { name, .. } => {
                *name = Some(parameter_name.into());
            }
        }
        self
    }

    /// 注入点处的依赖名称（可得时）
    ///
    /// 候选选择在歧义时会以此名称与候选键、别名做兜底匹配。
    pub fn dependency_name(&self) -> Option<&str> {
        match self {
            Self::Field { name } => Some(name),
            Self::ConstructorParameter { name, .. } | Self::MethodParameter { name, .. } => {
                name.as_deref()
            }
        }
    }
}

impl fmt::Display for InjectionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field { name } => write!(f, "字段 `{}`", name),
            Self::ConstructorParameter { index, name } => match name {
                Some(name) => write!(f, "构造参数 #{} `{}`", index, name),
                None => write!(f, "构造参数 #{}", index),
            },
            Self::MethodParameter {
                method,
                index,
                name,
            } => match name {
                Some(name) => write!(f, "方法 `{}` 参数 #{} `{}`", method, index, name),
                None => write!(f, "方法 `{}` 参数 #{}", method, index),
            },
        }
    }
}

/// 依赖描述符
///
/// 对单个注入点的不可变描述：声明类型、必需标志、附加的元数据标记
/// 以及所属组件的身份。构造完成后解析器只能读取，不能修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDescriptor {
    /// 注入点声明的类型
    declared_type: TypeSpec,
    /// 结构上的必需标志，可被可选标记覆盖
    required: bool,
    /// 附加的元数据标记
    metadata: MetadataBag,
    /// 所属组件的键（可得时）
    containing_component: Option<String>,
    /// 注入点位置
    injection_point: InjectionPoint,
}

impl DependencyDescriptor {
    /// 创建新的依赖描述符，默认必需、不携带标记
    pub fn new(declared_type: TypeSpec, injection_point: InjectionPoint) -> Self {
        Self {
            declared_type,
            required: true,
            metadata: MetadataBag::new(),
            containing_component: None,
            injection_point,
        }
    }

    /// 设置必需标志
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// 替换整组元数据标记
    pub fn with_metadata(mut self, metadata: MetadataBag) -> Self {
        self.metadata = metadata;
        self
    }

    /// 追加一个元数据标记
    pub fn with_marker(mut self, marker: MetadataMarker) -> Self {
        self.metadata.push(marker);
        self
    }

    /// 设置所属组件
    pub fn with_containing_component(mut self, key: impl Into<String>) -> Self {
        self.containing_component = Some(key.into());
        self
    }

    /// 注入点声明的类型
    pub fn declared_type(&self) -> &TypeSpec {
        &self.declared_type
    }

    /// 结构上的必需标志
    pub fn required(&self) -> bool {
        self.required
    }

    /// 附加的元数据标记
    pub fn metadata(&self) -> &MetadataBag {
        &self.metadata
    }

    /// 所属组件的键
    pub fn containing_component(&self) -> Option<&str> {
        self.containing_component.as_deref()
    }

    /// 注入点位置
    pub fn injection_point(&self) -> &InjectionPoint {
        &self.injection_point
    }

    /// 注入点处的依赖名称（可得时）
    pub fn dependency_name(&self) -> Option<&str> {
        self.injection_point.dependency_name()
    }
}

impl fmt::Display for DependencyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.declared_type, self.injection_point)?;
        if let Some(owner) = &self.containing_component {
            write!(f, " (所属 {})", owner)?;
        }
        Ok(())
    }
}

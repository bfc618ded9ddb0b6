//! 候选解析策略契约
//!
//! 容器的解析循环只面向此契约提问；具体策略按装饰器方式层层组合，
//! 外层只能在内层结论上进一步收窄。

use autowire_common::{CandidateHolder, DependencyDescriptor};

use crate::handle::LazyDependencyHandle;

/// 自动装配候选解析器
///
/// 回答容器解析循环的五个策略问题。所有方法同步、确定且永不失败；
/// 默认方法体给出宽松的基础语义，装饰器按需覆盖并委托被包裹的内层。
///
/// # 组合约定
///
/// `is_autowire_candidate` 满足单调收窄：装饰器必须先询问内层，内层
/// 拒绝即短路拒绝；装饰器只能把内层的接受改判为拒绝，不能反向放宽。
pub trait AutowireCandidateResolver: Send + Sync {
    /// 判断候选是否可以满足指定注入点
    ///
    /// 默认语义：原样返回候选定义自声明的候选资格标志。
    fn is_autowire_candidate(
        &self,
        candidate: &CandidateHolder,
        _descriptor: &DependencyDescriptor,
    ) -> bool {
        candidate.definition().is_autowire_candidate()
    }

    /// 判断注入点是否必需
    ///
    /// 默认语义：原样返回描述符的结构必需标志。
    fn is_required(&self, descriptor: &DependencyDescriptor) -> bool {
        descriptor.required()
    }

    /// 判断描述符是否携带超出类型匹配的限定信息
    ///
    /// 默认语义：基础策略不做限定符检视，返回 `false`。
    fn has_qualifier(&self, _descriptor: &DependencyDescriptor) -> bool {
        false
    }

    /// 提取描述符上声明的默认值表达式
    ///
    /// 表达式由容器稍后求值，本契约不做求值。默认语义：无。
    fn suggested_value(&self, _descriptor: &DependencyDescriptor) -> Option<String> {
        None
    }

    /// 为标记懒解析的注入点构造延迟解析句柄
    ///
    /// 句柄构造不得触碰注册表、不得提前挑选候选。默认语义：无，
    /// 由容器立即解析。
    fn lazy_resolution_handle(
        &self,
        _descriptor: &DependencyDescriptor,
        _owner: Option<&str>,
    ) -> Option<LazyDependencyHandle> {
        None
    }
}

//! 实例提供者契约

use std::any::Any;
use std::sync::Arc;

use autowire_common::{CandidateHolder, DependencyResult};

/// 候选实例提供者
///
/// 选型确定唯一候选后，由提供者把候选定义兑换为可注入的共享实例。
/// 实例化语义（单例、作用域、构造顺序）由实现决定。
pub trait InstanceProvider: Send + Sync {
    /// 获取候选对应的共享实例
    fn instance_of(&self, holder: &CandidateHolder) -> DependencyResult<Arc<dyn Any + Send + Sync>>;
}

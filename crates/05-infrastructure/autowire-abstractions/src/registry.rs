//! 候选定义注册表契约

use autowire_common::{CandidateHolder, TypeSpec};

/// 候选定义注册表
///
/// 按键存取候选定义持有者，并支持按类型规格枚举。实现必须线程安全，
/// 枚举结果必须有确定的顺序。
pub trait DefinitionRegistry: Send + Sync {
    /// 按键或别名查找候选定义
    fn candidate(&self, key: &str) -> Option<CandidateHolder>;

    /// 枚举所有已注册的候选键（有序）
    fn candidate_keys(&self) -> Vec<String>;

    /// 枚举声明服务类型与规格兼容的候选（有序）
    fn candidates_of_type(&self, type_spec: &TypeSpec) -> Vec<CandidateHolder>;

    /// 判断键或别名是否已注册
    fn contains(&self, key: &str) -> bool {
        self.candidate(key).is_some()
    }
}

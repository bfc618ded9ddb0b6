//! 基础候选解析器

use autowire_abstractions::AutowireCandidateResolver;

/// 基础候选解析器
///
/// 契约默认语义的直接化身：只读取候选自声明的候选资格标志与描述符的
/// 结构必需标志，不检视任何元数据标记。既可单独使用，也作为解析器链
/// 的最内层。
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleCandidateResolver;

/// 共享的基础解析器实例
static INSTANCE: SimpleCandidateResolver = SimpleCandidateResolver;

impl SimpleCandidateResolver {
    /// 创建基础解析器
    pub fn new() -> Self {
        Self
    }

    /// 获取共享的基础解析器实例
    pub fn shared() -> &'static Self {
        &INSTANCE
    }
}

impl AutowireCandidateResolver for SimpleCandidateResolver {}

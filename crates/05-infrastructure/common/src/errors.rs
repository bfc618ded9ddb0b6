//! 错误类型定义

use thiserror::Error;

/// 定义注册错误类型
#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("候选键已存在: {key}")]
    DuplicateKey { key: String },

    #[error("别名冲突: {alias} 已被 {existing_key} 占用")]
    AliasConflict { alias: String, existing_key: String },

    #[error("候选键无效: {key}")]
    InvalidKey { key: String },
}

/// 候选选择错误类型
#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("未找到满足依赖的候选: {descriptor}")]
    UnsatisfiedDependency { descriptor: String },

    #[error("依赖存在歧义: {descriptor}, 幸存候选: {candidate_keys:?}")]
    AmbiguousDependency {
        descriptor: String,
        candidate_keys: Vec<String>,
    },
}

/// 依赖目标解析错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("目标解析失败: {descriptor}, 原因: {message}")]
    TargetResolutionFailed { descriptor: String, message: String },

    #[error("类型转换失败: 期望 {expected}, 实际 {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("实例不可用: {key}, 原因: {message}")]
    InstanceUnavailable { key: String, message: String },

    #[error("候选选择失败: {source}")]
    SelectionError {
        #[from]
        source: SelectionError,
    },
}

/// 选项加载错误类型
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("选项文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("选项文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("选项解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("选项验证失败: {message}")]
    ValidationError { message: String },
}

/// 自动装配错误类型
#[derive(Error, Debug)]
pub enum AutowireError {
    #[error("定义错误: {source}")]
    DefinitionError {
        #[from]
        source: DefinitionError,
    },

    #[error("选择错误: {source}")]
    SelectionError {
        #[from]
        source: SelectionError,
    },

    #[error("依赖错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("选项错误: {source}")]
    OptionsError {
        #[from]
        source: OptionsError,
    },

    #[error("装配体构建失败: {message}")]
    BuildFailed { message: String },
}

/// 结果类型别名
pub type DefinitionResult<T> = Result<T, DefinitionError>;
pub type SelectionResult<T> = Result<T, SelectionError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type OptionsResult<T> = Result<T, OptionsError>;
pub type AutowireResult<T> = Result<T, AutowireError>;

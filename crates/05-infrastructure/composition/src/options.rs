//! 自动装配选项
//!
//! 控制解析器链的组成；来源可以是 TOML 文件、环境变量或代码直接设定。

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use autowire_common::{NamingConventions, OptionsError, OptionsResult};

/// 自动装配选项
///
/// 未给出的字段取默认值：标准限定符类别之外不识别额外类别，泛型感知
/// 与懒解析句柄均启用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutowireOptions {
    /// 额外参与决策的限定符类别
    pub qualifier_kinds: Vec<String>,
    /// 是否启用泛型感知收窄
    pub generics_matching: bool,
    /// 是否启用懒解析句柄
    pub lazy_handles: bool,
}

impl Default for AutowireOptions {
    fn default() -> Self {
        Self {
            qualifier_kinds: Vec::new(),
            generics_matching: true,
            lazy_handles: true,
        }
    }
}

impl AutowireOptions {
    /// 从 TOML 文本解析选项
    pub fn from_toml_str(content: &str) -> OptionsResult<Self> {
        toml::from_str(content).map_err(|e| OptionsError::ParseError {
            source: Box::new(e),
        })
    }

    /// 从 TOML 文件加载选项
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> OptionsResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(OptionsError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 从环境变量构造选项
    ///
    /// 以默认值为底，再叠加 `{前缀}_QUALIFIER_KINDS`、
    /// `{前缀}_GENERICS_MATCHING`、`{前缀}_LAZY_HANDLES` 三个变量。
    pub fn from_env(prefix: &str) -> Self {
        let mut options = Self::default();
        options.merge_env(prefix);
        options
    }

    /// 叠加环境变量到当前选项
    ///
    /// 布尔变量接受 `1/true/on` 与 `0/false/off`，其余取值忽略并告警；
    /// 限定符类别变量按逗号分隔，追加且去重。
    pub fn merge_env(&mut self, prefix: &str) {
        if let Ok(value) = std::env::var(format!("{}_QUALIFIER_KINDS", prefix)) {
            for kind in value.split(',').map(str::trim).filter(|kind| !kind.is_empty()) {
                if !self.qualifier_kinds.iter().any(|existing| existing == kind) {
                    self.qualifier_kinds.push(kind.to_string());
                }
            }
            debug!("从环境变量叠加限定符类别: {:?}", self.qualifier_kinds);
        }
        if let Some(value) = Self::env_bool(prefix, "GENERICS_MATCHING") {
            self.generics_matching = value;
        }
        if let Some(value) = Self::env_bool(prefix, "LAZY_HANDLES") {
            self.lazy_handles = value;
        }
    }

    /// 校验选项取值
    ///
    /// 限定符类别必须符合键的命名约定（小写字母开头的 snake_case）。
    pub fn validate(&self) -> OptionsResult<()> {
        for kind in &self.qualifier_kinds {
            if !NamingConventions::is_valid_key(kind) {
                return Err(OptionsError::ValidationError {
                    message: format!("限定符类别无效: {:?}", kind),
                });
            }
        }
        Ok(())
    }

    /// 读取布尔环境变量
    fn env_bool(prefix: &str, name: &str) -> Option<bool> {
        let key = format!("{}_{}", prefix, name);
        let value = std::env::var(&key).ok()?;
        match value.to_lowercase().as_str() {
            "1" | "true" | "on" => Some(true),
            "0" | "false" | "off" => Some(false),
            _ => {
                warn!("环境变量 {} 取值无法识别: {}", key, value);
                None
            }
        }
    }
}

//! 约定规范定义
//!
//! 提供候选键命名与限定符类别的约定规范

use crate::metadata::TypeInfo;

/// 标准限定符标记类别
///
/// 限定符感知的解析器默认只识别此类别；其他类别需在构造时显式注册。
pub const QUALIFIER_KIND: &str = "qualifier";

/// 命名约定规范
#[derive(Debug)]
pub struct NamingConventions;

impl NamingConventions {
    /// 按约定生成候选的默认注册键
    ///
    /// 取类型的简短名称并转换为蛇形命名，例如 `RedisCache` -> `redis_cache`。
    pub fn default_key(type_info: &TypeInfo) -> String {
        Self::to_snake_case(type_info.short_name())
    }

    /// 按类型生成候选的默认注册键
    pub fn default_key_of<T: 'static>() -> String {
        Self::default_key(&TypeInfo::of::<T>())
    }

    /// 校验注册键是否合法
    ///
    /// 合法的键以小写字母开头，其余字符为小写字母、数字或下划线。
    pub fn is_valid_key(key: &str) -> bool {
        let mut chars = key.chars();
        match chars.next() {
            Some(first) if first.is_ascii_lowercase() => {}
            _ => return false,
        }
        chars.all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_')
    }

    /// 将驼峰命名转换为蛇形命名
    fn to_snake_case(s: &str) -> String {
        let mut result = String::new();
        let mut chars = s.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch.is_uppercase() && !result.is_empty() {
                if let Some(&next_ch) = chars.peek() {
                    if next_ch.is_lowercase() {
                        result.push('_');
                    }
                }
            }
            result.push(ch.to_lowercase().next().unwrap_or(ch));
        }

        result
    }
}

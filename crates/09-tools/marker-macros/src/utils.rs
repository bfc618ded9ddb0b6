//! 宏工具函数

use proc_macro2::Span;
use syn::Ident;

/// 生成标记注册函数的标识符
///
/// 带入参数片段，同一类型上的多个标记宏展开互不冲突。
pub fn registration_ident(prefix: &str, struct_name: &Ident, fragment: Option<&str>) -> Ident {
    let mut name = format!(
        "__register_{}_{}",
        prefix,
        struct_name.to_string().to_lowercase()
    );
    if let Some(fragment) = fragment {
        name.push('_');
        name.push_str(&sanitize_ident_fragment(fragment));
    }
    Ident::new(&name, Span::call_site())
}

/// 把任意字符串收敛为合法的标识符片段
///
/// 非字母数字字符替换为下划线；空串收敛为单个下划线。
fn sanitize_ident_fragment(s: &str) -> String {
    let sanitized: String = s
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() {
        "_".to_string()
    } else {
        sanitized
    }
}

//! # Marker Macros
//!
//! 这个 crate 提供了用于类型级候选标记注册的过程宏。
//!
//! ## 核心宏
//!
//! - [`macro@qualified`] - 为类型登记限定符标记
//! - [`macro@primary`] - 把类型标记为同类型候选中的首选
//!
//! 标记在程序启动时写入全局类型标记注册表；注册表以类型为中心注册
//! 候选定义时把它们合并进定义的元数据。使用方需要依赖
//! `autowire-common` 与 `ctor`。
//!
//! ## 使用示例
//!
//! ```rust
//! use marker_macros::{primary, qualified};
//!
//! #[qualified("primary")]
//! #[primary]
//! pub struct RedisCache;
//!
//! let markers = autowire_common::type_markers_of(std::any::TypeId::of::<RedisCache>());
//! assert!(markers.primary);
//! assert_eq!(markers.markers.len(), 1);
//! ```

use proc_macro::TokenStream;

mod primary;
mod qualified;
mod utils;

/// 限定符标记宏
///
/// 为类型登记一个限定符标记，参与限定符感知的候选收窄。
///
/// # 参数
///
/// - `"value"` - 限定值的简写形式
/// - `value = "value"` - 限定值
/// - `kind = "kind"` - 限定符类别（默认为标准类别 `qualifier`）
///
/// # 示例
///
/// ```rust
/// use marker_macros::qualified;
///
/// #[qualified("primary")]
/// pub struct RedisCache;
///
/// #[qualified(kind = "region", value = "east")]
/// pub struct EastCache;
/// ```
#[proc_macro_attribute]
pub fn qualified(args: TokenStream, input: TokenStream) -> TokenStream {
    qualified::qualified_impl(args, input)
}

/// 首选标记宏
///
/// 把类型标记为同类型候选中的首选，多候选歧义时优先胜出。不接受参数。
///
/// # 示例
///
/// ```rust
/// use marker_macros::primary;
///
/// #[primary]
/// pub struct RedisCache;
/// ```
#[proc_macro_attribute]
pub fn primary(args: TokenStream, input: TokenStream) -> TokenStream {
    primary::primary_impl(args, input)
}

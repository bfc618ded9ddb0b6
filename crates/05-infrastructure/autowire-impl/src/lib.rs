//! # 自动装配解析器实现
//!
//! 提供候选解析器契约的具体实现与装饰器组合，以及内存候选定义注册表。
//!
//! ## 解析器链
//!
//! 标准链从内到外为基础、泛型感知、限定符感知与懒句柄四层。外层解析器
//! 先询问内层，只在内层的结论上进一步收窄，不会反向放宽。

pub mod generic;
pub mod lazy;
pub mod qualifier;
pub mod registry;
pub mod simple;

pub use generic::*;
pub use lazy::*;
pub use qualifier::*;
pub use registry::*;
pub use simple::*;

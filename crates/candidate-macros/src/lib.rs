//! # Candidate Macros
//!
//! 这个 crate 提供了在编译期声明候选类型的过程宏。
//!
//! Rust 没有运行时反射，候选类型通过 `#[candidate]` 标注声明，
//! 在程序启动时自动登记到全局候选目录，
//! 供 `CatalogTypeSource` 按模块读取。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use candidate_macros::candidate;
//!
//! #[candidate(module = "orders", contracts(IOrderService, IAuditable))]
//! pub struct OrderService;
//! ```

use proc_macro::TokenStream;

mod candidate;

/// 候选类型登记宏
///
/// 为结构体生成一个在程序启动时执行的登记函数，
/// 把对应的候选类型写入全局候选目录。
///
/// # 参数
///
/// - `module = "name"` - 所属模块名称（默认为 crate 名称）
/// - `contracts(...)` - 声明的能力列表（标识符或字符串字面量）
/// - `abstract_type` - 标记为抽象类型（不可实例化）
/// - `name = "custom::Name"` - 自定义限定名称（默认为模块路径 + 结构体名）
///
/// # 示例
///
/// ```rust,ignore
/// #[candidate(module = "orders", contracts(IOrderService))]
/// pub struct OrderService;
/// ```
///
/// 使用方 crate 需要依赖 `ctor` 与 `conventions-common`。
#[proc_macro_attribute]
pub fn candidate(args: TokenStream, input: TokenStream) -> TokenStream {
    candidate::candidate_impl(args, input)
}

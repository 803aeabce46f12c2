//! # Injectable Macros
//!
//! 这个 crate 提供了在编译期生成类型描述符的派生宏，
//! 替代运行时反射读取构造函数签名。
//!
//! ## 核心宏
//!
//! - [`Injectable`](derive@Injectable) - 为结构体实现 `infrastructure_common::Injectable`
//!
//! ## 使用示例
//!
//! ```rust
//! use injectable_macros::Injectable;
//! use infrastructure_common::{Injectable as _, Scope};
//! use std::sync::Arc;
//!
//! pub trait OrderContext: Send + Sync {}
//!
//! #[derive(Injectable)]
//! #[injectable(singleton, provides(dyn OrderContext))]
//! pub struct MemoryOrderContext;
//! impl OrderContext for MemoryOrderContext {}
//!
//! #[derive(Injectable)]
//! pub struct OrderService {
//!     order_context: Arc<dyn OrderContext>,
//!     #[inject(default)]
//!     processed: u64,
//! }
//!
//! let descriptor = OrderService::descriptor();
//! assert_eq!(descriptor.parameters()[0].name, "order_context");
//! assert_eq!(MemoryOrderContext::descriptor().scope(), Some(Scope::Singleton));
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod injectable;
mod utils;

/// 可注入类型派生宏
///
/// 类型为 `Arc<T>` 的字段成为构造参数，参数名与字段名相同；其余字段必须标记
/// `#[inject(default)]`，由 `Default` 填充。
///
/// # 结构体属性
///
/// - `singleton` / `prototype` - 声明默认作用域
/// - `provides(dyn TraitA, dyn TraitB)` - 声明能够提供的抽象能力
///
/// # 字段属性
///
/// - `#[inject(default)]` - 不注入，使用 `Default::default()`
/// - `#[inject(name = "order_context")]` - 自定义参数名
#[proc_macro_derive(Injectable, attributes(injectable, inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::derive_injectable_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

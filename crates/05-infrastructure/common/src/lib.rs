//! # Infrastructure Common
//!
//! 对象图容器的公共数据模型、命名约定与错误类型。
//!
//! ## 核心类型
//!
//! - [`TypeDescriptor`] - 可构造类型的描述符（构造参数、作用域、构造函数）
//! - [`ConstructorParameter`] - 构造参数（名称 + 声明的依赖需求）
//! - [`Injectable`] - 能够生成自身描述符的类型
//! - [`Arguments`] - 交给构造函数的已解析依赖
//! - [`Scope`] - 实例作用域（单例 / 原型）
//! - [`NamingConventions`] - 参数名与类型名之间的隐式绑定约定
//!
//! ## 设计原则
//!
//! - 描述符在编译期已知的注册列表中构建，不依赖运行时反射
//! - 抽象能力用 `dyn Trait` 表达，具体实现通过类型转换表提供
//! - 约定优于配置

pub mod component;
pub mod conventions;
pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use component::*;
pub use conventions::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;

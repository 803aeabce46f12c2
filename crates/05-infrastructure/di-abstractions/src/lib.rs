//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义对象图解析引擎各组件之间的接口。
//!
//! ## 核心接口
//!
//! - [`TypeRegistry`] - 可构造类型注册表
//! - [`TypeScanner`] - 可插拔的类型发现
//! - [`BindingSpec`] - 绑定规范（参数名 -> 具体类型 + 作用域）
//! - [`BindingResolver`] - 构造参数到具体类型的解析
//! - [`ScopeManager`] - 单例缓存 / 原型实例
//! - [`ObjectGraph`] - 递归构造完整对象图

pub mod binding;
pub mod container;
pub mod registry;
pub mod resolver;
pub mod scanner;
pub mod scope;

pub use binding::*;
pub use container::*;
pub use registry::*;
pub use resolver::*;
pub use scanner::*;
pub use scope::*;

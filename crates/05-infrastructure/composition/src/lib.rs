//! # 基础设施组合层
//!
//! 这个 crate 是对象图容器的组合根，负责把配置、模块与绑定规范组合成一个
//! 完整的、可使用的对象图。
//!
//! ## 主要功能
//!
//! - **对象图构建器**: 使用构建者模式收集模块与绑定规范
//! - **配置源管理**: 从配置文件与环境变量加载 `ObjectGraphConfig`
//! - **日志初始化**: 按需初始化 `tracing-subscriber`
//!
//! ## 基本使用
//!
//! ```rust
//! use di_abstractions::ObjectGraph;
//! use infrastructure_common::{Injectable, TypeDescriptor};
//! use infrastructure_composition::ObjectGraphBuilder;
//!
//! struct Greeting;
//! impl Injectable for Greeting {
//!     fn descriptor() -> TypeDescriptor {
//!         TypeDescriptor::builder::<Greeting>().constructor(|_| Ok(Greeting))
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 创建并配置对象图
//!     let graph = ObjectGraphBuilder::new()
//!         .add_default_env_vars()
//!         .register::<Greeting>()
//!         .build()?;
//!
//!     // 使用对象图
//!     let _greeting = graph.provide::<Greeting>()?;
//!
//!     // 丢弃缓存的单例
//!     graph.close();
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod config_sources;
pub mod logging;

// 重新导出主要类型
pub use builder::ObjectGraphBuilder;
pub use logging::LoggingConfig;
pub use config_sources::{ConfigSources, DEFAULT_ENV_PREFIX};

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;

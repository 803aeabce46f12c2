//! # 依赖注入具体实现
//!
//! 提供对象图解析引擎：类型注册表、绑定解析器、作用域管理器与对象图。
//!
//! ```rust
//! use di_abstractions::{Binder, BindingSpec, Module, ObjectGraph};
//! use di_impl::new_object_graph;
//! use infrastructure_common::{DependencyResult, Injectable, Scope, TypeDescriptor};
//! use std::sync::Arc;
//!
//! struct Clock;
//! impl Injectable for Clock {
//!     fn descriptor() -> TypeDescriptor {
//!         TypeDescriptor::builder::<Clock>().constructor(|_| Ok(Clock))
//!     }
//! }
//!
//! struct Scheduler {
//!     clock: Arc<Clock>,
//! }
//! impl Injectable for Scheduler {
//!     fn descriptor() -> TypeDescriptor {
//!         TypeDescriptor::builder::<Scheduler>()
//!             .parameter::<Clock>("clock")
//!             .constructor(|args| Ok(Scheduler { clock: args.get("clock")? }))
//!     }
//! }
//!
//! let module = Module::new("scheduling").with::<Clock>().with::<Scheduler>();
//! let graph = new_object_graph(&[&module], Vec::new()).unwrap();
//!
//! let first = graph.provide::<Scheduler>().unwrap();
//! let second = graph.provide::<Scheduler>().unwrap();
//! assert!(Arc::ptr_eq(&first.clock, &second.clock));
//! ```

mod object_graph;
mod registry;
mod resolver;
mod scope_manager;

pub use object_graph::{new_object_graph, new_object_graph_with_config, ObjectGraphImpl};
pub use registry::TypeRegistryImpl;
pub use resolver::{BindingResolverImpl, BindingRuleSet};
pub use scope_manager::ScopeManagerImpl;

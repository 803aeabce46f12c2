//! 类型扫描器抽象接口
//!
//! 发现“所有可构造类型”与运行环境有关，因此作为可插拔组件为注册表提供初始内容。

use infrastructure_common::{DependencyResult, Injectable, TypeDescriptor};

/// 类型扫描器 trait
pub trait TypeScanner: Send + Sync {
    /// 获取扫描器名称
    fn name(&self) -> &str;

    /// 扫描并返回发现的类型描述符
    fn scan(&self) -> DependencyResult<Vec<TypeDescriptor>>;
}

/// 描述符工厂
pub type DescriptorFactory = fn() -> TypeDescriptor;

/// 模块：显式列出的一组可注入类型
///
/// 模块替代了运行时的全局自动发现，使发现过程确定且易于测试。
///
/// ```rust
/// use di_abstractions::{Module, TypeScanner};
/// use infrastructure_common::{Injectable, TypeDescriptor};
///
/// struct Clock;
/// impl Injectable for Clock {
///     fn descriptor() -> TypeDescriptor {
///         TypeDescriptor::builder::<Clock>().constructor(|_| Ok(Clock))
///     }
/// }
///
/// let module = Module::new("time").with::<Clock>();
/// assert_eq!(module.scan().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    factories: Vec<DescriptorFactory>,
}

impl Module {
    /// 创建空模块
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            factories: Vec::new(),
        }
    }

    /// 添加可注入类型
    pub fn with<T: Injectable + ?Sized>(mut self) -> Self {
        self.factories.push(T::descriptor);
        self
    }

    /// 添加描述符工厂
    pub fn with_factory(mut self, factory: DescriptorFactory) -> Self {
        self.factories.push(factory);
        self
    }

    /// 模块内类型数量
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// 模块是否为空
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl TypeScanner for Module {
    fn name(&self) -> &str {
        &self.name
    }

    fn scan(&self) -> DependencyResult<Vec<TypeDescriptor>> {
        tracing::debug!("扫描模块: {} ({} 个类型)", self.name, self.factories.len());
        Ok(self.factories.iter().map(|factory| factory()).collect())
    }
}

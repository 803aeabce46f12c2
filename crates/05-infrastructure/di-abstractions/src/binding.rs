//! 绑定规范抽象接口
//!
//! 绑定规范是调用方提供的覆盖表：参数名（可限定所属类型）-> 具体类型 + 作用域，
//! 在隐式命名约定之前被查询。

use infrastructure_common::{
    DependencyResult, Injectable, Instance, Scope, TypeDescriptor, TypeInfo,
};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// 绑定键：(所属类型, 参数名)，所属类型为空表示全局规则
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingKey {
    /// 所属类型
    pub owner: Option<TypeInfo>,
    /// 参数名
    pub parameter: String,
}

impl BindingKey {
    /// 全局规则键
    pub fn global(parameter: impl Into<String>) -> Self {
        Self {
            owner: None,
            parameter: parameter.into(),
        }
    }

    /// 限定所属类型的规则键
    pub fn owned(owner: TypeInfo, parameter: impl Into<String>) -> Self {
        Self {
            owner: Some(owner),
            parameter: parameter.into(),
        }
    }
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner {
            Some(owner) => write!(f, "{}.{}", owner.name, self.parameter),
            None => write!(f, "*.{}", self.parameter),
        }
    }
}

/// 绑定目标
#[derive(Debug, Clone)]
pub enum BindingTarget {
    /// 由容器构造的类型
    Type(Arc<TypeDescriptor>),
    /// 预先构建好的实例
    Instance {
        descriptor: Arc<TypeDescriptor>,
        instance: Instance,
        /// 被共享对象的地址，用于判断两个实例绑定是否指向同一对象
        identity: usize,
    },
}

impl BindingTarget {
    /// 目标类型描述符
    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        match self {
            Self::Type(descriptor) => descriptor,
            Self::Instance { descriptor, .. } => descriptor,
        }
    }

    /// 两个目标是否等价
    pub fn same_as(&self, other: &BindingTarget) -> bool {
        match (self, other) {
            (Self::Type(a), Self::Type(b)) => a.type_id() == b.type_id(),
            (Self::Instance { identity: a, .. }, Self::Instance { identity: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for BindingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(descriptor) => f.write_str(descriptor.name()),
            Self::Instance { descriptor, .. } => write!(f, "instance of {}", descriptor.name()),
        }
    }
}

/// 绑定规则
#[derive(Debug, Clone)]
pub struct BindingRule {
    /// 绑定键
    pub key: BindingKey,
    /// 绑定目标
    pub target: BindingTarget,
    /// 作用域
    pub scope: Scope,
    /// 来源绑定规范名称
    pub source: String,
}

impl BindingRule {
    /// 两条规则是否等价（目标与作用域都相同）
    pub fn same_as(&self, other: &BindingRule) -> bool {
        self.scope == other.scope && self.target.same_as(&other.target)
    }
}

impl fmt::Display for BindingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.key, self.target, self.scope)
    }
}

/// 绑定注册器
///
/// 传给 [`BindingSpec::configure`]，每次调用追加一条绑定规则。
#[derive(Debug)]
pub struct Binder {
    source: String,
    rules: Vec<BindingRule>,
}

impl Binder {
    /// 为指定绑定规范创建注册器
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            rules: Vec::new(),
        }
    }

    /// 全局绑定：任何类型中名为 `parameter` 的参数都解析为 `T`
    pub fn bind<T: Injectable + ?Sized>(&mut self, parameter: impl Into<String>, scope: Scope) -> &mut Self {
        let key = BindingKey::global(parameter);
        self.push(key, BindingTarget::Type(Arc::new(T::descriptor())), scope)
    }

    /// 限定所属类型的绑定：只有 `O` 的参数 `parameter` 解析为 `T`
    pub fn bind_for<O: ?Sized + 'static, T: Injectable + ?Sized>(
        &mut self,
        parameter: impl Into<String>,
        scope: Scope,
    ) -> &mut Self {
        let key = BindingKey::owned(TypeInfo::of::<O>(), parameter);
        self.push(key, BindingTarget::Type(Arc::new(T::descriptor())), scope)
    }

    /// 绑定到预先构建的实例，所有请求方得到同一个实例
    pub fn bind_instance<T: ?Sized + Send + Sync + 'static>(
        &mut self,
        parameter: impl Into<String>,
        instance: Arc<T>,
    ) -> &mut Self {
        let key = BindingKey::global(parameter);
        let identity = Arc::as_ptr(&instance) as *const () as usize;
        let target = BindingTarget::Instance {
            descriptor: Arc::new(TypeDescriptor::for_instance::<T>()),
            instance: Arc::new(instance),
            identity,
        };
        self.push(key, target, Scope::Singleton)
    }

    fn push(&mut self, key: BindingKey, target: BindingTarget, scope: Scope) -> &mut Self {
        let rule = BindingRule {
            key,
            target,
            scope,
            source: self.source.clone(),
        };
        debug!("添加绑定规则: {} [{}]", rule, self.source);
        self.rules.push(rule);
        self
    }

    /// 已添加的规则
    pub fn rules(&self) -> &[BindingRule] {
        &self.rules
    }

    /// 取出所有规则
    pub fn into_rules(self) -> Vec<BindingRule> {
        self.rules
    }
}

/// 绑定规范 trait
///
/// ```rust
/// use di_abstractions::{Binder, BindingSpec};
/// use infrastructure_common::{DependencyResult, Injectable, Scope, TypeDescriptor};
///
/// struct SystemClock;
/// impl Injectable for SystemClock {
///     fn descriptor() -> TypeDescriptor {
///         TypeDescriptor::builder::<SystemClock>().constructor(|_| Ok(SystemClock))
///     }
/// }
///
/// struct ClockBindings;
/// impl BindingSpec for ClockBindings {
///     fn configure(&self, bind: &mut Binder) -> DependencyResult<()> {
///         bind.bind::<SystemClock>("clock", Scope::Singleton);
///         Ok(())
///     }
/// }
///
/// let mut binder = Binder::new(ClockBindings.name());
/// ClockBindings.configure(&mut binder).unwrap();
/// assert_eq!(binder.rules().len(), 1);
/// ```
pub trait BindingSpec: Send + Sync {
    /// 绑定规范名称，同名规范在一个对象图中只配置一次
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// 注册绑定规则
    fn configure(&self, bind: &mut Binder) -> DependencyResult<()>;

    /// 依赖的其他绑定规范
    fn dependencies(&self) -> Vec<Box<dyn BindingSpec>> {
        Vec::new()
    }
}

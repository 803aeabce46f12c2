//! 元数据定义
//!
//! 提供可构造类型的描述符：类型信息、构造参数、作用域以及构造函数。

use crate::component::Arguments;
use crate::conventions::NamingConventions;
use crate::errors::{DependencyError, DependencyResult};
use crate::lifecycle::Scope;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// 类型擦除后的实例
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 构造函数类型
pub type ConstructorFn = Arc<dyn Fn(&Arguments) -> DependencyResult<Instance> + Send + Sync>;

/// 实例转换函数：把擦除后的实例转换为装箱的 `Arc<Requirement>`
type CastFn = Arc<dyn Fn(&Instance) -> Option<Box<dyn Any + Send + Sync>> + Send + Sync>;

/// 类型信息
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 简短类型名称
    pub name: String,
    /// 类型ID
    pub id: TypeId,
    /// 完整类型名称（含模块路径）
    pub type_name: &'static str,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        let type_name = std::any::type_name::<T>();
        Self {
            name: NamingConventions::short_type_name(type_name).to_string(),
            id: TypeId::of::<T>(),
            type_name,
        }
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// 依赖需求：构造参数声明的类型，可以是具体类型，也可以是 `dyn Trait` 能力
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Requirement {
    /// 需求类型ID
    pub type_id: TypeId,
    /// 需求类型名称
    pub type_name: &'static str,
}

impl Requirement {
    /// 从类型创建依赖需求
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// 简短类型名称
    pub fn short_name(&self) -> &'static str {
        NamingConventions::short_type_name(self.type_name)
    }
}

/// 构造参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorParameter {
    /// 参数名称，用于隐式绑定
    pub name: String,
    /// 声明的依赖需求
    pub requirement: Requirement,
    /// 参数位置
    pub position: usize,
}

/// 类型描述符
///
/// 在注册表填充时创建，此后不可变。没有构造函数的描述符表示抽象类型。
#[derive(Clone)]
pub struct TypeDescriptor {
    type_info: TypeInfo,
    parameters: Vec<ConstructorParameter>,
    scope: Option<Scope>,
    constructor: Option<ConstructorFn>,
    casts: HashMap<TypeId, CastFn>,
}

impl TypeDescriptor {
    /// 创建具体类型的描述符构建器
    pub fn builder<T: Send + Sync + 'static>() -> TypeDescriptorBuilder<T> {
        TypeDescriptorBuilder::new()
    }

    /// 创建抽象类型（通常是 `dyn Trait`）的描述符
    pub fn abstract_type<T: ?Sized + 'static>() -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            parameters: Vec::new(),
            scope: None,
            constructor: None,
            casts: HashMap::new(),
        }
    }

    /// 为预先构建的实例创建描述符
    ///
    /// 实例以 `Arc<Arc<T>>` 的形式擦除，因此 `T` 可以是 trait 对象。
    pub fn for_instance<T: ?Sized + Send + Sync + 'static>() -> Self {
        let cast: CastFn = Arc::new(|instance: &Instance| {
            instance
                .clone()
                .downcast::<Arc<T>>()
                .ok()
                .map(|outer| Box::new(Arc::clone(&*outer)) as Box<dyn Any + Send + Sync>)
        });

        let mut casts = HashMap::new();
        casts.insert(TypeId::of::<T>(), cast);

        Self {
            type_info: TypeInfo::of::<T>(),
            parameters: Vec::new(),
            scope: Some(Scope::Singleton),
            constructor: None,
            casts,
        }
    }

    /// 类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 类型ID
    pub fn type_id(&self) -> TypeId {
        self.type_info.id
    }

    /// 简短类型名称
    pub fn name(&self) -> &str {
        &self.type_info.name
    }

    /// 构造参数（按声明顺序）
    pub fn parameters(&self) -> &[ConstructorParameter] {
        &self.parameters
    }

    /// 声明的默认作用域
    pub fn scope(&self) -> Option<Scope> {
        self.scope
    }

    /// 是否为抽象类型
    pub fn is_abstract(&self) -> bool {
        self.constructor.is_none()
    }

    /// 是否能提供指定的依赖需求
    pub fn can_provide(&self, requirement: &Requirement) -> bool {
        self.casts.contains_key(&requirement.type_id)
    }

    /// 按隐式绑定约定，请求该类型时使用的参数名
    pub fn implicit_parameter_name(&self) -> String {
        NamingConventions::to_snake_case(self.name())
    }

    /// 调用构造函数
    pub fn construct(&self, arguments: &Arguments) -> DependencyResult<Instance> {
        match &self.constructor {
            Some(constructor) => constructor(arguments),
            None => Err(DependencyError::AbstractType {
                type_name: self.name().to_string(),
                requested_by: arguments.owner().to_string(),
            }),
        }
    }

    /// 把实例转换为指定需求类型
    pub fn cast<T: ?Sized + 'static>(&self, instance: &Instance) -> Option<Arc<T>> {
        let cast = self.casts.get(&TypeId::of::<T>())?;
        cast(instance)?.downcast::<Arc<T>>().ok().map(|boxed| *boxed)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_info", &self.type_info)
            .field("parameters", &self.parameters)
            .field("scope", &self.scope)
            .field("abstract", &self.is_abstract())
            .field("casts", &self.casts.len())
            .field("constructor", &"<function>")
            .finish()
    }
}

/// 描述符构建器
///
/// ```rust
/// use infrastructure_common::{Scope, TypeDescriptor};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {}
///
/// struct Name(String);
/// struct EnglishGreeter {
///     name: Arc<Name>,
/// }
/// impl Greeter for EnglishGreeter {}
///
/// let descriptor = TypeDescriptor::builder::<EnglishGreeter>()
///     .parameter::<Name>("name")
///     .provides::<dyn Greeter>(|it| it)
///     .scope(Scope::Prototype)
///     .constructor(|args| Ok(EnglishGreeter { name: args.get("name")? }));
///
/// assert_eq!(descriptor.name(), "EnglishGreeter");
/// assert_eq!(descriptor.parameters().len(), 1);
/// ```
pub struct TypeDescriptorBuilder<T> {
    parameters: Vec<ConstructorParameter>,
    scope: Option<Scope>,
    casts: HashMap<TypeId, CastFn>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> TypeDescriptorBuilder<T> {
    fn new() -> Self {
        let identity: CastFn = Arc::new(|instance: &Instance| {
            instance
                .clone()
                .downcast::<T>()
                .ok()
                .map(|concrete| Box::new(concrete) as Box<dyn Any + Send + Sync>)
        });

        let mut casts = HashMap::new();
        casts.insert(TypeId::of::<T>(), identity);

        Self {
            parameters: Vec::new(),
            scope: None,
            casts,
            _marker: PhantomData,
        }
    }

    /// 追加构造参数
    pub fn parameter<D: ?Sized + 'static>(mut self, name: impl Into<String>) -> Self {
        let position = self.parameters.len();
        self.parameters.push(ConstructorParameter {
            name: name.into(),
            requirement: Requirement::of::<D>(),
            position,
        });
        self
    }

    /// 声明该类型能以抽象能力 `I` 的形式提供
    pub fn provides<I>(mut self, upcast: impl Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let cast: CastFn = Arc::new(move |instance: &Instance| {
            instance
                .clone()
                .downcast::<T>()
                .ok()
                .map(|concrete| Box::new(upcast(concrete)) as Box<dyn Any + Send + Sync>)
        });
        self.casts.insert(TypeId::of::<I>(), cast);
        debug!(
            "{} 可作为 {} 提供",
            NamingConventions::short_type_name(std::any::type_name::<T>()),
            NamingConventions::short_type_name(std::any::type_name::<I>())
        );
        self
    }

    /// 设置默认作用域
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// 设置构造函数并完成构建
    pub fn constructor<F>(self, constructor: F) -> TypeDescriptor
    where
        F: Fn(&Arguments) -> DependencyResult<T> + Send + Sync + 'static,
    {
        let constructor: ConstructorFn =
            Arc::new(move |arguments: &Arguments| Ok(Arc::new(constructor(arguments)?) as Instance));

        let descriptor = TypeDescriptor {
            type_info: TypeInfo::of::<T>(),
            parameters: self.parameters,
            scope: self.scope,
            constructor: Some(constructor),
            casts: self.casts,
        };
        debug!(
            "生成类型描述符: {} (参数: {}, 作用域: {:?})",
            descriptor.name(),
            descriptor.parameters.len(),
            descriptor.scope
        );
        descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Storage: Send + Sync {
        fn kind(&self) -> &'static str;
    }

    #[derive(Debug)]
    struct MemoryStorage;

    impl Storage for MemoryStorage {
        fn kind(&self) -> &'static str {
            "memory"
        }
    }

    fn memory_storage() -> TypeDescriptor {
        TypeDescriptor::builder::<MemoryStorage>()
            .provides::<dyn Storage>(|it| it)
            .constructor(|_| Ok(MemoryStorage))
    }

    #[test]
    fn test_builder_records_parameters_in_order() {
        let descriptor = TypeDescriptor::builder::<MemoryStorage>()
            .parameter::<dyn Storage>("primary")
            .parameter::<MemoryStorage>("fallback")
            .constructor(|_| Ok(MemoryStorage));

        let names: Vec<_> = descriptor.parameters().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["primary", "fallback"]);
        assert_eq!(descriptor.parameters()[1].position, 1);
        assert_eq!(descriptor.parameters()[0].requirement.short_name(), "Storage");
        assert!(!descriptor.is_abstract());
        assert_eq!(descriptor.scope(), None);
    }

    #[test]
    fn test_abstract_type_has_no_constructor() {
        let descriptor = TypeDescriptor::abstract_type::<dyn Storage>();

        assert!(descriptor.is_abstract());
        assert_eq!(descriptor.name(), "Storage");
        assert!(!descriptor.can_provide(&Requirement::of::<dyn Storage>()));
    }

    #[test]
    fn test_cast_to_self_and_capability_share_instance() {
        let descriptor = memory_storage();
        let instance = descriptor.construct(&Arguments::new("test")).unwrap();

        let concrete = descriptor.cast::<MemoryStorage>(&instance).unwrap();
        let capability = descriptor.cast::<dyn Storage>(&instance).unwrap();

        assert_eq!(capability.kind(), "memory");
        assert!(std::ptr::addr_eq(Arc::as_ptr(&concrete), Arc::as_ptr(&capability)));
        assert!(descriptor.cast::<String>(&instance).is_none());
    }

    #[test]
    fn test_instance_descriptor_unwraps_shared_instance() {
        let shared: Arc<dyn Storage> = Arc::new(MemoryStorage);
        let descriptor = TypeDescriptor::for_instance::<dyn Storage>();
        let instance: Instance = Arc::new(Arc::clone(&shared));

        let resolved = descriptor.cast::<dyn Storage>(&instance).unwrap();

        assert!(Arc::ptr_eq(&resolved, &shared));
        assert_eq!(descriptor.scope(), Some(Scope::Singleton));
        assert!(descriptor.can_provide(&Requirement::of::<dyn Storage>()));
    }

    #[test]
    fn test_implicit_parameter_name() {
        assert_eq!(memory_storage().implicit_parameter_name(), "memory_storage");
    }
}

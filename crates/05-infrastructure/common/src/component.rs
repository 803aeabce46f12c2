//! 可注入组件定义
//!
//! 提供容器管理类型必须实现的基础 trait，以及交给构造函数的参数集合。

use crate::errors::{DependencyError, DependencyResult};
use crate::metadata::{Instance, TypeDescriptor};
use std::sync::Arc;

/// 可注入类型 trait
///
/// 能够生成自身 [`TypeDescriptor`] 的类型。具体类型通常通过
/// `#[derive(Injectable)]` 实现；抽象能力（`dyn Trait`）手动实现并返回
/// [`TypeDescriptor::abstract_type`]。
pub trait Injectable: 'static {
    /// 生成类型描述符
    fn descriptor() -> TypeDescriptor;
}

/// 已解析的构造参数
#[derive(Debug, Clone)]
pub struct ResolvedArgument {
    /// 参数名称
    pub name: String,
    /// 参数实例
    pub instance: Instance,
    /// 提供该实例的类型描述符
    pub descriptor: Arc<TypeDescriptor>,
}

/// 构造参数集合
///
/// 按声明顺序保存已解析的依赖，构造函数按名称或位置取用。
#[derive(Debug, Clone)]
pub struct Arguments {
    owner: String,
    entries: Vec<ResolvedArgument>,
}

impl Arguments {
    /// 创建空参数集合
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            entries: Vec::new(),
        }
    }

    /// 追加已解析的参数
    pub fn push(&mut self, name: impl Into<String>, instance: Instance, descriptor: Arc<TypeDescriptor>) {
        self.entries.push(ResolvedArgument {
            name: name.into(),
            instance,
            descriptor,
        });
    }

    /// 所属类型名称
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// 参数数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否没有参数
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按名称获取参数
    pub fn get<T: ?Sized + 'static>(&self, name: &str) -> DependencyResult<Arc<T>> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| DependencyError::ArgumentNotFound {
                owner: self.owner.clone(),
                parameter: name.to_string(),
            })?;
        self.cast(entry)
    }

    /// 按位置获取参数
    pub fn get_at<T: ?Sized + 'static>(&self, position: usize) -> DependencyResult<Arc<T>> {
        let entry = self
            .entries
            .get(position)
            .ok_or_else(|| DependencyError::ArgumentNotFound {
                owner: self.owner.clone(),
                parameter: format!("#{position}"),
            })?;
        self.cast(entry)
    }

    fn cast<T: ?Sized + 'static>(&self, entry: &ResolvedArgument) -> DependencyResult<Arc<T>> {
        entry
            .descriptor
            .cast::<T>(&entry.instance)
            .ok_or_else(|| DependencyError::TypeMismatch {
                owner: self.owner.clone(),
                parameter: entry.name.clone(),
                expected: std::any::type_name::<T>().to_string(),
                actual: entry.descriptor.name().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Clock;

    fn clock_argument(arguments: &mut Arguments) -> Arc<TypeDescriptor> {
        let descriptor = Arc::new(TypeDescriptor::builder::<Clock>().constructor(|_| Ok(Clock)));
        let instance: Instance = Arc::new(Clock);
        arguments.push("clock", instance, Arc::clone(&descriptor));
        descriptor
    }

    #[test]
    fn test_get_by_name_and_position() {
        let mut arguments = Arguments::new("Scheduler");
        clock_argument(&mut arguments);

        assert_eq!(arguments.len(), 1);
        let by_name = arguments.get::<Clock>("clock").unwrap();
        let by_position = arguments.get_at::<Clock>(0).unwrap();
        assert!(Arc::ptr_eq(&by_name, &by_position));
    }

    #[test]
    fn test_missing_argument() {
        let arguments = Arguments::new("Scheduler");

        assert!(arguments.is_empty());
        let error = arguments.get::<Clock>("clock").unwrap_err();
        assert!(matches!(
            error,
            DependencyError::ArgumentNotFound { ref owner, ref parameter }
                if owner == "Scheduler" && parameter == "clock"
        ));
    }

    #[test]
    fn test_wrong_type_is_reported() {
        let mut arguments = Arguments::new("Scheduler");
        clock_argument(&mut arguments);

        let error = arguments.get::<String>("clock").unwrap_err();
        assert!(matches!(error, DependencyError::TypeMismatch { .. }));
    }
}

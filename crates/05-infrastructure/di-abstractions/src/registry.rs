//! 类型注册表抽象接口

use crate::scanner::TypeScanner;
use infrastructure_common::{DependencyResult, Injectable, TypeDescriptor};
use std::any::TypeId;
use std::sync::Arc;

/// 类型注册表 trait
///
/// 保存容器可发现的可构造类型目录。注册是幂等的：重复注册同一类型不产生任何效果。
pub trait TypeRegistry: Send + Sync {
    /// 注册类型描述符，返回是否为新注册
    fn register_descriptor(&mut self, descriptor: TypeDescriptor) -> DependencyResult<bool>;

    /// 注册可注入类型
    fn register<T>(&mut self) -> DependencyResult<bool>
    where
        T: Injectable + ?Sized,
        Self: Sized,
    {
        self.register_descriptor(T::descriptor())
    }

    /// 批量发现并注册扫描器提供的所有类型，返回新注册的数量
    fn scan(&mut self, scanners: &[&dyn TypeScanner]) -> DependencyResult<usize> {
        let mut registered = 0;
        for scanner in scanners {
            for descriptor in scanner.scan()? {
                if self.register_descriptor(descriptor)? {
                    registered += 1;
                }
            }
        }
        Ok(registered)
    }

    /// 按类型ID获取描述符
    fn get(&self, type_id: TypeId) -> Option<Arc<TypeDescriptor>>;

    /// 按名称查找（大小写归一化匹配）
    ///
    /// 多个类型归一化到同一查找名时返回 `DuplicateType` 错误。
    fn lookup_by_name(&self, name: &str) -> DependencyResult<Option<Arc<TypeDescriptor>>>;

    /// 按名称查找所有候选类型
    fn candidates(&self, name: &str) -> Vec<Arc<TypeDescriptor>>;

    /// 检查类型是否已注册
    fn contains(&self, type_id: TypeId) -> bool {
        self.get(type_id).is_some()
    }

    /// 按注册顺序返回所有描述符
    fn descriptors(&self) -> Vec<Arc<TypeDescriptor>>;

    /// 已注册类型数量
    fn len(&self) -> usize;

    /// 是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! 类型注册表实现

use di_abstractions::TypeRegistry;
use infrastructure_common::{DependencyError, DependencyResult, NamingConventions, TypeDescriptor};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 类型注册表实现
///
/// 在对象图构建阶段填充，构建完成后只读，查找无需加锁。
#[derive(Debug, Default)]
pub struct TypeRegistryImpl {
    /// 按注册顺序保存的描述符
    descriptors: Vec<Arc<TypeDescriptor>>,
    /// 类型ID索引
    by_type: HashMap<TypeId, usize>,
    /// 归一化名称索引
    by_name: HashMap<String, Vec<usize>>,
    /// 是否在注册时拒绝名称冲突
    reject_duplicate_names: bool,
}

impl TypeRegistryImpl {
    /// 创建新的类型注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册时拒绝归一化名称冲突的类型
    pub fn with_duplicate_rejection(mut self, reject: bool) -> Self {
        self.reject_duplicate_names = reject;
        self
    }

    /// 注册共享的描述符，返回注册表中对应的规范实例
    ///
    /// 同一类型已注册时返回已有的描述符。
    pub fn register_shared(&mut self, descriptor: Arc<TypeDescriptor>) -> DependencyResult<Arc<TypeDescriptor>> {
        if let Some(&index) = self.by_type.get(&descriptor.type_id()) {
            return Ok(Arc::clone(&self.descriptors[index]));
        }

        let key = NamingConventions::lookup_key(descriptor.name());
        if self.reject_duplicate_names {
            if let Some(existing) = self.by_name.get(&key).filter(|indices| !indices.is_empty()) {
                let mut type_names: Vec<String> = existing
                    .iter()
                    .map(|&index| self.descriptors[index].type_info().type_name.to_string())
                    .collect();
                type_names.push(descriptor.type_info().type_name.to_string());
                return Err(DependencyError::DuplicateType {
                    lookup_name: key,
                    type_names,
                });
            }
        }

        debug!(
            "注册类型: {} ({}，隐式参数名: {})",
            descriptor.name(),
            descriptor.type_info().type_name,
            descriptor.implicit_parameter_name()
        );

        let index = self.descriptors.len();
        self.by_type.insert(descriptor.type_id(), index);
        self.by_name.entry(key).or_default().push(index);
        self.descriptors.push(Arc::clone(&descriptor));
        Ok(descriptor)
    }
}

impl TypeRegistry for TypeRegistryImpl {
    fn register_descriptor(&mut self, descriptor: TypeDescriptor) -> DependencyResult<bool> {
        if self.by_type.contains_key(&descriptor.type_id()) {
            return Ok(false);
        }
        self.register_shared(Arc::new(descriptor))?;
        Ok(true)
    }

    fn get(&self, type_id: TypeId) -> Option<Arc<TypeDescriptor>> {
        self.by_type
            .get(&type_id)
            .map(|&index| Arc::clone(&self.descriptors[index]))
    }

    fn lookup_by_name(&self, name: &str) -> DependencyResult<Option<Arc<TypeDescriptor>>> {
        let mut candidates = self.candidates(name);
        match candidates.len() {
            0 => Ok(None),
            1 => Ok(candidates.pop()),
            _ => Err(DependencyError::DuplicateType {
                lookup_name: NamingConventions::lookup_key(name),
                type_names: candidates
                    .iter()
                    .map(|descriptor| descriptor.type_info().type_name.to_string())
                    .collect(),
            }),
        }
    }

    fn candidates(&self, name: &str) -> Vec<Arc<TypeDescriptor>> {
        self.by_name
            .get(&NamingConventions::lookup_key(name))
            .map(|indices| {
                indices
                    .iter()
                    .map(|&index| Arc::clone(&self.descriptors[index]))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn descriptors(&self) -> Vec<Arc<TypeDescriptor>> {
        self.descriptors.clone()
    }

    fn len(&self) -> usize {
        self.descriptors.len()
    }
}

//! 作用域管理器实现

use dashmap::DashMap;
use di_abstractions::ScopeManager;
use infrastructure_common::{DependencyResult, Instance, Scope, TypeDescriptor};
use once_cell::sync::OnceCell;
use std::any::TypeId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// 作用域管理器实现
///
/// 每个单例类型对应一个 `OnceCell`，同一类型的并发首次访问在该单元上串行化，
/// 不同类型之间互不阻塞。构造失败不会写入缓存。
#[derive(Debug, Default)]
pub struct ScopeManagerImpl {
    /// 单例缓存
    singletons: DashMap<TypeId, Arc<OnceCell<Instance>>>,
    /// 工厂调用次数
    constructions: AtomicUsize,
}

impl ScopeManagerImpl {
    /// 创建新的作用域管理器
    pub fn new() -> Self {
        Self::default()
    }

    fn construct(&self, descriptor: &TypeDescriptor, factory: &dyn Fn() -> DependencyResult<Instance>) -> DependencyResult<Instance> {
        let instance = factory()?;
        self.constructions.fetch_add(1, Ordering::Relaxed);
        trace!("构造实例: {}", descriptor.name());
        Ok(instance)
    }

    fn singleton_cell(&self, type_id: TypeId) -> Arc<OnceCell<Instance>> {
        // 先克隆出单元再初始化，构造期间不持有分片锁
        Arc::clone(self.singletons.entry(type_id).or_default().value())
    }
}

impl ScopeManager for ScopeManagerImpl {
    fn get(
        &self,
        descriptor: &TypeDescriptor,
        scope: Scope,
        factory: &dyn Fn() -> DependencyResult<Instance>,
    ) -> DependencyResult<Instance> {
        match scope {
            Scope::Prototype => self.construct(descriptor, factory),
            Scope::Singleton => {
                let cell = self.singleton_cell(descriptor.type_id());
                if let Some(instance) = cell.get() {
                    return Ok(Arc::clone(instance));
                }

                let instance = cell.get_or_try_init(|| {
                    let instance = self.construct(descriptor, factory)?;
                    debug!("缓存单例: {}", descriptor.name());
                    Ok(instance)
                })?;
                Ok(Arc::clone(instance))
            }
        }
    }

    fn cached_count(&self) -> usize {
        self.singletons
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }

    fn construction_count(&self) -> usize {
        self.constructions.load(Ordering::Relaxed)
    }

    fn clear(&self) {
        let cached = self.cached_count();
        self.singletons.clear();
        debug!("清空单例缓存: {} 个实例", cached);
    }
}

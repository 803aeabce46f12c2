//! 作用域管理抽象接口

use infrastructure_common::{DependencyResult, Instance, Scope, TypeDescriptor};

/// 作用域管理器 trait
///
/// 单例：缓存命中直接返回，否则只调用一次工厂并缓存结果；同一类型的并发首次访问
/// 必须串行化，所有调用方看到同一个实例。原型：每次都调用工厂，从不访问缓存。
pub trait ScopeManager: Send + Sync {
    /// 按作用域获取实例
    fn get(
        &self,
        descriptor: &TypeDescriptor,
        scope: Scope,
        factory: &dyn Fn() -> DependencyResult<Instance>,
    ) -> DependencyResult<Instance>;

    /// 已缓存的单例数量
    fn cached_count(&self) -> usize;

    /// 工厂调用次数
    fn construction_count(&self) -> usize;

    /// 丢弃所有缓存的单例
    fn clear(&self);
}

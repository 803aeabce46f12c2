//! 订单领域类型

use di_abstractions::{Binder, BindingSpec};
use infrastructure_common::{DependencyResult, Injectable, Scope, TypeDescriptor};
use injectable_macros::Injectable;
use std::sync::Arc;
use tracing::info;

/// 订单
#[derive(Debug, Clone)]
pub struct Order {
    pub order_id: String,
}

impl Order {
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
        }
    }
}

/// 订单存储上下文
pub trait OrderContext: Send + Sync {
    /// 保存订单，返回处理该订单的实现名称
    fn create_order(&self, order: &Order) -> &'static str;
}

impl Injectable for dyn OrderContext {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::abstract_type::<dyn OrderContext>()
    }
}

#[derive(Debug, Default, Injectable)]
#[injectable(provides(dyn OrderContext))]
pub struct SqlLiteOrderContext;

impl OrderContext for SqlLiteOrderContext {
    fn create_order(&self, order: &Order) -> &'static str {
        info!("订单 {} 由 SqlLiteOrderContext 创建", order.order_id);
        "SqlLiteOrderContext"
    }
}

#[derive(Debug, Default, Injectable)]
#[injectable(provides(dyn OrderContext))]
pub struct MemoryOrderContext;

impl OrderContext for MemoryOrderContext {
    fn create_order(&self, order: &Order) -> &'static str {
        info!("订单 {} 由 MemoryOrderContext 创建", order.order_id);
        "MemoryOrderContext"
    }
}

/// 订单服务
#[derive(Injectable)]
pub struct OrderService {
    pub order_context: Arc<dyn OrderContext>,
}

impl OrderService {
    /// 不经过容器，手动装配
    pub fn new(order_context: Arc<dyn OrderContext>) -> Self {
        Self { order_context }
    }

    pub fn process_order(&self, order: &Order) -> &'static str {
        self.order_context.create_order(order)
    }
}

/// 把 `order_context` 绑定到内存实现
pub struct OrderContextBindings {
    pub scope: Scope,
}

impl BindingSpec for OrderContextBindings {
    fn configure(&self, bind: &mut Binder) -> DependencyResult<()> {
        bind.bind::<MemoryOrderContext>("order_context", self.scope);
        Ok(())
    }
}

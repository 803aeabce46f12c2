//! 订单场景集成测试
//!
//! `OrderService` 依赖抽象的 `OrderContext`，由绑定规范选择具体实现与作用域。

use di_abstractions::{Binder, BindingSpec, Module, ObjectGraph};
use di_impl::{new_object_graph, ObjectGraphImpl};
use infrastructure_common::{DependencyError, DependencyResult, Injectable, Scope, TypeDescriptor};
use injectable_macros::Injectable;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default, Injectable)]
pub struct Order {
    #[inject(default)]
    id: u64,
}

pub trait OrderContext: Send + Sync {
    fn kind(&self) -> &'static str;
    fn save(&self, order: &Order);
    fn count(&self) -> usize;
}

impl Injectable for dyn OrderContext {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::abstract_type::<dyn OrderContext>()
    }
}

#[derive(Injectable)]
#[injectable(provides(dyn OrderContext))]
pub struct SqlLiteOrderContext {
    #[inject(default)]
    rows: Mutex<Vec<u64>>,
}

impl OrderContext for SqlLiteOrderContext {
    fn kind(&self) -> &'static str {
        "sqlite"
    }

    fn save(&self, order: &Order) {
        if let Ok(mut rows) = self.rows.lock() {
            rows.push(order.id);
        }
    }

    fn count(&self) -> usize {
        self.rows.lock().map(|rows| rows.len()).unwrap_or_default()
    }
}

#[derive(Injectable)]
#[injectable(provides(dyn OrderContext))]
pub struct MemoryOrderContext {
    #[inject(default)]
    orders: Mutex<Vec<Order>>,
}

impl OrderContext for MemoryOrderContext {
    fn kind(&self) -> &'static str {
        "memory"
    }

    fn save(&self, order: &Order) {
        if let Ok(mut orders) = self.orders.lock() {
            orders.push(order.clone());
        }
    }

    fn count(&self) -> usize {
        self.orders.lock().map(|orders| orders.len()).unwrap_or_default()
    }
}

#[derive(Injectable)]
pub struct OrderService {
    order_context: Arc<dyn OrderContext>,
}

impl OrderService {
    fn place(&self, order: Order) {
        self.order_context.save(&order);
    }
}

/// 把 `order_context` 绑定到内存实现
struct MemoryContextBindings {
    scope: Scope,
}

impl BindingSpec for MemoryContextBindings {
    fn name(&self) -> &str {
        match self.scope {
            Scope::Singleton => "MemoryContextBindings(singleton)",
            Scope::Prototype => "MemoryContextBindings(prototype)",
        }
    }

    fn configure(&self, bind: &mut Binder) -> DependencyResult<()> {
        bind.bind::<MemoryOrderContext>("order_context", self.scope);
        Ok(())
    }
}

struct SqlLiteContextBindings;

impl BindingSpec for SqlLiteContextBindings {
    fn configure(&self, bind: &mut Binder) -> DependencyResult<()> {
        bind.bind::<SqlLiteOrderContext>("order_context", Scope::Singleton);
        Ok(())
    }
}

fn order_module() -> Module {
    Module::new("orders")
        .with::<Order>()
        .with::<dyn OrderContext>()
        .with::<SqlLiteOrderContext>()
        .with::<MemoryOrderContext>()
        .with::<OrderService>()
}

fn graph_with(scope: Scope) -> ObjectGraphImpl {
    let module = order_module();
    new_object_graph(&[&module], vec![Box::new(MemoryContextBindings { scope })]).unwrap()
}

#[test]
fn test_provide_type_without_dependencies() {
    let module = order_module();
    let graph = new_object_graph(&[&module], Vec::new()).unwrap();

    let order = graph.provide::<Order>().unwrap();

    assert_eq!(order.id, 0);
}

#[test]
fn test_abstract_context_needs_a_binding() {
    let module = order_module();
    let graph = new_object_graph(&[&module], Vec::new()).unwrap();

    let Err(error) = graph.provide::<OrderService>() else {
        panic!("没有绑定时 OrderService 不应构造成功");
    };

    assert!(matches!(
        error,
        DependencyError::AbstractType { ref type_name, ref requested_by }
            if type_name == "OrderContext" && requested_by == "OrderService.order_context"
    ));
}

#[test]
fn test_explicit_binding_to_abstract_context_fails() {
    struct AbstractContextBindings;

    impl BindingSpec for AbstractContextBindings {
        fn configure(&self, bind: &mut Binder) -> DependencyResult<()> {
            bind.bind::<dyn OrderContext>("order_context", Scope::Singleton);
            Ok(())
        }
    }

    let module = order_module();
    let graph = new_object_graph(&[&module], vec![Box::new(AbstractContextBindings)]).unwrap();

    let Err(error) = graph.provide::<OrderService>() else {
        panic!("绑定到抽象类型时 OrderService 不应构造成功");
    };

    assert!(matches!(
        error,
        DependencyError::AbstractType { ref type_name, ref requested_by }
            if type_name == "OrderContext" && requested_by == "OrderService.order_context"
    ));
    assert_eq!(graph.stats().failures, 1);
}

#[test]
fn test_binding_selects_memory_context() {
    let graph = graph_with(Scope::Singleton);

    let service = graph.provide::<OrderService>().unwrap();

    assert_eq!(service.order_context.kind(), "memory");
}

#[test]
fn test_undeclared_root_is_fresh_even_when_bound_singleton() {
    let graph = graph_with(Scope::Singleton);

    let first = graph.provide::<MemoryOrderContext>().unwrap();
    let second = graph.provide::<MemoryOrderContext>().unwrap();
    let service = graph.provide::<OrderService>().unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    first.save(&Order { id: 1 });
    assert_eq!(service.order_context.count(), 0);
}

#[test]
fn test_singleton_context_is_shared_between_services() {
    let graph = graph_with(Scope::Singleton);

    let first = graph.provide::<OrderService>().unwrap();
    let second = graph.provide::<OrderService>().unwrap();

    assert!(Arc::ptr_eq(&first.order_context, &second.order_context));
    first.place(Order { id: 1 });
    second.place(Order { id: 2 });
    assert_eq!(first.order_context.count(), 2);
}

#[test]
fn test_prototype_context_is_fresh_per_service() {
    let graph = graph_with(Scope::Prototype);

    let first = graph.provide::<OrderService>().unwrap();
    let second = graph.provide::<OrderService>().unwrap();

    assert!(!Arc::ptr_eq(&first.order_context, &second.order_context));
    first.place(Order { id: 1 });
    assert_eq!(second.order_context.count(), 0);
}

#[test]
fn test_conflicting_specs_are_rejected() {
    let module = order_module();

    let error = new_object_graph(
        &[&module],
        vec![
            Box::new(MemoryContextBindings {
                scope: Scope::Singleton,
            }),
            Box::new(SqlLiteContextBindings),
        ],
    )
    .unwrap_err();

    assert!(matches!(
        error,
        DependencyError::ConflictingBinding { ref key, .. } if key == "*.order_context"
    ));
}

#[test]
fn test_identical_rules_from_two_specs_merge() {
    let module = order_module();
    let graph = new_object_graph(
        &[&module],
        vec![
            Box::new(MemoryContextBindings {
                scope: Scope::Singleton,
            }),
            Box::new(MemoryContextBindings {
                scope: Scope::Singleton,
            }),
        ],
    )
    .unwrap();

    assert_eq!(graph.stats().binding_rules, 1);
    assert_eq!(graph.provide::<OrderService>().unwrap().order_context.kind(), "memory");
}

#[test]
fn test_owner_scoped_binding_wins() {
    struct ServiceUsesSqlLite;

    impl BindingSpec for ServiceUsesSqlLite {
        fn configure(&self, bind: &mut Binder) -> DependencyResult<()> {
            bind.bind_for::<OrderService, SqlLiteOrderContext>("order_context", Scope::Singleton);
            Ok(())
        }

        fn dependencies(&self) -> Vec<Box<dyn BindingSpec>> {
            vec![Box::new(MemoryContextBindings {
                scope: Scope::Singleton,
            })]
        }
    }

    let module = order_module();
    let graph = new_object_graph(&[&module], vec![Box::new(ServiceUsesSqlLite)]).unwrap();

    let service = graph.provide::<OrderService>().unwrap();

    assert_eq!(service.order_context.kind(), "sqlite");
    assert_eq!(graph.stats().binding_rules, 2);
}

#[test]
fn test_validate_reports_abstract_context() {
    let module = order_module();
    let graph = new_object_graph(&[&module], Vec::new()).unwrap();

    let errors = graph.validate().unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], DependencyError::AbstractType { .. }));
    assert!(graph_with(Scope::Singleton).validate().is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_services_share_singleton_context() {
    let graph = Arc::new(graph_with(Scope::Singleton));

    let handles: Vec<_> = (0..16)
        .map(|id| {
            let graph = Arc::clone(&graph);
            tokio::task::spawn_blocking(move || {
                let service = graph.provide::<OrderService>()?;
                service.place(Order { id });
                Ok::<_, DependencyError>(service)
            })
        })
        .collect();

    let mut services = Vec::new();
    for handle in handles {
        services.push(handle.await.unwrap().unwrap());
    }

    assert!(services
        .iter()
        .all(|service| Arc::ptr_eq(&service.order_context, &services[0].order_context)));
    assert_eq!(services[0].order_context.count(), 16);
    assert_eq!(graph.stats().cached_singletons, 1);
}

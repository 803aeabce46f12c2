use infrastructure_common::{Injectable, Requirement};
use injectable_macros::Injectable;
use std::sync::Arc;

trait OrderContext: Send + Sync {}
trait Audited: Send + Sync {}

#[derive(Injectable)]
#[injectable(singleton, provides(dyn OrderContext, dyn Audited))]
struct MemoryOrderContext {
    #[inject(default)]
    orders: Vec<String>,
}

impl OrderContext for MemoryOrderContext {}
impl Audited for MemoryOrderContext {}

#[derive(Injectable)]
struct OrderService {
    order_context: Arc<dyn OrderContext>,
    #[inject(name = "memory_order_context")]
    storage: Arc<MemoryOrderContext>,
}

fn main() {
    let context = <MemoryOrderContext as Injectable>::descriptor();
    assert!(context.can_provide(&Requirement::of::<dyn OrderContext>()));
    assert!(context.can_provide(&Requirement::of::<dyn Audited>()));

    let service = <OrderService as Injectable>::descriptor();
    let names: Vec<&str> = service.parameters().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["order_context", "memory_order_context"]);

    let _ = |service: OrderService| (service.order_context, service.storage);
    let _ = |context: MemoryOrderContext| context.orders;
}

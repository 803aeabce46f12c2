use infrastructure_common::{Injectable, Scope};
use injectable_macros::Injectable;

#[derive(Injectable)]
#[injectable(prototype)]
struct Order;

fn main() {
    let descriptor = <Order as Injectable>::descriptor();
    assert_eq!(descriptor.name(), "Order");
    assert_eq!(descriptor.scope(), Some(Scope::Prototype));
    assert!(descriptor.parameters().is_empty());
}

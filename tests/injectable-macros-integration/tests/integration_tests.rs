//! 派生宏与对象图的集成测试

use di_abstractions::{Module, ObjectGraph};
use di_impl::new_object_graph;
use infrastructure_common::{DependencyError, Injectable as _, Scope};
use injectable_macros::Injectable;
use std::sync::Arc;

pub trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

#[derive(Injectable)]
#[injectable(singleton)]
pub struct Salutation {
    #[inject(default)]
    word: String,
}

#[derive(Injectable)]
#[injectable(provides(dyn Greeter))]
pub struct EnglishGreeter {
    salutation: Arc<Salutation>,
}

impl Greeter for EnglishGreeter {
    fn greet(&self) -> String {
        format!("{}hello", self.salutation.word)
    }
}

#[derive(Injectable)]
pub struct Reception {
    #[inject(name = "english_greeter")]
    greeter: Arc<dyn Greeter>,
    salutation: Arc<Salutation>,
    #[inject(default)]
    visitors: u32,
}

#[derive(Injectable)]
pub struct Doorman {
    greeter: Arc<dyn Greeter>,
}

#[test]
fn test_derived_descriptor_metadata() {
    let descriptor = Reception::descriptor();

    let names: Vec<_> = descriptor.parameters().iter().map(|p| p.name.clone()).collect();
    assert_eq!(names, vec!["english_greeter", "salutation"]);
    assert_eq!(descriptor.scope(), None);
    assert_eq!(Salutation::descriptor().scope(), Some(Scope::Singleton));
}

#[test]
fn test_derived_types_build_an_object_graph() {
    let module = Module::new("reception")
        .with::<Salutation>()
        .with::<EnglishGreeter>()
        .with::<Reception>();
    let graph = new_object_graph(&[&module], Vec::new()).unwrap();

    let reception = graph.provide::<Reception>().unwrap();

    assert_eq!(reception.greeter.greet(), "hello");
    assert_eq!(reception.visitors, 0);
    assert!(Arc::ptr_eq(
        &reception.salutation,
        &graph.provide::<Salutation>().unwrap()
    ));
}

#[test]
fn test_capability_parameter_without_binding_is_unresolvable() {
    let module = Module::new("doorman")
        .with::<Salutation>()
        .with::<EnglishGreeter>()
        .with::<Doorman>();
    let graph = new_object_graph(&[&module], Vec::new()).unwrap();

    let Err(error) = graph.provide::<Doorman>() else {
        panic!("Doorman 不应构造成功");
    };

    assert!(matches!(
        error,
        DependencyError::UnresolvableDependency { ref parameter, .. } if parameter == "greeter"
    ));
}

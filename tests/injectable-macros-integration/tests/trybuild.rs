//! trybuild 编译期测试

#[test]
fn trybuild_injectable_macros() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/ok_unit_struct.rs");
    t.pass("tests/trybuild/ok_capabilities.rs");
}

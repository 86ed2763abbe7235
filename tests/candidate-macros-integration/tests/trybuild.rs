//! 宏展开编译测试

#[test]
fn trybuild_cases() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/candidate_ok.rs");
}

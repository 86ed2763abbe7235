//! #[candidate] 基本用法应当可以编译

use candidate_macros::candidate;

#[candidate(module = "trybuild_demo", contracts(IWidget))]
pub struct Widget;

#[candidate(abstract_type)]
pub struct WidgetBase;

fn main() {
    let candidates = conventions_common::global_catalog().candidates_in_module("trybuild_demo");
    assert_eq!(candidates.len(), 1);
}

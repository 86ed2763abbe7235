//! 候选类型登记宏的集成测试
//!
//! `#[candidate]` 标注的类型在程序启动时登记到全局目录，
//! 再经目录类型来源流经完整的绑定发现管线

use binding_abstractions::{CatalogTypeSource, InMemoryBindingRegistry, ScanOptions, TypeSource};
use binding_generators::ContractNamingBindingGenerator;
use candidate_macros::candidate;
use conventions_builder::ConventionBindingBuilder;
use conventions_common::{global_catalog, TypeRef};
use std::sync::Arc;

/// 发货服务
#[candidate(module = "macro_demo", contracts(IShippingService))]
pub struct ShippingService;

/// 计费服务，带自定义限定名称
#[candidate(
    module = "macro_demo",
    name = "billing::BillingService",
    contracts(IBillingService, "audit::IAuditable")
)]
pub struct BillingService;

/// 仓储基类（抽象）
#[candidate(module = "macro_demo", contracts(IStore), abstract_type)]
pub struct StoreBase;

#[test]
fn test_candidates_are_registered_at_startup() {
    let catalog = global_catalog();

    let in_module = catalog.candidates_in_module("macro_demo");
    assert_eq!(in_module.len(), 3);

    // 模块内按限定名称字典序
    let names: Vec<&str> = in_module
        .iter()
        .map(|candidate| candidate.qualified_name.as_str())
        .collect();
    assert_eq!(names[0], "billing::BillingService");

    let store = in_module
        .iter()
        .find(|candidate| candidate.short_name() == "StoreBase")
        .unwrap();
    assert!(!store.instantiable);

    let billing = in_module
        .iter()
        .find(|candidate| candidate.short_name() == "BillingService")
        .unwrap();
    assert!(billing.has_capability("IBillingService"));
    assert!(billing.has_capability("audit::IAuditable"));
}

#[tokio::test]
async fn test_catalog_source_resolves_macro_candidates() {
    let source = CatalogTypeSource::new();

    let resolved = source
        .resolve(&TypeRef::qualified("macro_demo", "ShippingService"))
        .await
        .unwrap();
    assert!(resolved.has_capability("IShippingService"));
}

#[tokio::test]
async fn test_macro_candidates_flow_through_pipeline() {
    let source = Arc::new(CatalogTypeSource::new());
    let mut builder = ConventionBindingBuilder::new(source);
    let mut registry = InMemoryBindingRegistry::new();

    builder.select_from(["macro_demo"]).await.unwrap();
    builder
        .bind_with(&ContractNamingBindingGenerator::new())
        .await
        .unwrap();
    let summary = builder.emit_into(&mut registry).await.unwrap();

    assert!(summary.is_clean());
    // ShippingService -> IShippingService, BillingService -> IBillingService;
    // 抽象的 StoreBase 不参与扫描, IAuditable 不符合命名约定
    assert_eq!(summary.registered, 2);
}

#[tokio::test]
async fn test_abstract_candidates_opt_in_via_scan_options() {
    let source = CatalogTypeSource::new();

    let default_set = source
        .collect_from(&["macro_demo".to_string()], &ScanOptions::new())
        .await
        .unwrap();
    assert_eq!(default_set.len(), 2);

    let with_abstract = source
        .collect_from(
            &["macro_demo".to_string()],
            &ScanOptions::new().with_abstract_types(),
        )
        .await
        .unwrap();
    assert_eq!(with_abstract.len(), 3);
}

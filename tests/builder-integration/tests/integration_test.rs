//! 约定绑定构建器的端到端集成测试

use binding_abstractions::{
    actions, BindingRegistry, InMemoryBindingRegistry, InMemoryTypeSource, ScanOptions,
};
use binding_generators::{
    CapabilityBindingGenerator, ContractNamingBindingGenerator, SelfBindingGenerator,
};
use conventions_builder::ConventionBindingBuilder;
use conventions_common::{
    BuildError, CandidateType, ConventionError, Lifetime, SourceError, TypeRef,
};
use std::sync::Arc;
use std::sync::Once;
use tokio_util::sync::CancellationToken;

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志系统（只初始化一次）
fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .try_init()
            .ok();
    });
}

/// 场景模块：Foo 实现 IFoo，Bar 实现 IBar 和 IBaz，Plain 没有能力
fn scenario_source() -> Arc<InMemoryTypeSource> {
    Arc::new(InMemoryTypeSource::new().with_module(
        "module_a",
        vec![
            CandidateType::new("Foo", "module_a").with_capability("IFoo"),
            CandidateType::new("Bar", "module_a")
                .with_capability("IBar")
                .with_capability("IBaz"),
            CandidateType::new("Plain", "module_a"),
        ],
    ))
}

fn bindings_of(registry: &InMemoryBindingRegistry) -> Vec<String> {
    registry
        .registered_bindings()
        .iter()
        .map(|binding| {
            format!(
                "{}->{}",
                binding.service_names().join(","),
                binding.implementation.short_name()
            )
        })
        .collect()
}

#[tokio::test]
async fn test_end_to_end_interface_convention() {
    init_test_logger();

    let mut builder = ConventionBindingBuilder::new(scenario_source());
    let mut registry = InMemoryBindingRegistry::new();

    builder
        .select_from(["module_a"])
        .await
        .unwrap()
        .matching(|candidate| !candidate.capabilities.is_empty())
        .unwrap();
    builder
        .bind_with(&CapabilityBindingGenerator::new())
        .await
        .unwrap();
    let summary = builder.emit_into(&mut registry).await.unwrap();

    assert!(summary.is_clean());
    assert_eq!(summary.registered, 3);
    // 模块扫描顺序：模块内按限定名称字典序，Bar 在 Foo 之前
    assert_eq!(
        bindings_of(&registry),
        vec!["IBar->Bar", "IBaz->Bar", "IFoo->Foo"]
    );
}

#[tokio::test]
async fn test_excluding_always_wins_over_including() {
    init_test_logger();

    let mut builder = ConventionBindingBuilder::new(scenario_source());
    let mut registry = InMemoryBindingRegistry::new();

    builder
        .select_from(["module_a"])
        .await
        .unwrap()
        .matching(|_| false)
        .unwrap()
        .including([TypeRef::named("Foo"), TypeRef::named("Bar")])
        .unwrap()
        .excluding([TypeRef::named("Foo")])
        .unwrap();
    builder
        .bind_with(&CapabilityBindingGenerator::new())
        .await
        .unwrap();
    let summary = builder.emit_into(&mut registry).await.unwrap();

    assert_eq!(summary.registered, 2);
    assert_eq!(bindings_of(&registry), vec!["IBar->Bar", "IBaz->Bar"]);
}

#[tokio::test]
async fn test_where_composes_with_logical_and() {
    init_test_logger();

    let mut builder = ConventionBindingBuilder::new(scenario_source());
    let mut registry = InMemoryBindingRegistry::new();

    builder
        .select_from(["module_a"])
        .await
        .unwrap()
        .matching(|candidate| !candidate.capabilities.is_empty())
        .unwrap()
        .matching(|candidate| candidate.short_name() == "Foo")
        .unwrap();
    builder
        .bind_with(&CapabilityBindingGenerator::new())
        .await
        .unwrap();
    builder.emit_into(&mut registry).await.unwrap();

    assert_eq!(bindings_of(&registry), vec!["IFoo->Foo"]);
}

#[tokio::test]
async fn test_multiple_generators_concatenate() {
    init_test_logger();

    let mut builder = ConventionBindingBuilder::new(scenario_source());
    let mut registry = InMemoryBindingRegistry::new();

    builder
        .select_from(["module_a"])
        .await
        .unwrap()
        .matching(|candidate| candidate.short_name() == "Foo")
        .unwrap();
    builder
        .bind_with(&CapabilityBindingGenerator::new())
        .await
        .unwrap();
    builder
        .bind_with(&SelfBindingGenerator::new())
        .await
        .unwrap();
    builder.emit_into(&mut registry).await.unwrap();

    assert_eq!(bindings_of(&registry), vec!["IFoo->Foo", "Foo->Foo"]);
}

#[tokio::test]
async fn test_naming_convention_generator_end_to_end() {
    init_test_logger();

    let source = Arc::new(InMemoryTypeSource::new().with_module(
        "services",
        vec![
            CandidateType::new("OrderService", "services")
                .with_capability("IOrderService")
                .with_capability("IAuditable"),
        ],
    ));
    let mut builder = ConventionBindingBuilder::new(source);
    let mut registry = InMemoryBindingRegistry::new();

    builder.select_from(["services"]).await.unwrap();
    builder
        .bind_with(&ContractNamingBindingGenerator::new())
        .await
        .unwrap();
    builder.emit_into(&mut registry).await.unwrap();

    // IAuditable 不符合命名约定，不被绑定
    assert_eq!(bindings_of(&registry), vec!["IOrderService->OrderService"]);
}

#[tokio::test]
async fn test_empty_selection_completes_without_error() {
    init_test_logger();

    let mut builder = ConventionBindingBuilder::new(scenario_source());
    let mut registry = InMemoryBindingRegistry::new();

    builder
        .select_from(["module_a"])
        .await
        .unwrap()
        .matching(|candidate| candidate.short_name() == "DoesNotExist")
        .unwrap();
    builder
        .bind_with(&CapabilityBindingGenerator::new())
        .await
        .unwrap();
    let summary = builder.emit_into(&mut registry).await.unwrap();

    assert!(summary.is_clean());
    assert_eq!(summary.registered, 0);
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_filter_after_generation_raises_invalid_sequencing() {
    init_test_logger();

    let mut builder = ConventionBindingBuilder::new(scenario_source());

    builder.select_from(["module_a"]).await.unwrap();
    builder
        .bind_with(&CapabilityBindingGenerator::new())
        .await
        .unwrap();

    let error = builder.matching(|_| true).unwrap_err();
    assert!(matches!(
        error,
        ConventionError::Build {
            source: BuildError::InvalidSequencing { .. }
        }
    ));

    let error = builder.excluding([TypeRef::named("Foo")]).unwrap_err();
    assert!(matches!(
        error,
        ConventionError::Build {
            source: BuildError::InvalidSequencing { .. }
        }
    ));
}

#[tokio::test]
async fn test_reuse_after_emission_raises_already_emitted() {
    init_test_logger();

    let mut builder = ConventionBindingBuilder::new(scenario_source());
    let mut registry = InMemoryBindingRegistry::new();

    builder.select_from(["module_a"]).await.unwrap();
    builder
        .bind_with(&SelfBindingGenerator::new())
        .await
        .unwrap();
    builder.emit_into(&mut registry).await.unwrap();

    let already_emitted = |error: ConventionError| {
        matches!(
            error,
            ConventionError::Build {
                source: BuildError::AlreadyEmitted
            }
        )
    };

    assert!(already_emitted(
        builder.select_from(["module_a"]).await.unwrap_err()
    ));
    assert!(already_emitted(builder.matching(|_| true).unwrap_err()));
    assert!(already_emitted(
        builder
            .bind_with(&SelfBindingGenerator::new())
            .await
            .unwrap_err()
    ));
    assert!(already_emitted(
        builder.emit_into(&mut registry).await.unwrap_err()
    ));
}

#[tokio::test]
async fn test_unresolved_reference_surfaces_from_bind_with() {
    init_test_logger();

    let mut builder = ConventionBindingBuilder::new(scenario_source());

    builder
        .select_from(["module_a"])
        .await
        .unwrap()
        .including([TypeRef::named("NotAnywhere")])
        .unwrap();

    let error = builder
        .bind_with(&CapabilityBindingGenerator::new())
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        ConventionError::Source {
            source: SourceError::UnresolvedType { .. }
        }
    ));
}

#[tokio::test]
async fn test_cancelled_scan_aborts_selection() {
    init_test_logger();

    let token = CancellationToken::new();
    token.cancel();

    let mut builder = ConventionBindingBuilder::new(scenario_source())
        .with_scan_options(ScanOptions::new().with_cancellation(token));

    let error = builder.select_from(["module_a"]).await.unwrap_err();
    assert!(matches!(
        error,
        ConventionError::Source {
            source: SourceError::ScanCancelled
        }
    ));
}

#[tokio::test]
async fn test_unavailable_module_reported_unless_skipped() {
    init_test_logger();

    let mut builder = ConventionBindingBuilder::new(scenario_source());
    let error = builder
        .select_from(["module_a", "missing"])
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        ConventionError::Source {
            source: SourceError::ModuleUnavailable { .. }
        }
    ));

    let mut builder = ConventionBindingBuilder::new(scenario_source())
        .with_scan_options(ScanOptions::new().skip_unavailable_modules());
    let mut registry = InMemoryBindingRegistry::new();

    builder
        .select_from(["module_a", "missing"])
        .await
        .unwrap();
    builder
        .bind_with(&SelfBindingGenerator::new())
        .await
        .unwrap();
    let summary = builder.emit_into(&mut registry).await.unwrap();

    assert_eq!(summary.registered, 3);
}

#[tokio::test]
async fn test_uniform_configuration_with_composed_actions() {
    init_test_logger();

    let mut builder = ConventionBindingBuilder::new(scenario_source());
    let mut registry = InMemoryBindingRegistry::new();

    builder.select_from(["module_a"]).await.unwrap();
    builder
        .bind_with(&CapabilityBindingGenerator::new())
        .await
        .unwrap();
    builder
        .configure(actions::lifetime(Lifetime::Scoped))
        .unwrap()
        .configure(actions::constraint("target", "web"))
        .unwrap();
    let summary = builder.emit_into(&mut registry).await.unwrap();

    assert!(summary.is_clean());
    for binding in registry.registered_bindings() {
        assert_eq!(binding.configuration.lifetime, Some(Lifetime::Scoped));
        assert_eq!(
            binding.configuration.constraints.get("target").map(String::as_str),
            Some("web")
        );
    }
}

#[tokio::test]
async fn test_duplicate_registration_error_passes_through() {
    init_test_logger();

    let source = Arc::new(InMemoryTypeSource::new().with_module(
        "module_a",
        vec![
            // 两个同名能力的类型不会重复；重复来自同一类型被两个生成器各绑定一次
            CandidateType::new("Foo", "module_a").with_capability("IFoo"),
        ],
    ));
    let mut builder = ConventionBindingBuilder::new(source);
    let mut registry = InMemoryBindingRegistry::new();

    builder.select_from(["module_a"]).await.unwrap();
    builder
        .bind_with(&CapabilityBindingGenerator::new())
        .await
        .unwrap();
    builder
        .bind_with(&CapabilityBindingGenerator::new())
        .await
        .unwrap();

    let error = builder.emit_into(&mut registry).await.unwrap_err();
    assert!(matches!(error, ConventionError::Registration { .. }));
    // 已注册的部分保留，错误原样上抛
    assert_eq!(registry.len(), 1);
}

//! # 示例应用程序
//!
//! 演示如何使用 Lorn 约定绑定发现引擎：
//! 用 `#[candidate]` 声明候选类型，按约定批量生成容器绑定

use binding_abstractions::{
    actions, BindingRegistry, CatalogTypeSource, InMemoryBindingRegistry, ScanOptions,
};
use binding_generators::{CapabilityBindingGenerator, ContractNamingBindingGenerator};
use candidate_macros::candidate;
use clap::Parser;
use conventions_builder::{ConventionBindingBuilder, EmitSummary};
use conventions_common::{Lifetime, TypeRef};
use std::sync::Arc;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Lorn 约定绑定发现示例应用")]
struct Args {
    /// 要扫描的模块
    #[arg(long, default_value = "orders")]
    module: String,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 只绑定符合契约命名约定的能力
    #[arg(long)]
    naming_convention: bool,
}

/// 订单服务
#[candidate(module = "orders", contracts(IOrderService, IAuditable))]
#[derive(Debug)]
pub struct OrderService;

/// 支付服务
#[candidate(module = "orders", contracts(IPaymentService))]
#[derive(Debug)]
pub struct PaymentService;

/// 订单仓储基类（抽象，不参与默认扫描）
#[candidate(module = "orders", contracts(IOrderRepository), abstract_type)]
#[derive(Debug)]
pub struct OrderRepositoryBase;

/// 临时脚手架，演示显式排除
#[candidate(module = "orders", contracts(IOrderService))]
#[derive(Debug)]
pub struct OrderServiceStub;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(parse_log_level(&args.log_level))
        .init();

    info!("启动约定绑定发现示例");

    let summary = build_bindings(&args).await?;
    info!(
        "构建 {} 完成: 注册 {} 个绑定",
        summary.build_id, summary.registered
    );

    Ok(())
}

/// 执行一次完整的约定绑定构建并打印结果
async fn build_bindings(args: &Args) -> anyhow::Result<EmitSummary> {
    let source = Arc::new(CatalogTypeSource::new());
    let mut registry = InMemoryBindingRegistry::new();

    let mut builder = ConventionBindingBuilder::new(source)
        .with_scan_options(ScanOptions::new().skip_unavailable_modules());

    builder
        .select_from([args.module.as_str()])
        .await?
        .matching(|candidate| !candidate.capabilities.is_empty())?
        .excluding([TypeRef::named("OrderServiceStub")])?;

    if args.naming_convention {
        builder
            .bind_with(&ContractNamingBindingGenerator::new())
            .await?;
    } else {
        builder.bind_with(&CapabilityBindingGenerator::new()).await?;
    }

    builder.configure(actions::lifetime(Lifetime::Singleton))?;

    let summary = builder.emit_into(&mut registry).await?;

    for binding in registry.registered_bindings() {
        println!("绑定: {binding}");
    }
    if !summary.is_clean() {
        for failure in &summary.generation_failures {
            println!("生成失败: {} ({})", failure.type_name, failure.message);
        }
        for failure in &summary.configuration_failures {
            println!("配置失败: {failure}");
        }
    }

    Ok(summary)
}

/// 解析日志级别
fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}

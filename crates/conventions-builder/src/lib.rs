//! # Conventions Builder
//!
//! 约定绑定构建器：把类型来源、过滤链、生成器与配置器
//! 编排为一次完整的绑定发现构建，并把结果发射给容器协作方。
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use binding_abstractions::{actions, InMemoryBindingRegistry, InMemoryTypeSource};
//! use binding_generators::CapabilityBindingGenerator;
//! use conventions_builder::ConventionBindingBuilder;
//! use conventions_common::Lifetime;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = Arc::new(InMemoryTypeSource::new());
//!     let mut registry = InMemoryBindingRegistry::new();
//!
//!     let mut builder = ConventionBindingBuilder::new(source);
//!     builder
//!         .select_from(["services"])
//!         .await?
//!         .matching(|candidate| !candidate.capabilities.is_empty())?;
//!     builder.bind_with(&CapabilityBindingGenerator::new()).await?;
//!     builder.configure(actions::lifetime(Lifetime::Singleton))?;
//!
//!     let summary = builder.emit_into(&mut registry).await?;
//!     println!("注册了 {} 个绑定", summary.registered);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod configurator;
pub mod filter;

// 重新导出主要类型
pub use builder::{BuilderState, ConventionBindingBuilder, EmitSummary, GenerationFailure};
pub use configurator::{BindingConfigurator, ConfigurationFailure};
pub use filter::{SelectionPredicate, TypeSelection};

// 重新导出错误类型
pub use conventions_common::ConventionError;

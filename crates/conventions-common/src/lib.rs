//! # Conventions Common
//!
//! 这个 crate 提供了 Lorn 约定绑定发现引擎的公共数据模型与工具。
//!
//! ## 核心组件
//!
//! - [`CandidateType`] - 候选类型元数据
//! - [`TypeSet`] - 有序去重的类型集合
//! - [`ContractNamingConvention`] - 契约命名约定
//! - [`CandidateCatalog`] - 进程级候选类型目录
//! - [`ConventionError`] - 错误分类
//!
//! ## 设计原则
//!
//! - 候选类型一经产出即不可变
//! - 集合顺序确定，保证测试可复现
//! - 约定优于配置

pub mod catalog;
pub mod conventions;
pub mod errors;
pub mod lifecycle;
pub mod metadata;
pub mod typeset;

pub use catalog::*;
pub use conventions::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
pub use typeset::*;

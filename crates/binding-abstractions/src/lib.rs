//! # Binding Abstractions
//!
//! 约定绑定发现的核心抽象接口。
//!
//! ## 核心接口
//!
//! - [`TypeSource`] - 类型来源接口
//! - [`BindingGenerator`] - 绑定生成器接口
//! - [`BindingRegistry`] - 容器协作方接口
//! - [`BindingDescriptor`] - 绑定描述符
//!
//! 每个接口旁提供了内存参考实现，供测试与简单宿主直接使用。

pub mod descriptor;
pub mod generator;
pub mod registry;
pub mod source;

pub use descriptor::*;
pub use generator::*;
pub use registry::*;
pub use source::*;

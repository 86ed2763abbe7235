//! # Binding Generators
//!
//! 约定绑定的具体生成策略。
//!
//! ## 内置策略
//!
//! - [`CapabilityBindingGenerator`] - 绑定到声明的全部能力
//! - [`SelfBindingGenerator`] - 绑定到类型自身
//! - [`ContractNamingBindingGenerator`] - 只绑定符合命名约定的契约
//! - [`PatternBindingGenerator`] - 只绑定匹配通配符模式的能力
//!
//! 所有策略都实现 [`binding_abstractions::BindingGenerator`]，
//! 可以在同一次构建中组合使用，结果按注册顺序串接。

pub mod capabilities;
pub mod contract_naming;
pub mod pattern;
pub mod self_binding;

pub use capabilities::CapabilityBindingGenerator;
pub use contract_naming::ContractNamingBindingGenerator;
pub use pattern::PatternBindingGenerator;
pub use self_binding::SelfBindingGenerator;

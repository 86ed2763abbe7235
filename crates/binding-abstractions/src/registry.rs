//! 容器协作方抽象接口
//!
//! 核心只产出绑定请求；绑定的存储、解析与生命周期管理都在容器一侧

use crate::descriptor::BindingDescriptor;
use async_trait::async_trait;
use conventions_common::{RegistrationError, RegistrationResult};
use tracing::info;

/// 绑定注册表 trait
///
/// 注册失败原样上抛，核心不重试也不吞并
#[async_trait]
pub trait BindingRegistry: Send + Sync {
    /// 注册绑定描述符
    async fn register(&mut self, descriptor: BindingDescriptor) -> RegistrationResult<()>;

    /// 获取已注册的绑定描述符（按注册顺序）
    fn registered_bindings(&self) -> Vec<BindingDescriptor>;
}

/// 内存绑定注册表
///
/// 参考实现：按注册顺序保存描述符，拒绝完全相同的重复绑定
#[derive(Debug, Clone, Default)]
pub struct InMemoryBindingRegistry {
    bindings: Vec<BindingDescriptor>,
}

impl InMemoryBindingRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 已注册的绑定数量
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// 注册表是否为空
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn is_duplicate(&self, descriptor: &BindingDescriptor) -> bool {
        self.bindings.iter().any(|existing| {
            existing.services == descriptor.services
                && existing.implementation.key() == descriptor.implementation.key()
                && existing.configuration.name == descriptor.configuration.name
        })
    }
}

#[async_trait]
impl BindingRegistry for InMemoryBindingRegistry {
    async fn register(&mut self, descriptor: BindingDescriptor) -> RegistrationResult<()> {
        if self.is_duplicate(&descriptor) {
            return Err(RegistrationError::Duplicate {
                service: descriptor.service_names().join(", "),
                implementation: descriptor.implementation.to_string(),
            });
        }

        info!("注册绑定: {}", descriptor);
        self.bindings.push(descriptor);
        Ok(())
    }

    fn registered_bindings(&self) -> Vec<BindingDescriptor> {
        self.bindings.clone()
    }
}

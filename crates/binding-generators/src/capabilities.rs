//! 能力绑定生成器

use binding_abstractions::{BindingDescriptor, BindingGenerator, ServiceKey};
use conventions_common::{CandidateType, GenerationResult};
use tracing::debug;

/// 把候选类型绑定到其声明的全部能力
///
/// 默认为每个能力产出一个描述符；合并模式下产出单个
/// 携带全部服务契约的描述符。没有声明能力的类型产出空序列
#[derive(Debug, Clone, Default)]
pub struct CapabilityBindingGenerator {
    merge_services: bool,
}

impl CapabilityBindingGenerator {
    /// 创建逐能力产出描述符的生成器
    pub fn new() -> Self {
        Self::default()
    }

    /// 合并模式：单个描述符携带全部服务契约
    pub fn merged() -> Self {
        Self {
            merge_services: true,
        }
    }
}

impl BindingGenerator for CapabilityBindingGenerator {
    fn generate(&self, candidate: &CandidateType) -> GenerationResult<Vec<BindingDescriptor>> {
        if candidate.capabilities.is_empty() {
            debug!("类型 {} 未声明能力, 不生成绑定", candidate);
            return Ok(Vec::new());
        }

        let descriptors = if self.merge_services {
            match candidate.capabilities.split_first() {
                None => Vec::new(),
                Some((first, rest)) => {
                    let mut descriptor = BindingDescriptor::new(first.as_str(), candidate.clone());
                    for service in rest {
                        descriptor = descriptor.with_service(service.as_str());
                    }
                    vec![descriptor]
                }
            }
        } else {
            candidate
                .capabilities
                .iter()
                .map(|capability| {
                    BindingDescriptor::new(ServiceKey::new(capability), candidate.clone())
                })
                .collect()
        };

        debug!("类型 {} 生成 {} 个能力绑定", candidate, descriptors.len());
        Ok(descriptors)
    }

    fn name(&self) -> &str {
        "CapabilityBindingGenerator"
    }
}

//! 自绑定生成器

use binding_abstractions::{BindingDescriptor, BindingGenerator};
use conventions_common::{CandidateType, GenerationResult};
use tracing::debug;

/// 把可实例化的候选类型绑定到其自身
///
/// 服务契约即实现类型本身；抽象类型产出空序列
#[derive(Debug, Clone, Default)]
pub struct SelfBindingGenerator;

impl SelfBindingGenerator {
    /// 创建自绑定生成器
    pub fn new() -> Self {
        Self
    }
}

impl BindingGenerator for SelfBindingGenerator {
    fn generate(&self, candidate: &CandidateType) -> GenerationResult<Vec<BindingDescriptor>> {
        if !candidate.instantiable {
            debug!("类型 {} 不可实例化, 跳过自绑定", candidate);
            return Ok(Vec::new());
        }

        Ok(vec![BindingDescriptor::new(
            candidate.qualified_name.as_str(),
            candidate.clone(),
        )])
    }

    fn name(&self) -> &str {
        "SelfBindingGenerator"
    }
}

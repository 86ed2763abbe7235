//! 通配符模式绑定生成器

use binding_abstractions::{BindingDescriptor, BindingGenerator};
use conventions_common::{pattern_matches, CandidateType, GenerationResult};

/// 只绑定名称匹配 `*` 通配符模式的能力
///
/// 模式匹配能力的简短名称，例如 `I*Repository`
#[derive(Debug, Clone)]
pub struct PatternBindingGenerator {
    pattern: String,
}

impl PatternBindingGenerator {
    /// 创建通配符模式生成器
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl BindingGenerator for PatternBindingGenerator {
    fn generate(&self, candidate: &CandidateType) -> GenerationResult<Vec<BindingDescriptor>> {
        Ok(candidate
            .capabilities
            .iter()
            .filter(|capability| {
                let short = capability.split("::").last().unwrap_or(capability);
                pattern_matches(&self.pattern, short)
            })
            .map(|capability| BindingDescriptor::new(capability.as_str(), candidate.clone()))
            .collect())
    }

    fn name(&self) -> &str {
        "PatternBindingGenerator"
    }
}

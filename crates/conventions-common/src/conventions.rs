//! 命名约定规范
//!
//! 提供契约与实现之间基于名称的匹配规则

use crate::metadata::CandidateType;

/// 检查 `*` 通配符模式是否匹配名称
///
/// 仅支持单个通配符的前缀/后缀形式，例如 `*Service`、`I*`
pub fn pattern_matches(pattern: &str, name: &str) -> bool {
    if pattern.contains('*') {
        let pattern_parts: Vec<&str> = pattern.split('*').collect();

        if pattern_parts.len() == 2 {
            let prefix = pattern_parts[0];
            let suffix = pattern_parts[1];

            name.starts_with(prefix)
                && name.ends_with(suffix)
                && name.len() >= prefix.len() + suffix.len()
        } else {
            false
        }
    } else {
        name == pattern
    }
}

/// 契约命名约定
///
/// 判断某个能力是否是类型的默认契约：
/// 去掉约定前缀或后缀后的契约简短名称与类型简短名称一致，
/// 例如 `IOrderService` -> `OrderService`、`OrderContract` -> `Order`
#[derive(Debug, Clone)]
pub struct ContractNamingConvention {
    /// 契约名称前缀列表
    pub prefixes: Vec<String>,
    /// 契约名称后缀列表
    pub suffixes: Vec<String>,
}

impl ContractNamingConvention {
    /// 创建新的契约命名约定
    pub fn new() -> Self {
        Self {
            prefixes: vec!["I".to_string()],
            suffixes: vec!["Contract".to_string()],
        }
    }

    /// 添加契约前缀
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    /// 添加契约后缀
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffixes.push(suffix.into());
        self
    }

    /// 检查能力名称是否是候选类型的默认契约
    pub fn is_default_contract(&self, candidate: &CandidateType, capability: &str) -> bool {
        let type_name = candidate.short_name();
        let capability_name = capability.split("::").last().unwrap_or(capability);

        self.prefixes.iter().any(|prefix| {
            capability_name
                .strip_prefix(prefix.as_str())
                .is_some_and(|stripped| stripped == type_name)
        }) || self.suffixes.iter().any(|suffix| {
            capability_name
                .strip_suffix(suffix.as_str())
                .is_some_and(|stripped| stripped == type_name)
        })
    }

    /// 选出候选类型中符合默认契约约定的能力
    pub fn default_contracts<'a>(&self, candidate: &'a CandidateType) -> Vec<&'a str> {
        candidate
            .capabilities
            .iter()
            .filter(|capability| self.is_default_contract(candidate, capability))
            .map(String::as_str)
            .collect()
    }
}

impl Default for ContractNamingConvention {
    fn default() -> Self {
        Self::new()
    }
}

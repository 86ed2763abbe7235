//! 契约命名约定绑定生成器

use binding_abstractions::{BindingDescriptor, BindingGenerator};
use conventions_common::{CandidateType, ContractNamingConvention, GenerationResult};
use tracing::debug;

/// 只绑定符合契约命名约定的能力
///
/// 例如 `OrderService` 只绑定到 `IOrderService`，
/// 即使它还声明了 `IAuditable` 等其他能力
#[derive(Debug, Clone, Default)]
pub struct ContractNamingBindingGenerator {
    convention: ContractNamingConvention,
}

impl ContractNamingBindingGenerator {
    /// 使用默认命名约定创建生成器
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用自定义命名约定创建生成器
    pub fn with_convention(convention: ContractNamingConvention) -> Self {
        Self { convention }
    }
}

impl BindingGenerator for ContractNamingBindingGenerator {
    fn generate(&self, candidate: &CandidateType) -> GenerationResult<Vec<BindingDescriptor>> {
        let contracts = self.convention.default_contracts(candidate);
        if contracts.is_empty() {
            debug!("类型 {} 没有符合命名约定的契约", candidate);
            return Ok(Vec::new());
        }

        Ok(contracts
            .into_iter()
            .map(|contract| BindingDescriptor::new(contract, candidate.clone()))
            .collect())
    }

    fn name(&self) -> &str {
        "ContractNamingBindingGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_default_contract_is_bound() {
        let generator = ContractNamingBindingGenerator::new();
        let candidate = CandidateType::new("services::OrderService", "demo")
            .with_capability("services::IOrderService")
            .with_capability("services::IAuditable");

        let descriptors = generator.generate(&candidate).unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].service_names(), vec!["services::IOrderService"]);
    }

    #[test]
    fn test_custom_convention_suffix() {
        let convention = ContractNamingConvention::new().with_suffix("Port");
        let generator = ContractNamingBindingGenerator::with_convention(convention);
        let candidate = CandidateType::new("Billing", "demo").with_capability("BillingPort");

        let descriptors = generator.generate(&candidate).unwrap();
        assert_eq!(descriptors[0].service_names(), vec!["BillingPort"]);
    }

    #[test]
    fn test_no_matching_contract_yields_empty() {
        let generator = ContractNamingBindingGenerator::new();
        let candidate =
            CandidateType::new("OrderService", "demo").with_capability("IPaymentGateway");

        assert!(generator.generate(&candidate).unwrap().is_empty());
    }
}

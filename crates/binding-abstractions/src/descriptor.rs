//! 绑定描述符
//!
//! 生成阶段的产物：服务契约、实现类型与可配置槽

use conventions_common::{CandidateType, ConfigurationError, ConfigurationResult, Lifetime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 服务契约标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceKey {
    /// 服务契约的限定名称
    pub qualified_name: String,
}

impl ServiceKey {
    /// 创建服务契约标识
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
        }
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name)
    }
}

impl From<&str> for ServiceKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ServiceKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// 绑定配置槽
///
/// 由配置动作在发射前填充；取值含义由容器协作方解释
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindingConfiguration {
    /// 生命周期
    pub lifetime: Option<Lifetime>,
    /// 绑定名称/限定符
    pub name: Option<String>,
    /// 构造参数提示
    pub arguments: HashMap<String, serde_json::Value>,
    /// 消费侧条件约束
    pub constraints: HashMap<String, String>,
}

impl BindingConfiguration {
    /// 创建空配置槽
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置生命周期
    pub fn set_lifetime(&mut self, lifetime: Lifetime) {
        self.lifetime = Some(lifetime);
    }

    /// 设置绑定名称
    ///
    /// 空白名称无效
    pub fn set_name(&mut self, name: impl Into<String>) -> ConfigurationResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigurationError::InvalidName {
                reason: "名称不能为空白".to_string(),
            });
        }
        self.name = Some(name);
        Ok(())
    }

    /// 添加构造参数提示
    pub fn set_argument(
        &mut self,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> ConfigurationResult<()> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigurationError::InvalidArgument {
                key,
                reason: "参数名不能为空白".to_string(),
            });
        }
        self.arguments.insert(key, value);
        Ok(())
    }

    /// 添加消费侧条件约束
    pub fn set_constraint(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.constraints.insert(key.into(), value.into());
    }
}

/// 绑定描述符
///
/// 恰好一个实现类型，可携带多个服务契约
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingDescriptor {
    /// 服务契约集合
    pub services: Vec<ServiceKey>,
    /// 实现类型
    pub implementation: CandidateType,
    /// 配置槽
    pub configuration: BindingConfiguration,
}

impl BindingDescriptor {
    /// 创建指向单个服务契约的绑定描述符
    pub fn new(service: impl Into<ServiceKey>, implementation: CandidateType) -> Self {
        Self {
            services: vec![service.into()],
            implementation,
            configuration: BindingConfiguration::new(),
        }
    }

    /// 追加服务契约
    pub fn with_service(mut self, service: impl Into<ServiceKey>) -> Self {
        self.services.push(service.into());
        self
    }

    /// 服务契约名称列表（诊断用）
    pub fn service_names(&self) -> Vec<&str> {
        self.services
            .iter()
            .map(|service| service.qualified_name.as_str())
            .collect()
    }
}

impl fmt::Display for BindingDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.service_names().join(", "),
            self.implementation
        )
    }
}

/// 配置动作类型
///
/// 对配置槽的延迟操作，在发射前对每个描述符恰好应用一次
pub type ConfigurationAction =
    Arc<dyn Fn(&mut BindingConfiguration) -> ConfigurationResult<()> + Send + Sync>;

/// 常用配置动作构造函数
pub mod actions {
    use super::{BindingConfiguration, ConfigurationAction, Lifetime};
    use std::sync::Arc;

    /// 设置生命周期
    pub fn lifetime(value: Lifetime) -> ConfigurationAction {
        Arc::new(move |configuration: &mut BindingConfiguration| {
            configuration.set_lifetime(value);
            Ok(())
        })
    }

    /// 设置绑定名称
    pub fn named(name: impl Into<String>) -> ConfigurationAction {
        let name = name.into();
        Arc::new(move |configuration: &mut BindingConfiguration| {
            configuration.set_name(name.clone())
        })
    }

    /// 添加构造参数提示
    pub fn argument(key: impl Into<String>, value: serde_json::Value) -> ConfigurationAction {
        let key = key.into();
        Arc::new(move |configuration: &mut BindingConfiguration| {
            configuration.set_argument(key.clone(), value.clone())
        })
    }

    /// 添加消费侧条件约束
    pub fn constraint(key: impl Into<String>, value: impl Into<String>) -> ConfigurationAction {
        let key = key.into();
        let value = value.into();
        Arc::new(move |configuration: &mut BindingConfiguration| {
            configuration.set_constraint(key.clone(), value.clone());
            Ok(())
        })
    }

    /// 顺序组合多个配置动作
    pub fn compose(actions: Vec<ConfigurationAction>) -> ConfigurationAction {
        Arc::new(move |configuration: &mut BindingConfiguration| {
            for action in &actions {
                action(configuration)?;
            }
            Ok(())
        })
    }
}

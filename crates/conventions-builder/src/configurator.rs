//! 绑定配置器
//!
//! 在生成之后、发射之前，把调用方提供的配置动作统一应用到
//! 每个绑定描述符上，每个描述符恰好应用一次，按生成顺序进行

use binding_abstractions::{BindingDescriptor, ConfigurationAction};
use conventions_common::ConventionResult;
use std::fmt;
use tracing::{debug, warn};

/// 归因到具体描述符的配置失败
#[derive(Debug, Clone)]
pub struct ConfigurationFailure {
    /// 失败描述符的实现类型
    pub implementation: String,
    /// 失败描述符的服务契约
    pub services: Vec<String>,
    /// 失败原因
    pub message: String,
}

impl fmt::Display for ConfigurationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}: {}",
            self.services.join(", "),
            self.implementation,
            self.message
        )
    }
}

/// 绑定配置器
///
/// 动作对配置器不透明；失败归因到具体描述符，
/// 除非要求快速失败，否则不中断其余描述符的处理
#[derive(Default)]
pub struct BindingConfigurator {
    actions: Vec<ConfigurationAction>,
    fail_fast: bool,
}

impl BindingConfigurator {
    /// 创建空配置器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置快速失败行为
    pub fn fail_fast(&mut self, enabled: bool) {
        self.fail_fast = enabled;
    }

    /// 追加配置动作（按追加顺序应用，等价于组合）
    pub fn add_action(&mut self, action: ConfigurationAction) {
        self.actions.push(action);
    }

    /// 是否配置了动作
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// 对描述符序列应用配置
    ///
    /// 返回配置成功的描述符（保持生成顺序）与失败记录；
    /// 配置失败的描述符不参与发射
    pub fn apply(
        &self,
        descriptors: Vec<BindingDescriptor>,
    ) -> ConventionResult<(Vec<BindingDescriptor>, Vec<ConfigurationFailure>)> {
        if self.actions.is_empty() {
            return Ok((descriptors, Vec::new()));
        }

        let mut configured = Vec::with_capacity(descriptors.len());
        let mut failures = Vec::new();

        for mut descriptor in descriptors {
            match self.apply_one(&mut descriptor) {
                Ok(()) => configured.push(descriptor),
                Err(error) => {
                    let failure = ConfigurationFailure {
                        implementation: descriptor.implementation.to_string(),
                        services: descriptor
                            .service_names()
                            .into_iter()
                            .map(str::to_string)
                            .collect(),
                        message: error.to_string(),
                    };
                    warn!("绑定配置失败: {}", failure);

                    if self.fail_fast {
                        return Err(error.into());
                    }
                    failures.push(failure);
                }
            }
        }

        debug!(
            "配置完成: {} 个成功, {} 个失败",
            configured.len(),
            failures.len()
        );
        Ok((configured, failures))
    }

    fn apply_one(
        &self,
        descriptor: &mut BindingDescriptor,
    ) -> conventions_common::ConfigurationResult<()> {
        for action in &self.actions {
            action(&mut descriptor.configuration)?;
        }
        Ok(())
    }
}

impl fmt::Debug for BindingConfigurator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingConfigurator")
            .field("actions", &format!("<{} 个动作>", self.actions.len()))
            .field("fail_fast", &self.fail_fast)
            .finish()
    }
}

//! 约定绑定构建器
//!
//! 编排类型来源、过滤链、生成器与配置器，
//! 最终把绑定描述符序列发射给容器协作方

use crate::configurator::{BindingConfigurator, ConfigurationFailure};
use crate::filter::TypeSelection;
use binding_abstractions::{
    BindingDescriptor, BindingGenerator, BindingRegistry, ConfigurationAction, ScanOptions,
    TypeSource,
};
use chrono::{DateTime, Utc};
use conventions_common::{
    BuildError, BuildResult, CandidateType, ConventionResult, TypeRef, TypeSet,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 构建器状态
///
/// 状态只能沿 `Empty → Sourced → Filtered → Generated → Configured → Emitted`
/// 推进；生成开始后类型集合冻结，过滤操作不再允许
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    /// 尚未选择类型来源
    Empty,
    /// 已建立基础类型集合
    Sourced,
    /// 已累积过滤规则
    Filtered,
    /// 已执行至少一个生成器，类型集合冻结
    Generated,
    /// 已配置统一配置动作
    Configured,
    /// 已发射，构建器不可复用
    Emitted,
}

impl fmt::Display for BuilderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "Empty",
            Self::Sourced => "Sourced",
            Self::Filtered => "Filtered",
            Self::Generated => "Generated",
            Self::Configured => "Configured",
            Self::Emitted => "Emitted",
        };
        write!(f, "{name}")
    }
}

/// 归因到具体类型的生成失败
#[derive(Debug, Clone)]
pub struct GenerationFailure {
    /// 失败的生成器名称
    pub generator: String,
    /// 失败的候选类型
    pub type_name: String,
    /// 失败原因
    pub message: String,
}

/// 发射结果汇总
///
/// 空描述符序列是合法的"无匹配"结果，不是错误
#[derive(Debug, Clone)]
pub struct EmitSummary {
    /// 本次构建的关联标识
    pub build_id: Uuid,
    /// 成功注册的绑定数量
    pub registered: usize,
    /// 按类型归因的生成失败批次
    pub generation_failures: Vec<GenerationFailure>,
    /// 按描述符归因的配置失败批次
    pub configuration_failures: Vec<ConfigurationFailure>,
    /// 发射时间
    pub emitted_at: DateTime<Utc>,
}

impl EmitSummary {
    /// 是否不存在任何失败
    pub fn is_clean(&self) -> bool {
        self.generation_failures.is_empty() && self.configuration_failures.is_empty()
    }
}

/// 约定绑定构建器
///
/// 单次使用：每套约定配置需要新建实例，发射后任何调用都会失败。
/// 构建器独占自己的类型集合与描述符序列，实例之间没有共享可变状态
pub struct ConventionBindingBuilder {
    id: Uuid,
    state: BuilderState,
    source: Arc<dyn TypeSource>,
    options: ScanOptions,
    fail_fast: bool,
    selection: TypeSelection,
    scanned: Option<TypeSet>,
    frozen: Option<TypeSet>,
    descriptors: Vec<BindingDescriptor>,
    generation_failures: Vec<GenerationFailure>,
    configurator: BindingConfigurator,
}

impl ConventionBindingBuilder {
    /// 基于指定类型来源创建构建器
    pub fn new(source: Arc<dyn TypeSource>) -> Self {
        let id = Uuid::new_v4();
        info!("创建约定绑定构建器: {} (来源: {})", id, source.name());
        Self {
            id,
            state: BuilderState::Empty,
            source,
            options: ScanOptions::default(),
            fail_fast: false,
            selection: TypeSelection::new(),
            scanned: None,
            frozen: None,
            descriptors: Vec::new(),
            generation_failures: Vec::new(),
            configurator: BindingConfigurator::new(),
        }
    }

    /// 设置扫描选项
    pub fn with_scan_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// 启用快速失败：首个生成或配置失败即中止
    pub fn fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = enabled;
        self.configurator.fail_fast(enabled);
        self
    }

    /// 当前状态
    pub fn state(&self) -> BuilderState {
        self.state
    }

    /// 构建关联标识
    pub fn build_id(&self) -> Uuid {
        self.id
    }

    fn guard(&self, operation: &str, allowed: &[BuilderState]) -> BuildResult<()> {
        if self.state == BuilderState::Emitted {
            return Err(BuildError::AlreadyEmitted);
        }
        if !allowed.contains(&self.state) {
            return Err(BuildError::InvalidSequencing {
                operation: operation.to_string(),
                state: self.state.to_string(),
            });
        }
        Ok(())
    }

    /// 从指定模块建立基础类型集合
    pub async fn select_from<I, S>(&mut self, modules: I) -> ConventionResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.guard("select_from", &[BuilderState::Empty])?;

        let modules: Vec<String> = modules.into_iter().map(Into::into).collect();
        debug!("构建 {} 开始扫描模块: {:?}", self.id, modules);

        let scanned = self.source.collect_from(&modules, &self.options).await?;
        info!("构建 {} 扫描到 {} 个候选类型", self.id, scanned.len());

        self.scanned = Some(scanned);
        self.state = BuilderState::Sourced;
        Ok(self)
    }

    /// 追加选择谓词（多次调用逻辑与）
    pub fn matching<F>(&mut self, predicate: F) -> ConventionResult<&mut Self>
    where
        F: Fn(&CandidateType) -> bool + Send + Sync + 'static,
    {
        self.guard("matching", &[BuilderState::Sourced, BuilderState::Filtered])?;
        self.selection.add_predicate(predicate);
        self.state = BuilderState::Filtered;
        Ok(self)
    }

    /// 显式包含指定类型（无视谓词，并集语义，多次调用累积）
    pub fn including<I>(&mut self, references: I) -> ConventionResult<&mut Self>
    where
        I: IntoIterator<Item = TypeRef>,
    {
        self.guard("including", &[BuilderState::Sourced, BuilderState::Filtered])?;
        self.selection.add_inclusions(references);
        self.state = BuilderState::Filtered;
        Ok(self)
    }

    /// 显式排除指定类型（最终裁决，多次调用累积）
    pub fn excluding<I>(&mut self, references: I) -> ConventionResult<&mut Self>
    where
        I: IntoIterator<Item = TypeRef>,
    {
        self.guard("excluding", &[BuilderState::Sourced, BuilderState::Filtered])?;
        self.selection.add_exclusions(references);
        self.state = BuilderState::Filtered;
        Ok(self)
    }

    /// 用指定生成器创建绑定
    ///
    /// 首次调用冻结过滤结果；生成器按注册顺序依次在冻结集合上执行，
    /// 结果串接。单个类型的生成失败被隔离记录，不影响其余类型，
    /// 除非启用了快速失败
    pub async fn bind_with(
        &mut self,
        generator: &dyn BindingGenerator,
    ) -> ConventionResult<&mut Self> {
        self.guard(
            "bind_with",
            &[
                BuilderState::Sourced,
                BuilderState::Filtered,
                BuilderState::Generated,
            ],
        )?;

        if self.frozen.is_none() {
            let scanned = self.scanned.as_ref().ok_or(BuildError::InvalidSequencing {
                operation: "bind_with".to_string(),
                state: self.state.to_string(),
            })?;
            let frozen = self.selection.apply(scanned, self.source.as_ref()).await?;
            info!("构建 {} 过滤后冻结 {} 个候选类型", self.id, frozen.len());
            self.frozen = Some(frozen);
        }

        // 冻结集合此后不再变化
        let Some(frozen) = self.frozen.as_ref() else {
            return Err(BuildError::InvalidSequencing {
                operation: "bind_with".to_string(),
                state: self.state.to_string(),
            }
            .into());
        };
        let mut produced = 0usize;

        for candidate in frozen.iter() {
            match generator.generate(candidate) {
                Ok(descriptors) => {
                    produced += descriptors.len();
                    self.descriptors.extend(descriptors);
                }
                Err(error) => {
                    if self.fail_fast {
                        return Err(error.into());
                    }
                    warn!(
                        "生成器 {} 处理类型 {} 失败: {}",
                        generator.name(),
                        candidate,
                        error
                    );
                    self.generation_failures.push(GenerationFailure {
                        generator: generator.name().to_string(),
                        type_name: candidate.to_string(),
                        message: error.to_string(),
                    });
                }
            }
        }

        debug!(
            "构建 {} 生成器 {} 产出 {} 个描述符",
            self.id,
            generator.name(),
            produced
        );
        self.state = BuilderState::Generated;
        Ok(self)
    }

    /// 设置统一配置动作
    ///
    /// 多次调用按顺序组合，发射时对每个描述符恰好应用一次
    pub fn configure(&mut self, action: ConfigurationAction) -> ConventionResult<&mut Self> {
        self.guard(
            "configure",
            &[BuilderState::Generated, BuilderState::Configured],
        )?;
        self.configurator.add_action(action);
        self.state = BuilderState::Configured;
        Ok(self)
    }

    /// 把最终描述符序列发射给容器协作方
    ///
    /// 配置在发射前应用；注册错误原样上抛并中止发射。
    /// 进入发射即转入 `Emitted`，构建器随后不可复用
    pub async fn emit_into(
        &mut self,
        registry: &mut dyn BindingRegistry,
    ) -> ConventionResult<EmitSummary> {
        self.guard(
            "emit_into",
            &[BuilderState::Generated, BuilderState::Configured],
        )?;
        self.state = BuilderState::Emitted;

        let descriptors = std::mem::take(&mut self.descriptors);
        let (configured, configuration_failures) = self.configurator.apply(descriptors)?;

        let mut registered = 0usize;
        for descriptor in configured {
            registry.register(descriptor).await?;
            registered += 1;
        }

        let summary = EmitSummary {
            build_id: self.id,
            registered,
            generation_failures: std::mem::take(&mut self.generation_failures),
            configuration_failures,
            emitted_at: Utc::now(),
        };

        info!(
            "构建 {} 发射完成: 注册 {} 个绑定, {} 个生成失败, {} 个配置失败",
            self.id,
            summary.registered,
            summary.generation_failures.len(),
            summary.configuration_failures.len()
        );
        Ok(summary)
    }
}

impl fmt::Debug for ConventionBindingBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConventionBindingBuilder")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("source", &self.source.name())
            .field("descriptors", &self.descriptors.len())
            .finish()
    }
}

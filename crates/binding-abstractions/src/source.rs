//! 类型来源抽象接口
//!
//! 候选类型如何获得（目录读取、宿主反射、显式列表）是协作方的事情，
//! 核心只依赖这里的契约

use async_trait::async_trait;
use conventions_common::{
    global_catalog, CandidateType, SourceError, SourceResult, TypeRef, TypeSet,
};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// 类型扫描选项
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// 是否包含抽象类型（不可实例化的候选）
    pub include_abstract: bool,
    /// 是否跳过无法内省的模块（跳过时记录警告而不是报错）
    pub skip_unavailable: bool,
    /// 协作式取消令牌，取消后扫描中止且不产出部分结果
    pub cancellation: CancellationToken,
}

impl ScanOptions {
    /// 创建默认扫描选项
    pub fn new() -> Self {
        Self::default()
    }

    /// 包含抽象类型
    pub fn with_abstract_types(mut self) -> Self {
        self.include_abstract = true;
        self
    }

    /// 跳过无法内省的模块
    pub fn skip_unavailable_modules(mut self) -> Self {
        self.skip_unavailable = true;
        self
    }

    /// 设置取消令牌
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }
}

/// 类型来源 trait
///
/// 模块内省可能较慢，因此契约是异步的；调用方可以在外层叠加
/// `tokio::time::timeout` 施加超时
#[async_trait]
pub trait TypeSource: Send + Sync {
    /// 收集指定模块中的候选类型
    ///
    /// 产出顺序确定：模块按调用方给定顺序，模块内按限定名称字典序。
    /// 默认只产出可实例化的类型，除非选项允许抽象类型
    async fn collect_from(
        &self,
        modules: &[String],
        options: &ScanOptions,
    ) -> SourceResult<TypeSet>;

    /// 独立解析类型引用
    ///
    /// 用于显式包含/排除未被扫描覆盖的类型
    async fn resolve(&self, reference: &TypeRef) -> SourceResult<CandidateType>;

    /// 获取来源名称
    fn name(&self) -> &str;
}

/// 基于显式模块映射的内存类型来源
///
/// 测试与自行装配候选集合的宿主使用
#[derive(Debug, Clone, Default)]
pub struct InMemoryTypeSource {
    modules: HashMap<String, Vec<CandidateType>>,
}

impl InMemoryTypeSource {
    /// 创建空的内存来源
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加模块及其候选类型
    pub fn with_module<I>(mut self, module: impl Into<String>, candidates: I) -> Self
    where
        I: IntoIterator<Item = CandidateType>,
    {
        self.modules
            .entry(module.into())
            .or_default()
            .extend(candidates);
        self
    }

    fn collect_module(
        &self,
        module: &str,
        options: &ScanOptions,
        set: &mut TypeSet,
    ) -> SourceResult<()> {
        let Some(candidates) = self.modules.get(module) else {
            if options.skip_unavailable {
                warn!("跳过无法内省的模块: {}", module);
                return Ok(());
            }
            return Err(SourceError::module_unavailable(module, "模块未登记"));
        };

        let mut ordered: Vec<CandidateType> = candidates
            .iter()
            .filter(|candidate| candidate.instantiable || options.include_abstract)
            .cloned()
            .collect();
        ordered.sort_by(|a, b| a.qualified_name.cmp(&b.qualified_name));

        debug!("模块 {} 产出 {} 个候选类型", module, ordered.len());
        set.union(ordered);
        Ok(())
    }
}

#[async_trait]
impl TypeSource for InMemoryTypeSource {
    async fn collect_from(
        &self,
        modules: &[String],
        options: &ScanOptions,
    ) -> SourceResult<TypeSet> {
        let mut set = TypeSet::new();

        for module in modules {
            // 取消时不产出部分结果
            if options.cancellation.is_cancelled() {
                return Err(SourceError::ScanCancelled);
            }
            self.collect_module(module, options, &mut set)?;
        }

        if options.cancellation.is_cancelled() {
            return Err(SourceError::ScanCancelled);
        }

        debug!("扫描完成, 共 {} 个候选类型", set.len());
        Ok(set)
    }

    async fn resolve(&self, reference: &TypeRef) -> SourceResult<CandidateType> {
        self.modules
            .values()
            .flatten()
            .find(|candidate| reference.matches(candidate))
            .cloned()
            .ok_or_else(|| SourceError::unresolved(reference))
    }

    fn name(&self) -> &str {
        "InMemoryTypeSource"
    }
}

/// 基于全局候选目录的类型来源
///
/// 读取 `#[candidate]` 宏在程序启动时登记的候选类型
#[derive(Debug, Clone, Default)]
pub struct CatalogTypeSource;

impl CatalogTypeSource {
    /// 创建目录类型来源
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TypeSource for CatalogTypeSource {
    async fn collect_from(
        &self,
        modules: &[String],
        options: &ScanOptions,
    ) -> SourceResult<TypeSet> {
        let catalog = global_catalog();
        let mut set = TypeSet::new();

        for module in modules {
            if options.cancellation.is_cancelled() {
                return Err(SourceError::ScanCancelled);
            }

            if !catalog.has_module(module) {
                if options.skip_unavailable {
                    warn!("跳过目录中不存在的模块: {}", module);
                    continue;
                }
                return Err(SourceError::module_unavailable(module, "目录中不存在该模块"));
            }

            set.union(
                catalog
                    .candidates_in_module(module)
                    .into_iter()
                    .filter(|candidate| candidate.instantiable || options.include_abstract),
            );
        }

        if options.cancellation.is_cancelled() {
            return Err(SourceError::ScanCancelled);
        }

        Ok(set)
    }

    async fn resolve(&self, reference: &TypeRef) -> SourceResult<CandidateType> {
        global_catalog()
            .all_candidates()
            .into_iter()
            .find(|candidate| reference.matches(candidate))
            .ok_or_else(|| SourceError::unresolved(reference))
    }

    fn name(&self) -> &str {
        "CatalogTypeSource"
    }
}

//! 进程级候选类型目录
//!
//! 编译期声明的候选类型（通常由 `#[candidate]` 宏生成的注册函数写入）
//! 在程序启动时登记到这里，供目录类型来源读取

use crate::metadata::{CandidateType, TypeKey};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashSet;
use tracing::debug;

/// 全局候选类型目录
static GLOBAL_CANDIDATE_CATALOG: Lazy<CandidateCatalog> = Lazy::new(CandidateCatalog::new);

/// 候选类型目录
///
/// 追加写入、按标识去重，保留登记顺序
#[derive(Debug)]
pub struct CandidateCatalog {
    entries: RwLock<Vec<CandidateType>>,
    keys: RwLock<HashSet<TypeKey>>,
}

impl CandidateCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            keys: RwLock::new(HashSet::new()),
        }
    }

    /// 登记候选类型
    ///
    /// 同一标识重复登记时保留首次登记的记录，返回 `false`
    pub fn register(&self, candidate: CandidateType) -> bool {
        let key = candidate.key();
        let mut keys = self.keys.write();
        if keys.contains(&key) {
            return false;
        }
        keys.insert(key);
        debug!("登记候选类型: {}", candidate);
        self.entries.write().push(candidate);
        true
    }

    /// 获取指定模块的候选类型，按限定名称字典序排序
    pub fn candidates_in_module(&self, module: &str) -> Vec<CandidateType> {
        let mut candidates: Vec<CandidateType> = self
            .entries
            .read()
            .iter()
            .filter(|candidate| candidate.module == module)
            .cloned()
            .collect();
        candidates.sort_by(|a, b| a.qualified_name.cmp(&b.qualified_name));
        candidates
    }

    /// 获取所有已登记的候选类型
    pub fn all_candidates(&self) -> Vec<CandidateType> {
        self.entries.read().clone()
    }

    /// 检查目录中是否存在指定模块
    pub fn has_module(&self, module: &str) -> bool {
        self.entries
            .read()
            .iter()
            .any(|candidate| candidate.module == module)
    }
}

impl Default for CandidateCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// 获取全局候选类型目录
pub fn global_catalog() -> &'static CandidateCatalog {
    &GLOBAL_CANDIDATE_CATALOG
}

/// 向全局目录登记候选类型
///
/// 由 `#[candidate]` 宏生成的注册函数调用
pub fn register_candidate(candidate: CandidateType) -> bool {
    global_catalog().register(candidate)
}

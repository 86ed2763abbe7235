//! 类型集合
//!
//! 有序且去重的候选类型集合，是选择管线各阶段之间的数据载体

use crate::metadata::{CandidateType, TypeKey};
use std::collections::HashSet;

/// 有序去重的候选类型集合
///
/// 以 [`TypeKey`]（限定名称 + 模块）作为唯一标识，
/// 保留插入顺序以保证过滤与生成结果可复现
#[derive(Debug, Clone, Default)]
pub struct TypeSet {
    entries: Vec<CandidateType>,
    keys: HashSet<TypeKey>,
}

impl TypeSet {
    /// 创建空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入候选类型
    ///
    /// 已存在同一标识的类型时不做任何修改，返回 `false`
    pub fn insert(&mut self, candidate: CandidateType) -> bool {
        let key = candidate.key();
        if self.keys.contains(&key) {
            return false;
        }
        self.keys.insert(key);
        self.entries.push(candidate);
        true
    }

    /// 并入另一批候选类型（并集语义，重复安全）
    pub fn union<I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = CandidateType>,
    {
        for candidate in candidates {
            self.insert(candidate);
        }
    }

    /// 按标识移除候选类型
    pub fn remove(&mut self, key: &TypeKey) -> bool {
        if !self.keys.remove(key) {
            return false;
        }
        self.entries.retain(|candidate| candidate.key() != *key);
        true
    }

    /// 仅保留满足谓词的候选类型
    pub fn retain<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&CandidateType) -> bool,
    {
        let keys = &mut self.keys;
        self.entries.retain(|candidate| {
            let keep = predicate(candidate);
            if !keep {
                keys.remove(&candidate.key());
            }
            keep
        });
    }

    /// 检查是否包含指定标识的类型
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.keys.contains(key)
    }

    /// 按插入顺序迭代
    pub fn iter(&self) -> impl Iterator<Item = &CandidateType> {
        self.entries.iter()
    }

    /// 集合大小
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 集合是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for TypeSet {
    type Item = CandidateType;
    type IntoIter = std::vec::IntoIter<CandidateType>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<CandidateType> for TypeSet {
    fn from_iter<I: IntoIterator<Item = CandidateType>>(iter: I) -> Self {
        let mut set = Self::new();
        set.union(iter);
        set
    }
}

impl PartialEq for TypeSet {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

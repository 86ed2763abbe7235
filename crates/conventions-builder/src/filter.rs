//! 类型选择过滤链
//!
//! 谓词、显式包含与显式排除按固定顺序应用；
//! 顺序是正确性的一部分而不是实现细节

use binding_abstractions::TypeSource;
use conventions_common::{CandidateType, SourceResult, TypeKey, TypeRef, TypeSet};
use std::fmt;
use tracing::debug;

/// 选择谓词类型
///
/// 必须是无副作用的纯函数，过滤链可能以任意顺序多次求值
pub type SelectionPredicate = Box<dyn Fn(&CandidateType) -> bool + Send + Sync>;

/// 类型选择过滤链
///
/// 只累积规则，不求值；应用顺序固定为：
/// 谓词（多个谓词逻辑与）→ 显式包含（并集）→ 显式排除（最终裁决）。
/// 多次包含/排除调用按并集/差集累积
#[derive(Default)]
pub struct TypeSelection {
    predicates: Vec<SelectionPredicate>,
    inclusions: Vec<TypeRef>,
    exclusions: Vec<TypeRef>,
}

impl TypeSelection {
    /// 创建空过滤链
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加选择谓词（与既有谓词逻辑与）
    pub fn add_predicate<F>(&mut self, predicate: F)
    where
        F: Fn(&CandidateType) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Box::new(predicate));
    }

    /// 追加显式包含的类型引用
    pub fn add_inclusions<I>(&mut self, references: I)
    where
        I: IntoIterator<Item = TypeRef>,
    {
        self.inclusions.extend(references);
    }

    /// 追加显式排除的类型引用
    pub fn add_exclusions<I>(&mut self, references: I)
    where
        I: IntoIterator<Item = TypeRef>,
    {
        self.exclusions.extend(references);
    }

    /// 对基础类型集合应用过滤链
    ///
    /// 包含/排除引用优先在已扫描集合内解析，
    /// 否则交给类型来源独立解析；解析失败即报错
    pub async fn apply(&self, base: &TypeSet, source: &dyn TypeSource) -> SourceResult<TypeSet> {
        // 谓词：全部通过才保留
        let mut current: TypeSet = base
            .iter()
            .filter(|candidate| self.predicates.iter().all(|predicate| predicate(candidate)))
            .cloned()
            .collect();
        debug!("谓词过滤后剩余 {} / {} 个候选类型", current.len(), base.len());

        // 显式包含：无视谓词并入
        for reference in &self.inclusions {
            if current.iter().any(|candidate| reference.matches(candidate)) {
                continue;
            }
            if let Some(candidate) = base.iter().find(|candidate| reference.matches(candidate)) {
                current.insert(candidate.clone());
                continue;
            }
            let candidate = source.resolve(reference).await?;
            debug!("显式包含独立解析的类型: {}", candidate);
            current.insert(candidate);
        }

        // 显式排除：最终裁决，总是生效
        for reference in &self.exclusions {
            let matched: Vec<TypeKey> = current
                .iter()
                .filter(|candidate| reference.matches(candidate))
                .map(CandidateType::key)
                .collect();

            if matched.is_empty() {
                // 引用本身必须可解析，排除不存在的类型才视为错误
                let candidate = source.resolve(reference).await?;
                current.remove(&candidate.key());
            } else {
                for key in matched {
                    current.remove(&key);
                }
            }
        }

        debug!("过滤链应用完成, 最终 {} 个候选类型", current.len());
        Ok(current)
    }
}

impl fmt::Debug for TypeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeSelection")
            .field("predicates", &format!("<{} 个谓词>", self.predicates.len()))
            .field("inclusions", &self.inclusions)
            .field("exclusions", &self.exclusions)
            .finish()
    }
}

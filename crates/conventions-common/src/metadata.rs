//! 候选类型元数据定义
//!
//! 提供类型选择管线中流转的模块与候选类型信息

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 模块信息
///
/// 候选类型的来源模块，按名称引用
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleInfo {
    /// 模块名称
    pub name: String,
    /// 模块来源路径（可选）
    pub path: Option<String>,
}

impl ModuleInfo {
    /// 创建新的模块信息
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
        }
    }

    /// 设置来源路径
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl fmt::Display for ModuleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// 类型标识
///
/// 候选类型的唯一标识：限定名称 + 所属模块
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeKey {
    /// 类型限定名称
    pub qualified_name: String,
    /// 所属模块名称
    pub module: String,
}

impl TypeKey {
    /// 创建新的类型标识
    pub fn new(qualified_name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            module: module.into(),
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.qualified_name)
    }
}

/// 候选类型
///
/// 类型来源产出后不可变；携带类型的限定名称、所属模块、
/// 声明的能力集合（已实现的契约）以及是否可实例化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateType {
    /// 类型限定名称
    pub qualified_name: String,
    /// 所属模块名称
    pub module: String,
    /// 声明的能力集合（已实现契约的限定名称）
    pub capabilities: Vec<String>,
    /// 是否可实例化（具体类型）
    pub instantiable: bool,
    /// 自定义属性
    pub metadata: HashMap<String, String>,
}

impl CandidateType {
    /// 创建新的候选类型
    pub fn new(qualified_name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            module: module.into(),
            capabilities: Vec::new(),
            instantiable: true,
            metadata: HashMap::new(),
        }
    }

    /// 添加声明的能力
    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.push(capability.into());
        self
    }

    /// 批量添加声明的能力
    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities
            .extend(capabilities.into_iter().map(Into::into));
        self
    }

    /// 标记为抽象类型（不可实例化）
    pub fn abstract_type(mut self) -> Self {
        self.instantiable = false;
        self
    }

    /// 添加自定义属性
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// 获取类型标识
    pub fn key(&self) -> TypeKey {
        TypeKey::new(self.qualified_name.clone(), self.module.clone())
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        self.qualified_name
            .split("::")
            .last()
            .unwrap_or(&self.qualified_name)
    }

    /// 检查是否声明了指定能力
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

impl fmt::Display for CandidateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.qualified_name)
    }
}

/// 类型引用
///
/// 用于显式包含/排除的按名称引用，可携带模块限定
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    /// 被引用类型的名称（限定或简短形式）
    pub name: String,
    /// 模块限定（可选）
    pub module: Option<String>,
}

impl TypeRef {
    /// 创建按名称的类型引用
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: None,
        }
    }

    /// 创建带模块限定的类型引用
    pub fn qualified(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: Some(module.into()),
        }
    }

    /// 检查引用是否匹配指定候选类型
    pub fn matches(&self, candidate: &CandidateType) -> bool {
        let name_matches =
            candidate.qualified_name == self.name || candidate.short_name() == self.name;

        match &self.module {
            Some(module) => name_matches && candidate.module == *module,
            None => name_matches,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.module {
            Some(module) => write!(f, "{}::{}", module, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

//! 错误类型定义

use thiserror::Error;

/// 类型来源错误类型
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("模块无法内省: {module}, 原因: {message}")]
    ModuleUnavailable { module: String, message: String },

    #[error("类型引用无法解析: {reference}")]
    UnresolvedType { reference: String },

    #[error("类型扫描已取消")]
    ScanCancelled,
}

impl SourceError {
    /// 创建模块不可用错误
    pub fn module_unavailable(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ModuleUnavailable {
            module: module.into(),
            message: message.into(),
        }
    }

    /// 创建类型引用无法解析错误
    pub fn unresolved(reference: impl std::fmt::Display) -> Self {
        Self::UnresolvedType {
            reference: reference.to_string(),
        }
    }
}

/// 构建器时序错误类型
///
/// 时序与复用错误属于调用方编程错误，立即失败，绝不静默忽略
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("操作时序无效: 当前状态 {state} 不允许调用 {operation}")]
    InvalidSequencing { operation: String, state: String },

    #[error("构建器已完成发射，不可复用")]
    AlreadyEmitted,
}

/// 绑定生成错误类型
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("生成器 {generator} 处理类型 {type_name} 失败: {message}")]
    GeneratorFailure {
        generator: String,
        type_name: String,
        message: String,
    },
}

impl GenerationError {
    /// 创建生成器失败错误，归因到具体类型
    pub fn failure(
        generator: impl Into<String>,
        type_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::GeneratorFailure {
            generator: generator.into(),
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

/// 绑定配置错误类型
#[derive(Error, Debug, Clone)]
pub enum ConfigurationError {
    #[error("生命周期取值无效: {value}")]
    InvalidLifetime { value: String },

    #[error("绑定名称无效: {reason}")]
    InvalidName { reason: String },

    #[error("构造参数无效: {key}, 原因: {reason}")]
    InvalidArgument { key: String, reason: String },

    #[error("配置动作执行失败: {message}")]
    ApplyFailed { message: String },
}

/// 容器注册错误类型
///
/// 由容器协作方产生，原样透传给调用方，核心不重试也不吞并
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("重复绑定: 服务 {service} -> 实现 {implementation}")]
    Duplicate {
        service: String,
        implementation: String,
    },

    #[error("容器拒绝绑定: 服务 {service} -> 实现 {implementation}, 原因: {message}")]
    Rejected {
        service: String,
        implementation: String,
        message: String,
    },
}

/// 约定绑定错误类型
#[derive(Error, Debug)]
pub enum ConventionError {
    #[error("类型来源错误: {source}")]
    Source {
        #[from]
        source: SourceError,
    },

    #[error("构建器时序错误: {source}")]
    Build {
        #[from]
        source: BuildError,
    },

    #[error("绑定生成错误: {source}")]
    Generation {
        #[from]
        source: GenerationError,
    },

    #[error("绑定配置错误: {source}")]
    Configuration {
        #[from]
        source: ConfigurationError,
    },

    #[error("容器注册错误: {source}")]
    Registration {
        #[from]
        source: RegistrationError,
    },
}

/// 结果类型别名
pub type SourceResult<T> = Result<T, SourceError>;
pub type BuildResult<T> = Result<T, BuildError>;
pub type GenerationResult<T> = Result<T, GenerationError>;
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;
pub type RegistrationResult<T> = Result<T, RegistrationError>;
pub type ConventionResult<T> = Result<T, ConventionError>;

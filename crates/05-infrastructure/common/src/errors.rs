//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 依赖注入错误类型
///
/// 所有错误都同步返回给 `provide` 的调用方，并携带足以修正绑定配置的上下文。
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("类型未注册: {type_name}")]
    UnknownType { type_name: String },

    #[error("无法解析依赖: {owner}.{parameter} 既没有显式绑定，也没有按命名约定匹配的类型")]
    UnresolvableDependency { owner: String, parameter: String },

    #[error("依赖存在歧义: {owner}.{parameter} 匹配到多个类型 [{}]，请添加绑定规则", .candidates.join(", "))]
    AmbiguousDependency {
        owner: String,
        parameter: String,
        candidates: Vec<String>,
    },

    #[error("无法构造抽象类型: {type_name}（来自 {requested_by}），请添加绑定规则指向具体实现")]
    AbstractType {
        type_name: String,
        requested_by: String,
    },

    #[error("检测到循环依赖: {}", .cycle.join(" -> "))]
    CircularDependency { cycle: Vec<String> },

    #[error("类型名称冲突: 查找名 {lookup_name} 对应多个类型 [{}]", .type_names.join(", "))]
    DuplicateType {
        lookup_name: String,
        type_names: Vec<String>,
    },

    #[error("绑定规则冲突: {key} 已绑定到 {existing}，不能再绑定到 {conflicting}")]
    ConflictingBinding {
        key: String,
        existing: String,
        conflicting: String,
    },

    #[error("类型不匹配: {owner}.{parameter} 需要 {expected}，但绑定目标 {actual} 无法提供")]
    TypeMismatch {
        owner: String,
        parameter: String,
        expected: String,
        actual: String,
    },

    #[error("构造参数不存在: {owner}.{parameter}")]
    ArgumentNotFound { owner: String, parameter: String },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ConstructionFailed {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("超过最大解析深度 {max_depth}: {path}")]
    ResolutionDepthExceeded { max_depth: usize, path: String },
}

impl DependencyError {
    /// 包装构造函数内部的失败
    pub fn construction_failed(
        type_name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ConstructionFailed {
            type_name: type_name.into(),
            source: source.into(),
        }
    }

    /// 是否为配置类错误（需要调整绑定或注册才能修复）
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::ConstructionFailed { .. })
    }
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;

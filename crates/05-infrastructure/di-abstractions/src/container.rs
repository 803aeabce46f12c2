//! 对象图抽象接口
//!
//! 提供对象图的核心抽象与配置

use infrastructure_common::{DependencyError, DependencyResult, Instance, Requirement};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 对象图 trait
///
/// 调用方唯一需要的操作是 `provide`：给定根类型，返回完整装配好的实例。
pub trait ObjectGraph: Send + Sync {
    /// 按依赖需求提供类型擦除后的实例
    fn provide_instance(&self, requirement: Requirement) -> DependencyResult<Instance>;

    /// 提供指定类型的实例
    ///
    /// 根类型只遵循自身声明的作用域；未声明作用域的根类型每次调用都会新建，
    /// 即使它在绑定规范中被绑定为单例。绑定作用域只作用于作为依赖被注入时。
    fn provide<T>(&self) -> DependencyResult<Arc<T>>
    where
        T: Send + Sync + 'static,
        Self: Sized,
    {
        let requirement = Requirement::of::<T>();
        self.provide_instance(requirement)?
            .downcast::<T>()
            .map_err(|_| DependencyError::TypeMismatch {
                owner: "provide".to_string(),
                parameter: requirement.short_name().to_string(),
                expected: requirement.type_name.to_string(),
                actual: "unknown".to_string(),
            })
    }

    /// 验证所有已注册的具体类型都能完整解析
    fn validate(&self) -> Result<(), Vec<DependencyError>>;

    /// 对象图统计信息
    fn stats(&self) -> ObjectGraphStats;
}

/// 对象图配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectGraphConfig {
    /// 只使用显式绑定，禁用隐式命名约定
    pub only_use_explicit_bindings: bool,
    /// 注册时拒绝归一化名称冲突的类型
    pub reject_duplicate_type_names: bool,
    /// 最大解析深度
    pub max_resolution_depth: usize,
    /// 构建完成后立即验证所有类型
    pub validate_on_build: bool,
}

impl Default for ObjectGraphConfig {
    fn default() -> Self {
        Self {
            only_use_explicit_bindings: false,
            reject_duplicate_type_names: false,
            max_resolution_depth: 100,
            validate_on_build: false,
        }
    }
}

/// 对象图统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectGraphStats {
    /// 已注册类型数量
    pub registered_types: usize,
    /// 合并后的绑定规则数量
    pub binding_rules: usize,
    /// 已缓存的单例数量
    pub cached_singletons: usize,
    /// `provide` 调用次数
    pub provide_calls: usize,
    /// 构造函数调用次数
    pub constructions: usize,
    /// 失败的 `provide` 调用次数
    pub failures: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ObjectGraphConfig::default();

        assert!(!config.only_use_explicit_bindings);
        assert!(!config.reject_duplicate_type_names);
        assert_eq!(config.max_resolution_depth, 100);
        assert!(!config.validate_on_build);
    }
}

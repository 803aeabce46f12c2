//! 实例作用域与解析状态

use serde::Deserialize;
use std::fmt;

/// 实例作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// 单例模式 - 每个对象图内每个类型只创建一个实例，所有请求方共享
    #[default]
    Singleton,
    /// 原型模式 - 每次解析都创建新实例
    Prototype,
}

impl Scope {
    /// 是否缓存实例
    pub fn is_cached(self) -> bool {
        matches!(self, Self::Singleton)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singleton => f.write_str("singleton"),
            Self::Prototype => f.write_str("prototype"),
        }
    }
}

/// 单次 `provide` 调用中某个类型的解析状态
///
/// `Unvisited -> InProgress -> Resolved | Failed`，后两者为终态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionState {
    /// 尚未访问
    #[default]
    Unvisited,
    /// 位于当前解析路径上
    InProgress,
    /// 解析完成
    Resolved,
    /// 解析失败
    Failed,
}

impl ResolutionState {
    /// 是否为终态
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scope_is_singleton() {
        assert_eq!(Scope::default(), Scope::Singleton);
        assert!(Scope::Singleton.is_cached());
        assert!(!Scope::Prototype.is_cached());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!ResolutionState::Unvisited.is_terminal());
        assert!(!ResolutionState::InProgress.is_terminal());
        assert!(ResolutionState::Resolved.is_terminal());
        assert!(ResolutionState::Failed.is_terminal());
    }
}

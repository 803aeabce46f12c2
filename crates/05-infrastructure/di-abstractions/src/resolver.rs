//! 绑定解析器抽象接口
//!
//! 提供构造参数到具体类型的解析，以及解析路径上的循环依赖检测

use infrastructure_common::{
    ConstructorParameter, DependencyError, DependencyResult, Instance, ResolutionState, Scope,
    TypeDescriptor,
};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

/// 绑定解析器 trait
///
/// 先查询合并后的绑定规则，再回退到隐式命名约定。
pub trait BindingResolver: Send + Sync {
    /// 解析 `owner` 的构造参数 `parameter`
    fn resolve(&self, owner: &TypeDescriptor, parameter: &ConstructorParameter) -> DependencyResult<Resolution>;

    /// 合并后的规则数量
    fn rule_count(&self) -> usize;
}

/// 解析结果
#[derive(Debug, Clone)]
pub struct Resolution {
    /// 目标类型描述符
    pub target: Arc<TypeDescriptor>,
    /// 生效的作用域
    pub scope: Scope,
    /// 实例绑定时预先构建的实例
    pub instance: Option<Instance>,
    /// 是否来自显式绑定规则
    pub explicit: bool,
}

/// 解析上下文
///
/// 记录当前解析路径以及每个类型的解析状态，用于检测循环依赖。
#[derive(Debug, Clone)]
pub struct ResolveContext {
    /// 当前解析链
    resolution_chain: Vec<(TypeId, String)>,
    /// 每个类型的解析状态
    states: HashMap<TypeId, ResolutionState>,
    /// 最大递归深度
    max_depth: usize,
}

impl ResolveContext {
    /// 创建新的解析上下文
    pub fn new(max_depth: usize) -> Self {
        Self {
            resolution_chain: Vec::new(),
            states: HashMap::new(),
            max_depth,
        }
    }

    /// 进入类型：压入解析链并标记为 `InProgress`
    pub fn enter(&mut self, descriptor: &TypeDescriptor) -> DependencyResult<()> {
        let type_id = descriptor.type_id();

        if self.state(type_id) == ResolutionState::InProgress {
            let start = self
                .resolution_chain
                .iter()
                .position(|(id, _)| *id == type_id)
                .unwrap_or(0);
            let mut cycle: Vec<String> = self.resolution_chain[start..]
                .iter()
                .map(|(_, name)| name.clone())
                .collect();
            cycle.push(descriptor.name().to_string());
            return Err(DependencyError::CircularDependency { cycle });
        }

        if self.resolution_chain.len() >= self.max_depth {
            return Err(DependencyError::ResolutionDepthExceeded {
                max_depth: self.max_depth,
                path: self.path(),
            });
        }

        self.resolution_chain
            .push((type_id, descriptor.name().to_string()));
        self.states.insert(type_id, ResolutionState::InProgress);
        Ok(())
    }

    /// 离开类型：弹出解析链并记录终态
    pub fn leave(&mut self, descriptor: &TypeDescriptor, resolved: bool) {
        let type_id = descriptor.type_id();
        if let Some(position) = self.resolution_chain.iter().rposition(|(id, _)| *id == type_id) {
            self.resolution_chain.truncate(position);
        }
        let state = if resolved {
            ResolutionState::Resolved
        } else {
            ResolutionState::Failed
        };
        self.states.insert(type_id, state);
    }

    /// 类型当前的解析状态
    pub fn state(&self, type_id: TypeId) -> ResolutionState {
        self.states.get(&type_id).copied().unwrap_or_default()
    }

    /// 当前解析深度
    pub fn depth(&self) -> usize {
        self.resolution_chain.len()
    }

    /// 当前解析路径
    pub fn path(&self) -> String {
        self.resolution_chain
            .iter()
            .map(|(_, name)| name.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

impl Default for ResolveContext {
    fn default() -> Self {
        Self::new(100)
    }
}

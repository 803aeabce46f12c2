//! 绑定解析器实现

use crate::registry::TypeRegistryImpl;
use di_abstractions::{
    Binder, BindingKey, BindingResolver, BindingRule, BindingSpec, BindingTarget, Resolution,
    TypeRegistry,
};
use infrastructure_common::{
    ConstructorParameter, DependencyError, DependencyResult, NamingConventions, TypeDescriptor,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 合并后的绑定规则集合
///
/// 多个绑定规范按并集合并；同一键上完全相同的规则静默合并，不同的规则报错。
/// 规则按首次插入的顺序保存，绑定目标也按此顺序注册。
#[derive(Debug, Default)]
pub struct BindingRuleSet {
    rules: HashMap<BindingKey, BindingRule>,
    order: Vec<BindingKey>,
}

impl BindingRuleSet {
    /// 创建空规则集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 配置并合并所有绑定规范（包括它们依赖的规范）
    pub fn from_specs(specs: &[Box<dyn BindingSpec>]) -> DependencyResult<Self> {
        let mut rule_set = Self::new();
        let mut configured = HashSet::new();
        for spec in specs {
            rule_set.configure_spec(spec.as_ref(), &mut configured)?;
        }
        info!(
            "合并绑定规范完成: {} 个规范, {} 条规则",
            configured.len(),
            rule_set.len()
        );
        Ok(rule_set)
    }

    fn configure_spec(&mut self, spec: &dyn BindingSpec, configured: &mut HashSet<String>) -> DependencyResult<()> {
        if !configured.insert(spec.name().to_string()) {
            debug!("绑定规范已配置，跳过: {}", spec.name());
            return Ok(());
        }

        for dependency in spec.dependencies() {
            self.configure_spec(dependency.as_ref(), configured)?;
        }

        let mut binder = Binder::new(spec.name());
        spec.configure(&mut binder)?;
        for rule in binder.into_rules() {
            self.insert(rule)?;
        }
        Ok(())
    }

    /// 插入一条规则
    pub fn insert(&mut self, rule: BindingRule) -> DependencyResult<()> {
        if let Some(existing) = self.rules.get(&rule.key) {
            if existing.same_as(&rule) {
                return Ok(());
            }
            return Err(DependencyError::ConflictingBinding {
                key: rule.key.to_string(),
                existing: format!("{} ({}, 来自 {})", existing.target, existing.scope, existing.source),
                conflicting: format!("{} ({}, 来自 {})", rule.target, rule.scope, rule.source),
            });
        }
        self.order.push(rule.key.clone());
        self.rules.insert(rule.key.clone(), rule);
        Ok(())
    }

    /// 把类型目标注册进注册表，并替换为注册表中的规范描述符
    pub fn register_targets(&mut self, registry: &mut TypeRegistryImpl) -> DependencyResult<()> {
        for key in &self.order {
            let Some(rule) = self.rules.get_mut(key) else {
                continue;
            };
            if let BindingTarget::Type(descriptor) = &rule.target {
                let canonical = registry.register_shared(Arc::clone(descriptor))?;
                rule.target = BindingTarget::Type(canonical);
            }
        }
        Ok(())
    }

    /// 查找规则：先查限定所属类型的规则，再查全局规则
    pub fn find(&self, owner: &TypeDescriptor, parameter: &str) -> Option<&BindingRule> {
        self.rules
            .get(&BindingKey::owned(owner.type_info().clone(), parameter))
            .or_else(|| self.rules.get(&BindingKey::global(parameter)))
    }

    /// 规则数量
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// 绑定解析器实现
#[derive(Debug)]
pub struct BindingResolverImpl {
    /// 类型注册表快照
    registry: Arc<TypeRegistryImpl>,
    /// 合并后的绑定规则
    rules: BindingRuleSet,
    /// 是否只使用显式绑定
    only_explicit: bool,
}

impl BindingResolverImpl {
    /// 创建新的绑定解析器
    pub fn new(registry: Arc<TypeRegistryImpl>, rules: BindingRuleSet) -> Self {
        Self {
            registry,
            rules,
            only_explicit: false,
        }
    }

    /// 只使用显式绑定
    pub fn only_explicit(mut self, only_explicit: bool) -> Self {
        self.only_explicit = only_explicit;
        self
    }

    fn resolve_explicit(&self, rule: &BindingRule) -> Resolution {
        match &rule.target {
            BindingTarget::Type(descriptor) => Resolution {
                target: Arc::clone(descriptor),
                scope: rule.scope,
                instance: None,
                explicit: true,
            },
            BindingTarget::Instance {
                descriptor,
                instance,
                ..
            } => Resolution {
                target: Arc::clone(descriptor),
                scope: rule.scope,
                instance: Some(Arc::clone(instance)),
                explicit: true,
            },
        }
    }

    fn resolve_implicit(&self, owner: &TypeDescriptor, parameter: &ConstructorParameter) -> DependencyResult<Resolution> {
        let unresolvable = || DependencyError::UnresolvableDependency {
            owner: owner.name().to_string(),
            parameter: parameter.name.clone(),
        };

        if self.only_explicit {
            return Err(unresolvable());
        }

        let type_name = NamingConventions::to_type_name(&parameter.name);
        let mut candidates = self.registry.candidates(&type_name);
        let target = match candidates.len() {
            0 => return Err(unresolvable()),
            1 => candidates.remove(0),
            _ => {
                return Err(DependencyError::AmbiguousDependency {
                    owner: owner.name().to_string(),
                    parameter: parameter.name.clone(),
                    candidates: candidates
                        .iter()
                        .map(|candidate| candidate.type_info().type_name.to_string())
                        .collect(),
                })
            }
        };

        Ok(Resolution {
            scope: target.scope().unwrap_or_default(),
            target,
            instance: None,
            explicit: false,
        })
    }
}

impl BindingResolver for BindingResolverImpl {
    fn resolve(&self, owner: &TypeDescriptor, parameter: &ConstructorParameter) -> DependencyResult<Resolution> {
        let resolution = match self.rules.find(owner, &parameter.name) {
            Some(rule) => {
                if !self.only_explicit && rule.key.owner.is_none() {
                    let shadowed = self.registry.candidates(&NamingConventions::to_type_name(&parameter.name));
                    if shadowed.iter().any(|candidate| !candidate.is_abstract() && candidate.type_id() != rule.target.descriptor().type_id()) {
                        warn!("显式绑定 {} 覆盖了按命名约定匹配的具体类型", rule);
                    }
                }
                self.resolve_explicit(rule)
            }
            None => self.resolve_implicit(owner, parameter)?,
        };

        let target = &resolution.target;
        if target.is_abstract() && resolution.instance.is_none() {
            return Err(DependencyError::AbstractType {
                type_name: target.name().to_string(),
                requested_by: format!("{}.{}", owner.name(), parameter.name),
            });
        }

        if !target.can_provide(&parameter.requirement) {
            return Err(DependencyError::TypeMismatch {
                owner: owner.name().to_string(),
                parameter: parameter.name.clone(),
                expected: parameter.requirement.type_name.to_string(),
                actual: target.type_info().type_name.to_string(),
            });
        }

        debug!(
            "解析依赖: {}.{} -> {} ({}{})",
            owner.name(),
            parameter.name,
            target.name(),
            resolution.scope,
            if resolution.explicit { ", 显式绑定" } else { "" }
        );
        Ok(resolution)
    }

    fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

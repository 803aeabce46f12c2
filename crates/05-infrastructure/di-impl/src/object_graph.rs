//! 对象图实现

use crate::registry::TypeRegistryImpl;
use crate::resolver::{BindingResolverImpl, BindingRuleSet};
use crate::scope_manager::ScopeManagerImpl;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use di_abstractions::{
    BindingResolver, BindingSpec, ObjectGraph, ObjectGraphConfig, ObjectGraphStats, Resolution,
    ResolveContext, ScopeManager, TypeRegistry, TypeScanner,
};
use infrastructure_common::{
    Arguments, DependencyError, DependencyResult, Instance, Requirement, Scope, TypeDescriptor,
};
use std::any::TypeId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// 类型级解析计划
///
/// 对象图构造前先完成整张依赖图的解析，构造阶段只按计划执行。
#[derive(Debug)]
struct ResolutionPlan {
    descriptor: Arc<TypeDescriptor>,
    dependencies: Vec<PlannedDependency>,
}

#[derive(Debug)]
struct PlannedDependency {
    parameter: String,
    resolution: Resolution,
    /// 实例绑定没有子计划
    plan: Option<Arc<ResolutionPlan>>,
}

/// 对象图实现
#[derive(Debug)]
pub struct ObjectGraphImpl {
    /// 对象图标识
    id: Uuid,
    /// 创建时间
    created_at: DateTime<Utc>,
    /// 对象图配置
    config: ObjectGraphConfig,
    /// 类型注册表
    registry: Arc<TypeRegistryImpl>,
    /// 绑定解析器
    resolver: BindingResolverImpl,
    /// 作用域管理器
    scopes: ScopeManagerImpl,
    /// 按类型缓存的解析计划
    plans: DashMap<TypeId, Arc<ResolutionPlan>>,
    /// `provide` 调用次数
    provide_calls: AtomicUsize,
    /// 失败的 `provide` 调用次数
    failures: AtomicUsize,
}

impl ObjectGraphImpl {
    /// 由已填充的注册表和合并后的绑定规则创建对象图
    pub fn new(config: ObjectGraphConfig, registry: TypeRegistryImpl, rules: BindingRuleSet) -> Self {
        let registry = Arc::new(registry);
        let resolver = BindingResolverImpl::new(Arc::clone(&registry), rules)
            .only_explicit(config.only_use_explicit_bindings);

        let graph = Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            config,
            registry,
            resolver,
            scopes: ScopeManagerImpl::new(),
            plans: DashMap::new(),
            provide_calls: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
        };

        info!(
            "对象图已创建: {} ({} 个类型, {} 条绑定规则)",
            graph.id,
            graph.registry.len(),
            graph.resolver.rule_count()
        );
        graph
    }

    /// 对象图标识
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 创建时间
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 对象图配置
    pub fn config(&self) -> &ObjectGraphConfig {
        &self.config
    }

    /// 类型注册表
    pub fn registry(&self) -> &TypeRegistryImpl {
        &self.registry
    }

    /// 丢弃所有缓存的单例，对象图仍可继续使用
    pub fn close(&self) {
        self.scopes.clear();
        info!("对象图已关闭: {}", self.id);
    }

    fn plan(&self, descriptor: &Arc<TypeDescriptor>, context: &mut ResolveContext) -> DependencyResult<Arc<ResolutionPlan>> {
        let type_id = descriptor.type_id();
        if let Some(plan) = self.plans.get(&type_id).map(|entry| Arc::clone(entry.value())) {
            return Ok(plan);
        }

        context.enter(descriptor)?;
        match self.plan_dependencies(descriptor, context) {
            Ok(dependencies) => {
                context.leave(descriptor, true);
                let plan = Arc::new(ResolutionPlan {
                    descriptor: Arc::clone(descriptor),
                    dependencies,
                });
                self.plans.insert(type_id, Arc::clone(&plan));
                Ok(plan)
            }
            Err(error) => {
                context.leave(descriptor, false);
                Err(error)
            }
        }
    }

    fn plan_dependencies(&self, descriptor: &Arc<TypeDescriptor>, context: &mut ResolveContext) -> DependencyResult<Vec<PlannedDependency>> {
        let mut dependencies = Vec::with_capacity(descriptor.parameters().len());
        for parameter in descriptor.parameters() {
            let resolution = self.resolver.resolve(descriptor, parameter)?;
            let plan = match resolution.instance {
                Some(_) => None,
                None => Some(self.plan(&resolution.target, context)?),
            };
            dependencies.push(PlannedDependency {
                parameter: parameter.name.clone(),
                resolution,
                plan,
            });
        }
        Ok(dependencies)
    }

    fn obtain(&self, plan: &ResolutionPlan, scope: Scope) -> DependencyResult<Instance> {
        self.scopes
            .get(&plan.descriptor, scope, &|| self.instantiate(plan))
    }

    fn instantiate(&self, plan: &ResolutionPlan) -> DependencyResult<Instance> {
        let mut arguments = Arguments::new(plan.descriptor.name());
        for dependency in &plan.dependencies {
            let instance = match (&dependency.resolution.instance, &dependency.plan) {
                (Some(instance), _) => Arc::clone(instance),
                (None, Some(plan)) => self.obtain(plan, dependency.resolution.scope)?,
                (None, None) => {
                    return Err(DependencyError::UnresolvableDependency {
                        owner: plan.descriptor.name().to_string(),
                        parameter: dependency.parameter.clone(),
                    })
                }
            };
            arguments.push(
                dependency.parameter.clone(),
                instance,
                Arc::clone(&dependency.resolution.target),
            );
        }
        plan.descriptor.construct(&arguments)
    }

    fn provide_root(&self, requirement: Requirement) -> DependencyResult<Instance> {
        let descriptor = self
            .registry
            .get(requirement.type_id)
            .ok_or_else(|| DependencyError::UnknownType {
                type_name: requirement.type_name.to_string(),
            })?;

        if descriptor.is_abstract() {
            return Err(DependencyError::AbstractType {
                type_name: descriptor.name().to_string(),
                requested_by: "provide".to_string(),
            });
        }

        let mut context = ResolveContext::new(self.config.max_resolution_depth);
        let plan = self.plan(&descriptor, &mut context)?;

        // 未声明作用域的根类型每次 provide 都重新构造
        let scope = descriptor.scope().unwrap_or(Scope::Prototype);
        self.obtain(&plan, scope)
    }
}

impl ObjectGraph for ObjectGraphImpl {
    fn provide_instance(&self, requirement: Requirement) -> DependencyResult<Instance> {
        self.provide_calls.fetch_add(1, Ordering::Relaxed);
        debug!("提供实例: {} [{}]", requirement.short_name(), self.id);

        self.provide_root(requirement).map_err(|e| {
            self.failures.fetch_add(1, Ordering::Relaxed);
            error!("提供实例失败: {} [{}]: {}", requirement.short_name(), self.id, e);
            e
        })
    }

    fn validate(&self) -> Result<(), Vec<DependencyError>> {
        let errors: Vec<DependencyError> = self
            .registry
            .descriptors()
            .iter()
            .filter(|descriptor| !descriptor.is_abstract())
            .filter_map(|descriptor| {
                let mut context = ResolveContext::new(self.config.max_resolution_depth);
                self.plan(descriptor, &mut context).err()
            })
            .collect();

        if errors.is_empty() {
            info!("对象图验证通过: {}", self.id);
            Ok(())
        } else {
            warn!("对象图验证失败: {} 个错误 [{}]", errors.len(), self.id);
            Err(errors)
        }
    }

    fn stats(&self) -> ObjectGraphStats {
        ObjectGraphStats {
            registered_types: self.registry.len(),
            binding_rules: self.resolver.rule_count(),
            cached_singletons: self.scopes.cached_count(),
            provide_calls: self.provide_calls.load(Ordering::Relaxed),
            constructions: self.scopes.construction_count(),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// 使用默认配置创建对象图
///
/// 扫描器提供可构造类型，绑定规范提供显式绑定规则。
pub fn new_object_graph(
    scanners: &[&dyn TypeScanner],
    specs: Vec<Box<dyn BindingSpec>>,
) -> DependencyResult<ObjectGraphImpl> {
    new_object_graph_with_config(ObjectGraphConfig::default(), scanners, specs)
}

/// 使用指定配置创建对象图
pub fn new_object_graph_with_config(
    config: ObjectGraphConfig,
    scanners: &[&dyn TypeScanner],
    specs: Vec<Box<dyn BindingSpec>>,
) -> DependencyResult<ObjectGraphImpl> {
    let mut registry =
        TypeRegistryImpl::new().with_duplicate_rejection(config.reject_duplicate_type_names);
    registry.scan(scanners)?;

    let mut rules = BindingRuleSet::from_specs(&specs)?;
    rules.register_targets(&mut registry)?;

    let validate_on_build = config.validate_on_build;
    let graph = ObjectGraphImpl::new(config, registry, rules);

    if validate_on_build {
        if let Err(errors) = graph.validate() {
            for error in &errors {
                error!("对象图验证错误: {}", error);
            }
            if let Some(first) = errors.into_iter().next() {
                return Err(first);
            }
        }
    }

    Ok(graph)
}

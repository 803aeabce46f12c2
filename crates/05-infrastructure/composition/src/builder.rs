//! 对象图构建器

use crate::config_sources::{self, ConfigSources};
use crate::logging::LoggingConfig;
use di_abstractions::{BindingSpec, Module, ObjectGraphConfig, TypeScanner};
use di_impl::{new_object_graph_with_config, ObjectGraphImpl};
use infrastructure_common::{Injectable, InfrastructureResult};
use std::path::Path;
use tracing::{debug, info};

/// 对象图构建器
///
/// 应用的组合根：收集配置源、模块与绑定规范，最后一次性构建对象图。
pub struct ObjectGraphBuilder {
    /// 显式给定的基础配置
    config: ObjectGraphConfig,
    /// 配置源
    config_sources: ConfigSources,
    /// 类型扫描器列表
    scanners: Vec<Box<dyn TypeScanner>>,
    /// 通过 `register` 逐个添加的类型
    registrations: Module,
    /// 绑定规范列表
    binding_specs: Vec<Box<dyn BindingSpec>>,
    /// 构建时安装的日志配置
    logging: Option<LoggingConfig>,
}

impl ObjectGraphBuilder {
    /// 创建新的对象图构建器
    pub fn new() -> Self {
        Self {
            config: ObjectGraphConfig::default(),
            config_sources: ConfigSources::new(),
            scanners: Vec::new(),
            registrations: Module::new("builder"),
            binding_specs: Vec::new(),
            logging: None,
        }
    }

    /// 设置基础配置，配置文件与环境变量在其之上叠加
    pub fn with_config(mut self, config: ObjectGraphConfig) -> Self {
        self.config = config;
        self
    }

    /// 添加配置文件
    pub fn add_config_file<P: AsRef<Path>>(mut self, path: P) -> InfrastructureResult<Self> {
        self.config_sources.add_file(path)?;
        Ok(self)
    }

    /// 添加环境变量配置源
    pub fn add_config_env_vars<S: Into<String>>(mut self, prefix: S) -> Self {
        self.config_sources.set_env_prefix(prefix);
        self
    }

    /// 使用默认前缀 `OBJECT_GRAPH` 的环境变量配置源
    pub fn add_default_env_vars(self) -> Self {
        self.add_config_env_vars(config_sources::DEFAULT_ENV_PREFIX)
    }

    /// 注册单个可注入类型
    pub fn register<T: Injectable + ?Sized>(mut self) -> Self {
        debug!("注册类型: {}", std::any::type_name::<T>());
        self.registrations = self.registrations.with::<T>();
        self
    }

    /// 添加模块或其他类型扫描器
    pub fn add_module<T: TypeScanner + 'static>(mut self, scanner: T) -> Self {
        debug!("添加类型扫描器: {}", scanner.name());
        self.scanners.push(Box::new(scanner));
        self
    }

    /// 添加绑定规范
    pub fn add_binding_spec<T: BindingSpec + 'static>(mut self, spec: T) -> Self {
        debug!("添加绑定规范: {}", spec.name());
        self.binding_specs.push(Box::new(spec));
        self
    }

    /// 构建时安装全局日志订阅者
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging = Some(config);
        self
    }

    /// 构建对象图
    pub fn build(self) -> InfrastructureResult<ObjectGraphImpl> {
        // 只有明确要求时才安装订阅者，测试中多个对象图可以共存
        if let Some(logging) = &self.logging {
            logging.init()?;
        }

        info!("开始构建对象图");

        let config = if self.config_sources.is_empty() {
            config_sources::validate(&self.config)?;
            self.config
        } else {
            self.config_sources.load(&self.config)?
        };

        let mut scanners: Vec<&dyn TypeScanner> =
            self.scanners.iter().map(|scanner| scanner.as_ref()).collect();
        if !self.registrations.is_empty() {
            scanners.push(&self.registrations);
        }

        let graph = new_object_graph_with_config(config, &scanners, self.binding_specs)?;

        info!("对象图构建完成: {}", graph.id());
        Ok(graph)
    }
}

impl Default for ObjectGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

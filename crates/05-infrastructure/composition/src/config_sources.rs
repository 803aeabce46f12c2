//! 对象图配置源
//!
//! 使用 `config` crate 按顺序叠加：基础配置、配置文件、环境变量。

use di_abstractions::ObjectGraphConfig;
use infrastructure_common::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// 默认环境变量前缀
pub const DEFAULT_ENV_PREFIX: &str = "OBJECT_GRAPH";

/// 对象图配置源集合
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// 配置文件，按添加顺序叠加
    files: Vec<PathBuf>,
    /// 环境变量前缀
    env_prefix: Option<String>,
}

impl ConfigSources {
    /// 创建空的配置源集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加配置文件，格式由扩展名决定（toml / json / yaml）
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        info!("添加配置文件: {}", path.display());
        self.files.push(path.to_path_buf());
        Ok(())
    }

    /// 设置环境变量前缀，例如 `OBJECT_GRAPH` 对应 `OBJECT_GRAPH_MAX_RESOLUTION_DEPTH`
    pub fn set_env_prefix(&mut self, prefix: impl Into<String>) {
        let prefix = prefix.into();
        info!("添加环境变量配置源，前缀: {}", prefix);
        self.env_prefix = Some(prefix);
    }

    /// 是否没有任何配置源
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.env_prefix.is_none()
    }

    /// 在基础配置之上叠加所有配置源
    pub fn load(&self, base: &ObjectGraphConfig) -> ConfigResult<ObjectGraphConfig> {
        let base = config::Config::try_from(base).map_err(parse_error)?;
        let mut builder = config::Config::builder().add_source(base);

        for file in &self.files {
            builder = builder.add_source(config::File::from(file.as_path()));
        }

        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(config::Environment::with_prefix(prefix).try_parsing(true));
        }

        let loaded: ObjectGraphConfig = builder
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| {
                error!("对象图配置加载失败: {}", e);
                parse_error(e)
            })?;

        validate(&loaded)?;
        debug!("对象图配置加载完成: {:?}", loaded);
        Ok(loaded)
    }
}

fn parse_error(error: config::ConfigError) -> ConfigError {
    ConfigError::ParseError {
        source: Box::new(error),
    }
}

/// 校验配置取值
pub fn validate(config: &ObjectGraphConfig) -> ConfigResult<()> {
    if config.max_resolution_depth == 0 {
        return Err(ConfigError::ValidationError {
            message: "max_resolution_depth 必须大于 0".to_string(),
        });
    }
    Ok(())
}

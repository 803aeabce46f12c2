//! 日志初始化
//!
//! 对象图在解析过程中输出 `tracing` 事件；组合根按 `LoggingConfig` 安装全局订阅者。

use infrastructure_common::{InfrastructureError, InfrastructureResult};
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// 容器各 crate 的日志目标，用于只放大容器自身日志的过滤指令
const CONTAINER_TARGETS: [&str; 4] = [
    "infrastructure_common",
    "di_abstractions",
    "di_impl",
    "infrastructure_composition",
];

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 默认日志级别
    pub level: Level,
    /// 仅对容器 crate 生效的级别，例如只想看解析过程的 debug 日志
    pub container_level: Option<Level>,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID，排查并发单例构造时有用
    pub show_thread_ids: bool,
    /// 是否显示源码位置
    pub show_source_location: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            container_level: None,
            show_target: true,
            show_thread_ids: false,
            show_source_location: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 按级别名称创建配置，无法识别的名称回退到 `info`
    pub fn with_level(level: &str) -> Self {
        Self {
            level: Level::from_str(level.trim()).unwrap_or(Level::INFO),
            ..Self::default()
        }
    }

    /// 开发环境：容器 crate 输出 debug 日志，显示线程与源码位置
    pub fn development() -> Self {
        Self {
            container_level: Some(Level::DEBUG),
            show_thread_ids: true,
            show_source_location: true,
            ..Self::default()
        }
    }

    /// 生产环境：JSON 输出，不显示目标
    pub fn production() -> Self {
        Self {
            show_target: false,
            json_format: true,
            ..Self::default()
        }
    }

    /// 过滤指令，例如 `info,di_impl=debug,...`
    pub fn filter_directives(&self) -> String {
        let mut directives = self.level.to_string().to_lowercase();
        if let Some(container_level) = self.container_level {
            let container_level = container_level.to_string().to_lowercase();
            for target in CONTAINER_TARGETS {
                directives.push_str(&format!(",{}={}", target, container_level));
            }
        }
        directives
    }

    /// 安装全局日志订阅者
    ///
    /// 每个进程只能安装一次，重复安装返回 `BootstrapFailed`。
    pub fn init(&self) -> InfrastructureResult<()> {
        let filter = EnvFilter::try_new(self.filter_directives()).map_err(|e| {
            InfrastructureError::BootstrapFailed {
                message: format!("日志过滤指令无效: {}", e),
            }
        })?;

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(self.show_target)
            .with_thread_ids(self.show_thread_ids)
            .with_file(self.show_source_location)
            .with_line_number(self.show_source_location);

        if self.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| InfrastructureError::BootstrapFailed {
            message: format!("日志初始化失败: {}", e),
        })?;

        tracing::info!("日志系统初始化完成: {}", self.filter_directives());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_level_parses_names() {
        assert_eq!(LoggingConfig::with_level("debug").level, Level::DEBUG);
        assert_eq!(LoggingConfig::with_level(" WARN ").level, Level::WARN);
        assert_eq!(LoggingConfig::with_level("loud").level, Level::INFO);
    }

    #[test]
    fn test_presets() {
        let development = LoggingConfig::development();
        let production = LoggingConfig::production();

        assert_eq!(development.container_level, Some(Level::DEBUG));
        assert!(development.show_source_location);
        assert!(production.json_format);
        assert!(!production.show_target);
    }

    #[test]
    fn test_filter_directives() {
        assert_eq!(LoggingConfig::default().filter_directives(), "info");

        let directives = LoggingConfig::development().filter_directives();
        assert!(directives.starts_with("info,"));
        assert!(directives.contains("di_impl=debug"));
        assert!(directives.contains("infrastructure_composition=debug"));
        assert!(EnvFilter::try_new(directives).is_ok());
    }
}

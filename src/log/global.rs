use crate::log::config::{ConfigModel, FALLBACK_HANDLER};
use crate::log::error::ConfigError;
use crate::log::label::Label;
use crate::log::level::LogLevel;
use crate::log::logger::Logger;
use crate::log::registry::LoggerRegistry;
use crate::log::sink::{DefaultSinkFactory, SinkFactory};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// 全局 LoggerRegistry 单例
///
/// 第一次查找时如果还没有初始化，使用内置默认配置（root 以 info 级别输出 JSON 到标准输出）
static GLOBAL_REGISTRY: Lazy<Arc<LoggerRegistry>> = Lazy::new(|| Arc::new(LoggerRegistry::new()));

/// 独立于注册表的默认 logger
static DEFAULT_LOGGER: Lazy<Arc<Logger>> = Lazy::new(|| {
    let config = ConfigModel::fallback();
    let spec = &config.handlers[FALLBACK_HANDLER];
    let sink = match DefaultSinkFactory.build(FALLBACK_HANDLER, spec) {
        Ok(sink) => sink,
        Err(e) => panic!("logx: 创建默认 logger 失败: {}", e),
    };

    let mut sinks = BTreeMap::new();
    sinks.insert(FALLBACK_HANDLER.to_string(), sink);
    Arc::new(Logger::new(
        "default",
        LogLevel::Info,
        sinks,
        Arc::clone(global_registry().global_labels()),
    ))
});

/// 获取全局 LoggerRegistry
pub fn global_registry() -> Arc<LoggerRegistry> {
    Arc::clone(&GLOBAL_REGISTRY)
}

/// 按配置初始化全局注册表
///
/// 失败时之前的配置保持不变
pub fn init_from_config(config: &ConfigModel) -> Result<(), ConfigError> {
    GLOBAL_REGISTRY.initialize(config)
}

/// 从配置文件初始化全局注册表，支持 .json / .json5 / .yaml / .yml / .toml
///
/// ```no_run
/// fn main() -> Result<(), logx::log::ConfigError> {
///     logx::log::init_from_path("config/log.yaml")?;
///     logx::log::get_logger("controller").info("started");
///     Ok(())
/// }
/// ```
pub fn init_from_path(path: impl AsRef<Path>) -> Result<(), ConfigError> {
    GLOBAL_REGISTRY.initialize_from_path(path)
}

/// 获取指定名称的 logger（全局）
pub fn get_logger(name: &str) -> Arc<Logger> {
    GLOBAL_REGISTRY.lookup(name)
}

/// get_logger 的别名，便于写出 `log::with("svc").info(...)`
pub fn with(name: &str) -> Arc<Logger> {
    get_logger(name)
}

/// 获取全局标签
pub fn get_global_labels() -> Vec<Label> {
    GLOBAL_REGISTRY.get_global_labels()
}

/// 整体替换全局标签
///
/// 替换是原子的：并发输出的日志要么带旧标签要么带新标签
pub fn set_global_labels(labels: Vec<Label>) {
    GLOBAL_REGISTRY.set_global_labels(labels)
}

/// 默认 logger，不依赖注册表配置，名称为 `default`，info 级别输出 JSON 到标准输出
pub fn default_logger() -> Arc<Logger> {
    Arc::clone(&DEFAULT_LOGGER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_global_get_logger_uses_registry() {
        let logger = get_logger("global.test.child");
        assert_eq!(logger.name(), "global.test.child");
        assert!(global_registry().is_initialized());
        assert!(global_registry().contains("global.test"));
        assert!(Arc::ptr_eq(&logger, &with("global.test.child")));
    }

    #[test]
    #[serial]
    fn test_global_labels_roundtrip() {
        let previous = get_global_labels();
        set_global_labels(vec![Label::string("app", "logx"), Label::int("pid", 42)]);

        let labels = get_global_labels();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0], Label::string("app", "logx"));

        set_global_labels(previous);
    }

    #[test]
    #[serial]
    fn test_global_init_from_config_failure_keeps_state() {
        init_from_config(&ConfigModel::fallback()).unwrap();
        get_logger("kept.child");

        let err = init_from_config(&ConfigModel::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRoot));
        assert!(global_registry().contains("kept.child"));
    }

    #[test]
    #[serial]
    fn test_default_logger() {
        let logger = default_logger();
        assert_eq!(logger.name(), "default");
        assert_eq!(logger.level(), LogLevel::Info);
        assert_eq!(logger.sink_names(), vec![FALLBACK_HANDLER]);
        assert!(Arc::ptr_eq(&logger, &default_logger()));
    }
}

use crate::log::config::{ConfigModel, ROOT_LOGGER};
use crate::log::error::ConfigError;
use crate::log::global_labels::GlobalLabels;
use crate::log::label::Label;
use crate::log::level::LogLevel;
use crate::log::logger::Logger;
use crate::log::sink::{DefaultSinkFactory, Sink, SinkFactory};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type LoggerMap = HashMap<String, Arc<Logger>>;

/// Logger 注册表
///
/// 按名称查找 logger，名称以 `.` 分层。未配置的名称沿前缀逐级回退到最近的已配置祖先，
/// 最终回退到 `root`；回退路径上的每一级都会被物化并缓存，之后同名查找直接命中。
///
/// 查找和整体替换使用同一把互斥锁，调用方应当缓存拿到的 logger 而不是每次输出都查找
///
/// ```
/// use logx::log::{ConfigModel, LoggerRegistry};
///
/// let registry = LoggerRegistry::new();
/// registry.initialize(&ConfigModel::fallback()).unwrap();
///
/// let logger = registry.lookup("controller.users");
/// assert_eq!(logger.name(), "controller.users");
/// assert!(registry.contains("controller"));
/// ```
pub struct LoggerRegistry {
    loggers: Mutex<Option<LoggerMap>>,
    factory: Arc<dyn SinkFactory>,
    globals: Arc<GlobalLabels>,
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerRegistry {
    /// 使用默认 sink 工厂创建未初始化的注册表
    pub fn new() -> Self {
        Self::with_factory(Arc::new(DefaultSinkFactory))
    }

    /// 使用指定的 sink 工厂创建未初始化的注册表
    pub fn with_factory(factory: Arc<dyn SinkFactory>) -> Self {
        Self {
            loggers: Mutex::new(None),
            factory,
            globals: Arc::new(GlobalLabels::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<LoggerMap>> {
        self.loggers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 按配置初始化，整体替换之前的所有 logger
    ///
    /// 校验失败时返回错误，之前安装的 logger 保持不变
    pub fn initialize(&self, config: &ConfigModel) -> Result<(), ConfigError> {
        let loggers = self.build(config)?;
        *self.lock() = Some(loggers);
        Ok(())
    }

    /// 从配置文件初始化
    pub fn initialize_from_path(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let config = ConfigModel::from_path(path)?;
        self.initialize(&config)
    }

    /// 按配置构建全部 logger，不触碰当前状态
    fn build(&self, config: &ConfigModel) -> Result<LoggerMap, ConfigError> {
        let mut sinks: HashMap<&str, Arc<dyn Sink>> = HashMap::with_capacity(config.handlers.len());
        for (name, spec) in &config.handlers {
            sinks.insert(name.as_str(), self.factory.build(name, spec)?);
        }

        let mut loggers = LoggerMap::with_capacity(config.loggers.len());
        for (name, spec) in &config.loggers {
            let mut logger_sinks = BTreeMap::new();
            for handler in &spec.handlers {
                let sink = sinks
                    .get(handler.as_str())
                    .ok_or_else(|| ConfigError::UnknownHandler {
                        logger: name.clone(),
                        handler: handler.clone(),
                    })?;
                logger_sinks.insert(handler.clone(), Arc::clone(sink));
            }

            let level = LogLevel::from_str(&spec.level).map_err(|_| ConfigError::InvalidLoggerLevel {
                logger: name.clone(),
                level: spec.level.clone(),
            })?;

            let logger = Logger::new(name.clone(), level, logger_sinks, Arc::clone(&self.globals));
            loggers.insert(name.clone(), Arc::new(logger));
        }

        if !loggers.contains_key(ROOT_LOGGER) {
            return Err(ConfigError::MissingRoot);
        }

        Ok(loggers)
    }

    /// 内置默认配置构建失败时日志无法工作，只能终止
    fn build_fallback(&self) -> LoggerMap {
        match self.build(&ConfigModel::fallback()) {
            Ok(loggers) => loggers,
            Err(e) => panic!("logx: 初始化默认日志配置失败: {}", e),
        }
    }

    /// 查找 logger，必要时按层级回退并缓存
    ///
    /// 注册表从未初始化时，先使用内置默认配置初始化
    pub fn lookup(&self, name: &str) -> Arc<Logger> {
        let mut guard = self.lock();
        let loggers = guard.get_or_insert_with(|| self.build_fallback());
        self.resolve(loggers, name)
    }

    /// 在已加锁的 map 上解析名称
    ///
    /// 沿前缀向上找到第一个已存在的祖先，再从祖先向下逐级派生并缓存
    fn resolve(&self, loggers: &mut LoggerMap, name: &str) -> Arc<Logger> {
        if let Some(logger) = loggers.get(name) {
            return Arc::clone(logger);
        }

        let mut missing = vec![name];
        let mut current = name;
        let mut ancestor = loop {
            let parent = parent_name(current);
            if let Some(logger) = loggers.get(parent) {
                break Arc::clone(logger);
            }
            if parent == current {
                // root 缺失，只有在初始化之外构造 map 时才会出现
                break Arc::new(Logger::new(
                    ROOT_LOGGER,
                    LogLevel::None,
                    BTreeMap::new(),
                    Arc::clone(&self.globals),
                ));
            }
            missing.push(parent);
            current = parent;
        };

        for name in missing.into_iter().rev() {
            let logger = Arc::new(ancestor.derive(name));
            loggers.insert(name.to_string(), Arc::clone(&logger));
            ancestor = logger;
        }

        ancestor
    }

    /// 是否已经初始化
    pub fn is_initialized(&self) -> bool {
        self.lock().is_some()
    }

    /// 是否已经存在（配置或缓存）该名称的 logger，不会触发解析
    pub fn contains(&self, name: &str) -> bool {
        self.lock()
            .as_ref()
            .map_or(false, |loggers| loggers.contains_key(name))
    }

    /// 当前所有 logger 名称，按字典序
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .lock()
            .as_ref()
            .map(|loggers| loggers.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// 该注册表的全局标签
    pub fn global_labels(&self) -> &Arc<GlobalLabels> {
        &self.globals
    }

    /// 获取全局标签
    pub fn get_global_labels(&self) -> Vec<Label> {
        self.globals.get()
    }

    /// 整体替换全局标签，对已经获取的 logger 同样生效
    pub fn set_global_labels(&self, labels: Vec<Label>) {
        self.globals.set(labels)
    }

    /// 刷新所有 logger 的 sink
    pub fn flush(&self) {
        let loggers: Vec<Arc<Logger>> = self
            .lock()
            .as_ref()
            .map(|loggers| loggers.values().cloned().collect())
            .unwrap_or_default();
        for logger in loggers {
            logger.flush();
        }
    }
}

/// 去掉最后一段得到父名称；没有 `.`（或以 `.` 开头）时父名称为 root
fn parent_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(index) if index > 0 => &name[..index],
        _ => ROOT_LOGGER,
    }
}

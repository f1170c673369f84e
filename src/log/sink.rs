//! 日志输出端
//!
//! [`Sink`] 是 logger 与实际输出之间的接口；[`SinkFactory`] 根据 handler 配置创建 sink。
//! 默认实现 [`DefaultSinkFactory`] 把每个 handler 组装成一个 [`HandlerSink`]：
//! handler 级别过滤 + 编码器 + 一个或多个输出器

use crate::log::appender::{
    ConsoleAppender, ConsoleAppenderConfig, FileAppender, FileAppenderConfig, LogAppender,
    RollingFileAppender, RollingFileAppenderConfig, Target,
};
use crate::log::config::HandlerSpec;
use crate::log::error::ConfigError;
use crate::log::formatter::{
    ConsoleFormatter, ConsoleFormatterConfig, JsonFormatter, JsonFormatterConfig, LogFormatter,
};
use crate::log::label::Label;
use crate::log::level::LogLevel;
use crate::log::log_record::LogRecord;
use garde::Validate;
use std::str::FromStr;
use std::sync::Arc;

/// 日志输出端
///
/// 自行负责编码、写入和错误处理；`emit` 不返回错误，一个 sink 的故障不影响其它 sink
pub trait Sink: Send + Sync {
    /// 输出一条已经通过 logger 级别检查的日志
    fn emit(&self, level: LogLevel, message: &str, labels: &[Label]);

    /// 刷新缓冲区
    fn flush(&self) {}
}

/// 根据 handler 配置创建 sink
pub trait SinkFactory: Send + Sync {
    fn build(&self, name: &str, spec: &HandlerSpec) -> Result<Arc<dyn Sink>, ConfigError>;
}

/// 编码方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Console,
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Encoding::Json),
            "console" => Ok(Encoding::Console),
            _ => Err(format!("invalid encoding '{}'", s)),
        }
    }
}

/// 由 handler 配置组装出的 sink
pub struct HandlerSink {
    name: String,
    level: LogLevel,
    formatter: Box<dyn LogFormatter>,
    appenders: Vec<Box<dyn LogAppender>>,
}

impl HandlerSink {
    pub fn new(
        name: impl Into<String>,
        level: LogLevel,
        formatter: Box<dyn LogFormatter>,
        appenders: Vec<Box<dyn LogAppender>>,
    ) -> Self {
        Self {
            name: name.into(),
            level,
            formatter,
            appenders,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// 是否会输出该级别的日志
    pub fn accepts(&self, level: LogLevel) -> bool {
        self.level != LogLevel::None && level <= self.level && !self.appenders.is_empty()
    }
}

impl Sink for HandlerSink {
    fn emit(&self, level: LogLevel, message: &str, labels: &[Label]) {
        if !self.accepts(level) {
            return;
        }

        let record = LogRecord::new(level, message, labels);
        let formatted = match self.formatter.format(&record) {
            Ok(formatted) => formatted,
            Err(e) => {
                eprintln!("logx: handler '{}' 编码日志失败: {}", self.name, e);
                return;
            }
        };

        for appender in &self.appenders {
            if let Err(e) = appender.append(&formatted) {
                eprintln!("logx: handler '{}' 写入日志失败: {}", self.name, e);
            }
        }
    }

    fn flush(&self) {
        for appender in &self.appenders {
            if let Err(e) = appender.flush() {
                eprintln!("logx: handler '{}' 刷新日志失败: {}", self.name, e);
            }
        }
    }
}

/// 默认 sink 工厂
///
/// - `encoding`: `json` 使用 JsonFormatter，`console` 使用 ConsoleFormatter
/// - `outputPaths`: `stdout` / `stderr` 使用 ConsoleAppender，其它路径使用 FileAppender
/// - `rollingFile`: 使用 RollingFileAppender
/// - 两种输出都没有配置时丢弃所有日志
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSinkFactory;

impl DefaultSinkFactory {
    fn build_formatter(name: &str, spec: &HandlerSpec) -> Result<Box<dyn LogFormatter>, ConfigError> {
        let encoding = Encoding::from_str(&spec.encoding).map_err(|_| ConfigError::InvalidEncoding {
            handler: name.to_string(),
            encoding: spec.encoding.clone(),
        })?;

        let formatter: Box<dyn LogFormatter> = match encoding {
            Encoding::Json => Box::new(JsonFormatter::from(JsonFormatterConfig::default())).into(),
            Encoding::Console => Box::new(ConsoleFormatter::from(ConsoleFormatterConfig {
                colored: spec.colored,
            }))
            .into(),
        };
        Ok(formatter)
    }

    fn build_appenders(name: &str, spec: &HandlerSpec) -> Result<Vec<Box<dyn LogAppender>>, ConfigError> {
        let mut appenders: Vec<Box<dyn LogAppender>> = Vec::new();

        if let Some(rolling) = &spec.rolling_file {
            if !spec.output_paths.is_empty() {
                return Err(ConfigError::ConflictingDestinations {
                    handler: name.to_string(),
                });
            }

            rolling.validate().map_err(|e| ConfigError::InvalidRollingFile {
                handler: name.to_string(),
                message: e.to_string(),
            })?;

            let appender = RollingFileAppender::try_from(RollingFileAppenderConfig {
                file_path: rolling.file.clone(),
                max_size: rolling.max_size_bytes(),
                max_backups: rolling.max_backups,
                max_age_days: rolling.max_age_days,
                compress: rolling.compress,
            })
            .map_err(|source| ConfigError::SinkBuild {
                handler: name.to_string(),
                path: rolling.file.clone(),
                source,
            })?;
            appenders.push(Box::new(appender).into());
            return Ok(appenders);
        }

        for path in &spec.output_paths {
            match Target::from_path(path) {
                Some(target) => {
                    appenders.push(Box::new(ConsoleAppender::from(ConsoleAppenderConfig { target })).into());
                }
                None => {
                    let appender = FileAppender::try_from(FileAppenderConfig {
                        file_path: path.clone(),
                    })
                    .map_err(|source| ConfigError::SinkBuild {
                        handler: name.to_string(),
                        path: path.clone(),
                        source,
                    })?;
                    appenders.push(Box::new(appender).into());
                }
            }
        }

        Ok(appenders)
    }
}

impl SinkFactory for DefaultSinkFactory {
    fn build(&self, name: &str, spec: &HandlerSpec) -> Result<Arc<dyn Sink>, ConfigError> {
        let level = LogLevel::from_str(&spec.level).map_err(|_| ConfigError::InvalidHandlerLevel {
            handler: name.to_string(),
            level: spec.level.clone(),
        })?;

        let formatter = Self::build_formatter(name, spec)?;
        let appenders = Self::build_appenders(name, spec)?;

        Ok(Arc::new(HandlerSink::new(name, level, formatter, appenders)))
    }
}

//! 日志模块
//!
//! 结构化日志门面：按名称获取分层的 [`Logger`]，输出带键值标签的分级日志，
//! 每条日志按级别过滤后交给配置好的一个或多个 [`Sink`]。
//!
//! # 特性
//!
//! - 日志级别：None < Error < Warning < Info < Debug
//! - 分层名称：`controller.users` 未配置时沿用 `controller` 的配置，最终回退到 `root`
//! - 标签顺序固定：logger 名称、全局标签、`with_labels` 分组、`with_label` 单个标签
//! - 被过滤的日志不会格式化消息
//! - 配置文件支持 JSON / JSON5 / YAML / TOML
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use logx::log::{self, Label};
//!
//! fn main() -> Result<(), log::ConfigError> {
//!     log::init_from_path("config/log.yaml")?;
//!     log::set_global_labels(vec![Label::string("app", "demo")]);
//!
//!     let logger = log::get_logger("controller.users");
//!     logger.info("application started");
//!     logger
//!         .with_label(Label::int("user_id", 12345))
//!         .warn(format_args!("login failed {} times", 3));
//!
//!     Ok(())
//! }
//! ```

pub mod appender;
pub mod config;
pub mod error;
pub mod formatter;
pub mod global;
pub mod global_labels;
pub mod label;
pub mod level;
pub mod log_event;
pub mod log_record;
pub mod logger;
pub mod macros;
pub mod registry;
pub mod sink;

// 重新导出核心类型
pub use config::{ConfigModel, HandlerSpec, LoggerSpec, RollingFileSpec};
pub use error::ConfigError;
pub use global_labels::GlobalLabels;
pub use label::{Label, LabelValue};
pub use level::LogLevel;
pub use log_event::LogEvent;
pub use log_record::LogRecord;
pub use logger::Logger;
pub use registry::LoggerRegistry;
pub use sink::{DefaultSinkFactory, HandlerSink, Sink, SinkFactory};

pub use global::{
    default_logger, get_global_labels, get_logger, global_registry, init_from_config,
    init_from_path, set_global_labels, with,
};

pub use appender::{ConsoleAppender, FileAppender, LogAppender, RollingFileAppender};
pub use formatter::{ConsoleFormatter, JsonFormatter, LogFormatter};

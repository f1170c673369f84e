//! logx - 分层命名的结构化日志门面
//!
//! 调用方按名称（以 `.` 分隔的层级名）获取 [`Logger`]，附带结构化标签输出分级日志；
//! 门面根据配置把每条日志路由到零个或多个输出端（Sink），并按级别过滤。
//!
//! ## 模块
//!
//! - **cfg**: 配置文件加载（按扩展名选择 JSON / JSON5 / YAML / TOML 解析器）
//! - **log**: 日志门面（Logger 层级解析、标签组合、格式化器与输出器）
//!
//! ## 快速开始
//!
//! ```no_run
//! use logx::log::{self, Label};
//!
//! fn main() -> Result<(), logx::log::ConfigError> {
//!     log::init_from_path("log-config.yaml")?;
//!     log::set_global_labels(vec![Label::string("app", "demo")]);
//!
//!     let logger = log::get_logger("controller.http");
//!     logger.info("server started");
//!     logger
//!         .with_label(Label::int("port", 8080))
//!         .warn(format_args!("slow request: {}ms", 1500));
//!     Ok(())
//! }
//! ```

pub mod cfg;
pub mod log;

// 重新导出主要的公共 API
pub use cfg::{FileFormat, SourceError};

pub use log::{
    ConfigError, ConfigModel, GlobalLabels, HandlerSpec, Label, LabelValue, LogEvent, LogLevel,
    Logger, LoggerRegistry, LoggerSpec, RollingFileSpec, Sink, SinkFactory,
};

//! 日志宏模块
//!
//! 消息按 `format!` 语法书写，只有通过级别检查后才会格式化。
//! 可以在消息之前用 `"key" => value, ...;` 附加标签
//!
//! # 示例
//!
//! ```
//! use logx::log::LoggerRegistry;
//!
//! let registry = LoggerRegistry::new();
//! let logger = registry.lookup("controller");
//!
//! // 简单日志
//! logx::info!(logger, "application started");
//!
//! // 带格式化参数
//! logx::debug!(logger, "processing {} items", 3);
//!
//! // 带标签的日志
//! logx::warn!(logger, "user_id" => 12345, "username" => "alice"; "slow request: {}ms", 1500);
//! ```

/// 记录 INFO 级别日志
///
/// # 示例
///
/// ```ignore
/// info!(logger, "user logged in");
/// info!(logger, "user_id" => 12345, "action" => "login"; "user action {}", name);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($key:literal => $value:expr),+ ; $($arg:tt)+) => {
        $logger
            .with_labels(vec![$($crate::log::Label::new($key, $value)),+])
            .info(format_args!($($arg)+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(format_args!($($arg)+))
    };
}

/// 记录 DEBUG 级别日志
///
/// # 示例
///
/// ```ignore
/// debug!(logger, "processing request");
/// debug!(logger, "endpoint" => "/api/users", "method" => "GET"; "processing");
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($key:literal => $value:expr),+ ; $($arg:tt)+) => {
        $logger
            .with_labels(vec![$($crate::log::Label::new($key, $value)),+])
            .debug(format_args!($($arg)+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(format_args!($($arg)+))
    };
}

/// 记录 WARN 级别日志
///
/// # 示例
///
/// ```ignore
/// warn!(logger, "high memory usage");
/// warn!(logger, "duration_ms" => 1500, "threshold_ms" => 1000; "slow query");
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($key:literal => $value:expr),+ ; $($arg:tt)+) => {
        $logger
            .with_labels(vec![$($crate::log::Label::new($key, $value)),+])
            .warn(format_args!($($arg)+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(format_args!($($arg)+))
    };
}

/// 记录 ERROR 级别日志
///
/// # 示例
///
/// ```ignore
/// error!(logger, "database connection failed");
/// error!(logger, "error_code" => 500, "retry" => 3; "request failed: {}", err);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($key:literal => $value:expr),+ ; $($arg:tt)+) => {
        $logger
            .with_labels(vec![$($crate::log::Label::new($key, $value)),+])
            .error(format_args!($($arg)+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(format_args!($($arg)+))
    };
}

use crate::log::label::Label;
use crate::log::level::LogLevel;
use chrono::{DateTime, Local};

/// 日志记录
///
/// sink 在通过级别检查后构造，交给 formatter 编码
#[derive(Debug)]
pub struct LogRecord<'a> {
    /// 日志级别
    pub level: LogLevel,
    /// 日志消息
    pub message: &'a str,
    /// 时间戳
    pub timestamp: DateTime<Local>,
    /// 标签，按最终顺序排列（logger、全局、自定义）
    pub labels: &'a [Label],
}

impl<'a> LogRecord<'a> {
    /// 创建新的日志记录，时间戳取当前本地时间
    pub fn new(level: LogLevel, message: &'a str, labels: &'a [Label]) -> Self {
        Self {
            level,
            message,
            timestamp: Local::now(),
            labels,
        }
    }

    /// 指定时间戳
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// RFC3339 时间，纳秒精度
    pub fn time_rfc3339(&self) -> String {
        self.timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Nanos, false)
    }
}

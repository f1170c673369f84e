use crate::log::global_labels::GlobalLabels;
use crate::log::label::Label;
use crate::log::level::LogLevel;
use crate::log::log_event::LogEvent;
use crate::log::sink::Sink;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// 标识 logger 名称的标签 key
pub const LOGGER_LABEL: &str = "logger";

/// 未知级别的日志以 Warning 级别输出，消息加上此前缀
pub const UNKNOWN_LEVEL_PREFIX: &str =
    "the following message was logged on unknown log level! Original message: ";

/// 日志器
///
/// 名称、级别和 sink 集合在构造后不再变化，可以在线程间自由共享。
/// 从 registry 派生子 logger 时复制 sink 映射（sink 本身共享）
#[derive(Clone)]
pub struct Logger {
    name: String,
    level: LogLevel,
    sinks: BTreeMap<String, Arc<dyn Sink>>,
    globals: Arc<GlobalLabels>,
}

impl Logger {
    pub fn new(
        name: impl Into<String>,
        level: LogLevel,
        sinks: BTreeMap<String, Arc<dyn Sink>>,
        globals: Arc<GlobalLabels>,
    ) -> Self {
        Self {
            name: name.into(),
            level,
            sinks,
            globals,
        }
    }

    /// 复制当前 logger 并改名，级别和 sink 保持不变
    pub(crate) fn derive(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// logger 名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// logger 级别
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// handler 名称 -> sink
    pub fn sinks(&self) -> &BTreeMap<String, Arc<dyn Sink>> {
        &self.sinks
    }

    /// 关联的 handler 名称，按字典序
    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.keys().map(String::as_str).collect()
    }

    /// 事件级别比 logger 级别更详细时被过滤
    pub fn is_filtered_out(&self, level: LogLevel) -> bool {
        level > self.level
    }

    /// 不会输出任何内容：级别为 None 或没有 sink
    pub fn is_silent(&self) -> bool {
        self.level == LogLevel::None || self.sinks.is_empty()
    }

    /// 是否会输出该级别的日志
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::None && self.level >= level && !self.sinks.is_empty()
    }

    pub fn is_error_enabled(&self) -> bool {
        self.is_enabled(LogLevel::Error)
    }

    pub fn is_warning_enabled(&self) -> bool {
        self.is_enabled(LogLevel::Warning)
    }

    pub fn is_info_enabled(&self) -> bool {
        self.is_enabled(LogLevel::Info)
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.is_enabled(LogLevel::Debug)
    }

    /// 输出日志
    ///
    /// 消息在通过级别检查后才会被格式化，传入 `format_args!` 可以避免被过滤的日志产生格式化开销。
    /// 事件级别为 `LogLevel::None` 时视为未知级别，加上前缀后以 Warning 级别输出
    pub fn log(&self, level: LogLevel, labels: &[Label], message: impl fmt::Display) {
        if self.is_silent() {
            return;
        }

        if level == LogLevel::None {
            let message = format!("{}{}", UNKNOWN_LEVEL_PREFIX, message);
            self.dispatch(LogLevel::Warning, &message, labels);
            return;
        }

        if self.is_filtered_out(level) {
            return;
        }

        let message = message.to_string();
        self.dispatch(level, &message, labels);
    }

    /// 组装最终标签并交给每个 sink：logger 名称、全局标签、自定义标签
    fn dispatch(&self, level: LogLevel, message: &str, labels: &[Label]) {
        let globals = self.globals.snapshot();

        let mut joined = Vec::with_capacity(1 + globals.len() + labels.len());
        joined.push(Label::string(LOGGER_LABEL, self.name.clone()));
        joined.extend(globals.iter().cloned());
        joined.extend_from_slice(labels);

        for sink in self.sinks.values() {
            sink.emit(level, message, &joined);
        }
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(LogLevel::Debug, &[], message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::Info, &[], message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log(LogLevel::Warning, &[], message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(LogLevel::Error, &[], message);
    }

    /// 为下一条日志附加一个标签
    pub fn with_label(&self, label: Label) -> LogEvent<'_> {
        LogEvent::new(self).with_label(label)
    }

    /// 为下一条日志附加一组标签
    pub fn with_labels(&self, labels: impl Into<Vec<Label>>) -> LogEvent<'_> {
        LogEvent::new(self).with_labels(labels)
    }

    /// 刷新所有 sink
    pub fn flush(&self) {
        for sink in self.sinks.values() {
            sink.flush();
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("sinks", &self.sink_names())
            .finish()
    }
}

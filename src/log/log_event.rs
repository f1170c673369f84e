use crate::log::label::Label;
use crate::log::level::LogLevel;
use crate::log::logger::Logger;
use std::fmt;
use std::sync::Arc;

/// 单条日志的构建器
///
/// 每次 `with_label` / `with_labels` 都返回一个新的值，原值不变，
/// 因此从同一个 LogEvent 派生出的多条链互不影响。标签只对这一次输出生效
///
/// ```
/// use logx::log::{Label, LoggerRegistry};
///
/// let registry = LoggerRegistry::new();
/// let logger = registry.lookup("controller");
/// let base = logger.with_label(Label::string("request_id", "r-1"));
/// base.with_label(Label::int("attempt", 1)).info("retrying");
/// base.with_label(Label::int("attempt", 2)).info("retrying");
/// ```
#[derive(Debug, Clone)]
pub struct LogEvent<'a> {
    logger: &'a Logger,
    label_groups: Vec<Arc<[Label]>>,
    labels: Vec<Label>,
}

impl<'a> LogEvent<'a> {
    pub fn new(logger: &'a Logger) -> Self {
        Self {
            logger,
            label_groups: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn logger(&self) -> &'a Logger {
        self.logger
    }

    /// 追加一组标签，返回新的 LogEvent
    pub fn with_labels(&self, labels: impl Into<Vec<Label>>) -> Self {
        let labels: Vec<Label> = labels.into();
        let mut event = self.clone();
        event.label_groups.push(Arc::from(labels));
        event
    }

    /// 追加一个标签，返回新的 LogEvent
    pub fn with_label(&self, label: Label) -> Self {
        let mut event = self.clone();
        event.labels.push(label);
        event
    }

    /// 展开所有标签：先按顺序展开各组，再追加单个标签
    pub fn labels(&self) -> Vec<Label> {
        let group_len: usize = self.label_groups.iter().map(|g| g.len()).sum();
        let mut labels = Vec::with_capacity(group_len + self.labels.len());
        for group in &self.label_groups {
            labels.extend_from_slice(group);
        }
        labels.extend_from_slice(&self.labels);
        labels
    }

    /// 在指定级别输出
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        if self.logger.is_silent() {
            return;
        }
        if level != LogLevel::None && self.logger.is_filtered_out(level) {
            return;
        }
        self.logger.log(level, &self.labels(), message);
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(LogLevel::Error, message);
    }
}

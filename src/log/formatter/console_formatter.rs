use crate::log::formatter::LogFormatter;
use crate::log::level::LogLevel;
use crate::log::log_record::LogRecord;
use anyhow::Result;
use colored::Colorize;
use serde::ser::{SerializeMap, Serializer};
use serde::Deserialize;
use smart_default::SmartDefault;

/// ConsoleFormatter 配置
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(default)]
pub struct ConsoleFormatterConfig {
    /// 是否给级别着色
    #[default = false]
    pub colored: bool,
}

/// 控制台格式化器
///
/// 以制表符分隔：时间、级别、消息，最后把标签写成一个 JSON 对象
///
/// ```text
/// 2024-03-01T12:30:45.123456789+08:00	info	user logged in	{"logger":"svc","user_id":1}
/// ```
pub struct ConsoleFormatter {
    config: ConsoleFormatterConfig,
}

impl ConsoleFormatter {
    pub fn new(config: ConsoleFormatterConfig) -> Self {
        Self { config }
    }

    fn write_level(&self, buf: &mut String, level: LogLevel) {
        if !self.config.colored {
            buf.push_str(level.as_str());
            return;
        }

        let colored = match level {
            LogLevel::Error => level.as_str().red(),
            LogLevel::Warning => level.as_str().yellow(),
            LogLevel::Info => level.as_str().green(),
            LogLevel::Debug => level.as_str().cyan(),
            LogLevel::None => level.as_str().normal(),
        };
        buf.push_str(&colored.to_string());
    }
}

impl LogFormatter for ConsoleFormatter {
    fn format(&self, record: &LogRecord<'_>) -> Result<String> {
        let mut result = String::with_capacity(64 + record.message.len() + record.labels.len() * 24);

        result.push_str(&record.time_rfc3339());
        result.push('\t');
        self.write_level(&mut result, record.level);
        result.push('\t');
        result.push_str(record.message);

        if !record.labels.is_empty() {
            let mut buf = Vec::with_capacity(record.labels.len() * 24);
            let mut serializer = serde_json::Serializer::new(&mut buf);
            let mut map = (&mut serializer).serialize_map(Some(record.labels.len()))?;
            for label in record.labels {
                map.serialize_entry(label.key(), label.value())?;
            }
            map.end()?;

            result.push('\t');
            result.push_str(std::str::from_utf8(&buf)?);
        }

        Ok(result)
    }
}

crate::impl_from!(ConsoleFormatterConfig => ConsoleFormatter);
crate::impl_box_from!(ConsoleFormatter => dyn LogFormatter);

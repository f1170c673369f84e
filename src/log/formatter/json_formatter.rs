use crate::log::formatter::LogFormatter;
use crate::log::log_record::LogRecord;
use anyhow::Result;
use serde::ser::{SerializeMap, Serializer};
use serde::Deserialize;
use smart_default::SmartDefault;

/// JsonFormatter 配置（保留扩展性）
#[derive(Debug, Clone, Deserialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct JsonFormatterConfig {}

/// JSON 格式化器
///
/// 每条记录输出一个 JSON 对象：`level`、`time`、`message`，
/// 然后按顺序把每个标签作为顶层字段写出。重复的 key 原样保留
pub struct JsonFormatter {}

impl JsonFormatter {
    pub fn new(_: JsonFormatterConfig) -> Self {
        Self {}
    }
}

impl LogFormatter for JsonFormatter {
    fn format(&self, record: &LogRecord<'_>) -> Result<String> {
        let mut buf = Vec::with_capacity(128 + record.message.len() + record.labels.len() * 24);
        let mut serializer = serde_json::Serializer::new(&mut buf);

        let mut map = (&mut serializer).serialize_map(Some(3 + record.labels.len()))?;
        map.serialize_entry("level", record.level.as_str())?;
        map.serialize_entry("time", &record.time_rfc3339())?;
        map.serialize_entry("message", record.message)?;
        for label in record.labels {
            map.serialize_entry(label.key(), label.value())?;
        }
        map.end()?;

        Ok(String::from_utf8(buf)?)
    }
}

crate::impl_from!(JsonFormatterConfig => JsonFormatter);
crate::impl_box_from!(JsonFormatter => dyn LogFormatter);

use crate::cfg::{load_file, parse_str, FileFormat};
use crate::log::error::ConfigError;
use garde::Validate;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::collections::BTreeMap;
use std::path::Path;

/// 日志配置模型
///
/// ```yaml
/// loggers:
///   root:
///     level: info
///     handlers: [stdout_json]
///   controller:
///     level: debug
///     handlers: [stdout_json, file]
/// handlers:
///   stdout_json:
///     level: info
///     encoding: json
///     outputPaths: [stdout]
///   file:
///     level: debug
///     encoding: console
///     rollingFile:
///       file: /var/log/app.log
///       maxSizeMb: 50
///       maxBackups: 3
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigModel {
    /// logger 名称 -> logger 配置
    pub loggers: BTreeMap<String, LoggerSpec>,
    /// handler 名称 -> handler 配置
    pub handlers: BTreeMap<String, HandlerSpec>,
}

/// logger 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SmartDefault)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerSpec {
    /// 仅作说明用途，logger 的名称以所在 map 的 key 为准
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[default = "info"]
    pub level: String,

    /// 引用的 handler 名称，按配置顺序
    pub handlers: Vec<String>,
}

/// handler 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SmartDefault)]
#[serde(default, rename_all = "camelCase")]
pub struct HandlerSpec {
    #[default = "info"]
    pub level: String,

    /// json 或 console
    #[default = "json"]
    pub encoding: String,

    /// 输出目标，`stdout` / `stderr` 或文件路径；与 rollingFile 互斥
    pub output_paths: Vec<String>,

    /// 滚动文件输出；与 outputPaths 互斥
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolling_file: Option<RollingFileSpec>,

    /// console 编码时是否给级别着色
    pub colored: bool,
}

/// 滚动文件配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SmartDefault, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct RollingFileSpec {
    /// 当前日志文件路径
    #[garde(length(min = 1))]
    pub file: String,

    /// 单个文件最大大小（MB），0 表示使用默认值 100，最大 1048576（1 TB）
    #[default = 100]
    #[garde(range(max = 1048576))]
    pub max_size_mb: u64,

    /// 备份文件最长保留天数，0 表示不按时间清理，最大 36500
    #[garde(range(max = 36500))]
    pub max_age_days: u64,

    /// 最多保留的备份文件数，0 表示不按数量清理
    #[garde(skip)]
    pub max_backups: usize,

    /// 是否 gzip 压缩备份文件
    #[garde(skip)]
    pub compress: bool,
}

/// 内置默认 handler 名称
pub const FALLBACK_HANDLER: &str = "stdout_json";

/// 根 logger 名称
pub const ROOT_LOGGER: &str = "root";

impl ConfigModel {
    /// 从文件加载配置，按扩展名选择解析器
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(load_file(path)?)
    }

    /// 从字符串解析配置
    pub fn from_str(content: &str, format: FileFormat) -> Result<Self, ConfigError> {
        Ok(parse_str(content, format)?)
    }

    /// 内置默认配置：root logger 以 info 级别输出 JSON 到标准输出
    pub fn fallback() -> Self {
        let mut config = ConfigModel::default();
        config.handlers.insert(
            FALLBACK_HANDLER.to_string(),
            HandlerSpec {
                level: "info".to_string(),
                encoding: "json".to_string(),
                output_paths: vec!["stdout".to_string()],
                ..Default::default()
            },
        );
        config.loggers.insert(
            ROOT_LOGGER.to_string(),
            LoggerSpec {
                name: Some(ROOT_LOGGER.to_string()),
                level: "info".to_string(),
                handlers: vec![FALLBACK_HANDLER.to_string()],
            },
        );
        config
    }
}

impl RollingFileSpec {
    /// 实际生效的单文件大小上限（字节）
    pub fn max_size_bytes(&self) -> u64 {
        let mb = if self.max_size_mb == 0 { 100 } else { self.max_size_mb };
        mb.saturating_mul(1024 * 1024)
    }
}

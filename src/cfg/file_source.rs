//! 文件配置源
//!
//! 从本地文件加载配置，根据扩展名选择解析器：
//! `.json` / `.json5` / `.yaml` / `.yml` / `.toml`

use serde::de::DeserializeOwned;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 配置加载错误
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("读取配置文件失败 [{path}]: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("不支持的配置文件扩展名 '{0}'，仅支持 .json / .json5 / .yaml / .yml / .toml")]
    UnsupportedExtension(String),

    #[error("解析 {format} 配置失败: {message}")]
    Parse { format: FileFormat, message: String },
}

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Json5,
    Yaml,
    Toml,
}

impl FileFormat {
    /// 根据文件扩展名判断格式（大小写不敏感）
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(FileFormat::Json),
            "json5" => Ok(FileFormat::Json5),
            "yaml" | "yml" => Ok(FileFormat::Yaml),
            "toml" => Ok(FileFormat::Toml),
            _ => Err(SourceError::UnsupportedExtension(ext)),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Json => write!(f, "JSON"),
            FileFormat::Json5 => write!(f, "JSON5"),
            FileFormat::Yaml => write!(f, "YAML"),
            FileFormat::Toml => write!(f, "TOML"),
        }
    }
}

/// 按指定格式解析配置内容
pub fn parse_str<T: DeserializeOwned>(content: &str, format: FileFormat) -> Result<T, SourceError> {
    let parsed = match format {
        FileFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        FileFormat::Json5 => json5::from_str(content).map_err(|e| e.to_string()),
        FileFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        FileFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|message| SourceError::Parse { format, message })
}

/// 读取并解析配置文件
///
/// 扩展名在读取文件之前检查，不支持的扩展名不会触发任何 I/O
pub fn load_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, SourceError> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;

    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_str(&content, format)
}

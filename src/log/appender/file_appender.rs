use crate::log::appender::LogAppender;
use anyhow::Result;
use serde::Deserialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// FileAppender 配置
#[derive(Debug, Clone, Deserialize)]
pub struct FileAppenderConfig {
    /// 日志文件路径
    pub file_path: String,
}

/// 文件输出器
///
/// 以追加模式写入文件，不做切分
pub struct FileAppender {
    file: Mutex<File>,
    config: FileAppenderConfig,
}

impl FileAppender {
    /// 从配置创建 FileAppender，自动创建父目录
    pub fn new(config: FileAppenderConfig) -> std::io::Result<Self> {
        let file = open_append(Path::new(&config.file_path))?;

        Ok(Self {
            file: Mutex::new(file),
            config,
        })
    }

    /// 获取日志文件路径
    pub fn path(&self) -> &str {
        &self.config.file_path
    }
}

/// 以追加模式打开文件，父目录不存在时先创建
pub(crate) fn open_append(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

impl LogAppender for FileAppender {
    fn append(&self, formatted_message: &str) -> Result<()> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write_all(formatted_message.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.flush()?;
        Ok(())
    }
}

impl TryFrom<FileAppenderConfig> for FileAppender {
    type Error = std::io::Error;

    fn try_from(config: FileAppenderConfig) -> Result<Self, Self::Error> {
        FileAppender::new(config)
    }
}

crate::impl_box_from!(FileAppender => dyn LogAppender);

impl From<&PathBuf> for FileAppenderConfig {
    fn from(path: &PathBuf) -> Self {
        Self {
            file_path: path.to_string_lossy().to_string(),
        }
    }
}

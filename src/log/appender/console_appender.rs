use crate::log::appender::LogAppender;
use anyhow::Result;
use serde::Deserialize;
use smart_default::SmartDefault;
use std::io::{self, Write};

/// 终端输出目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, SmartDefault)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Stdout,
    Stderr,
}

impl Target {
    /// 解析输出路径，`stdout` / `stderr` 以外的路径返回 None
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "stdout" => Some(Target::Stdout),
            "stderr" => Some(Target::Stderr),
            _ => None,
        }
    }
}

/// ConsoleAppender 配置
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(default)]
pub struct ConsoleAppenderConfig {
    pub target: Target,
}

/// 终端输出器
///
/// 将日志输出到标准输出或标准错误，每行写完立即刷新
pub struct ConsoleAppender {
    config: ConsoleAppenderConfig,
}

impl ConsoleAppender {
    pub fn new(config: ConsoleAppenderConfig) -> Self {
        Self { config }
    }

    pub fn target(&self) -> Target {
        self.config.target
    }
}

impl LogAppender for ConsoleAppender {
    fn append(&self, formatted_message: &str) -> Result<()> {
        match self.config.target {
            Target::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", formatted_message)?;
                stdout.flush()?;
            }
            Target::Stderr => {
                let mut stderr = io::stderr().lock();
                writeln!(stderr, "{}", formatted_message)?;
                stderr.flush()?;
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        match self.config.target {
            Target::Stdout => io::stdout().flush()?,
            Target::Stderr => io::stderr().flush()?,
        }
        Ok(())
    }
}

crate::impl_from!(ConsoleAppenderConfig => ConsoleAppender);
crate::impl_box_from!(ConsoleAppender => dyn LogAppender);

use crate::cfg::SourceError;
use thiserror::Error;

/// 日志配置错误
///
/// 全部在初始化阶段提前检测；返回错误时之前安装的 registry 保持不变
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("加载日志配置失败: {0}")]
    Source(#[from] SourceError),

    #[error("配置 /handlers/{handler} 中的日志级别 '{level}' 无效")]
    InvalidHandlerLevel { handler: String, level: String },

    #[error("配置 /handlers/{handler} 中的编码 '{encoding}' 无效，仅支持 json / console")]
    InvalidEncoding { handler: String, encoding: String },

    #[error("配置 /handlers/{handler} 同时使用了 'rollingFile' 和 'outputPaths'，二者只能选其一")]
    ConflictingDestinations { handler: String },

    #[error("配置 /handlers/{handler} 中的 rollingFile 无效: {message}")]
    InvalidRollingFile { handler: String, message: String },

    #[error("创建 /handlers/{handler} 的输出失败 [{path}]: {source}")]
    SinkBuild {
        handler: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置 /loggers/{logger} 引用了不存在的 handler '{handler}'")]
    UnknownHandler { logger: String, handler: String },

    #[error("配置 /loggers/{logger} 中的日志级别 '{level}' 无效")]
    InvalidLoggerLevel { logger: String, level: String },

    #[error("日志配置必须定义 \"root\" logger")]
    MissingRoot,
}

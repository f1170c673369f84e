//! cfg 模块 - 配置加载
//!
//! 负责把磁盘上的配置文件按扩展名解码为任意实现了 `Deserialize` 的类型，
//! 以及提供简化 From 实现的宏

pub mod file_source;
mod macros;

// 重新导出公共 API
pub use file_source::{load_file, parse_str, FileFormat, SourceError};

use anyhow::Result;

/// 日志输出器 trait
///
/// 负责将格式化后的日志输出到目标介质。调用是同步的，
/// 并发调用之间由实现自行加锁
pub trait LogAppender: Send + Sync {
    /// 输出一行日志（不含换行符）
    fn append(&self, formatted_message: &str) -> Result<()>;

    /// 刷新缓冲区（默认实现为空操作）
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

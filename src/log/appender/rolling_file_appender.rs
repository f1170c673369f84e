use crate::log::appender::file_appender::open_append;
use crate::log::appender::LogAppender;
use anyhow::Result;
use chrono::{Duration, Local, NaiveDateTime};
use smart_default::SmartDefault;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// 备份文件名中的时间格式
const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";

/// RollingFileAppender 配置
#[derive(Debug, Clone, serde::Deserialize, SmartDefault)]
#[serde(default)]
pub struct RollingFileAppenderConfig {
    /// 当前日志文件路径
    #[default("app.log".to_string())]
    pub file_path: String,

    /// 单个文件最大大小（字节）
    #[default(100 * 1024 * 1024)]
    pub max_size: u64,

    /// 保留的最大备份数量，0 表示不按数量清理
    #[default(0)]
    pub max_backups: usize,

    /// 备份最长保留天数，0 表示不按时间清理
    #[default(0)]
    pub max_age_days: u64,

    /// 是否 gzip 压缩备份文件
    #[default(false)]
    pub compress: bool,
}

/// 当前文件信息
struct CurrentFile {
    file: File,
    size: u64,
}

/// 滚动文件输出器
///
/// 当前文件写满 `max_size` 后重命名为 `<stem>-<本地时间>.<ext>`，
/// 然后重新打开原路径继续写入；备份按数量和天数清理，可选 gzip 压缩
pub struct RollingFileAppender {
    config: RollingFileAppenderConfig,
    current_file: Mutex<CurrentFile>,
    path: PathBuf,
    base_path: PathBuf,
    file_prefix: String,
    file_ext: String,
}

/// 一个已存在的备份文件
#[derive(Debug)]
struct Backup {
    path: PathBuf,
    time: NaiveDateTime,
    compressed: bool,
}

impl RollingFileAppender {
    /// 打开（或创建）日志文件
    pub fn new(config: RollingFileAppenderConfig) -> std::io::Result<Self> {
        let path = PathBuf::from(&config.file_path);
        let base_path = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_prefix = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let file_ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        let file = open_append(&path)?;
        let size = file.metadata().map(|m| m.len()).unwrap_or(0);

        Ok(Self {
            config,
            current_file: Mutex::new(CurrentFile { file, size }),
            path,
            base_path,
            file_prefix,
            file_ext,
        })
    }

    /// 生成备份文件路径，同一毫秒内多次切分时顺延时间避免覆盖
    fn backup_path(&self) -> PathBuf {
        let mut time = Local::now().naive_local();
        loop {
            let name = format!(
                "{}-{}{}",
                self.file_prefix,
                time.format(BACKUP_TIME_FORMAT),
                self.file_ext
            );
            let path = self.base_path.join(name);
            let gz = PathBuf::from(format!("{}.gz", path.display()));
            if !path.exists() && !gz.exists() {
                return path;
            }
            time += Duration::milliseconds(1);
        }
    }

    /// 执行切分：重命名当前文件并打开新文件，然后处理备份
    fn do_rollover(&self, current: &mut CurrentFile) -> Result<()> {
        current.file.flush()?;

        let backup = self.backup_path();
        std::fs::rename(&self.path, &backup)?;

        current.file = open_append(&self.path)?;
        current.size = 0;

        // 切分已经完成，清理失败不影响本条日志写入
        if let Err(e) = self.mill() {
            eprintln!("logx: 清理备份文件失败 {}: {}", self.path.display(), e);
        }
        Ok(())
    }

    /// 从文件名中解析备份时间
    fn parse_backup(&self, path: &Path) -> Option<Backup> {
        let filename = path.file_name()?.to_str()?;
        let (stem, compressed) = match filename.strip_suffix(".gz") {
            Some(stem) => (stem, true),
            None => (filename, false),
        };

        let timestamp = stem
            .strip_prefix(&self.file_prefix)?
            .strip_prefix('-')?
            .strip_suffix(self.file_ext.as_str())?;
        let time = NaiveDateTime::parse_from_str(timestamp, BACKUP_TIME_FORMAT).ok()?;

        Some(Backup {
            path: path.to_path_buf(),
            time,
            compressed,
        })
    }

    /// 查找所有备份文件，按时间从新到旧排序
    fn find_backups(&self) -> Result<Vec<Backup>> {
        let mut backups = Vec::new();
        for entry in std::fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            if let Some(backup) = self.parse_backup(&path) {
                backups.push(backup);
            }
        }

        backups.sort_by(|a, b| b.time.cmp(&a.time));
        Ok(backups)
    }

    /// 按天数计算的过期时间点，超出时间范围时返回 None（不按时间清理）
    fn age_cutoff(&self) -> Option<NaiveDateTime> {
        let days = i64::try_from(self.config.max_age_days).ok()?;
        Local::now()
            .naive_local()
            .checked_sub_signed(Duration::try_days(days)?)
    }

    /// 清理和压缩备份
    ///
    /// 单个备份处理失败不影响其它备份，返回遇到的第一个错误
    fn mill(&self) -> Result<()> {
        let mut backups = self.find_backups()?;
        let mut removed = Vec::new();

        if self.config.max_backups > 0 && backups.len() > self.config.max_backups {
            removed.extend(backups.split_off(self.config.max_backups));
        }

        if self.config.max_age_days > 0 {
            if let Some(cutoff) = self.age_cutoff() {
                let (keep, expired): (Vec<_>, Vec<_>) =
                    backups.into_iter().partition(|b| b.time >= cutoff);
                backups = keep;
                removed.extend(expired);
            }
        }

        let mut first_error = None;
        for backup in removed {
            if let Err(e) = std::fs::remove_file(&backup.path) {
                first_error.get_or_insert(anyhow::Error::from(e));
            }
        }

        if self.config.compress {
            for backup in backups.iter().filter(|b| !b.compressed) {
                if let Err(e) = compress_file(&backup.path) {
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// 压缩文件为 `<path>.gz` 并删除原文件
fn compress_file(path: &Path) -> Result<()> {
    let compressed_path = PathBuf::from(format!("{}.gz", path.display()));

    let content = std::fs::read(path)?;
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&content)?;
    let compressed = encoder.finish()?;

    std::fs::write(&compressed_path, compressed)?;
    std::fs::remove_file(path)?;

    Ok(())
}

impl LogAppender for RollingFileAppender {
    fn append(&self, formatted_message: &str) -> Result<()> {
        let message_size = formatted_message.len() as u64 + 1;

        let mut current = self.current_file.lock().unwrap_or_else(PoisonError::into_inner);
        if current.size > 0 && current.size + message_size > self.config.max_size {
            self.do_rollover(&mut current)?;
        }

        current.file.write_all(formatted_message.as_bytes())?;
        current.file.write_all(b"\n")?;
        current.size += message_size;

        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let mut current = self.current_file.lock().unwrap_or_else(PoisonError::into_inner);
        current.file.flush()?;
        Ok(())
    }
}

impl TryFrom<RollingFileAppenderConfig> for RollingFileAppender {
    type Error = std::io::Error;

    fn try_from(config: RollingFileAppenderConfig) -> Result<Self, Self::Error> {
        RollingFileAppender::new(config)
    }
}

crate::impl_box_from!(RollingFileAppender => dyn LogAppender);

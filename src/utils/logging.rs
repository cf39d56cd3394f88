//! # 实验日志文件
//!
//! 通过 `log` 门面记录每次计算的参数与结果，`simplelog::WriteLogger`
//! 以追加方式写入 `--log-file` 指定的文件。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `log`, `simplelog` crate

use crate::error::{Result, XafsGridError};

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::OpenOptions;
use std::path::Path;

/// 初始化实验日志，追加写入 `path`
pub fn init_log_file(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| XafsGridError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })?;

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    WriteLogger::init(LevelFilter::Info, config, file)
        .map_err(|e| XafsGridError::Other(format!("Failed to initialize log file: {}", e)))
}

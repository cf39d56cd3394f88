//! # 数据文件命名
//!
//! 数据文件命名为 `<filename>.<NNN>`，编号为三位数。
//!
//! ## 依赖关系
//! - 被 `parsers/scan.rs`, `sequence/plan.rs`, `commands/check.rs` 使用
//! - 使用 `regex` 匹配文件名

use crate::error::{Result, XafsGridError};

use regex::Regex;
use std::fs;
use std::path::Path;

/// 文件名最大长度（多数 U 盘文件系统限制为 255）
pub const MAX_FILENAME_LEN: usize = 250;

/// 不能拷贝到 U 盘的字符
const BAD_CHARACTERS: &str = r#"[*:"<>|/+\\]"#;

/// 文件夹中 `stub.NNN` 的下一个编号，没有时为 1
pub fn next_index(folder: &Path, stub: &str) -> Result<u32> {
    if !folder.is_dir() {
        return Err(XafsGridError::DirectoryNotFound {
            path: folder.display().to_string(),
        });
    }

    let pattern = Regex::new(&format!(r"^{}\.(\d{{3}})$", regex::escape(stub)))
        .map_err(|e| XafsGridError::Other(e.to_string()))?;

    let entries = fs::read_dir(folder).map_err(|e| XafsGridError::FileReadError {
        path: folder.display().to_string(),
        source: e,
    })?;

    let highest = entries
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .filter_map(|name| {
            pattern
                .captures(&name)
                .and_then(|c| c[1].parse::<u32>().ok())
        })
        .max();

    Ok(highest.map_or(1, |n| n + 1))
}

/// 检查文件名是否可以安全拷贝
pub fn validate_filename(filename: &str) -> Result<()> {
    if filename.is_empty() {
        return Err(XafsGridError::InvalidFilename(
            "filename is empty".to_string(),
        ));
    }

    let bad = Regex::new(BAD_CHARACTERS).map_err(|e| XafsGridError::Other(e.to_string()))?;
    if let Some(m) = bad.find(filename) {
        return Err(XafsGridError::InvalidFilename(format!(
            "'{}' contains '{}'; avoid any of * : \" < > | / + \\",
            filename,
            m.as_str()
        )));
    }

    if filename.chars().count() > MAX_FILENAME_LEN {
        return Err(XafsGridError::InvalidFilename(format!(
            "filename is longer than {} characters",
            MAX_FILENAME_LEN
        )));
    }

    Ok(())
}

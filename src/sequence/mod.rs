//! # 扫描序列记录模块
//!
//! 扫描序列开始前的准备与检查：数据文件编号、文件名检查、
//! INI 完整性检查以及逐次扫描的计划与耗时估计。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `parsers/scan.rs` 使用
//! - 使用 `models/` 的 ScanParameters, ScanGrid, FoundKeys
//! - 子模块: files, plan

pub mod files;
pub mod plan;

pub use files::next_index;

use crate::error::{Result, XafsGridError};
use crate::models::FoundKeys;

/// INI 文件中必须给出的键
pub const REQUIRED_KEYS: [&str; 10] = [
    "bounds", "steps", "times", "e0", "element", "edge", "folder", "filename", "nscans", "start",
];

/// 列出缺失的必需键
pub fn missing_keys(found: &FoundKeys) -> Vec<String> {
    REQUIRED_KEYS
        .iter()
        .filter(|key| !found.contains(key))
        .map(|key| key.to_string())
        .collect()
}

/// INI 完整性检查
pub fn ini_sanity(found: &FoundKeys) -> Result<()> {
    let missing = missing_keys(found);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(XafsGridError::MissingKeys(missing))
    }
}

//! # 统一错误处理模块
//!
//! 定义 xafsgrid 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// xafsgrid 统一错误类型
#[derive(Error, Debug)]
pub enum XafsGridError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Invalid grid value: {0}")]
    InvalidGridValue(String),

    // ─────────────────────────────────────────────────────────────
    // 扫描网格错误
    // ─────────────────────────────────────────────────────────────
    #[error(
        "Malformed scan grid: {bounds} boundaries, {steps} steps, {times} times (need one more boundary than steps and times)"
    )]
    MalformedGridSpec {
        bounds: usize,
        steps: usize,
        times: usize,
    },

    #[error("Invalid scan region {region}: {reason}")]
    InvalidRegion { region: usize, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 扫描序列错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Missing keywords in INI file: {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    #[error("Output file already exists: {path}")]
    OutputExists { path: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, XafsGridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message() {
        let err = XafsGridError::MalformedGridSpec {
            bounds: 2,
            steps: 2,
            times: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("2 boundaries, 2 steps, 1 times"));
    }

    #[test]
    fn test_missing_keys_message() {
        let err = XafsGridError::MissingKeys(vec!["e0".to_string(), "edge".to_string()]);
        assert_eq!(err.to_string(), "Missing keywords in INI file: e0, edge");
    }
}

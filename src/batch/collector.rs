//! # 文件收集器
//!
//! 根据输入路径和模式收集待处理的 INI 文件列表。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - glob 模式匹配（逗号分隔多模式）
//! - 递归目录搜索
//!
//! ## 依赖关系
//! - 被 `commands/howlong.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{Result, XafsGridError};

use glob::Pattern;
use std::path::PathBuf;
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入路径
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<String>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: vec!["*.ini".to_string()],
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.patterns = pattern
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if self.patterns.is_empty() {
            self.patterns = vec!["*".to_string()];
        }
        self
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件（按路径排序）
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if self.input.is_file() {
            return Ok(vec![self.input.clone()]);
        }

        if !self.input.is_dir() {
            return Err(XafsGridError::DirectoryNotFound {
                path: self.input.display().to_string(),
            });
        }

        let patterns = self
            .patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    XafsGridError::InvalidArgument(format!("Invalid pattern '{}': {}", p, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .is_some_and(|name| patterns.iter().any(|p| p.matches(name)))
            })
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        Ok(files)
    }
}

//! # INI 格式解析器
//!
//! 解析扫描参数使用的 INI 文件（与 Python configparser 的默认行为一致）。
//!
//! ## INI 格式说明
//! ```text
//! # 注释行（# 或 ; 开头）
//! [scan]
//! e0       = 7112
//! element: Fe
//! bounds   = -200 -30 15.3
//!            14k
//! ```
//! - 键名不区分大小写，段名区分大小写
//! - 缩进行为上一个键的续行
//! - 重复的键以最后一次为准
//!
//! ## 依赖关系
//! - 被 `parsers/scan.rs` 使用
//! - 无外部模块依赖

use crate::error::{Result, XafsGridError};

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// 解析后的 INI 文档
#[derive(Debug, Clone, Default)]
pub struct IniDocument {
    sections: HashMap<String, HashMap<String, String>>,
}

impl IniDocument {
    /// 读取 `[section]` 中的 `key`
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|s| s.get(&key.to_lowercase()))
            .map(String::as_str)
    }

    /// 是否存在某个段
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// 以布尔值读取（1/yes/true/on 与 0/no/false/off）
    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>> {
        match self.get(section, key) {
            None => Ok(None),
            Some(value) => parse_bool(value).map(Some).ok_or_else(|| XafsGridError::ParseError {
                format: "ini".to_string(),
                path: format!("[{}] {}", section, key),
                reason: format!("'{}' is not a boolean", value),
            }),
        }
    }
}

/// 读取 INI 文件
pub fn read_ini_file(path: &Path) -> Result<IniDocument> {
    let content = fs::read_to_string(path).map_err(|e| XafsGridError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_ini_content(&content, &path.display().to_string())
}

/// 从字符串内容解析 INI 格式
pub fn parse_ini_content(content: &str, source_name: &str) -> Result<IniDocument> {
    let mut doc = IniDocument::default();
    let mut current: Option<String> = None;
    let mut last_key: Option<String> = None;

    let parse_error = |line_no: usize, reason: &str| XafsGridError::ParseError {
        format: "ini".to_string(),
        path: source_name.to_string(),
        reason: format!("line {}: {}", line_no, reason),
    };

    for (i, raw) in content.lines().enumerate() {
        let line_no = i + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            last_key = None;
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        // 续行
        if raw.starts_with(char::is_whitespace) {
            if let (Some(section), Some(key)) = (&current, &last_key) {
                if let Some(value) = doc
                    .sections
                    .get_mut(section)
                    .and_then(|s| s.get_mut(key))
                {
                    if !value.is_empty() {
                        value.push('\n');
                    }
                    value.push_str(trimmed);
                    continue;
                }
            }
        }

        if let Some(name) = trimmed.strip_prefix('[') {
            let name = name
                .strip_suffix(']')
                .ok_or_else(|| parse_error(line_no, "unterminated section header"))?
                .trim()
                .to_string();
            doc.sections.entry(name.clone()).or_default();
            current = Some(name);
            last_key = None;
            continue;
        }

        let section = current
            .as_ref()
            .ok_or_else(|| parse_error(line_no, "key found before any [section] header"))?;

        let split_at = trimmed
            .find(['=', ':'])
            .ok_or_else(|| parse_error(line_no, "expected 'key = value'"))?;
        let key = trimmed[..split_at].trim().to_lowercase();
        let value = trimmed[split_at + 1..].trim().to_string();

        if key.is_empty() {
            return Err(parse_error(line_no, "empty key"));
        }

        doc.sections
            .entry(section.clone())
            .or_default()
            .insert(key.clone(), value);
        last_key = Some(key);
    }

    Ok(doc)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

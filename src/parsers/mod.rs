//! # 解析器模块
//!
//! 提供 INI 文件解析和扫描参数读取。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: ini, scan

pub mod ini;
pub mod scan;

//! # check 子命令 CLI 定义
//!
//! 扫描序列开始前检查 INI 文件。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/check.rs`

use super::grid::ScanFileArgs;
use clap::Args;

/// check 子命令参数
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub scan: ScanFileArgs,
}

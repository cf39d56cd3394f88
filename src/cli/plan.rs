//! # plan 子命令 CLI 定义
//!
//! 预览扫描序列：数据文件、扫描方向、准 channel-cut 能量与耗时。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/plan.rs`

use super::grid::ScanFileArgs;
use crate::grid::MonoCrystal;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 单色器晶面
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum CrystalArg {
    /// Si(111)
    #[value(name = "111")]
    Si111,
    /// Si(311)
    #[value(name = "311")]
    Si311,
}

impl From<CrystalArg> for MonoCrystal {
    fn from(arg: CrystalArg) -> Self {
        match arg {
            CrystalArg::Si111 => MonoCrystal::Si111,
            CrystalArg::Si311 => MonoCrystal::Si311,
        }
    }
}

/// plan 子命令参数
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub scan: ScanFileArgs,

    /// Monochromator crystal set
    #[arg(long, value_enum, default_value = "111")]
    pub crystal: CrystalArg,

    /// Write one trajectory CSV per planned scan into this directory
    #[arg(long)]
    pub trajectory_dir: Option<PathBuf>,

    /// Overwrite existing trajectory files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}

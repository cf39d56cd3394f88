//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `grid`: 计算并导出扫描网格
//! - `howlong`: 估计扫描序列耗时（支持目录批量）
//! - `check`: 扫描参数文件完整性检查
//! - `plan`: 扫描序列预览与轨迹导出
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: grid, howlong, check, plan

pub mod check;
pub mod grid;
pub mod howlong;
pub mod plan;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// xafsgrid - XAFS 步进扫描网格工具
#[derive(Parser)]
#[command(name = "xafsgrid")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "XAFS step-scan grid builder and scan sequence planner", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Append a record of every computation to this log file
    #[arg(long, global = true, env = "XAFSGRID_LOG")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Compute the energy and dwell-time grid described by an INI file
    Grid(grid::GridArgs),

    /// Estimate how long a scan sequence will take
    Howlong(howlong::HowlongArgs),

    /// Check an INI file before starting a scan sequence
    Check(check::CheckArgs),

    /// Preview the data files and trajectories of a scan sequence
    Plan(plan::PlanArgs),
}

//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `grid/`, `sequence/`, `utils/`
//! - 子模块: grid, howlong, check, plan

pub mod check;
pub mod grid;
pub mod howlong;
pub mod plan;

use crate::cli::Commands;
use crate::error::Result;
use crate::models::{FoundKeys, ScanGrid, ScanParameters};
use crate::utils::output;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Grid(args) => grid::execute(args),
        Commands::Howlong(args) => howlong::execute(args),
        Commands::Check(args) => check::execute(args),
        Commands::Plan(args) => plan::execute(args),
    }
}

/// 由扫描参数构建网格
pub(crate) fn build_grid(params: &ScanParameters) -> Result<ScanGrid> {
    crate::grid::build_scan_grid(&params.bounds, &params.steps, &params.times, params.e0)
}

/// 提示未被 INI 文件给出、使用默认值的网格参数
pub(crate) fn warn_grid_defaults(found: &FoundKeys) {
    for key in ["bounds", "steps", "times", "e0"] {
        if !found.contains(key) {
            output::print_warning(&format!("'{}' not given, using the default value", key));
        }
    }
}

//! # xafsgrid - XAFS 步进扫描网格工具
//!
//! 从光束线 INI 文件计算 XAFS 扫描的能量网格和积分时间，
//! 估算扫描序列耗时并检查序列参数。
//!
//! ## 子命令
//! - `grid`    - 计算并导出扫描网格
//! - `howlong` - 估算扫描序列耗时
//! - `check`   - 测量前检查序列参数
//! - `plan`    - 列出序列中的每次扫描
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (INI 与扫描参数解析)
//!   │     ├── grid/      (网格计算、导出与绘图)
//!   │     ├── sequence/  (扫描序列检查与计划)
//!   │     ├── batch/     (目录批量估算)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (输出、进度条、日志)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod grid;
mod models;
mod parsers;
mod sequence;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Some(ref path) = cli.log_file {
        if let Err(e) = utils::logging::init_log_file(path) {
            utils::output::print_warning(&format!("Experiment log disabled: {}", e));
        }
    }

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}

//! # howlong 子命令 CLI 定义
//!
//! 估计扫描序列耗时，输入可为单个 INI 文件或包含多个 INI 文件的目录。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/howlong.rs`

use clap::Args;
use std::path::PathBuf;

/// howlong 子命令参数
#[derive(Args, Debug)]
pub struct HowlongArgs {
    /// Input: INI file or directory containing INI files
    pub input: PathBuf,

    /// Glob pattern for INI files (directory mode, e.g. "*.ini,*.cfg")
    #[arg(long, default_value = "*.ini")]
    pub pattern: String,

    /// Recurse into subdirectories (directory mode)
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto, directory mode only)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Hide the progress bar
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_parse_directory_options() {
        let cli = Cli::parse_from(["xafsgrid", "howlong", "scans", "-r", "-q", "--jobs", "2"]);
        let Commands::Howlong(args) = cli.command else {
            panic!("expected howlong command");
        };
        assert!(args.recursive);
        assert!(args.quiet);
        assert_eq!(args.jobs, 2);
        assert_eq!(args.pattern, "*.ini");
    }
}

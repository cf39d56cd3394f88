//! # grid 子命令 CLI 定义
//!
//! 读取 INI 扫描参数，计算能量网格与积分时间网格。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - `ScanFileArgs` 被其他子命令共用
//! - 参数传递给 `commands/grid.rs`

use crate::error::Result;
use crate::models::{GridValue, ScanOverrides};

use clap::{Args, ValueEnum};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// 共用的扫描参数文件与覆盖项
// ─────────────────────────────────────────────────────────────

/// INI 文件与命令行覆盖项
#[derive(Args, Debug, Clone)]
pub struct ScanFileArgs {
    /// INI file describing the scan sequence
    pub ini: PathBuf,

    /// Region boundaries, e.g. "-200 -30 15.3 14k" (overrides the INI file)
    #[arg(long, allow_hyphen_values = true)]
    pub bounds: Option<String>,

    /// Region step sizes, e.g. "10 0.5 0.05k"
    #[arg(long, allow_hyphen_values = true)]
    pub steps: Option<String>,

    /// Region dwell times, e.g. "0.5 0.5 0.25k"
    #[arg(long, allow_hyphen_values = true)]
    pub times: Option<String>,

    /// Edge energy in eV
    #[arg(long)]
    pub e0: Option<f64>,

    /// Data folder
    #[arg(long)]
    pub folder: Option<PathBuf>,

    /// Data file name stub
    #[arg(long)]
    pub filename: Option<String>,

    /// Number of scans in the sequence
    #[arg(long)]
    pub nscans: Option<u32>,

    /// First scan number, or "next"
    #[arg(long)]
    pub start: Option<String>,

    /// Measurement mode (transmission, fluorescence, reference, yield, both)
    #[arg(long)]
    pub mode: Option<String>,

    /// Alternate the monochromator direction on every other scan
    #[arg(long)]
    pub bothways: Option<bool>,
}

impl ScanFileArgs {
    /// 转换为覆盖项，解析网格取值列表
    pub fn overrides(&self) -> Result<ScanOverrides> {
        let list = |text: &Option<String>| -> Result<Option<Vec<GridValue>>> {
            text.as_deref().map(GridValue::parse_list).transpose()
        };

        Ok(ScanOverrides {
            bounds: list(&self.bounds)?,
            steps: list(&self.steps)?,
            times: list(&self.times)?,
            e0: self.e0,
            folder: self.folder.clone(),
            filename: self.filename.clone(),
            nscans: self.nscans,
            start: self.start.clone(),
            mode: self.mode.clone(),
            bothways: self.bothways,
        })
    }
}

// ─────────────────────────────────────────────────────────────
// grid 子命令
// ─────────────────────────────────────────────────────────────

/// 网格输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum GridOutputFormat {
    /// CSV data file (index, energy, offset, k, dwell)
    Csv,
    /// Two-column text file (energy, dwell)
    Xy,
    /// PNG image of dwell time against energy
    Png,
    /// SVG vector image
    Svg,
}

/// grid 子命令参数
#[derive(Args, Debug)]
pub struct GridArgs {
    #[command(flatten)]
    pub scan: ScanFileArgs,

    /// Write the grid to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<GridOutputFormat>,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Title for the plot (default: file name stub)
    #[arg(long)]
    pub title: Option<String>,

    /// Overwrite an existing output file
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_parse_overrides_with_negative_values() {
        let cli = Cli::parse_from([
            "xafsgrid",
            "grid",
            "scan.ini",
            "--bounds",
            "-10 40",
            "--steps",
            "0.25",
            "--times",
            "0.5",
            "--e0",
            "8979",
        ]);
        let Commands::Grid(args) = cli.command else {
            panic!("expected grid command");
        };
        let overrides = args.scan.overrides().unwrap();
        assert_eq!(
            overrides.bounds,
            Some(vec![GridValue::Energy(-10.0), GridValue::Energy(40.0)])
        );
        assert_eq!(overrides.e0, Some(8979.0));
        assert!(overrides.filename.is_none());
    }

    #[test]
    fn test_bad_override_value() {
        let cli = Cli::parse_from(["xafsgrid", "grid", "scan.ini", "--steps", "10 fast"]);
        let Commands::Grid(args) = cli.command else {
            panic!("expected grid command");
        };
        assert!(args.scan.overrides().is_err());
    }
}

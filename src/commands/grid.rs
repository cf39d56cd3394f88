//! # grid 命令实现
//!
//! 从 INI 扫描参数计算能量网格和积分时间网格。
//!
//! ## 功能
//! - 读取 INI 文件并应用命令行覆盖项
//! - 计算网格并打印区段汇总表
//! - 导出 CSV/XY 数据或 PNG/SVG 图像
//!
//! ## 依赖关系
//! - 使用 `cli/grid.rs` 定义的参数
//! - 使用 `parsers/scan.rs`, `grid/`
//! - 使用 `utils/output.rs`

use crate::cli::grid::{GridArgs, GridOutputFormat};
use crate::error::{Result, XafsGridError};
use crate::grid;
use crate::models::value::join_values;
use crate::models::ScanGrid;
use crate::parsers::scan::read_scan_file;
use crate::utils::output;

use std::path::Path;

/// 执行 grid 命令
pub fn execute(args: GridArgs) -> Result<()> {
    output::print_header("XAFS Scan Grid");

    if !args.scan.ini.is_file() {
        return Err(XafsGridError::FileNotFound {
            path: args.scan.ini.display().to_string(),
        });
    }

    let overrides = args.scan.overrides()?;
    let (params, found) = read_scan_file(&args.scan.ini, &overrides)?;
    output::print_info(&format!("Reading INI file: '{}'", args.scan.ini.display()));
    log::debug!("keywords read: {}", found.iter().collect::<Vec<_>>().join(", "));
    super::warn_grid_defaults(&found);

    output::print_info(&format!(
        "e0 = {:.2} eV, bounds = {}, steps = {}, times = {}",
        params.e0,
        join_values(&params.bounds),
        join_values(&params.steps),
        join_values(&params.times)
    ));

    let grid = super::build_grid(&params)?;
    output::print_success(&format!("Computed {} energy points", grid.len()));

    print_region_table(&grid);
    output::print_block(&format!(
        "Each scan ({} points, {:.1} s of counting) will take about {:.1} minutes",
        grid.len(),
        grid.total_dwell(),
        grid.approx_minutes
    ));

    if let Some(ref path) = args.output {
        if path.exists() && !args.overwrite {
            return Err(XafsGridError::OutputExists {
                path: path.display().to_string(),
            });
        }

        let format = args
            .format
            .unwrap_or_else(|| guess_format_from_extension(path));
        let title = args.title.clone().unwrap_or_else(|| params.filename.clone());
        write_grid(&grid, path, format, &title, args.width, args.height)?;
        output::print_written(&path.display().to_string());
    }

    Ok(())
}

/// 按格式写出网格
fn write_grid(
    grid: &ScanGrid,
    path: &Path,
    format: GridOutputFormat,
    title: &str,
    width: u32,
    height: u32,
) -> Result<()> {
    match format {
        GridOutputFormat::Csv => grid::export::to_csv(grid, path),
        GridOutputFormat::Xy => grid::export::to_xy(grid, path),
        GridOutputFormat::Png | GridOutputFormat::Svg => grid::plot::generate_grid_plot(
            grid,
            path,
            title,
            width,
            height,
            format == GridOutputFormat::Svg,
        ),
    }
}

/// 从文件扩展名推断输出格式
fn guess_format_from_extension(path: &Path) -> GridOutputFormat {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("png") => GridOutputFormat::Png,
        Some("svg") => GridOutputFormat::Svg,
        Some("xy") | Some("dat") | Some("txt") => GridOutputFormat::Xy,
        _ => GridOutputFormat::Csv,
    }
}

/// 打印区段汇总表
pub(crate) fn print_region_table(grid: &ScanGrid) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct RegionRow {
        #[tabled(rename = "Region")]
        region: usize,
        #[tabled(rename = "From (eV)")]
        start: String,
        #[tabled(rename = "To (eV)")]
        end: String,
        #[tabled(rename = "Step")]
        step: String,
        #[tabled(rename = "Space")]
        space: &'static str,
        #[tabled(rename = "Dwell (s)")]
        time: String,
        #[tabled(rename = "Points")]
        points: usize,
        #[tabled(rename = "First #")]
        first: usize,
    }

    let rows: Vec<RegionRow> = grid
        .regions
        .iter()
        .enumerate()
        .map(|(i, r)| RegionRow {
            region: i + 1,
            start: format!("{:.2}", r.start),
            end: format!("{:.2}", r.end),
            step: r.step.to_string(),
            space: if r.step.is_wavenumber() { "k" } else { "E" },
            time: r.time.to_string(),
            points: r.points,
            first: r.first_point + 1,
        })
        .collect();

    if !rows.is_empty() {
        println!("{}", Table::new(&rows));
    }
}

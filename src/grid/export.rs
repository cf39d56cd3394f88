//! # 扫描网格数据导出
//!
//! 导出扫描网格到 CSV 和 XY 格式。
//!
//! ## 支持格式
//! - CSV: 包含序号、绝对能量、相对能量、波数、积分时间的完整数据
//! - XY: 带注释头的 能量/积分时间 两列文本
//! - 轨迹 CSV: 单次扫描的实际走点顺序（正向或反向）
//!
//! ## 依赖关系
//! - 被 `commands/grid.rs`, `commands/plan.rs` 调用
//! - 使用 `models/grid.rs` 的 ScanGrid 结构
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{Result, XafsGridError};
use crate::grid::units::etok;
use crate::models::ScanGrid;

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// CSV 中的一行
#[derive(Debug, Serialize)]
struct GridRow {
    index: usize,
    energy: String,
    offset: String,
    k: String,
    dwell: String,
}

/// 轨迹 CSV 中的一行
#[derive(Debug, Serialize)]
struct TrajectoryRow {
    point: usize,
    energy: String,
    dwell: String,
}

/// 导出网格为 CSV 格式
pub fn to_csv(grid: &ScanGrid, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for (i, (energy, dwell)) in grid.points().enumerate() {
        let offset = energy - grid.e0;
        wtr.serialize(GridRow {
            index: i + 1,
            energy: format!("{:.2}", energy),
            offset: format!("{:.2}", offset),
            k: format!("{:.4}", etok(offset)),
            dwell: format!("{:.2}", dwell),
        })?;
    }

    wtr.flush().map_err(|e| XafsGridError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出单次扫描轨迹为 CSV 格式
pub fn trajectory_to_csv(points: &[(f64, f64)], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for (i, (energy, dwell)) in points.iter().enumerate() {
        wtr.serialize(TrajectoryRow {
            point: i + 1,
            energy: format!("{:.2}", energy),
            dwell: format!("{:.2}", dwell),
        })?;
    }

    wtr.flush().map_err(|e| XafsGridError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出网格为 XY 格式
pub fn to_xy(grid: &ScanGrid, output_path: &Path) -> Result<()> {
    let write_err = |e: std::io::Error| XafsGridError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let file = File::create(output_path).map_err(write_err)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "# XAFS scan grid").map_err(write_err)?;
    writeln!(out, "# e0: {:.2} eV", grid.e0).map_err(write_err)?;
    writeln!(out, "# points: {}", grid.len()).map_err(write_err)?;
    writeln!(out, "# estimate: {:.1} minutes", grid.approx_minutes).map_err(write_err)?;
    writeln!(out, "# Columns: energy (eV), dwell time (s)").map_err(write_err)?;
    writeln!(out, "#").map_err(write_err)?;

    for (energy, dwell) in grid.points() {
        writeln!(out, "{:.2}\t{:.2}", energy, dwell).map_err(write_err)?;
    }

    out.flush().map_err(write_err)?;

    Ok(())
}

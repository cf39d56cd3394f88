//! # 扫描网格图表生成
//!
//! 使用 `plotters` 库绘制积分时间随能量的分布，并标出各区段边界。
//!
//! ## 功能
//! - 每个网格点以散点表示，点的疏密直观反映步长
//! - 区段边界以竖线标出
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/grid.rs` 调用
//! - 使用 `models/grid.rs` 的 ScanGrid 结构
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, XafsGridError};
use crate::models::ScanGrid;

use plotters::prelude::*;
use std::path::Path;

/// 生成网格图表
pub fn generate_grid_plot(
    grid: &ScanGrid,
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
    use_svg: bool,
) -> Result<()> {
    if grid.is_empty() {
        return Err(XafsGridError::Other(
            "Cannot plot an empty scan grid".to_string(),
        ));
    }

    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_grid_chart(&root, grid, title)?;
        root.present()
            .map_err(|e| XafsGridError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_grid_chart(&root, grid, title)?;
        root.present()
            .map_err(|e| XafsGridError::Other(e.to_string()))?;
    }
    Ok(())
}

/// 绘制网格图表的核心逻辑
fn draw_grid_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    grid: &ScanGrid,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| XafsGridError::Other(format!("{:?}", e)))?;

    let (e_min, e_max) = grid.energy_range().unwrap_or((grid.e0 - 100.0, grid.e0 + 100.0));
    let pad = ((e_max - e_min) * 0.02).max(1.0);
    let t_max = grid.dwell.iter().copied().fold(0.0_f64, f64::max).max(0.1) * 1.15;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((e_min - pad)..(e_max + pad), 0.0..t_max)
        .map_err(|e| XafsGridError::Other(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("Energy (eV)")
        .y_desc("Dwell time (s)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| XafsGridError::Other(format!("{:?}", e)))?;

    // 区段边界
    let boundary_color = RGBColor(160, 160, 160);
    for region in &grid.regions {
        for x in [region.start, region.end] {
            if x < e_min - pad || x > e_max + pad {
                continue;
            }
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(x, 0.0), (x, t_max)],
                    boundary_color.stroke_width(1),
                )))
                .map_err(|e| XafsGridError::Other(format!("{:?}", e)))?;
        }
    }

    // 网格点
    let point_color = RGBColor(0, 102, 204);
    chart
        .draw_series(
            grid.points()
                .map(|(e, t)| Circle::new((e, t), 2, point_color.filled())),
        )
        .map_err(|e| XafsGridError::Other(format!("{:?}", e)))?;

    // 汇总信息
    let summary = format!(
        "e0 = {:.1} eV, {} points, ~{:.1} min",
        grid.e0,
        grid.len(),
        grid.approx_minutes
    );
    chart
        .draw_series(std::iter::once(Text::new(
            summary,
            (e_min, t_max * 0.95),
            ("sans-serif", 14).into_font().color(&BLACK),
        )))
        .map_err(|e| XafsGridError::Other(format!("{:?}", e)))?;

    Ok(())
}

//! # 分段扫描网格构建器
//!
//! 把分段描述（边界、步长、积分时间，可混用能量和波数单位）
//! 转换为绝对能量网格、逐点积分时间网格和粗略耗时估计。
//!
//! ## 算法概述
//! 1. 检查数组长度：边界数必须恰好比步长数、时间数多一
//! 2. 把以波数给出的边界换算为相对能量（写入新数组，不修改输入）
//! 3. 逐区段取点，区间左闭右开：
//!    - 波数步长：在 k 空间等间距取点，再换算回能量
//!    - 能量步长：直接在能量空间等间距取点
//! 4. 积分时间：常数，或与该点波数成正比
//! 5. 按输入顺序拼接各区段，不去重、不排序
//!
//! ## 依赖关系
//! - 被 `commands/`, `sequence/` 调用
//! - 使用 `grid/units.rs` 做单位换算
//! - 使用 `models/` 的 GridValue, ScanGrid

use crate::error::{Result, XafsGridError};
use crate::grid::units::{etok, ktoe};
use crate::models::grid::GridRegion;
use crate::models::{GridValue, ScanGrid};

/// 每个点的固定开销（秒），包括单色器移动与读数
pub const POINT_OVERHEAD: f64 = 1.425;

/// 单个区段允许的最大点数
pub const MAX_REGION_POINTS: usize = 1_000_000;

/// 构建扫描网格
///
/// 长度不匹配时返回 [`XafsGridError::MalformedGridSpec`]，不会返回部分网格。
/// 合法但区段为空时返回点数为 0 的网格。
pub fn build_scan_grid(
    bounds: &[GridValue],
    steps: &[GridValue],
    times: &[GridValue],
    e0: f64,
) -> Result<ScanGrid> {
    if bounds.len() != steps.len() + 1 || bounds.len() != times.len() + 1 {
        return Err(XafsGridError::MalformedGridSpec {
            bounds: bounds.len(),
            steps: steps.len(),
            times: times.len(),
        });
    }

    if !e0.is_finite() {
        return Err(XafsGridError::InvalidArgument(format!(
            "edge energy must be finite, got {}",
            e0
        )));
    }

    let offsets = resolve_bounds(bounds)?;

    let mut energies = Vec::new();
    let mut dwell = Vec::new();
    let mut regions = Vec::with_capacity(steps.len());

    for (i, (step, time)) in steps.iter().zip(times).enumerate() {
        validate_region(i, offsets[i], offsets[i + 1], step, time)?;

        // 未取整的绝对能量，积分时间按它计算
        let raw: Vec<f64> = match step {
            GridValue::Wavenumber(dk) => arange(i, etok(offsets[i]), etok(offsets[i + 1]), *dk)?
                .into_iter()
                .map(|k| e0 + ktoe(k))
                .collect(),
            GridValue::Energy(de) => arange(i, e0 + offsets[i], e0 + offsets[i + 1], *de)?,
        };

        let region_dwell = raw.iter().map(|&e| match time {
            GridValue::Wavenumber(factor) => round_to(factor * etok(e - e0), 2),
            GridValue::Energy(seconds) => round_to(*seconds, 2),
        });

        regions.push(GridRegion {
            start: e0 + offsets[i],
            end: e0 + offsets[i + 1],
            step: *step,
            time: *time,
            first_point: energies.len(),
            points: raw.len(),
        });

        dwell.extend(region_dwell);
        energies.extend(raw.iter().map(|&e| round_to(e, 2)));
    }

    let approx_minutes = estimate_minutes(&dwell);

    Ok(ScanGrid {
        e0,
        energies,
        dwell,
        approx_minutes,
        regions,
    })
}

/// 把边界统一换算为相对边能的能量偏移（eV）
pub fn resolve_bounds(bounds: &[GridValue]) -> Result<Vec<f64>> {
    bounds
        .iter()
        .enumerate()
        .map(|(i, bound)| match bound {
            GridValue::Energy(e) if e.is_finite() => Ok(*e),
            GridValue::Wavenumber(k) if k.is_finite() && *k >= 0.0 => Ok(ktoe(*k)),
            other => Err(XafsGridError::InvalidGridValue(format!(
                "boundary {} ({}) must be a finite energy or a non-negative wavenumber",
                i + 1,
                other
            ))),
        })
        .collect()
}

/// 单次扫描耗时估计（分钟，保留一位小数）
pub fn estimate_minutes(dwell: &[f64]) -> f64 {
    let total: f64 = dwell.iter().sum::<f64>() + dwell.len() as f64 * POINT_OVERHEAD;
    round_to(total / 60.0, 1)
}

/// 区段合法性检查：步长为正，积分时间非负，边界不降序
fn validate_region(
    index: usize,
    start: f64,
    end: f64,
    step: &GridValue,
    time: &GridValue,
) -> Result<()> {
    let region = index + 1;

    let step_value = step.value();
    if !step_value.is_finite() || step_value <= 0.0 {
        return Err(XafsGridError::InvalidRegion {
            region,
            reason: format!("step size must be positive, got {}", step),
        });
    }

    let time_value = time.value();
    if !time_value.is_finite() || time_value < 0.0 {
        return Err(XafsGridError::InvalidRegion {
            region,
            reason: format!("dwell time must not be negative, got {}", time),
        });
    }

    if end < start {
        return Err(XafsGridError::InvalidRegion {
            region,
            reason: format!(
                "boundaries are descending ({:.2} eV -> {:.2} eV)",
                start, end
            ),
        });
    }

    Ok(())
}

/// 左闭右开等间距取点，点数为 ceil((stop - start) / step)
///
/// 点数超过 [`MAX_REGION_POINTS`] 时返回 `InvalidRegion`。
fn arange(index: usize, start: f64, stop: f64, step: f64) -> Result<Vec<f64>> {
    let count = ((stop - start) / step).ceil();
    if !(count > 0.0) {
        return Ok(Vec::new());
    }
    if count > MAX_REGION_POINTS as f64 {
        return Err(XafsGridError::InvalidRegion {
            region: index + 1,
            reason: format!(
                "step size {} gives more than {} points",
                step, MAX_REGION_POINTS
            ),
        });
    }
    Ok((0..count as usize)
        .map(|j| start + j as f64 * step)
        .collect())
}

/// 四舍六入五成双
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(text: &str) -> Vec<GridValue> {
        GridValue::parse_list(text).unwrap()
    }

    #[test]
    fn test_single_region_xanes() {
        let grid = build_scan_grid(&values("-10 40"), &values("0.25"), &values("0.5"), 7112.0)
            .unwrap();

        assert_eq!(grid.len(), 200);
        assert_eq!(grid.dwell.len(), 200);
        assert_eq!(grid.energies[0], 7102.0);
        assert_eq!(grid.energies[1], 7102.25);
        assert_eq!(*grid.energies.last().unwrap(), 7151.75);
        assert!(grid.dwell.iter().all(|&t| t == 0.5));
        // (200 * 0.5 + 200 * 1.425) / 60 = 6.4166...
        assert_eq!(grid.approx_minutes, 6.4);
    }

    #[test]
    fn test_default_exafs_grid() {
        let grid = build_scan_grid(
            &values("-200 -30 15.3 14k"),
            &values("10 0.5 0.05k"),
            &values("0.5 0.5 0.25k"),
            7112.0,
        )
        .unwrap();

        assert_eq!(grid.regions.len(), 3);
        assert_eq!(grid.energies.len(), grid.dwell.len());

        // 第一区段：6912 到 7072，步长 10
        let first = &grid.regions[0];
        assert_eq!(first.points, 17);
        assert_eq!(grid.energies[0], 6912.0);
        assert_eq!(grid.energies[16], 7072.0);
        assert_eq!(grid.energies[17], 7082.0);

        // 第二区段：7082 起步长 0.5，共 91 点
        assert_eq!(grid.regions[1].points, 91);
        assert_eq!(grid.regions[1].first_point, 17);

        // 第三区段：k 空间步长 0.05，从 k(15.3) 到 k = 14（不含）
        let last = &grid.regions[2];
        assert_eq!(last.points, 240);
        assert_eq!(grid.len(), 17 + 91 + 240);
        let start = last.first_point;
        assert!((grid.energies[start] - 7127.3).abs() < 1e-9);
        assert!(*grid.energies.last().unwrap() < 7112.0 + ktoe(14.0));

        for i in start..grid.len() {
            let k = etok(grid.energies[i] - 7112.0);
            assert!(
                (grid.dwell[i] - 0.25 * k).abs() < 0.011,
                "dwell {} at k = {}",
                grid.dwell[i],
                k
            );
        }
        // 相邻点的 k 间距恒定
        let k0 = etok(grid.energies[start] - 7112.0);
        let k1 = etok(grid.energies[start + 1] - 7112.0);
        assert!((k1 - k0 - 0.05).abs() < 1e-3);
    }

    #[test]
    fn test_wavenumber_boundary_resolved_to_energy() {
        let offsets = resolve_bounds(&values("-30 14k")).unwrap();
        assert_eq!(offsets[0], -30.0);
        assert!((offsets[1] - ktoe(14.0)).abs() < 1e-12);
        assert!(resolve_bounds(&[GridValue::Wavenumber(-2.0)]).is_err());
    }

    #[test]
    fn test_input_is_not_mutated() {
        let bounds = values("-200 -30 15.3 14k");
        let steps = values("10 0.5 0.05k");
        let times = values("0.5 0.5 0.25k");
        let before = bounds.clone();
        build_scan_grid(&bounds, &steps, &times, 7112.0).unwrap();
        assert_eq!(bounds, before);
    }

    #[test]
    fn test_mismatched_lengths() {
        let err = build_scan_grid(&values("0 10"), &values("1 2"), &values("1"), 7112.0)
            .unwrap_err();
        assert!(matches!(
            err,
            XafsGridError::MalformedGridSpec {
                bounds: 2,
                steps: 2,
                times: 1
            }
        ));

        let err = build_scan_grid(&values("0 10 20"), &values("1 2"), &values("1"), 7112.0)
            .unwrap_err();
        assert!(matches!(err, XafsGridError::MalformedGridSpec { .. }));

        let err = build_scan_grid(&[], &[], &[], 7112.0).unwrap_err();
        assert!(matches!(err, XafsGridError::MalformedGridSpec { .. }));
    }

    #[test]
    fn test_empty_grid_is_not_an_error() {
        // 单个边界，没有区段
        let grid = build_scan_grid(&values("0"), &[], &[], 7112.0).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.approx_minutes, 0.0);

        // 起止相同的区段
        let grid = build_scan_grid(&values("5 5"), &values("1"), &values("1"), 7112.0).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_invalid_regions_rejected() {
        let zero_step = build_scan_grid(&values("0 10"), &values("0"), &values("1"), 7112.0);
        assert!(matches!(
            zero_step,
            Err(XafsGridError::InvalidRegion { region: 1, .. })
        ));

        let negative_step =
            build_scan_grid(&values("0 10 20"), &values("1 -0.05k"), &values("1 1"), 7112.0);
        assert!(matches!(
            negative_step,
            Err(XafsGridError::InvalidRegion { region: 2, .. })
        ));

        let negative_time = build_scan_grid(&values("0 10"), &values("1"), &values("-1"), 7112.0);
        assert!(matches!(
            negative_time,
            Err(XafsGridError::InvalidRegion { .. })
        ));

        let descending = build_scan_grid(&values("10 0"), &values("1"), &values("1"), 7112.0);
        assert!(matches!(descending, Err(XafsGridError::InvalidRegion { .. })));
    }

    #[test]
    fn test_regions_concatenated_in_input_order() {
        let grid = build_scan_grid(&values("0 10 10 12"), &values("5 1 1"), &values("1 1 2"), 100.0)
            .unwrap();
        assert_eq!(grid.energies, vec![100.0, 105.0, 110.0, 111.0]);
        assert_eq!(grid.dwell, vec![1.0, 1.0, 2.0, 2.0]);
        // 空区段仍保留在区段信息中
        assert_eq!(grid.regions.len(), 3);
        assert_eq!(grid.regions[1].points, 0);
        assert_eq!(grid.regions[1].first_point, 2);
        assert_eq!(grid.regions[2].first_point, 2);
    }

    #[test]
    fn test_k_step_below_edge_is_empty() {
        // 边以下 k 恒为 0，k 步长区段没有点
        let grid =
            build_scan_grid(&values("-50 -10"), &values("0.05k"), &values("1"), 7112.0).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_duration_estimate() {
        let dwell = vec![0.0; 10];
        // (10 * 1.425) / 60 = 0.2375
        assert_eq!(estimate_minutes(&dwell), 0.2);
        assert_eq!(estimate_minutes(&[]), 0.0);
    }

    #[test]
    fn test_zero_dwell_grid_estimate() {
        let grid = build_scan_grid(&values("0 10"), &values("1"), &values("0"), 7112.0).unwrap();
        assert_eq!(grid.len(), 10);
        assert_eq!(grid.approx_minutes, 0.2);
    }

    #[test]
    fn test_idempotent() {
        let b = values("-200 -20 30 5k 14.5k");
        let s = values("10 0.5 2 0.05k");
        let t = values("1 1 1 1k");
        let first = build_scan_grid(&b, &s, &t, 7112.0).unwrap();
        let second = build_scan_grid(&b, &s, &t, 7112.0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_arange_half_open() {
        assert_eq!(arange(0, 0.0, 1.0, 0.25).unwrap(), vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(arange(0, 0.0, 1.1, 0.5).unwrap(), vec![0.0, 0.5, 1.0]);
        assert!(arange(0, 1.0, 1.0, 0.5).unwrap().is_empty());
        assert!(arange(0, 2.0, 1.0, 0.5).unwrap().is_empty());
    }

    #[test]
    fn test_half_cent_rounds_to_even() {
        let grid =
            build_scan_grid(&values("0 1"), &values("0.125"), &values("0.125"), 7112.0).unwrap();
        assert_eq!(grid.energies[1], 7112.12);
        assert_eq!(grid.energies[3], 7112.38);
        assert_eq!(grid.dwell[0], 0.12);
        assert_eq!(round_to(0.25, 1), 0.2);
        assert_eq!(round_to(0.75, 1), 0.8);
    }

    #[test]
    fn test_tiny_step_rejected() {
        let err = build_scan_grid(&values("0 1"), &values("1e-300"), &values("1"), 7112.0)
            .unwrap_err();
        assert!(matches!(err, XafsGridError::InvalidRegion { region: 1, .. }));

        let err = build_scan_grid(&values("20 400"), &values("1e-12k"), &values("1"), 7112.0)
            .unwrap_err();
        assert!(matches!(err, XafsGridError::InvalidRegion { region: 1, .. }));

        assert_eq!(arange(0, 0.0, 1_000_000.0, 1.0).unwrap().len(), MAX_REGION_POINTS);
        assert!(arange(0, 0.0, 1_000_001.0, 1.0).is_err());
    }
}

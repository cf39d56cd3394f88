//! # 扫描网格结果
//!
//! 网格构建器的输出：绝对能量点、逐点积分时间、各区段信息以及粗略耗时估计。
//!
//! ## 依赖关系
//! - 由 `grid/builder.rs` 构造
//! - 被 `grid/export.rs`, `grid/plot.rs`, `sequence/` 和 `commands/` 使用

use super::value::GridValue;

/// 单个扫描区段（相邻两个边界之间）
#[derive(Debug, Clone, PartialEq)]
pub struct GridRegion {
    /// 起始边界（绝对能量，eV）
    pub start: f64,
    /// 结束边界（绝对能量，eV，不含）
    pub end: f64,
    /// 步长设定
    pub step: GridValue,
    /// 积分时间设定
    pub time: GridValue,
    /// 本区段第一个点在网格中的下标
    pub first_point: usize,
    /// 本区段点数
    pub points: usize,
}

/// 扫描网格
#[derive(Debug, Clone, PartialEq)]
pub struct ScanGrid {
    /// 边能 e0（eV）
    pub e0: f64,
    /// 绝对能量点（eV，保留两位小数）
    pub energies: Vec<f64>,
    /// 逐点积分时间（秒，保留两位小数）
    pub dwell: Vec<f64>,
    /// 单次扫描的粗略耗时（分钟，保留一位小数）
    pub approx_minutes: f64,
    /// 区段信息，按输入顺序排列
    pub regions: Vec<GridRegion>,
}

impl ScanGrid {
    /// 点数
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// 逐点 (能量, 积分时间)
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.energies.iter().copied().zip(self.dwell.iter().copied())
    }

    /// 积分时间总和（秒）
    pub fn total_dwell(&self) -> f64 {
        self.dwell.iter().sum()
    }

    /// 反向轨迹（单色器反向扫描时使用）
    pub fn reversed_points(&self) -> Vec<(f64, f64)> {
        let mut points: Vec<(f64, f64)> = self.points().collect();
        points.reverse();
        points
    }

    /// 能量范围 (最小, 最大)
    pub fn energy_range(&self) -> Option<(f64, f64)> {
        if self.energies.is_empty() {
            return None;
        }
        let min = self.energies.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self
            .energies
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

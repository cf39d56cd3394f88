//! # 扫描序列计划
//!
//! 根据扫描参数和网格列出本序列将写入的每个数据文件、扫描方向和耗时。
//! 开启 `bothways` 时偶数次扫描沿反方向进行。
//!
//! ## 依赖关系
//! - 被 `commands/plan.rs`, `commands/check.rs`, `commands/howlong.rs` 使用
//! - 使用 `models/` 的 ScanParameters, ScanGrid

use crate::error::{Result, XafsGridError};
use crate::models::{ScanGrid, ScanParameters};

use std::fmt;
use std::path::PathBuf;

/// 单色器扫描方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}

/// 计划中的单次扫描
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedScan {
    /// 序列内的序号（从 1 开始）
    pub count: u32,
    /// 数据文件编号
    pub index: u32,
    /// 数据文件名
    pub file_name: String,
    /// 数据文件完整路径
    pub path: PathBuf,
    pub direction: Direction,
}

/// 扫描序列计划
#[derive(Debug, Clone)]
pub struct SequencePlan {
    pub scans: Vec<PlannedScan>,
    /// 每次扫描的点数
    pub points: usize,
    /// 每次扫描的耗时（分钟）
    pub minutes_per_scan: f64,
}

impl SequencePlan {
    /// 编号超出 u32 范围时返回 `InvalidArgument`
    pub fn new(params: &ScanParameters, grid: &ScanGrid) -> Result<Self> {
        let scans = (0..params.nscans)
            .map(|i| {
                let count = i + 1;
                let index = params.start.checked_add(i).ok_or_else(|| {
                    XafsGridError::InvalidArgument(format!(
                        "scan number overflows: start {} with {} scans",
                        params.start, params.nscans
                    ))
                })?;
                let file_name = params.data_file_name(index);
                let direction = if params.bothways && count % 2 == 0 {
                    Direction::Backward
                } else {
                    Direction::Forward
                };
                Ok(PlannedScan {
                    count,
                    index,
                    path: params.folder.join(&file_name),
                    file_name,
                    direction,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SequencePlan {
            scans,
            points: grid.len(),
            minutes_per_scan: grid.approx_minutes,
        })
    }

    /// 已经存在的数据文件
    pub fn existing(&self) -> Vec<&PlannedScan> {
        self.scans.iter().filter(|s| s.path.exists()).collect()
    }

    /// 整个序列的耗时（小时）
    pub fn total_hours(&self) -> f64 {
        self.minutes_per_scan * self.scans.len() as f64 / 60.0
    }

    /// 单次扫描实际走点顺序
    pub fn trajectory(&self, scan: &PlannedScan, grid: &ScanGrid) -> Vec<(f64, f64)> {
        match scan.direction {
            Direction::Forward => grid.points().collect(),
            Direction::Backward => grid.reversed_points(),
        }
    }

    /// 耗时说明文字
    pub fn summary(&self) -> String {
        format!(
            "Each scan ({} points) will take about {:.1} minutes\nThe sequence of {} will take about {:.1} hours",
            self.points,
            self.minutes_per_scan,
            inflect("scan", self.scans.len()),
            self.total_hours()
        )
    }
}

/// 数量与单复数，如 `1 scan`、`3 scans`
pub fn inflect(word: &str, count: usize) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

//! # 扫描参数数据模型
//!
//! 描述一个扫描序列所需的全部元数据（通常来自 INI 文件的 `[scan]` 段）。
//!
//! ## 依赖关系
//! - 由 `parsers/scan.rs` 构造
//! - 被 `sequence/`, `commands/` 使用

use super::value::GridValue;

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// 默认区段边界（Fe K 边常规 XAFS 扫描）
pub const DEFAULT_BOUNDS: &str = "-200 -30 15.3 14k";
/// 默认步长
pub const DEFAULT_STEPS: &str = "10 0.5 0.05k";
/// 默认积分时间
pub const DEFAULT_TIMES: &str = "0.5 0.5 0.25k";

/// 测量模式（决定数据的显示方式和探测器组合）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementMode {
    Transmission,
    Fluorescence,
    Reference,
    Yield,
    Both,
}

impl MeasurementMode {
    /// 按子串识别模式字符串，无法识别时返回 None
    pub fn detect(mode: &str) -> Option<Self> {
        let mode = mode.to_lowercase();
        if mode.contains("fluo") || mode.contains("flou") {
            Some(MeasurementMode::Fluorescence)
        } else if mode.contains("trans") {
            Some(MeasurementMode::Transmission)
        } else if mode.contains("ref") {
            Some(MeasurementMode::Reference)
        } else if mode.contains("yield") {
            Some(MeasurementMode::Yield)
        } else if mode.contains("both") {
            Some(MeasurementMode::Both)
        } else {
            None
        }
    }

    /// 是否需要荧光探测器
    pub fn uses_fluorescence_detector(&self) -> bool {
        matches!(self, MeasurementMode::Fluorescence | MeasurementMode::Both)
    }
}

impl fmt::Display for MeasurementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementMode::Transmission => write!(f, "transmission"),
            MeasurementMode::Fluorescence => write!(f, "fluorescence"),
            MeasurementMode::Reference => write!(f, "reference"),
            MeasurementMode::Yield => write!(f, "electron yield"),
            MeasurementMode::Both => write!(f, "transmission + fluorescence"),
        }
    }
}

/// 扫描序列参数
#[derive(Debug, Clone, PartialEq)]
pub struct ScanParameters {
    // 扫描区段
    pub bounds: Vec<GridValue>,
    pub steps: Vec<GridValue>,
    pub times: Vec<GridValue>,

    // 字符串
    pub folder: PathBuf,
    pub filename: String,
    pub experimenters: String,
    pub element: String,
    pub edge: String,
    pub sample: String,
    pub prep: String,
    pub comment: String,
    pub mode: String,

    // 整数
    pub nscans: u32,
    pub start: u32,
    pub npoints: u32,

    // 浮点数
    pub e0: f64,
    pub inttime: f64,
    pub dwell: f64,
    pub delay: f64,

    // 布尔
    pub snapshots: bool,
    pub htmlpage: bool,
    pub bothways: bool,
    pub channelcut: bool,
}

impl Default for ScanParameters {
    fn default() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        ScanParameters {
            bounds: default_values(DEFAULT_BOUNDS),
            steps: default_values(DEFAULT_STEPS),
            times: default_values(DEFAULT_TIMES),
            folder: PathBuf::from(home).join("data"),
            filename: "data.dat".to_string(),
            experimenters: String::new(),
            element: "Fe".to_string(),
            edge: "K".to_string(),
            sample: String::new(),
            prep: String::new(),
            comment: String::new(),
            mode: "transmission".to_string(),
            nscans: 1,
            start: 0,
            npoints: 0,
            e0: 7112.0,
            inttime: 1.0,
            dwell: 1.0,
            delay: 0.1,
            snapshots: true,
            htmlpage: true,
            bothways: false,
            channelcut: true,
        }
    }
}

impl ScanParameters {
    /// 识别测量模式；第二个返回值表示是否为回退值
    pub fn measurement_mode(&self) -> (MeasurementMode, bool) {
        match MeasurementMode::detect(&self.mode) {
            Some(mode) => (mode, false),
            None => (MeasurementMode::Transmission, true),
        }
    }

    /// 第 `index` 个数据文件名，如 `data.dat.001`
    pub fn data_file_name(&self, index: u32) -> String {
        format!("{}.{:03}", self.filename, index)
    }
}

fn default_values(text: &str) -> Vec<GridValue> {
    text.split_whitespace()
        .filter_map(|t| t.parse().ok())
        .collect()
}

/// 记录哪些参数由 INI 文件或命令行给出
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoundKeys(BTreeSet<String>);

impl FoundKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, key: &str) {
        self.0.insert(key.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// 命令行覆盖项，优先级高于 INI 文件
#[derive(Debug, Clone, Default)]
pub struct ScanOverrides {
    pub bounds: Option<Vec<GridValue>>,
    pub steps: Option<Vec<GridValue>>,
    pub times: Option<Vec<GridValue>>,
    pub e0: Option<f64>,
    pub folder: Option<PathBuf>,
    pub filename: Option<String>,
    pub nscans: Option<u32>,
    /// 起始编号，可为整数或 `next`
    pub start: Option<String>,
    pub mode: Option<String>,
    pub bothways: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_grid() {
        let p = ScanParameters::default();
        assert_eq!(p.bounds.len(), 4);
        assert_eq!(p.steps.len(), 3);
        assert_eq!(p.times.len(), 3);
        assert_eq!(p.bounds[3], GridValue::Wavenumber(14.0));
        assert_eq!(p.e0, 7112.0);
        assert!(p.folder.ends_with("data"));
    }

    #[test]
    fn test_mode_detection() {
        assert_eq!(
            MeasurementMode::detect("Fluorescence"),
            Some(MeasurementMode::Fluorescence)
        );
        assert_eq!(
            MeasurementMode::detect("flourescence"),
            Some(MeasurementMode::Fluorescence)
        );
        assert_eq!(
            MeasurementMode::detect("transmission"),
            Some(MeasurementMode::Transmission)
        );
        assert_eq!(
            MeasurementMode::detect("reference"),
            Some(MeasurementMode::Reference)
        );
        assert_eq!(MeasurementMode::detect("yield"), Some(MeasurementMode::Yield));
        assert_eq!(MeasurementMode::detect("both"), Some(MeasurementMode::Both));
        assert_eq!(MeasurementMode::detect("xes"), None);
    }

    #[test]
    fn test_mode_fallback() {
        let p = ScanParameters {
            mode: "unknown".to_string(),
            ..ScanParameters::default()
        };
        assert_eq!(p.measurement_mode(), (MeasurementMode::Transmission, true));
    }

    #[test]
    fn test_data_file_name() {
        let p = ScanParameters {
            filename: "FeS2".to_string(),
            ..ScanParameters::default()
        };
        assert_eq!(p.data_file_name(7), "FeS2.007");
        assert_eq!(p.data_file_name(1234), "FeS2.1234");
    }

    #[test]
    fn test_found_keys() {
        let mut found = FoundKeys::new();
        found.mark("e0");
        found.mark("bounds");
        found.mark("e0");
        assert!(found.contains("e0"));
        assert!(!found.contains("steps"));
        assert_eq!(found.iter().collect::<Vec<_>>(), vec!["bounds", "e0"]);
    }
}

//! # 数据模型模块
//!
//! 定义扫描网格取值、扫描参数和网格结果的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `grid/`, `sequence/` 和 `commands/` 使用
//! - 子模块: value, scan, grid

pub mod grid;
pub mod scan;
pub mod value;

pub use grid::ScanGrid;
pub use scan::{FoundKeys, ScanOverrides, ScanParameters};
pub use value::GridValue;

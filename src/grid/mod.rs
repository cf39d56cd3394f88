//! # 扫描网格计算模块
//!
//! 提供 XAFS 步进扫描网格的计算、导出与绘图功能。
//!
//! ## 子模块
//! - `units`: 能量与光电子波数换算
//! - `builder`: 分段网格构建与耗时估计
//! - `channelcut`: 准 channel-cut 单色器能量
//! - `export`: 数据导出 (CSV/XY)
//! - `plot`: 图表生成
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `sequence/` 使用
//! - 使用 `models/` 的 GridValue, ScanGrid

pub mod builder;
pub mod channelcut;
pub mod export;
pub mod plot;
pub mod units;

pub use builder::build_scan_grid;
pub use channelcut::{channelcut_energy, MonoCrystal};

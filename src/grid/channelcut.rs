//! # 准 channel-cut 能量
//!
//! 双晶单色器在准 channel-cut 模式下固定晶体间距，只转动 Bragg 角。
//! 扫描开始前把单色器停在整个能量范围角度中点对应的能量上。
//!
//! ## 依赖关系
//! - 被 `commands/plan.rs` 调用
//! - 使用 `grid/builder.rs` 解析边界

use crate::error::{Result, XafsGridError};
use crate::grid::builder::resolve_bounds;
use crate::models::GridValue;

use std::fmt;

/// hc（eV·Å）
pub const HC: f64 = 12_398.419_843;

/// Si 晶格常数（Å，室温）
pub const SI_LATTICE: f64 = 5.430_95;

/// 单色器晶面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonoCrystal {
    #[default]
    Si111,
    Si311,
}

impl MonoCrystal {
    /// 晶面间距 d（Å）
    pub fn d_spacing(&self) -> f64 {
        match self {
            MonoCrystal::Si111 => SI_LATTICE / 3f64.sqrt(),
            MonoCrystal::Si311 => SI_LATTICE / 11f64.sqrt(),
        }
    }

    /// 最低可用能量（θ = 90°）
    pub fn cutoff_energy(&self) -> f64 {
        HC / (2.0 * self.d_spacing())
    }

    /// 能量（eV）转换为 Bragg 角（弧度）
    pub fn energy_to_angle(&self, energy: f64) -> Result<f64> {
        let sin_theta = HC / (2.0 * self.d_spacing() * energy);
        if !sin_theta.is_finite() || sin_theta <= 0.0 || sin_theta > 1.0 {
            return Err(XafsGridError::InvalidArgument(format!(
                "{:.1} eV is not reachable with {} (cutoff {:.1} eV)",
                energy,
                self,
                self.cutoff_energy()
            )));
        }
        Ok(sin_theta.asin())
    }

    /// Bragg 角（弧度）转换为能量（eV）
    pub fn angle_to_energy(&self, theta: f64) -> f64 {
        HC / (2.0 * self.d_spacing() * theta.sin())
    }
}

impl fmt::Display for MonoCrystal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonoCrystal::Si111 => write!(f, "Si(111)"),
            MonoCrystal::Si311 => write!(f, "Si(311)"),
        }
    }
}

/// 计算准 channel-cut 模式的停靠能量
///
/// 取第一个与最后一个边界对应 Bragg 角的中点，再换算回能量。
pub fn channelcut_energy(e0: f64, bounds: &[GridValue], crystal: MonoCrystal) -> Result<f64> {
    let offsets = resolve_bounds(bounds)?;
    let (first, last) = match (offsets.first(), offsets.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            return Err(XafsGridError::InvalidArgument(
                "no scan boundaries given".to_string(),
            ))
        }
    };

    let amin = crystal.energy_to_angle(e0 + first)?;
    let amax = crystal.energy_to_angle(e0 + last)?;
    let aave = amin + (amax - amin) / 2.0;

    Ok(crystal.angle_to_energy(aave))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d_spacings() {
        assert!((MonoCrystal::Si111.d_spacing() - 3.1356).abs() < 1e-3);
        assert!((MonoCrystal::Si311.d_spacing() - 1.6375).abs() < 1e-3);
        assert!((MonoCrystal::Si111.cutoff_energy() - 1977.0).abs() < 1.0);
    }

    #[test]
    fn test_angle_round_trip() {
        let crystal = MonoCrystal::Si111;
        let theta = crystal.energy_to_angle(7112.0).unwrap();
        assert!((crystal.angle_to_energy(theta) - 7112.0).abs() < 1e-6);
        assert!(crystal.energy_to_angle(1000.0).is_err());
    }

    #[test]
    fn test_channelcut_energy_within_range() {
        let bounds = GridValue::parse_list("-200 -30 15.3 14k").unwrap();
        let eave = channelcut_energy(7112.0, &bounds, MonoCrystal::Si111).unwrap();

        let emin = 7112.0 - 200.0;
        let emax = 7112.0 + 746.757;
        assert!(eave > emin && eave < emax);
        // E ∝ 1/sin θ 为凸函数，角度中点的能量低于能量中点
        assert!(eave < (emin + emax) / 2.0);
    }

    #[test]
    fn test_channelcut_energy_errors() {
        assert!(channelcut_energy(7112.0, &[], MonoCrystal::Si111).is_err());
        let bounds = GridValue::parse_list("-200 100").unwrap();
        assert!(channelcut_energy(1500.0, &bounds, MonoCrystal::Si311).is_err());
    }
}

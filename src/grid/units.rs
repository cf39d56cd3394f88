//! # 能量与波数换算
//!
//! 光电子波数 k 与边上能量 E 的关系：E = ħ²k² / 2mₑ，
//! 即 k = sqrt(E · ETOK)，ETOK = 2mₑ/ħ² ≈ 0.2625 eV⁻¹·Å⁻²。
//!
//! ## 依赖关系
//! - 被 `grid/builder.rs`, `grid/export.rs` 使用
//! - 无外部模块依赖

/// 2mₑ/ħ²（eV⁻¹·Å⁻²）
pub const ETOK: f64 = 0.262_468_292;

/// 边上能量（eV）转换为波数（Å⁻¹）；边及边以下取 0
pub fn etok(energy: f64) -> f64 {
    if energy <= 0.0 {
        0.0
    } else {
        (energy * ETOK).sqrt()
    }
}

/// 波数（Å⁻¹）转换为边上能量（eV）
pub fn ktoe(k: f64) -> f64 {
    k * k / ETOK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        // 14 Å⁻¹ 约为边上 746.76 eV
        assert!((ktoe(14.0) - 746.757).abs() < 1e-2);
        assert!((etok(746.757) - 14.0).abs() < 1e-4);
    }

    #[test]
    fn test_below_edge_is_zero() {
        assert_eq!(etok(0.0), 0.0);
        assert_eq!(etok(-30.0), 0.0);
    }

    #[test]
    fn test_round_trip() {
        for &e in &[0.0, 0.5, 15.3, 100.0, 746.75, 2500.0] {
            assert!((ktoe(etok(e)) - e).abs() < 1e-9, "round trip failed for {}", e);
        }
        for &k in &[0.0, 2.0, 8.5, 16.0] {
            assert!((etok(ktoe(k)) - k).abs() < 1e-9);
        }
    }
}

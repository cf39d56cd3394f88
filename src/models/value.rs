//! # 带单位的网格取值
//!
//! 扫描边界、步长和积分时间可以写成普通数值（eV 或秒），
//! 也可以写成以 `k` 结尾的光电子波数值（如 `14k`、`0.05k`）。
//! 文本只在读入时解码一次，之后统一使用 [`GridValue`]。
//!
//! ## 依赖关系
//! - 被 `parsers/scan.rs`, `grid/builder.rs` 使用
//! - 无外部模块依赖

use crate::error::{Result, XafsGridError};

use std::fmt;
use std::str::FromStr;

/// 扫描网格中的单个取值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridValue {
    /// 能量（eV，相对边能）或时间（秒）
    Energy(f64),
    /// 波数（Å⁻¹），积分时间中表示比例系数
    Wavenumber(f64),
}

impl GridValue {
    /// 数值部分（不含单位）
    pub fn value(&self) -> f64 {
        match self {
            GridValue::Energy(v) | GridValue::Wavenumber(v) => *v,
        }
    }

    /// 是否为波数单位
    pub fn is_wavenumber(&self) -> bool {
        matches!(self, GridValue::Wavenumber(_))
    }

    /// 解析空白分隔的取值列表（INI 文件中的写法）
    pub fn parse_list(text: &str) -> Result<Vec<GridValue>> {
        text.split_whitespace().map(str::parse).collect()
    }
}

impl FromStr for GridValue {
    type Err = XafsGridError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let (number, wavenumber) = match token.strip_suffix(['k', 'K']) {
            Some(rest) => (rest, true),
            None => (token, false),
        };

        let value: f64 = number
            .parse()
            .map_err(|_| XafsGridError::InvalidGridValue(token.to_string()))?;

        if !value.is_finite() {
            return Err(XafsGridError::InvalidGridValue(token.to_string()));
        }

        Ok(if wavenumber {
            GridValue::Wavenumber(value)
        } else {
            GridValue::Energy(value)
        })
    }
}

impl fmt::Display for GridValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridValue::Energy(v) => write!(f, "{}", v),
            GridValue::Wavenumber(v) => write!(f, "{}k", v),
        }
    }
}

/// 以空格连接取值列表，用于回显和日志
pub fn join_values(values: &[GridValue]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_tagged() {
        assert_eq!("-30".parse::<GridValue>().unwrap(), GridValue::Energy(-30.0));
        assert_eq!("15.3".parse::<GridValue>().unwrap(), GridValue::Energy(15.3));
        assert_eq!("14k".parse::<GridValue>().unwrap(), GridValue::Wavenumber(14.0));
        assert_eq!(
            " 0.05K ".parse::<GridValue>().unwrap(),
            GridValue::Wavenumber(0.05)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("k".parse::<GridValue>().is_err());
        assert!("fourteen".parse::<GridValue>().is_err());
        assert!("1.2.3k".parse::<GridValue>().is_err());
        assert!("infk".parse::<GridValue>().is_err());
        assert!("NaN".parse::<GridValue>().is_err());
    }

    #[test]
    fn test_parse_list() {
        let values = GridValue::parse_list("-200 -30  15.3\t14k").unwrap();
        assert_eq!(
            values,
            vec![
                GridValue::Energy(-200.0),
                GridValue::Energy(-30.0),
                GridValue::Energy(15.3),
                GridValue::Wavenumber(14.0),
            ]
        );
        assert!(GridValue::parse_list("").unwrap().is_empty());
    }

    #[test]
    fn test_display_matches_ini_notation() {
        let values = GridValue::parse_list("-200 -30 15.3 14k").unwrap();
        assert_eq!(join_values(&values), "-200 -30 15.3 14k");
        assert_eq!(GridValue::Wavenumber(0.05).to_string(), "0.05k");
    }
}

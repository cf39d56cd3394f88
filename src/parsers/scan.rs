//! # 扫描参数读取
//!
//! 从 INI 文件的 `[scan]` 段读取扫描序列元数据，未给出的键使用默认值，
//! 命令行覆盖项优先于文件内容。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `parsers/ini.rs` 解析文件
//! - 使用 `sequence/` 解析 `start = next`

use crate::error::{Result, XafsGridError};
use crate::models::{FoundKeys, GridValue, ScanOverrides, ScanParameters};
use crate::parsers::ini::{self, IniDocument};
use crate::sequence;

use std::path::{Path, PathBuf};
use std::str::FromStr;

const SECTION: &str = "scan";

/// 读取扫描参数文件
pub fn read_scan_file(
    path: &Path,
    overrides: &ScanOverrides,
) -> Result<(ScanParameters, FoundKeys)> {
    let doc = ini::read_ini_file(path)?;
    scan_parameters_from_ini(&doc, &path.display().to_string(), overrides)
}

/// 从已解析的 INI 文档构造扫描参数
pub fn scan_parameters_from_ini(
    doc: &IniDocument,
    source_name: &str,
    overrides: &ScanOverrides,
) -> Result<(ScanParameters, FoundKeys)> {
    if !doc.has_section(SECTION) {
        return Err(XafsGridError::ParseError {
            format: "ini".to_string(),
            path: source_name.to_string(),
            reason: "missing [scan] section".to_string(),
        });
    }

    let reader = SectionReader { doc, source_name };
    let mut params = ScanParameters::default();
    let mut found = FoundKeys::new();

    // ----- 扫描区段
    for (key, target, given) in [
        ("bounds", &mut params.bounds, &overrides.bounds),
        ("steps", &mut params.steps, &overrides.steps),
        ("times", &mut params.times, &overrides.times),
    ] {
        if let Some(values) = given {
            *target = values.clone();
            found.mark(key);
        } else if let Some(text) = doc.get(SECTION, key) {
            *target = GridValue::parse_list(text).map_err(|e| reader.error(key, &e.to_string()))?;
            found.mark(key);
        }
    }

    // ----- 字符串
    for (key, target) in [
        ("experimenters", &mut params.experimenters),
        ("element", &mut params.element),
        ("edge", &mut params.edge),
        ("filename", &mut params.filename),
        ("comment", &mut params.comment),
        ("mode", &mut params.mode),
        ("sample", &mut params.sample),
        ("prep", &mut params.prep),
    ] {
        if let Some(text) = doc.get(SECTION, key) {
            *target = text.to_string();
            found.mark(key);
        }
    }
    if let Some(text) = doc.get(SECTION, "folder") {
        params.folder = PathBuf::from(text);
        found.mark("folder");
    }
    apply_override(&mut params.folder, &overrides.folder, "folder", &mut found);
    apply_override(&mut params.filename, &overrides.filename, "filename", &mut found);
    apply_override(&mut params.mode, &overrides.mode, "mode", &mut found);

    // ----- 整数
    for (key, target) in [("nscans", &mut params.nscans), ("npoints", &mut params.npoints)] {
        if let Some(value) = reader.number::<u32>(key)? {
            *target = value;
            found.mark(key);
        }
    }
    apply_override(&mut params.nscans, &overrides.nscans, "nscans", &mut found);

    // ----- 浮点数
    for (key, target) in [
        ("e0", &mut params.e0),
        ("inttime", &mut params.inttime),
        ("dwell", &mut params.dwell),
        ("delay", &mut params.delay),
    ] {
        if let Some(value) = reader.number::<f64>(key)? {
            *target = value;
            found.mark(key);
        }
    }
    apply_override(&mut params.e0, &overrides.e0, "e0", &mut found);

    // ----- 布尔
    for (key, target) in [
        ("snapshots", &mut params.snapshots),
        ("htmlpage", &mut params.htmlpage),
        ("bothways", &mut params.bothways),
        ("channelcut", &mut params.channelcut),
    ] {
        if let Some(value) = doc.get_bool(SECTION, key)? {
            *target = value;
            found.mark(key);
        }
    }
    apply_override(&mut params.bothways, &overrides.bothways, "bothways", &mut found);

    // ----- 起始编号（整数或 next），依赖 folder 与 filename
    let start = overrides
        .start
        .as_deref()
        .or_else(|| doc.get(SECTION, "start"));
    if let Some(text) = start {
        params.start = resolve_start(text, &params.folder, &params.filename)
            .map_err(|e| reader.error("start", &e.to_string()))?;
        found.mark("start");
    }

    Ok((params, found))
}

/// 解析起始编号：`next` 取文件夹中已有数据文件的下一个编号
fn resolve_start(text: &str, folder: &Path, filename: &str) -> Result<u32> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("next") {
        return sequence::next_index(folder, filename);
    }
    text.parse::<u32>().map_err(|_| {
        XafsGridError::InvalidArgument(format!(
            "start value must be a positive integer or \"next\", got '{}'",
            text
        ))
    })
}

fn apply_override<T: Clone>(target: &mut T, given: &Option<T>, key: &str, found: &mut FoundKeys) {
    if let Some(value) = given {
        *target = value.clone();
        found.mark(key);
    }
}

/// `[scan]` 段读取辅助
struct SectionReader<'a> {
    doc: &'a IniDocument,
    source_name: &'a str,
}

impl SectionReader<'_> {
    fn number<T: FromStr>(&self, key: &str) -> Result<Option<T>> {
        match self.doc.get(SECTION, key) {
            None => Ok(None),
            Some(text) => text
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|_| self.error(key, &format!("'{}' is not a valid number", text))),
        }
    }

    fn error(&self, key: &str, reason: &str) -> XafsGridError {
        XafsGridError::ParseError {
            format: "ini".to_string(),
            path: self.source_name.to_string(),
            reason: format!("{}: {}", key, reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::ini::parse_ini_content;
    use std::fs;

    fn parse(content: &str, overrides: &ScanOverrides) -> Result<(ScanParameters, FoundKeys)> {
        let doc = parse_ini_content(content, "test.ini")?;
        scan_parameters_from_ini(&doc, "test.ini", overrides)
    }

    #[test]
    fn test_full_scan_section() {
        let content = r#"
[scan]
folder        = /tmp
filename      = FeS2
experimenters = Bruce, Joe
e0            = 7112
element       = Fe
edge          = K
sample        = FeS2 pellet
mode          = fluorescence
nscans        = 6
start         = 12
bounds        = -200 -30 -10 15.3 14k
steps         = 10 2 0.3 0.05k
times         = 0.5 0.5 0.5 0.25k
bothways      = yes
snapshots     = false
"#;
        let (p, found) = parse(content, &ScanOverrides::default()).unwrap();
        assert_eq!(p.filename, "FeS2");
        assert_eq!(p.folder, PathBuf::from("/tmp"));
        assert_eq!(p.nscans, 6);
        assert_eq!(p.start, 12);
        assert_eq!(p.bounds.len(), 5);
        assert_eq!(p.steps[3], GridValue::Wavenumber(0.05));
        assert!(p.bothways);
        assert!(!p.snapshots);
        // 未给出的键保持默认
        assert!(p.htmlpage);
        assert_eq!(p.delay, 0.1);
        assert!(found.contains("bounds"));
        assert!(found.contains("start"));
        assert!(!found.contains("prep"));
    }

    #[test]
    fn test_defaults_when_missing() {
        let (p, found) = parse("[scan]\ne0 = 8979\n", &ScanOverrides::default()).unwrap();
        assert_eq!(p.e0, 8979.0);
        assert_eq!(p.bounds, ScanParameters::default().bounds);
        assert!(!found.contains("bounds"));
        assert!(!found.contains("start"));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = ScanOverrides {
            e0: Some(8333.0),
            nscans: Some(3),
            filename: Some("NiO".to_string()),
            start: Some("4".to_string()),
            bounds: Some(GridValue::parse_list("-10 40").unwrap()),
            ..ScanOverrides::default()
        };
        let (p, found) = parse("[scan]\ne0 = 7112\nnscans = 1\n", &overrides).unwrap();
        assert_eq!(p.e0, 8333.0);
        assert_eq!(p.nscans, 3);
        assert_eq!(p.filename, "NiO");
        assert_eq!(p.start, 4);
        assert_eq!(p.bounds.len(), 2);
        assert!(found.contains("filename"));
        assert!(found.contains("bounds"));
    }

    #[test]
    fn test_start_next() {
        let dir = std::env::temp_dir().join("xafsgrid-scan-start-next");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Cu.001"), "").unwrap();
        fs::write(dir.join("Cu.002"), "").unwrap();

        let content = format!(
            "[scan]\nfolder = {}\nfilename = Cu\nstart = next\n",
            dir.display()
        );
        let (p, _) = parse(&content, &ScanOverrides::default()).unwrap();
        assert_eq!(p.start, 3);
    }

    #[test]
    fn test_bad_values() {
        let defaults = ScanOverrides::default();
        assert!(parse("[scan]\nstart = first\n", &defaults).is_err());
        assert!(parse("[scan]\nnscans = many\n", &defaults).is_err());
        assert!(parse("[scan]\ne0 = 7112eV\n", &defaults).is_err());
        assert!(parse("[scan]\nbounds = -200 abc\n", &defaults).is_err());
        assert!(parse("[scan]\nbothways = sometimes\n", &defaults).is_err());
        assert!(parse("[other]\ne0 = 7112\n", &defaults).is_err());
    }
}

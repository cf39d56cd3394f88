//! # check 命令实现
//!
//! 在开始测量前检查扫描序列参数：必需键、文件名、数据文件夹、
//! 已存在的数据文件、网格和测量模式。
//!
//! ## 依赖关系
//! - 使用 `cli/check.rs` 定义的参数
//! - 使用 `sequence/` 的检查函数
//! - 使用 `parsers/scan.rs`

use crate::cli::check::CheckArgs;
use crate::error::{Result, XafsGridError};
use crate::models::value::join_values;
use crate::models::{FoundKeys, ScanParameters};
use crate::parsers::scan::read_scan_file;
use crate::sequence::{self, files, plan::SequencePlan};
use crate::utils::output;

/// 单项检查结果
#[derive(Debug, Clone)]
struct CheckItem {
    name: &'static str,
    passed: bool,
    detail: String,
}

impl CheckItem {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed: true,
            detail: detail.into(),
        }
    }

    fn fail(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed: false,
            detail: detail.into(),
        }
    }
}

/// 执行 check 命令
pub fn execute(args: CheckArgs) -> Result<()> {
    output::print_header("Scan Sequence Check");

    if !args.scan.ini.is_file() {
        return Err(XafsGridError::FileNotFound {
            path: args.scan.ini.display().to_string(),
        });
    }

    let overrides = args.scan.overrides()?;
    let (params, found) = read_scan_file(&args.scan.ini, &overrides)?;

    print_parameter_table(&params);

    let items = run_checks(&params, &found);
    print_check_table(&items);

    let failed = items.iter().filter(|i| !i.passed).count();
    if failed > 0 {
        return Err(XafsGridError::Other(format!(
            "{} of {} checks failed for {}",
            failed,
            items.len(),
            args.scan.ini.display()
        )));
    }

    output::print_success(&format!("All {} checks passed", items.len()));
    Ok(())
}

/// 依次执行所有检查
fn run_checks(params: &ScanParameters, found: &FoundKeys) -> Vec<CheckItem> {
    let mut items = Vec::new();

    let missing = sequence::missing_keys(found);
    items.push(if missing.is_empty() {
        CheckItem::pass("keywords", "all required keywords present")
    } else {
        CheckItem::fail("keywords", format!("missing: {}", missing.join(", ")))
    });

    items.push(match files::validate_filename(&params.filename) {
        Ok(()) => CheckItem::pass("filename", params.filename.clone()),
        Err(e) => CheckItem::fail("filename", e.to_string()),
    });

    items.push(if params.folder.is_dir() {
        CheckItem::pass("folder", params.folder.display().to_string())
    } else {
        CheckItem::fail(
            "folder",
            format!("{} does not exist", params.folder.display()),
        )
    });

    let (mode, fallback) = params.measurement_mode();
    items.push(if fallback {
        CheckItem::fail(
            "mode",
            format!("unknown mode '{}', would measure {}", params.mode, mode),
        )
    } else {
        let detector = if mode.uses_fluorescence_detector() {
            "fluorescence detector required"
        } else {
            "ion chambers only"
        };
        CheckItem::pass("mode", format!("{} ({})", mode, detector))
    });

    match super::build_grid(params) {
        Ok(grid) if grid.is_empty() => {
            items.push(CheckItem::fail("grid", "scan grid has no points"));
        }
        Ok(grid) => {
            items.push(CheckItem::pass(
                "grid",
                format!("{} points, {:.1} min/scan", grid.len(), grid.approx_minutes),
            ));

            items.push(match SequencePlan::new(params, &grid) {
                Ok(plan) => {
                    let existing = plan.existing();
                    if existing.is_empty() {
                        CheckItem::pass("data files", "no existing files would be overwritten")
                    } else {
                        let names: Vec<&str> =
                            existing.iter().map(|s| s.file_name.as_str()).collect();
                        CheckItem::fail("data files", format!("already exist: {}", names.join(", ")))
                    }
                }
                Err(e) => CheckItem::fail("data files", e.to_string()),
            });
        }
        Err(e) => items.push(CheckItem::fail("grid", e.to_string())),
    }

    items
}

fn print_parameter_table(params: &ScanParameters) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct ParamRow {
        #[tabled(rename = "Parameter")]
        key: &'static str,
        #[tabled(rename = "Value")]
        value: String,
    }

    let rows = vec![
        ParamRow { key: "element", value: format!("{} {}", params.element, params.edge) },
        ParamRow { key: "e0", value: format!("{:.2}", params.e0) },
        ParamRow { key: "bounds", value: join_values(&params.bounds) },
        ParamRow { key: "steps", value: join_values(&params.steps) },
        ParamRow { key: "times", value: join_values(&params.times) },
        ParamRow { key: "folder", value: params.folder.display().to_string() },
        ParamRow { key: "filename", value: params.filename.clone() },
        ParamRow { key: "nscans", value: params.nscans.to_string() },
        ParamRow { key: "start", value: params.start.to_string() },
        ParamRow { key: "mode", value: params.mode.clone() },
        ParamRow { key: "bothways", value: params.bothways.to_string() },
    ];

    println!("{}", Table::new(&rows));
}

fn print_check_table(items: &[CheckItem]) {
    use colored::Colorize;
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct CheckRow {
        #[tabled(rename = "Check")]
        name: &'static str,
        #[tabled(rename = "Status")]
        status: String,
        #[tabled(rename = "Detail")]
        detail: String,
    }

    let rows: Vec<CheckRow> = items
        .iter()
        .map(|item| CheckRow {
            name: item.name,
            status: if item.passed {
                "ok".green().to_string()
            } else {
                "FAIL".red().bold().to_string()
            },
            detail: item.detail.clone(),
        })
        .collect();

    println!("{}", Table::new(&rows));
}

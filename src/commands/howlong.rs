//! # howlong 命令实现
//!
//! 估算一个扫描序列（或一个目录下所有序列）的耗时。
//!
//! ## 依赖关系
//! - 使用 `cli/howlong.rs` 定义的参数
//! - 使用 `batch/` 处理目录
//! - 使用 `sequence/` 的 SequencePlan 与 ini_sanity

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::howlong::HowlongArgs;
use crate::error::{Result, XafsGridError};
use crate::models::ScanOverrides;
use crate::parsers::ini::{self, IniDocument};
use crate::parsers::scan::{read_scan_file, scan_parameters_from_ini};
use crate::sequence::{self, plan::SequencePlan};
use crate::utils::output;

use std::path::{Path, PathBuf};

/// 单个 INI 文件的耗时估计
#[derive(Debug, Clone)]
struct SequenceEstimate {
    path: PathBuf,
    points: usize,
    minutes_per_scan: f64,
    nscans: usize,
    hours: f64,
}

/// 执行 howlong 命令
pub fn execute(args: HowlongArgs) -> Result<()> {
    if args.input.is_file() {
        return execute_single(&args.input);
    }
    if !args.input.is_dir() {
        return Err(XafsGridError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    output::print_header("Sequence Duration");

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)
        .recursive(args.recursive)
        .collect()?;

    if files.is_empty() {
        output::print_warning(&format!(
            "No files matching '{}' in {}",
            args.pattern,
            args.input.display()
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} INI files", files.len()));

    let mut runner = BatchRunner::new(args.jobs);
    if args.quiet {
        runner = runner.quiet();
    }
    let result = runner.run(files, process_file)?;

    print_estimate_table(&result.outputs);

    let total_hours: f64 = result.outputs.iter().map(|e| e.hours).sum();
    let total_scans: usize = result.outputs.iter().map(|e| e.nscans).sum();
    output::print_block(&format!(
        "All {} will take about {:.1} hours",
        sequence::plan::inflect("scan", total_scans),
        total_hours
    ));

    for reason in &result.skipped {
        output::print_warning(reason);
    }
    for (path, err) in &result.failures {
        output::print_error(&format!("{}: {}", path, err));
    }

    output::print_separator();
    output::print_done(&format!(
        "Estimated {}/{} files ({} skipped, {} failed)",
        result.success(),
        result.total(),
        result.skipped.len(),
        result.failed()
    ));

    Ok(())
}

/// 单文件模式：打印说明文字
fn execute_single(path: &Path) -> Result<()> {
    let (params, found) = read_scan_file(path, &ScanOverrides::default())?;
    sequence::ini_sanity(&found)?;

    let grid = super::build_grid(&params)?;
    let plan = SequencePlan::new(&params, &grid)?;
    output::print_block(&plan.summary());
    Ok(())
}

/// 批量模式下处理单个文件，没有 `[scan]` 段的 INI 文件跳过
fn process_file(path: &PathBuf) -> ProcessResult<SequenceEstimate> {
    let doc = match ini::read_ini_file(path) {
        Ok(doc) => doc,
        Err(e) => return ProcessResult::Failed(path.display().to_string(), e.to_string()),
    };
    if !doc.has_section("scan") {
        return ProcessResult::Skipped(format!("{}: no [scan] section", path.display()));
    }
    match estimate(&doc, path) {
        Ok(est) => ProcessResult::Success(est),
        Err(e) => ProcessResult::Failed(path.display().to_string(), e.to_string()),
    }
}

/// 估算单个文件
fn estimate(doc: &IniDocument, path: &Path) -> Result<SequenceEstimate> {
    let (params, found) =
        scan_parameters_from_ini(doc, &path.display().to_string(), &ScanOverrides::default())?;
    sequence::ini_sanity(&found)?;

    let grid = super::build_grid(&params)?;
    let plan = SequencePlan::new(&params, &grid)?;

    Ok(SequenceEstimate {
        path: path.to_path_buf(),
        points: plan.points,
        minutes_per_scan: plan.minutes_per_scan,
        nscans: plan.scans.len(),
        hours: plan.total_hours(),
    })
}

fn print_estimate_table(estimates: &[SequenceEstimate]) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct EstimateRow {
        #[tabled(rename = "File")]
        file: String,
        #[tabled(rename = "Points")]
        points: usize,
        #[tabled(rename = "Min/scan")]
        minutes: String,
        #[tabled(rename = "Scans")]
        nscans: usize,
        #[tabled(rename = "Hours")]
        hours: String,
    }

    let rows: Vec<EstimateRow> = estimates
        .iter()
        .map(|e| EstimateRow {
            file: e
                .path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            points: e.points,
            minutes: format!("{:.1}", e.minutes_per_scan),
            nscans: e.nscans,
            hours: format!("{:.2}", e.hours),
        })
        .collect();

    if !rows.is_empty() {
        println!("{}", Table::new(&rows));
    }
}

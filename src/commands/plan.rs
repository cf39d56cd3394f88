//! # plan 命令实现
//!
//! 列出扫描序列中每次扫描的数据文件和方向，给出耗时估计，
//! 可选地为每次扫描写出实际走点顺序。
//!
//! ## 依赖关系
//! - 使用 `cli/plan.rs` 定义的参数
//! - 使用 `sequence/plan.rs`, `grid/channelcut.rs`, `grid/export.rs`

use crate::cli::plan::PlanArgs;
use crate::error::{Result, XafsGridError};
use crate::grid::{self, MonoCrystal};
use crate::models::{ScanGrid, ScanParameters};
use crate::parsers::scan::read_scan_file;
use crate::sequence::{self, files, plan::SequencePlan};
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

/// 执行 plan 命令
pub fn execute(args: PlanArgs) -> Result<()> {
    output::print_header("Scan Sequence Plan");

    if !args.scan.ini.is_file() {
        return Err(XafsGridError::FileNotFound {
            path: args.scan.ini.display().to_string(),
        });
    }

    let overrides = args.scan.overrides()?;
    let (params, found) = read_scan_file(&args.scan.ini, &overrides)?;
    sequence::ini_sanity(&found)?;
    files::validate_filename(&params.filename)?;

    let (mode, fallback) = params.measurement_mode();
    if fallback {
        output::print_warning(&format!(
            "Unknown measurement mode '{}', measuring {}",
            params.mode, mode
        ));
    }

    let grid = super::build_grid(&params)?;
    let plan = SequencePlan::new(&params, &grid)?;

    print_scan_table(&plan);

    if params.channelcut {
        let crystal = MonoCrystal::from(args.crystal);
        let energy = grid::channelcut_energy(params.e0, &params.bounds, crystal)?;
        output::print_info(&format!(
            "Pseudo channel cut energy for {}: {:.1} eV",
            crystal, energy
        ));
    }

    let existing = plan.existing();
    if !existing.is_empty() {
        output::print_warning(&format!(
            "{} already exist in {}",
            sequence::plan::inflect("data file", existing.len()),
            params.folder.display()
        ));
    }

    output::print_block(&plan.summary());

    if let Some(ref dir) = args.trajectory_dir {
        let written = write_trajectories(&plan, &grid, dir, args.overwrite)?;
        output::print_done(&format!(
            "Wrote {} to {}",
            sequence::plan::inflect("trajectory file", written.len()),
            dir.display()
        ));
    }

    log_sequence_start(&params, &plan);
    Ok(())
}

/// 为每次扫描写出 `<数据文件名>.csv`，返回写出的路径
fn write_trajectories(
    plan: &SequencePlan,
    grid: &ScanGrid,
    dir: &Path,
    overwrite: bool,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| XafsGridError::FileWriteError {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut written = Vec::new();
    for scan in &plan.scans {
        let path = dir.join(format!("{}.csv", scan.file_name));
        if path.exists() && !overwrite {
            output::print_warning(&format!("Skipping existing {}", path.display()));
            continue;
        }
        grid::export::trajectory_to_csv(&plan.trajectory(scan, grid), &path)?;
        written.push(path);
    }
    Ok(written)
}

/// 在实验日志中记录序列概要
fn log_sequence_start(params: &ScanParameters, plan: &SequencePlan) {
    log::info!(
        "planned {} of {} {} ({}), e0 = {:.2}, {} points, {:.1} min/scan",
        sequence::plan::inflect("scan", plan.scans.len()),
        params.element,
        params.edge,
        params.sample,
        params.e0,
        plan.points,
        plan.minutes_per_scan
    );
}

fn print_scan_table(plan: &SequencePlan) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct ScanRow {
        #[tabled(rename = "#")]
        count: u32,
        #[tabled(rename = "File")]
        file: String,
        #[tabled(rename = "Direction")]
        direction: String,
        #[tabled(rename = "Exists")]
        exists: &'static str,
    }

    let rows: Vec<ScanRow> = plan
        .scans
        .iter()
        .map(|s| ScanRow {
            count: s.count,
            file: s.file_name.clone(),
            direction: s.direction.to_string(),
            exists: if s.path.exists() { "yes" } else { "" },
        })
        .collect();

    if !rows.is_empty() {
        println!("{}", Table::new(&rows));
    }
}

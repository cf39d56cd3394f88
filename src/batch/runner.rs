//! # 批量执行器
//!
//! 并行执行批量处理任务。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代，结果保持输入顺序
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/howlong.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{Result, XafsGridError};
use crate::utils::progress;

use rayon::prelude::*;
use std::path::PathBuf;

/// 单个文件处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult<T> {
    /// 处理成功
    Success(T),
    /// 跳过
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (文件路径, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug)]
pub struct BatchResult<T> {
    /// 成功的输出，按输入顺序
    pub outputs: Vec<T>,
    /// 跳过原因
    pub skipped: Vec<String>,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl<T> Default for BatchResult<T> {
    fn default() -> Self {
        Self {
            outputs: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> BatchResult<T> {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult<T>) {
        match result {
            ProcessResult::Success(output) => self.outputs.push(output),
            ProcessResult::Skipped(reason) => self.skipped.push(reason),
            ProcessResult::Failed(path, err) => self.failures.push((path, err)),
        }
    }

    pub fn success(&self) -> usize {
        self.outputs.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success() + self.skipped.len() + self.failed()
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
    /// 是否显示进度条
    show_progress: bool,
}

impl BatchRunner {
    /// 创建新的批量执行器
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self {
            jobs,
            show_progress: true,
        }
    }

    /// 关闭进度条
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// 并行处理文件列表
    pub fn run<T, F>(&self, files: Vec<PathBuf>, processor: F) -> Result<BatchResult<T>>
    where
        T: Send,
        F: Fn(&PathBuf) -> ProcessResult<T> + Sync + Send,
    {
        let pb = if self.show_progress {
            progress::create_progress_bar(files.len() as u64, "Processing")
        } else {
            indicatif::ProgressBar::hidden()
        };

        // 配置 rayon 线程池
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| XafsGridError::Other(format!("Failed to start worker pool: {}", e)))?;

        let results: Vec<ProcessResult<T>> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let result = processor(file);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        // 汇总结果
        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_keeps_order_and_counts() {
        let files: Vec<PathBuf> = (0..20).map(|i| PathBuf::from(format!("{}.ini", i))).collect();
        let runner = BatchRunner::new(4).quiet();

        let result = runner
            .run(files, |path| {
                let stem: usize = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0);
                match stem % 5 {
                    0 => ProcessResult::Failed(path.display().to_string(), "bad".to_string()),
                    1 => ProcessResult::Skipped(format!("{} skipped", stem)),
                    _ => ProcessResult::Success(stem),
                }
            })
            .unwrap();

        assert_eq!(result.total(), 20);
        assert_eq!(result.failed(), 4);
        assert_eq!(result.skipped.len(), 4);
        assert_eq!(result.skipped[0], "1 skipped");
        assert_eq!(result.success(), 12);
        assert_eq!(result.outputs[..3], [2, 3, 4]);
        assert_eq!(result.failures[0].0, "0.ini");
    }
}

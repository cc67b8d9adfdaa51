//! # 批量结果汇总
//!
//! 在线程池与结果聚合器全部结束后，扫描一次任务列表，统计并输出结果。
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `utils/output.rs` 的 `LinePrinter`

use super::runner::{Job, JobOutcome};
use crate::utils::output::{LinePrinter, Segment, Style};

/// 批量处理结果统计
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// 因取消而未开始的任务
    pub skipped: usize,
    /// 失败原因（按任务顺序，仅在开启时收集）
    pub failures: Vec<String>,
}

impl BatchResult {
    /// 统计任务列表
    pub fn from_jobs(jobs: &[Job], list_failures: bool) -> Self {
        let mut result = BatchResult {
            total: jobs.len(),
            skipped: jobs.iter().filter(|j| j.outcome.is_pending()).count(),
            ..BatchResult::default()
        };

        for job in jobs {
            match &job.outcome {
                JobOutcome::Succeeded => result.succeeded += 1,
                JobOutcome::Failed(err) => {
                    result.failed += 1;
                    if list_failures {
                        result.failures.push(err.to_string());
                    }
                }
                JobOutcome::Pending => {}
            }
        }
        result
    }
}

/// 输出汇总行及失败原因
pub fn report(result: &BatchResult, printer: &mut dyn LinePrinter) {
    let mut line = vec![
        Segment::plain("Replays processed. "),
        Segment::styled("Total:", Style::Label),
        Segment::plain(format!(" {}, ", result.total)),
        Segment::styled("OK:", Style::Success),
        Segment::plain(format!(" {}, ", result.succeeded)),
        Segment::styled("Failed:", Style::Failure),
        Segment::plain(format!(" {}", result.failed)),
    ];
    if result.skipped > 0 {
        line.push(Segment::plain(", "));
        line.push(Segment::styled("Skipped:", Style::Accent));
        line.push(Segment::plain(format!(" {}", result.skipped)));
    }
    printer.print_line(&line);

    for failure in &result.failures {
        printer.print_line(&[Segment::styled(failure.as_str(), Style::Failure)]);
    }
}

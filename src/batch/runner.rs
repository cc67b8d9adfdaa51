//! # 批量执行器
//!
//! 有界队列 + 固定数量 worker 的并行转换流水线。
//!
//! ## 结构
//! ```text
//! producer ──jobs(cap=P)──▶ worker × P ──results(cap=P)──▶ aggregator ──▶ progress
//! ```
//! - producer: 将每个任务的 `&mut Job` 依次放入队列，结束后关闭队列
//! - worker: rayon 线程池中的 P 个线程，取任务、调用处理函数、写回结果
//! - aggregator: 单线程顺序消费结果，唯一修改进度条的线程
//!
//! 每个 `Job` 以独占借用的形式在通道中流动，同一时刻只有一个线程持有它。
//! 所有线程都在 `std::thread::scope` 内结束后，调用方才能再次读取任务列表。
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `crossbeam-channel` 作为有界队列
//! - 使用 `rayon` 线程池运行 worker
//! - 使用 `utils/progress.rs` 的 `ProgressSink`

use super::cancel::CancelToken;
use crate::config::worker_count;
use crate::error::{ConvertError, Result};
use crate::utils::progress::ProgressSink;

use crossbeam_channel::{bounded, Receiver, Sender};
use std::path::PathBuf;
use std::thread;
use tracing::{debug, info, warn};

/// 任务结果
#[derive(Debug, Default)]
pub enum JobOutcome {
    /// 尚未处理（排队中，或因取消从未开始）
    #[default]
    Pending,
    Succeeded,
    Failed(ConvertError),
}

impl JobOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, JobOutcome::Pending)
    }
}

/// 单个批量任务
#[derive(Debug)]
pub struct Job {
    /// 输入目录
    pub dir: PathBuf,
    /// 输入文件名
    pub file_name: PathBuf,
    pub outcome: JobOutcome,
}

impl Job {
    pub fn new(dir: PathBuf, file_name: PathBuf) -> Self {
        Self {
            dir,
            file_name,
            outcome: JobOutcome::Pending,
        }
    }

    /// 输入文件完整路径
    pub fn input_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// worker 数量
    workers: usize,
    cancel: CancelToken,
}

impl BatchRunner {
    /// 创建新的批量执行器，`parallelism` 为 0 时使用逻辑核心数
    pub fn new(parallelism: usize) -> Self {
        Self {
            workers: worker_count(parallelism),
            cancel: CancelToken::new(),
        }
    }

    /// 使用外部取消令牌
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// 并行处理任务列表，返回已处理的任务数
    ///
    /// 每个任务的结果写回 `job.outcome`。返回时所有线程均已退出。
    pub fn run<F>(
        &self,
        jobs: &mut [Job],
        progress: &mut (dyn ProgressSink + Send),
        processor: F,
    ) -> Result<usize>
    where
        F: Fn(&Job) -> Result<()> + Sync,
    {
        let workers = self.workers;
        let cancel = &self.cancel;
        let processor = &processor;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("bsor-worker-{}", i))
            .build()
            .map_err(|e| ConvertError::ThreadPool(e.to_string()))?;

        info!(jobs = jobs.len(), workers, "starting batch");

        let (job_tx, job_rx) = bounded::<&mut Job>(workers);
        let (result_tx, result_rx) = bounded::<&mut Job>(workers);

        let processed = thread::scope(|s| {
            // producer
            s.spawn(move || {
                for job in jobs {
                    if cancel.is_cancelled() {
                        warn!("dispatch stopped by cancellation");
                        break;
                    }
                    if job_tx.send(job).is_err() {
                        break;
                    }
                }
                // job_tx 在此处 drop，队列关闭
            });

            // aggregator
            let aggregator = s.spawn(move || {
                let mut processed = 0;
                for _job in result_rx.iter() {
                    progress.tick();
                    processed += 1;
                }
                progress.finish();
                processed
            });

            pool.scope(|ps| {
                for id in 0..workers {
                    let jobs = job_rx.clone();
                    let results = result_tx.clone();
                    ps.spawn(move |_| worker(id, jobs, results, processor, cancel));
                }
            });

            // 所有 worker 已退出：关闭结果流并释放队列接收端
            drop(job_rx);
            drop(result_tx);

            aggregator.join()
        });

        match processed {
            Ok(processed) => Ok(processed),
            Err(_) => Err(ConvertError::ThreadPool(
                "result aggregator panicked".to_string(),
            )),
        }
    }
}

/// worker 循环：取任务 → 处理 → 写回结果 → 发布
fn worker<'a, F>(
    id: usize,
    jobs: Receiver<&'a mut Job>,
    results: Sender<&'a mut Job>,
    processor: &F,
    cancel: &CancelToken,
) where
    F: Fn(&Job) -> Result<()> + Sync,
{
    for job in jobs.iter() {
        if cancel.is_cancelled() {
            debug!(worker = id, "cancelled, leaving remaining jobs pending");
            break;
        }

        job.outcome = match processor(job) {
            Ok(()) => JobOutcome::Succeeded,
            Err(e) => {
                debug!(worker = id, file = %job.file_name.display(), error = %e, "job failed");
                JobOutcome::Failed(e)
            }
        };

        if results.send(job).is_err() {
            break;
        }
    }
}

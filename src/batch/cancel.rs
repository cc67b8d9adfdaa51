//! # 取消令牌
//!
//! 在分发器、worker 和缓冲读取之间共享的停止标志。
//! 取消后：正在处理的任务继续完成，队列中尚未开始的任务保持 Pending。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs`, `converter/mod.rs`, `main.rs` 使用

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 可克隆的取消令牌
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求取消
    #[cfg(test)]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// 处理一次中断信号，返回此前是否已请求过取消
    ///
    /// 第一次中断只置位；再次中断时调用方应立即退出进程。
    pub fn interrupt(&self) -> bool {
        self.cancelled.swap(true, Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

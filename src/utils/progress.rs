//! # 进度条工具
//!
//! 封装 `indicatif` 提供统一的进度条样式，并定义流水线使用的进度接口。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs`, `commands/convert.rs` 使用
//! - 使用 `indicatif` crate

use indicatif::{ProgressBar, ProgressStyle};

/// 进度接口：每处理完一个任务调用一次 `tick`
pub trait ProgressSink {
    fn tick(&mut self);

    fn finish(&mut self) {}
}

impl ProgressSink for ProgressBar {
    fn tick(&mut self) {
        self.inc(1);
    }

    fn finish(&mut self) {
        ProgressBar::finish(self);
    }
}

/// 创建批量转换进度条
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
    )
    .map(|s| s.progress_chars("#>-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

//! # bsor2json - Beat Saber Open Replay 转 JSON 工具
//!
//! 将 .bsor 回放文件转换为 JSON，支持单文件与目录批量并行转换。
//!
//! ## 子命令
//! - `raw`    - 原始回放结构
//! - `events` - 音符 / 撞墙 / 暂停事件流（可附带统计）
//! - `stats`  - 仅统计
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── config.rs   (运行配置)
//!   │     ├── batch/      (批量流水线)
//!   │     └── converter/  (单文件转换服务)
//!   │           ├── parsers/  (BSOR 解码)
//!   │           ├── events/   (事件流与统计)
//!   │           └── models/   (数据模型)
//!   ├── utils/      (输出与进度条)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod config;
mod converter;
mod error;
mod events;
mod models;
mod parsers;
mod utils;

#[cfg(test)]
mod test_support;

use batch::CancelToken;
use clap::Parser;
use cli::Cli;
use std::time::Instant;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    let on_interrupt = move || {
        if handler_token.interrupt() {
            std::process::exit(130);
        }
        utils::output::print_warning("Cancelling, press Ctrl-C again to abort immediately");
    };
    if let Err(e) = ctrlc::set_handler(on_interrupt) {
        warn!("can not install Ctrl-C handler: {}", e);
    }

    let started = Instant::now();
    let result = commands::run(cli.command, &cancel);
    utils::output::print_elapsed(started.elapsed());

    if let Err(e) = result {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}

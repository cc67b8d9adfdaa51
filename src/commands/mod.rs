//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `config.rs`, `batch/`
//! - 子模块: convert

pub mod convert;

use crate::batch::CancelToken;
use crate::cli::Commands;
use crate::converter::ProjectionMode;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands, cancel: &CancelToken) -> Result<()> {
    let (args, mode) = match cmd {
        Commands::Raw(args) => (args, ProjectionMode::Raw),
        Commands::Events(args) => {
            let mode = if args.with_stats {
                ProjectionMode::EventsWithStats
            } else {
                ProjectionMode::Events
            };
            (args.replay, mode)
        }
        Commands::Stats(args) => (args, ProjectionMode::Stats),
    };

    let config = convert::build_config(args, mode)?;
    convert::execute(&config, cancel)
}

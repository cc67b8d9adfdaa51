//! # 转换子命令 CLI 定义
//!
//! `raw` / `events` / `stats` 三个子命令共用同一组参数（通过 `flatten` 嵌入）。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/convert.rs`

use clap::{ArgAction, Args};
use std::path::PathBuf;

/// 输入源参数：文件与目录二选一
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Directory containing bsor files to convert
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Bsor file to convert
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// 所有转换子命令共用的参数
#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output filename (with -f) or directory (with -d); defaults to stdout or the bsor directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(long, default_value_t = false)]
    pub force: bool,

    /// Pretty-print the output JSON; conversion is slower and files are larger
    #[arg(short, long, default_value_t = false)]
    pub pretty: bool,

    /// Read each file into memory before decoding; faster but uses more memory
    #[arg(short, long, default_value_t = true, action = ArgAction::Set)]
    pub buffered: bool,

    /// Number of replays processed in parallel (0 = number of CPU cores)
    #[arg(long, default_value_t = 0)]
    pub parallel: usize,

    /// List failed replays after a directory conversion
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub display_failed: bool,

    /// Disable output coloring
    #[arg(long, default_value_t = false)]
    pub no_color: bool,
}

/// events 子命令参数
#[derive(Args, Debug, Clone)]
pub struct EventsArgs {
    #[command(flatten)]
    pub replay: ReplayArgs,

    /// Add stats to the event stream
    #[arg(short = 's', long, default_value_t = true, action = ArgAction::Set)]
    pub with_stats: bool,
}

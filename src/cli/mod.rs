//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `raw`: 原始回放结构转 JSON
//! - `events`: 音符 / 撞墙 / 暂停事件流（默认附带统计）
//! - `stats`: 仅统计
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: convert

pub mod convert;

use clap::{Parser, Subcommand};

/// bsor2json - Beat Saber Open Replay 转 JSON 工具
#[derive(Parser)]
#[command(name = "bsor2json")]
#[command(version)]
#[command(about = "Convert Beat Saber Open Replay (.bsor) files to JSON", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Convert raw replay data to JSON
    Raw(convert::ReplayArgs),

    /// Simplify replay (notes/walls/pauses events only) and export to JSON
    Events(convert::EventsArgs),

    /// Calculate stats and export to JSON
    Stats(convert::ReplayArgs),
}

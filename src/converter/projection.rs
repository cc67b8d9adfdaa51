//! # 投影模式与 JSON 编码
//!
//! ## 依赖关系
//! - 被 `converter/mod.rs`, `cli/`, `config.rs` 使用
//! - 使用 `events/` 派生事件流和统计
//! - 使用 `serde_json` 序列化

use crate::events::{replay_events, replay_stats};
use crate::models::{Replay, ReplayEventsWithStats, ReplayStats};

use serde::Serialize;
use std::fmt;

/// 输出投影
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionMode {
    /// 解码结构原样输出
    Raw,
    /// 仅音符 / 撞墙 / 暂停事件
    Events,
    /// 事件 + 统计
    EventsWithStats,
    /// 仅统计
    Stats,
}

impl ProjectionMode {
    /// 输出文件名中的模式标记
    pub fn tag(self) -> &'static str {
        match self {
            ProjectionMode::Raw => "raw",
            ProjectionMode::Events => "events",
            ProjectionMode::EventsWithStats => "events_and_stats",
            ProjectionMode::Stats => "stats",
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// 按模式投影并序列化为 JSON 字节（不含结尾换行）
pub fn to_json(replay: Replay, mode: ProjectionMode, pretty: bool) -> serde_json::Result<Vec<u8>> {
    match mode {
        ProjectionMode::Raw => encode(&replay, pretty),
        ProjectionMode::Events => encode(&replay_events(&replay), pretty),
        ProjectionMode::EventsWithStats => {
            let events = replay_events(&replay);
            let stats = replay_stats(&events);
            encode(&ReplayEventsWithStats::new(events, stats), pretty)
        }
        ProjectionMode::Stats => {
            let events = replay_events(&replay);
            let stats = replay_stats(&events);
            encode(
                &ReplayStats {
                    info: events.info,
                    stats,
                },
                pretty,
            )
        }
    }
}

fn encode<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<Vec<u8>> {
    if pretty {
        serde_json::to_vec_pretty(value)
    } else {
        serde_json::to_vec(value)
    }
}

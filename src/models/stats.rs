//! # 统计数据模型
//!
//! ## 依赖关系
//! - 被 `events/stats.rs` 构造
//! - 被 `converter/projection.rs` 序列化

use super::events::{NoteEvent, PauseEvent, ReplayEvents, WallEvent};
use super::replay::Info;
use serde::Serialize;

/// 音符计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NoteCounts {
    /// 非炸弹音符总数
    pub total: usize,
    pub good: usize,
    pub bad: usize,
    pub miss: usize,
    pub bombs: usize,
}

/// 切割得分均值
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CutAverages {
    pub before: f64,
    pub after: f64,
    pub accuracy: f64,
    pub total: f64,
}

/// 单手统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandStats {
    pub good_cuts: usize,
    pub averages: CutAverages,
    /// 百分比
    pub fc_accuracy: f64,
}

/// 暂停汇总
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseStats {
    pub count: usize,
    pub total_duration: i64,
}

/// 回放统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub notes: NoteCounts,
    pub wall_hits: usize,
    pub pauses: PauseStats,
    pub max_combo: usize,
    /// 总体精准度（百分比，所有非炸弹音符）
    pub accuracy: f64,
    /// 全连精准度（百分比，仅 good 切割）
    pub fc_accuracy: f64,
    pub left: HandStats,
    pub right: HandStats,
}

/// 仅统计投影
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayStats {
    pub info: Info,
    pub stats: Statistics,
}

/// 事件流 + 统计投影
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayEventsWithStats {
    pub info: Info,
    pub notes: Vec<NoteEvent>,
    pub walls: Vec<WallEvent>,
    pub pauses: Vec<PauseEvent>,
    pub stats: Statistics,
}

impl ReplayEventsWithStats {
    pub fn new(events: ReplayEvents, stats: Statistics) -> Self {
        Self {
            info: events.info,
            notes: events.notes,
            walls: events.walls,
            pauses: events.pauses,
            stats,
        }
    }
}

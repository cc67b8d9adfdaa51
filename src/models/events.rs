//! # 事件流数据模型
//!
//! `events` / `events_and_stats` / `stats` 三种投影的输出结构。
//!
//! ## 依赖关系
//! - 被 `events/` 构造
//! - 被 `converter/projection.rs` 序列化
//! - 使用 `models/replay.rs` 的 `Info`, `NoteEventType`

use super::replay::{Info, NoteEventType};
use serde::Serialize;

/// 持剑手（由音符颜色决定：红色左手，蓝色右手）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    Left,
    Right,
}

/// 单个音符的切割得分
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NoteScore {
    /// 挥砍前得分 (0..=70)
    pub before: i32,
    /// 挥砍后得分 (0..=30)
    pub after: i32,
    /// 精准度得分 (0..=15)
    pub accuracy: i32,
    pub total: i32,
}

/// 音符事件
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteEvent {
    pub note_id: i32,
    pub time: f32,
    pub spawn_time: f32,
    pub event_type: NoteEventType,
    /// 炸弹没有颜色
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<Hand>,
    pub line_index: i32,
    pub line_layer: i32,
    pub cut_direction: i32,
    pub scoring_type: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<NoteScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_deviation: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saber_speed: Option<f32>,
}

/// 撞墙事件
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WallEvent {
    pub wall_id: i32,
    pub time: f32,
    pub energy: f32,
}

/// 暂停事件
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PauseEvent {
    pub time: f32,
    pub duration: i64,
}

/// 事件流投影
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayEvents {
    pub info: Info,
    pub notes: Vec<NoteEvent>,
    pub walls: Vec<WallEvent>,
    pub pauses: Vec<PauseEvent>,
}

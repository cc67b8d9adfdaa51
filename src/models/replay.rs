//! # 回放数据模型
//!
//! BSOR 解码后的完整回放结构，`raw` 模式下原样序列化为 JSON。
//!
//! ## 依赖关系
//! - 被 `parsers/bsor.rs` 构造
//! - 被 `events/` 和 `converter/` 使用
//! - 无外部模块依赖

use serde::Serialize;

/// 三维向量
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// 四元数旋转
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

/// 位置 + 旋转
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Transform {
    pub position: Vector3,
    pub rotation: Quaternion,
}

/// 回放元信息（section 0）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub version: String,
    pub game_version: String,
    pub timestamp: String,
    pub player_id: String,
    pub player_name: String,
    pub platform: String,
    pub tracking_system: String,
    pub hmd: String,
    pub controller: String,
    pub hash: String,
    pub song_name: String,
    pub mapper: String,
    pub difficulty: String,
    pub score: i32,
    pub mode: String,
    pub environment: String,
    pub modifiers: String,
    pub jump_distance: f32,
    pub left_handed: bool,
    pub height: f32,
    pub start_time: f32,
    pub fail_time: f32,
    pub speed: f32,
}

/// 单帧头部与手柄姿态（section 1）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub time: f32,
    pub fps: i32,
    pub head: Transform,
    pub left: Transform,
    pub right: Transform,
}

/// 音符事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteEventType {
    Good,
    Bad,
    Miss,
    Bomb,
}

impl NoteEventType {
    /// 从原始编码转换，未知编码返回 `None`
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(NoteEventType::Good),
            1 => Some(NoteEventType::Bad),
            2 => Some(NoteEventType::Miss),
            3 => Some(NoteEventType::Bomb),
            _ => None,
        }
    }

    /// 是否带切割信息
    pub fn has_cut_info(self) -> bool {
        matches!(self, NoteEventType::Good | NoteEventType::Bad)
    }
}

/// 切割详情（仅 good / bad 事件）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CutInfo {
    pub speed_ok: bool,
    pub direction_ok: bool,
    pub saber_type_ok: bool,
    pub was_cut_too_soon: bool,
    pub saber_speed: f32,
    pub saber_direction: Vector3,
    pub saber_type: i32,
    pub time_deviation: f32,
    pub cut_dir_deviation: f32,
    pub cut_point: Vector3,
    pub cut_normal: Vector3,
    pub cut_distance_to_center: f32,
    pub cut_angle: f32,
    pub before_cut_rating: f32,
    pub after_cut_rating: f32,
}

/// 音符事件（section 2）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub note_id: i32,
    pub event_time: f32,
    pub spawn_time: f32,
    pub event_type: NoteEventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cut_info: Option<CutInfo>,
}

/// 撞墙事件（section 3）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub wall_id: i32,
    pub energy: f32,
    pub time: f32,
    pub spawn_time: f32,
}

/// 玩家身高变化（section 4）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Height {
    pub height: f32,
    pub time: f32,
}

/// 暂停（section 5）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pause {
    pub duration: i64,
    pub time: f32,
}

/// 手柄偏移（可选 section 6）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControllerOffsets {
    pub left: Transform,
    pub right: Transform,
}

/// 自定义数据（可选 section 7）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserData {
    pub key: String,
    pub value: Vec<u8>,
}

/// 完整回放
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Replay {
    pub magic_number: i32,
    pub file_version: u8,
    pub info: Info,
    pub frames: Vec<Frame>,
    pub notes: Vec<Note>,
    pub walls: Vec<Wall>,
    pub heights: Vec<Height>,
    pub pauses: Vec<Pause>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller_offsets: Option<ControllerOffsets>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_data: Vec<UserData>,
}

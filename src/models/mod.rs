//! # 数据模型模块
//!
//! 定义解码后的回放结构以及派生的事件流 / 统计结构。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`events/` 和 `converter/` 使用
//! - 子模块: replay, events, stats

pub mod events;
pub mod replay;
pub mod stats;

pub use events::{Hand, NoteEvent, NoteScore, PauseEvent, ReplayEvents, WallEvent};
pub use replay::{
    ControllerOffsets, CutInfo, Frame, Height, Info, Note, NoteEventType, Pause, Quaternion,
    Replay, Transform, UserData, Vector3, Wall,
};
pub use stats::{
    CutAverages, HandStats, NoteCounts, PauseStats, ReplayEventsWithStats, ReplayStats,
    Statistics,
};

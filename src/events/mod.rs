//! # 事件提取模块
//!
//! 从解码后的回放中提取音符 / 撞墙 / 暂停事件流，并计算切割得分。
//!
//! ## 得分规则
//! - 挥砍前: `round(clamp(beforeCutRating) * 70)`
//! - 挥砍后: `round(clamp(afterCutRating) * 30)`
//! - 精准度: `round(15 * (1 - clamp(cutDistanceToCenter / 0.3)))`
//!
//! ## 依赖关系
//! - 被 `converter/projection.rs` 调用
//! - 使用 `models/`
//! - 子模块: stats

pub mod stats;

pub use stats::replay_stats;

use crate::models::{
    CutInfo, Hand, Note, NoteEvent, NoteEventType, NoteScore, PauseEvent, Replay, ReplayEvents,
    WallEvent,
};

/// 满分切割 (70 + 30 + 15)
pub const MAX_NOTE_SCORE: i32 = 115;

const BEFORE_CUT_MAX: f32 = 70.0;
const AFTER_CUT_MAX: f32 = 30.0;
const ACCURACY_MAX: f32 = 15.0;
const CENTER_DISTANCE_RANGE: f32 = 0.3;

/// 提取事件流
pub fn replay_events(replay: &Replay) -> ReplayEvents {
    let notes = replay.notes.iter().map(note_event).collect();

    let walls = replay
        .walls
        .iter()
        .map(|w| WallEvent {
            wall_id: w.wall_id,
            time: w.time,
            energy: w.energy,
        })
        .collect();

    let pauses = replay
        .pauses
        .iter()
        .map(|p| PauseEvent {
            time: p.time,
            duration: p.duration,
        })
        .collect();

    ReplayEvents {
        info: replay.info.clone(),
        notes,
        walls,
        pauses,
    }
}

fn note_event(note: &Note) -> NoteEvent {
    let id = note.note_id;
    // noteId = scoringType*10000 + lineIndex*1000 + lineLayer*100 + colorType*10 + cutDirection
    let color = (id / 10) % 10;

    let hand = match (note.event_type, color) {
        (NoteEventType::Bomb, _) => None,
        (_, 0) => Some(Hand::Left),
        (_, 1) => Some(Hand::Right),
        _ => None,
    };

    let score = match (note.event_type, &note.cut_info) {
        (NoteEventType::Good, Some(cut)) => Some(cut_score(cut)),
        _ => None,
    };

    NoteEvent {
        note_id: id,
        time: note.event_time,
        spawn_time: note.spawn_time,
        event_type: note.event_type,
        hand,
        line_index: (id / 1000) % 10,
        line_layer: (id / 100) % 10,
        cut_direction: id % 10,
        scoring_type: id / 10000,
        score,
        time_deviation: note.cut_info.map(|c| c.time_deviation),
        saber_speed: note.cut_info.map(|c| c.saber_speed),
    }
}

/// 计算单次切割得分
pub fn cut_score(cut: &CutInfo) -> NoteScore {
    let before = (cut.before_cut_rating.clamp(0.0, 1.0) * BEFORE_CUT_MAX).round() as i32;
    let after = (cut.after_cut_rating.clamp(0.0, 1.0) * AFTER_CUT_MAX).round() as i32;
    let distance = (cut.cut_distance_to_center / CENTER_DISTANCE_RANGE).clamp(0.0, 1.0);
    let accuracy = (ACCURACY_MAX * (1.0 - distance)).round() as i32;

    NoteScore {
        before,
        after,
        accuracy,
        total: before + after + accuracy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::bsor::decode;
    use crate::test_support::ReplayFixture;
    use std::io::Cursor;

    fn events_of(fixture: ReplayFixture) -> ReplayEvents {
        let replay = decode(Cursor::new(fixture.to_bytes())).unwrap();
        replay_events(&replay)
    }

    #[test]
    fn test_perfect_cut_score() {
        let events = events_of(ReplayFixture::new().good_cut(30100, 1.0, 1.0, 1.0, 0.0));
        let score = events.notes[0].score.unwrap();
        assert_eq!(score.before, 70);
        assert_eq!(score.after, 30);
        assert_eq!(score.accuracy, 15);
        assert_eq!(score.total, MAX_NOTE_SCORE);
    }

    #[test]
    fn test_ratings_are_clamped() {
        let events = events_of(ReplayFixture::new().good_cut(30100, 1.0, 1.4, -0.2, 0.6));
        let score = events.notes[0].score.unwrap();
        assert_eq!(score.before, 70);
        assert_eq!(score.after, 0);
        assert_eq!(score.accuracy, 0);
    }

    #[test]
    fn test_note_id_fields() {
        // scoringType 3, lineIndex 2, lineLayer 1, colorType 1, cutDirection 4
        let events = events_of(ReplayFixture::new().good_cut(32114, 1.0, 0.5, 0.5, 0.15));
        let note = &events.notes[0];
        assert_eq!(note.scoring_type, 3);
        assert_eq!(note.line_index, 2);
        assert_eq!(note.line_layer, 1);
        assert_eq!(note.hand, Some(Hand::Right));
        assert_eq!(note.cut_direction, 4);
    }

    #[test]
    fn test_non_good_events_have_no_score() {
        let events = events_of(
            ReplayFixture::new()
                .bad_cut(30000, 1.0)
                .miss(30010, 2.0)
                .bomb(3.0),
        );
        assert!(events.notes.iter().all(|n| n.score.is_none()));
        assert_eq!(events.notes[0].hand, Some(Hand::Left));
        assert!(events.notes[0].time_deviation.is_some());
        assert!(events.notes[1].time_deviation.is_none());
        assert_eq!(events.notes[2].hand, None);
    }

    #[test]
    fn test_walls_and_pauses_copied() {
        let events = events_of(ReplayFixture::new().wall(4.0).pause(5.0, 900));
        assert_eq!(events.walls.len(), 1);
        assert_eq!(events.walls[0].time, 4.0);
        assert_eq!(events.pauses[0].duration, 900);
        assert_eq!(events.info.player_name, "Player");
    }
}

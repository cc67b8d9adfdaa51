//! # 回放统计
//!
//! 基于事件流计算计数、最大连击、精准度和单手均值。
//!
//! ## 依赖关系
//! - 被 `converter/projection.rs` 调用
//! - 使用 `models/events.rs`, `models/stats.rs`

use super::MAX_NOTE_SCORE;
use crate::models::{
    CutAverages, Hand, HandStats, NoteCounts, NoteEventType, NoteScore, PauseStats, ReplayEvents,
    Statistics,
};

/// 计算统计
pub fn replay_stats(events: &ReplayEvents) -> Statistics {
    let mut counts = NoteCounts::default();
    for note in &events.notes {
        match note.event_type {
            NoteEventType::Good => counts.good += 1,
            NoteEventType::Bad => counts.bad += 1,
            NoteEventType::Miss => counts.miss += 1,
            NoteEventType::Bomb => counts.bombs += 1,
        }
    }
    counts.total = counts.good + counts.bad + counts.miss;

    let good_scores: Vec<NoteScore> = events.notes.iter().filter_map(|n| n.score).collect();
    let score_sum: i64 = good_scores.iter().map(|s| s.total as i64).sum();

    Statistics {
        notes: counts,
        wall_hits: events.walls.len(),
        pauses: PauseStats {
            count: events.pauses.len(),
            total_duration: events.pauses.iter().map(|p| p.duration).sum(),
        },
        max_combo: max_combo(events),
        accuracy: percent(score_sum, counts.total),
        fc_accuracy: percent(score_sum, good_scores.len()),
        left: hand_stats(events, Hand::Left),
        right: hand_stats(events, Hand::Right),
    }
}

/// 按时间顺序遍历音符和撞墙：good 切割 +1，其余打断连击
fn max_combo(events: &ReplayEvents) -> usize {
    let mut timeline: Vec<(f32, bool)> = events
        .notes
        .iter()
        .map(|n| (n.time, n.event_type == NoteEventType::Good))
        .chain(events.walls.iter().map(|w| (w.time, false)))
        .collect();
    timeline.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut combo = 0;
    let mut best = 0;
    for (_, keeps_combo) in timeline {
        if keeps_combo {
            combo += 1;
            best = best.max(combo);
        } else {
            combo = 0;
        }
    }
    best
}

fn hand_stats(events: &ReplayEvents, hand: Hand) -> HandStats {
    let scores: Vec<NoteScore> = events
        .notes
        .iter()
        .filter(|n| n.hand == Some(hand))
        .filter_map(|n| n.score)
        .collect();

    if scores.is_empty() {
        return HandStats::default();
    }

    let n = scores.len() as f64;
    let sum = |f: fn(&NoteScore) -> i32| scores.iter().map(|s| f(s) as f64).sum::<f64>() / n;
    let total_sum: i64 = scores.iter().map(|s| s.total as i64).sum();

    HandStats {
        good_cuts: scores.len(),
        averages: CutAverages {
            before: sum(|s| s.before),
            after: sum(|s| s.after),
            accuracy: sum(|s| s.accuracy),
            total: sum(|s| s.total),
        },
        fc_accuracy: percent(total_sum, scores.len()),
    }
}

fn percent(score: i64, notes: usize) -> f64 {
    if notes == 0 {
        return 0.0;
    }
    score as f64 * 100.0 / (MAX_NOTE_SCORE as f64 * notes as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::replay_events;
    use crate::parsers::bsor::decode;
    use crate::test_support::ReplayFixture;
    use std::io::Cursor;

    fn stats_of(fixture: ReplayFixture) -> Statistics {
        let replay = decode(Cursor::new(fixture.to_bytes())).unwrap();
        replay_stats(&replay_events(&replay))
    }

    #[test]
    fn test_empty_replay_stats() {
        let stats = stats_of(ReplayFixture::new());
        assert_eq!(stats.notes.total, 0);
        assert_eq!(stats.max_combo, 0);
        assert_eq!(stats.accuracy, 0.0);
        assert_eq!(stats.left, HandStats::default());
    }

    #[test]
    fn test_counts_and_accuracy() {
        let stats = stats_of(
            ReplayFixture::new()
                .good_cut(30100, 1.0, 1.0, 1.0, 0.0)
                .good_cut(30110, 2.0, 1.0, 1.0, 0.0)
                .miss(30000, 3.0)
                .bomb(4.0)
                .pause(5.0, 300)
                .pause(6.0, 200),
        );
        assert_eq!(stats.notes.total, 3);
        assert_eq!(stats.notes.good, 2);
        assert_eq!(stats.notes.miss, 1);
        assert_eq!(stats.notes.bombs, 1);
        assert_eq!(stats.pauses.count, 2);
        assert_eq!(stats.pauses.total_duration, 500);
        assert!((stats.fc_accuracy - 100.0).abs() < 1e-9);
        assert!((stats.accuracy - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.left.good_cuts, 1);
        assert_eq!(stats.right.good_cuts, 1);
    }

    #[test]
    fn test_max_combo_broken_by_wall_and_miss() {
        let stats = stats_of(
            ReplayFixture::new()
                .good_cut(30100, 1.0, 1.0, 1.0, 0.0)
                .good_cut(30100, 2.0, 1.0, 1.0, 0.0)
                .good_cut(30100, 3.0, 1.0, 1.0, 0.0)
                .miss(30100, 4.0)
                .good_cut(30100, 5.0, 1.0, 1.0, 0.0)
                .good_cut(30100, 7.0, 1.0, 1.0, 0.0)
                .wall(2.5),
        );
        // 1.0, 2.0 | wall 2.5 | 3.0 | miss | 5.0, 7.0
        assert_eq!(stats.max_combo, 2);
        assert_eq!(stats.wall_hits, 1);
    }

    #[test]
    fn test_hand_averages() {
        let stats = stats_of(
            ReplayFixture::new()
                .good_cut(30000, 1.0, 1.0, 1.0, 0.0)
                .good_cut(30000, 2.0, 0.5, 0.0, 0.3),
        );
        assert_eq!(stats.left.good_cuts, 2);
        assert!((stats.left.averages.before - 52.5).abs() < 1e-9);
        assert!((stats.left.averages.after - 15.0).abs() < 1e-9);
        assert!((stats.left.averages.accuracy - 7.5).abs() < 1e-9);
        assert_eq!(stats.right.good_cuts, 0);
    }
}

//! # 测试辅助
//!
//! 生成合法的 BSOR 字节流，供各模块的单元测试使用。

use crate::parsers::bsor::{MAGIC, SUPPORTED_VERSION};

use byteorder::{LittleEndian, WriteBytesExt};
use std::fs;
use std::path::{Path, PathBuf};

enum FixtureNote {
    Good {
        id: i32,
        time: f32,
        before: f32,
        after: f32,
        distance: f32,
    },
    Bad {
        id: i32,
        time: f32,
    },
    Miss {
        id: i32,
        time: f32,
    },
    Bomb {
        time: f32,
    },
}

/// BSOR 测试数据构造器
#[derive(Default)]
pub struct ReplayFixture {
    frames: Vec<f32>,
    notes: Vec<FixtureNote>,
    walls: Vec<f32>,
    pauses: Vec<(f32, i64)>,
    controller_offsets: bool,
    user_data: Vec<(String, Vec<u8>)>,
}

impl ReplayFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(mut self, time: f32) -> Self {
        self.frames.push(time);
        self
    }

    pub fn good_cut(mut self, id: i32, time: f32, before: f32, after: f32, distance: f32) -> Self {
        self.notes.push(FixtureNote::Good {
            id,
            time,
            before,
            after,
            distance,
        });
        self
    }

    pub fn bad_cut(mut self, id: i32, time: f32) -> Self {
        self.notes.push(FixtureNote::Bad { id, time });
        self
    }

    pub fn miss(mut self, id: i32, time: f32) -> Self {
        self.notes.push(FixtureNote::Miss { id, time });
        self
    }

    pub fn bomb(mut self, time: f32) -> Self {
        self.notes.push(FixtureNote::Bomb { time });
        self
    }

    pub fn wall(mut self, time: f32) -> Self {
        self.walls.push(time);
        self
    }

    pub fn pause(mut self, time: f32, duration: i64) -> Self {
        self.pauses.push((time, duration));
        self
    }

    pub fn with_controller_offsets(mut self) -> Self {
        self.controller_offsets = true;
        self
    }

    pub fn with_user_data(mut self, key: &str, value: &[u8]) -> Self {
        self.user_data.push((key.to_string(), value.to_vec()));
        self
    }

    /// frames 计数在字节流中的偏移
    pub fn frames_count_offset(&self) -> usize {
        let mut info = Vec::new();
        write_info(&mut info);
        4 + 1 + 1 + info.len() + 1
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.write_i32::<LittleEndian>(MAGIC).unwrap();
        buf.write_u8(SUPPORTED_VERSION).unwrap();

        buf.write_u8(0).unwrap();
        write_info(&mut buf);

        buf.write_u8(1).unwrap();
        buf.write_i32::<LittleEndian>(self.frames.len() as i32).unwrap();
        for time in &self.frames {
            buf.write_f32::<LittleEndian>(*time).unwrap();
            buf.write_i32::<LittleEndian>(90).unwrap();
            for _ in 0..3 {
                write_transform(&mut buf);
            }
        }

        buf.write_u8(2).unwrap();
        buf.write_i32::<LittleEndian>(self.notes.len() as i32).unwrap();
        for note in &self.notes {
            write_note(&mut buf, note);
        }

        buf.write_u8(3).unwrap();
        buf.write_i32::<LittleEndian>(self.walls.len() as i32).unwrap();
        for (i, time) in self.walls.iter().enumerate() {
            buf.write_i32::<LittleEndian>(i as i32).unwrap();
            buf.write_f32::<LittleEndian>(0.9).unwrap();
            buf.write_f32::<LittleEndian>(*time).unwrap();
            buf.write_f32::<LittleEndian>(*time - 1.0).unwrap();
        }

        buf.write_u8(4).unwrap();
        buf.write_i32::<LittleEndian>(1).unwrap();
        buf.write_f32::<LittleEndian>(1.7).unwrap();
        buf.write_f32::<LittleEndian>(0.0).unwrap();

        buf.write_u8(5).unwrap();
        buf.write_i32::<LittleEndian>(self.pauses.len() as i32).unwrap();
        for (time, duration) in &self.pauses {
            buf.write_i64::<LittleEndian>(*duration).unwrap();
            buf.write_f32::<LittleEndian>(*time).unwrap();
        }

        if self.controller_offsets {
            buf.write_u8(6).unwrap();
            write_transform(&mut buf);
            write_transform(&mut buf);
        }

        if !self.user_data.is_empty() {
            buf.write_u8(7).unwrap();
            buf.write_i32::<LittleEndian>(self.user_data.len() as i32).unwrap();
            for (key, value) in &self.user_data {
                write_string(&mut buf, key);
                buf.write_i32::<LittleEndian>(value.len() as i32).unwrap();
                buf.extend_from_slice(value);
            }
        }

        buf
    }

    /// 写入 `dir/name` 并返回路径
    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, self.to_bytes()).unwrap();
        path
    }
}

fn write_string(buf: &mut Vec<u8>, s: &str) {
    buf.write_i32::<LittleEndian>(s.len() as i32).unwrap();
    buf.extend_from_slice(s.as_bytes());
}

fn write_info(buf: &mut Vec<u8>) {
    for s in [
        "0.9.0", "1.29.1", "1700000000", "76561198000000000", "Player", "steam", "Oculus",
        "Quest 2", "Touch", "ABCDEF", "Song", "Mapper", "ExpertPlus",
    ] {
        write_string(buf, s);
    }
    buf.write_i32::<LittleEndian>(123456).unwrap();
    for s in ["Standard", "DefaultEnvironment", "FS,GN"] {
        write_string(buf, s);
    }
    buf.write_f32::<LittleEndian>(18.5).unwrap();
    buf.write_u8(0).unwrap();
    buf.write_f32::<LittleEndian>(1.75).unwrap();
    buf.write_f32::<LittleEndian>(0.0).unwrap();
    buf.write_f32::<LittleEndian>(0.0).unwrap();
    buf.write_f32::<LittleEndian>(1.0).unwrap();
}

fn write_transform(buf: &mut Vec<u8>) {
    for v in [0.0f32, 1.5, 0.0, 0.0, 0.0, 0.0, 1.0] {
        buf.write_f32::<LittleEndian>(v).unwrap();
    }
}

fn write_note(buf: &mut Vec<u8>, note: &FixtureNote) {
    let (id, time, code) = match note {
        FixtureNote::Good { id, time, .. } => (*id, *time, 0),
        FixtureNote::Bad { id, time } => (*id, *time, 1),
        FixtureNote::Miss { id, time } => (*id, *time, 2),
        FixtureNote::Bomb { time } => (3, *time, 3),
    };
    buf.write_i32::<LittleEndian>(id).unwrap();
    buf.write_f32::<LittleEndian>(time).unwrap();
    buf.write_f32::<LittleEndian>(time - 1.0).unwrap();
    buf.write_i32::<LittleEndian>(code).unwrap();

    let (before, after, distance) = match note {
        FixtureNote::Good {
            before,
            after,
            distance,
            ..
        } => (*before, *after, *distance),
        FixtureNote::Bad { .. } => (0.0, 0.0, 0.5),
        _ => return,
    };

    // speedOk, directionOk, saberTypeOk, wasCutTooSoon
    for flag in [1u8, 1, 1, 0] {
        buf.write_u8(flag).unwrap();
    }
    buf.write_f32::<LittleEndian>(5.0).unwrap();
    for v in [0.0f32, -1.0, 0.0] {
        buf.write_f32::<LittleEndian>(v).unwrap();
    }
    buf.write_i32::<LittleEndian>(0).unwrap();
    buf.write_f32::<LittleEndian>(0.01).unwrap();
    buf.write_f32::<LittleEndian>(3.0).unwrap();
    for v in [0.0f32, 1.0, 0.5, 1.0, 0.0, 0.0] {
        buf.write_f32::<LittleEndian>(v).unwrap();
    }
    buf.write_f32::<LittleEndian>(distance).unwrap();
    buf.write_f32::<LittleEndian>(45.0).unwrap();
    buf.write_f32::<LittleEndian>(before).unwrap();
    buf.write_f32::<LittleEndian>(after).unwrap();
}

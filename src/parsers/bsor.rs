//! # BSOR 回放解码器
//!
//! 解析 Beat Saber Open Replay (.bsor) 二进制格式。
//!
//! ## 格式说明
//! ```text
//! i32  magic   0x442d3d69
//! u8   version 1
//! u8 0 info         字符串 / 数值元信息
//! u8 1 frames       i32 count, (time f32, fps i32, head/left/right transform)*
//! u8 2 notes        i32 count, (id, eventTime, spawnTime, eventType [, cutInfo])*
//! u8 3 walls        i32 count, (id i32, energy f32, time f32, spawnTime f32)*
//! u8 4 heights      i32 count, (height f32, time f32)*
//! u8 5 pauses       i32 count, (duration i64, time f32)*
//! u8 6 offsets      可选，左右手 transform
//! u8 7 user data    可选，i32 count, (key string, i32 len, bytes)*
//! ```
//! 全部为小端序；字符串为 i32 长度前缀 + UTF-8 字节。
//!
//! ## 依赖关系
//! - 被 `converter/mod.rs` 调用
//! - 使用 `models/replay.rs`
//! - 使用 `byteorder` 读取小端数值

use crate::models::{
    ControllerOffsets, CutInfo, Frame, Height, Info, Note, NoteEventType, Pause, Quaternion,
    Replay, Transform, UserData, Vector3, Wall,
};

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, ErrorKind, Read};
use thiserror::Error;

/// 文件魔数
pub const MAGIC: i32 = 0x442d3d69;

/// 支持的格式版本
pub const SUPPORTED_VERSION: u8 = 1;

/// 预分配上限，防止损坏的计数导致巨量内存分配
const MAX_PREALLOC: usize = 4096;

const SECTION_INFO: u8 = 0;
const SECTION_FRAMES: u8 = 1;
const SECTION_NOTES: u8 = 2;
const SECTION_WALLS: u8 = 3;
const SECTION_HEIGHTS: u8 = 4;
const SECTION_PAUSES: u8 = 5;
const SECTION_CONTROLLER_OFFSETS: u8 = 6;
const SECTION_USER_DATA: u8 = 7;

/// 解码错误
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("not a BSOR replay (magic 0x{0:08x})")]
    BadMagic(u32),

    #[error("unsupported BSOR version {0}")]
    UnsupportedVersion(u8),

    #[error("expected section {expected}, found {found}")]
    UnexpectedSection { expected: u8, found: u8 },

    #[error("unknown section {0}")]
    UnknownSection(u8),

    #[error("invalid {context} length {len}")]
    InvalidLength { context: &'static str, len: i32 },

    #[error("unknown note event type {0}")]
    InvalidEventType(i32),

    #[error("replay is truncated (while reading {context})")]
    Truncated { context: &'static str },

    #[error("I/O error while reading {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },
}

impl DecodeError {
    fn from_io(context: &'static str, source: io::Error) -> Self {
        if source.kind() == ErrorKind::UnexpectedEof {
            DecodeError::Truncated { context }
        } else {
            DecodeError::Io { context, source }
        }
    }
}

type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// 从任意字节流解码完整回放
pub fn decode<R: Read>(reader: R) -> DecodeResult<Replay> {
    BsorReader::new(reader).read_replay()
}

/// BSOR 流式读取器
pub struct BsorReader<R: Read> {
    reader: R,
}

impl<R: Read> BsorReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// 读取完整回放
    pub fn read_replay(&mut self) -> DecodeResult<Replay> {
        let magic_number = self.read_i32("magic")?;
        if magic_number != MAGIC {
            return Err(DecodeError::BadMagic(magic_number as u32));
        }

        let file_version = self.read_u8("version")?;
        if file_version != SUPPORTED_VERSION {
            return Err(DecodeError::UnsupportedVersion(file_version));
        }

        self.expect_section(SECTION_INFO)?;
        let info = self.read_info()?;
        self.expect_section(SECTION_FRAMES)?;
        let frames = self.read_list("frames", Self::read_frame)?;
        self.expect_section(SECTION_NOTES)?;
        let notes = self.read_list("notes", Self::read_note)?;
        self.expect_section(SECTION_WALLS)?;
        let walls = self.read_list("walls", Self::read_wall)?;
        self.expect_section(SECTION_HEIGHTS)?;
        let heights = self.read_list("heights", Self::read_height)?;
        self.expect_section(SECTION_PAUSES)?;
        let pauses = self.read_list("pauses", Self::read_pause)?;

        let mut controller_offsets = None;
        let mut user_data = Vec::new();

        // 可选 section 直到文件结束
        while let Some(section) = self.try_read_section()? {
            match section {
                SECTION_CONTROLLER_OFFSETS => {
                    controller_offsets = Some(ControllerOffsets {
                        left: self.read_transform("controller offsets")?,
                        right: self.read_transform("controller offsets")?,
                    });
                }
                SECTION_USER_DATA => {
                    user_data = self.read_list("user data", Self::read_user_data)?;
                }
                other => return Err(DecodeError::UnknownSection(other)),
            }
        }

        Ok(Replay {
            magic_number,
            file_version,
            info,
            frames,
            notes,
            walls,
            heights,
            pauses,
            controller_offsets,
            user_data,
        })
    }

    fn expect_section(&mut self, expected: u8) -> DecodeResult<()> {
        let found = self.read_u8("section id")?;
        if found != expected {
            return Err(DecodeError::UnexpectedSection { expected, found });
        }
        Ok(())
    }

    /// 读取下一个 section id；干净的 EOF 返回 `None`
    fn try_read_section(&mut self) -> DecodeResult<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(DecodeError::from_io("section id", e)),
            }
        }
    }

    fn read_info(&mut self) -> DecodeResult<Info> {
        const CTX: &str = "info";
        Ok(Info {
            version: self.read_string(CTX)?,
            game_version: self.read_string(CTX)?,
            timestamp: self.read_string(CTX)?,
            player_id: self.read_string(CTX)?,
            player_name: self.read_string(CTX)?,
            platform: self.read_string(CTX)?,
            tracking_system: self.read_string(CTX)?,
            hmd: self.read_string(CTX)?,
            controller: self.read_string(CTX)?,
            hash: self.read_string(CTX)?,
            song_name: self.read_string(CTX)?,
            mapper: self.read_string(CTX)?,
            difficulty: self.read_string(CTX)?,
            score: self.read_i32(CTX)?,
            mode: self.read_string(CTX)?,
            environment: self.read_string(CTX)?,
            modifiers: self.read_string(CTX)?,
            jump_distance: self.read_f32(CTX)?,
            left_handed: self.read_bool(CTX)?,
            height: self.read_f32(CTX)?,
            start_time: self.read_f32(CTX)?,
            fail_time: self.read_f32(CTX)?,
            speed: self.read_f32(CTX)?,
        })
    }

    fn read_frame(&mut self) -> DecodeResult<Frame> {
        const CTX: &str = "frames";
        Ok(Frame {
            time: self.read_f32(CTX)?,
            fps: self.read_i32(CTX)?,
            head: self.read_transform(CTX)?,
            left: self.read_transform(CTX)?,
            right: self.read_transform(CTX)?,
        })
    }

    fn read_note(&mut self) -> DecodeResult<Note> {
        const CTX: &str = "notes";
        let note_id = self.read_i32(CTX)?;
        let event_time = self.read_f32(CTX)?;
        let spawn_time = self.read_f32(CTX)?;
        let code = self.read_i32(CTX)?;
        let event_type =
            NoteEventType::from_code(code).ok_or(DecodeError::InvalidEventType(code))?;

        let cut_info = if event_type.has_cut_info() {
            Some(self.read_cut_info()?)
        } else {
            None
        };

        Ok(Note {
            note_id,
            event_time,
            spawn_time,
            event_type,
            cut_info,
        })
    }

    fn read_cut_info(&mut self) -> DecodeResult<CutInfo> {
        const CTX: &str = "cut info";
        Ok(CutInfo {
            speed_ok: self.read_bool(CTX)?,
            direction_ok: self.read_bool(CTX)?,
            saber_type_ok: self.read_bool(CTX)?,
            was_cut_too_soon: self.read_bool(CTX)?,
            saber_speed: self.read_f32(CTX)?,
            saber_direction: self.read_vector3(CTX)?,
            saber_type: self.read_i32(CTX)?,
            time_deviation: self.read_f32(CTX)?,
            cut_dir_deviation: self.read_f32(CTX)?,
            cut_point: self.read_vector3(CTX)?,
            cut_normal: self.read_vector3(CTX)?,
            cut_distance_to_center: self.read_f32(CTX)?,
            cut_angle: self.read_f32(CTX)?,
            before_cut_rating: self.read_f32(CTX)?,
            after_cut_rating: self.read_f32(CTX)?,
        })
    }

    fn read_wall(&mut self) -> DecodeResult<Wall> {
        const CTX: &str = "walls";
        Ok(Wall {
            wall_id: self.read_i32(CTX)?,
            energy: self.read_f32(CTX)?,
            time: self.read_f32(CTX)?,
            spawn_time: self.read_f32(CTX)?,
        })
    }

    fn read_height(&mut self) -> DecodeResult<Height> {
        Ok(Height {
            height: self.read_f32("heights")?,
            time: self.read_f32("heights")?,
        })
    }

    fn read_pause(&mut self) -> DecodeResult<Pause> {
        Ok(Pause {
            duration: self
                .reader
                .read_i64::<LittleEndian>()
                .map_err(|e| DecodeError::from_io("pauses", e))?,
            time: self.read_f32("pauses")?,
        })
    }

    fn read_user_data(&mut self) -> DecodeResult<UserData> {
        let key = self.read_string("user data")?;
        let len = self.read_len("user data")?;
        let value = self.read_bytes(len, "user data")?;
        Ok(UserData { key, value })
    }

    // ─────────────────────────────────────────────────────────────
    // 基础类型
    // ─────────────────────────────────────────────────────────────

    /// 读取 i32 计数 + 元素列表
    fn read_list<T>(
        &mut self,
        context: &'static str,
        mut read_item: impl FnMut(&mut Self) -> DecodeResult<T>,
    ) -> DecodeResult<Vec<T>> {
        let count = self.read_len(context)?;
        let mut items = Vec::with_capacity(count.min(MAX_PREALLOC));
        for _ in 0..count {
            items.push(read_item(self)?);
        }
        Ok(items)
    }

    fn read_len(&mut self, context: &'static str) -> DecodeResult<usize> {
        let len = self.read_i32(context)?;
        usize::try_from(len).map_err(|_| DecodeError::InvalidLength { context, len })
    }

    fn read_bytes(&mut self, len: usize, context: &'static str) -> DecodeResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC));
        let read = (&mut self.reader)
            .take(len as u64)
            .read_to_end(&mut buf)
            .map_err(|e| DecodeError::from_io(context, e))?;
        if read != len {
            return Err(DecodeError::Truncated { context });
        }
        Ok(buf)
    }

    fn read_string(&mut self, context: &'static str) -> DecodeResult<String> {
        let len = self.read_len(context)?;
        let bytes = self.read_bytes(len, context)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn read_u8(&mut self, context: &'static str) -> DecodeResult<u8> {
        self.reader
            .read_u8()
            .map_err(|e| DecodeError::from_io(context, e))
    }

    fn read_bool(&mut self, context: &'static str) -> DecodeResult<bool> {
        Ok(self.read_u8(context)? != 0)
    }

    fn read_i32(&mut self, context: &'static str) -> DecodeResult<i32> {
        self.reader
            .read_i32::<LittleEndian>()
            .map_err(|e| DecodeError::from_io(context, e))
    }

    fn read_f32(&mut self, context: &'static str) -> DecodeResult<f32> {
        self.reader
            .read_f32::<LittleEndian>()
            .map_err(|e| DecodeError::from_io(context, e))
    }

    fn read_vector3(&mut self, context: &'static str) -> DecodeResult<Vector3> {
        Ok(Vector3 {
            x: self.read_f32(context)?,
            y: self.read_f32(context)?,
            z: self.read_f32(context)?,
        })
    }

    fn read_transform(&mut self, context: &'static str) -> DecodeResult<Transform> {
        let position = self.read_vector3(context)?;
        let rotation = Quaternion {
            x: self.read_f32(context)?,
            y: self.read_f32(context)?,
            z: self.read_f32(context)?,
            w: self.read_f32(context)?,
        };
        Ok(Transform { position, rotation })
    }
}

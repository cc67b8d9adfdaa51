//! # 转换服务
//!
//! 将单个回放文件转换为一个 JSON 输出（文件或标准输出）。
//!
//! ## 流程
//! 1. 打开输入、读取元数据、拒绝目录
//! 2. 缓冲模式整体读入内存，否则包装为流式读取器
//! 3. 解码 → 投影 → 序列化
//! 4. 打开输出并写入 JSON + 换行；未指定 `force` 时以独占方式创建，
//!    已存在的文件保持不变
//!
//! 任何失败都以 `ConvertError` 返回，不会 panic。
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用（单文件模式与批量 worker）
//! - 使用 `parsers/bsor.rs`, `converter/projection.rs`
//! - 使用 `batch/cancel.rs` 在缓冲读取中检查取消
//! - 子模块: projection

pub mod projection;

pub use projection::ProjectionMode;

use crate::batch::CancelToken;
use crate::config::ConvertOptions;
use crate::error::{ConvertError, Result};
use crate::models::Replay;
use crate::parsers::bsor;

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Cursor, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 缓冲读取时每次读取的块大小，两次读取之间检查取消
const READ_CHUNK: u64 = 1 << 20;

/// 输出目标
#[derive(Debug, Clone, Copy)]
pub enum Destination<'a> {
    Stdout,
    File(&'a Path),
}

impl<'a> Destination<'a> {
    pub fn from_option(path: Option<&'a Path>) -> Self {
        match path {
            Some(path) => Destination::File(path),
            None => Destination::Stdout,
        }
    }

    fn describe(&self) -> String {
        match self {
            Destination::Stdout => "<stdout>".to_string(),
            Destination::File(path) => path.display().to_string(),
        }
    }
}

/// 转换单个回放
pub fn convert_replay(
    source: &Path,
    destination: Destination<'_>,
    mode: ProjectionMode,
    options: &ConvertOptions,
    cancel: &CancelToken,
) -> Result<()> {
    debug!(source = %source.display(), output = %destination.describe(), %mode, "converting replay");

    let replay = load_and_decode(source, options.buffered, cancel)?;

    let json = projection::to_json(replay, mode, options.pretty).map_err(|e| {
        ConvertError::EncodeError {
            path: source.display().to_string(),
            source: e,
        }
    })?;

    write_output(destination, &json, options.force)
}

/// 读取并解码回放
pub fn load_and_decode(path: &Path, buffered: bool, cancel: &CancelToken) -> Result<Replay> {
    let file = File::open(path).map_err(|e| ConvertError::OpenError {
        path: path.display().to_string(),
        source: e,
    })?;

    let metadata = file.metadata().map_err(|e| ConvertError::StatError {
        path: path.display().to_string(),
        source: e,
    })?;

    if metadata.is_dir() {
        return Err(ConvertError::IsDirectory {
            path: path.display().to_string(),
        });
    }

    let decoded = if buffered {
        let bytes = read_all(file, metadata.len(), path, cancel)?;
        bsor::decode(Cursor::new(bytes))
    } else {
        bsor::decode(BufReader::new(file))
    };

    decoded.map_err(|e| ConvertError::DecodeError {
        path: path.display().to_string(),
        source: e,
    })
}

/// 分块读入整个文件
fn read_all(mut file: File, size: u64, path: &Path, cancel: &CancelToken) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(usize::try_from(size).unwrap_or(0));
    loop {
        if cancel.is_cancelled() {
            return Err(ConvertError::Cancelled);
        }
        let read = (&mut file)
            .take(READ_CHUNK)
            .read_to_end(&mut bytes)
            .map_err(|e| ConvertError::ReadError {
                path: path.display().to_string(),
                source: e,
            })?;
        if read == 0 {
            return Ok(bytes);
        }
    }
}

fn write_output(destination: Destination<'_>, json: &[u8], force: bool) -> Result<()> {
    let written = match destination {
        Destination::Stdout => {
            let stdout = io::stdout();
            write_json(&mut BufWriter::new(stdout.lock()), json)
        }
        Destination::File(path) => {
            let file = open_output(path, force)?;
            write_json(&mut BufWriter::new(file), json)
        }
    };

    written.map_err(|e| ConvertError::WriteError {
        path: destination.describe(),
        source: e,
    })
}

/// 打开输出文件；未开启覆盖时使用 `create_new` 独占创建
fn open_output(path: &Path, force: bool) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    options.open(path).map_err(|e| {
        if e.kind() == ErrorKind::AlreadyExists {
            ConvertError::AlreadyExists {
                path: path.display().to_string(),
            }
        } else {
            ConvertError::CreateError {
                path: path.display().to_string(),
                source: e,
            }
        }
    })
}

fn write_json<W: Write>(writer: &mut W, json: &[u8]) -> io::Result<()> {
    writer.write_all(json)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// 批量模式输出文件名: `<stem>.<tag>.json`
pub fn output_file_name(input: &Path, mode: ProjectionMode) -> PathBuf {
    let mut name = OsString::from(input.file_stem().unwrap_or(input.as_os_str()));
    name.push(".");
    name.push(mode.tag());
    name.push(".json");
    PathBuf::from(name)
}

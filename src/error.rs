//! # 统一错误处理模块
//!
//! 定义 bsor2json 的所有错误类型，使用 `thiserror` 派生。
//!
//! 错误分为两级：
//! - 致命错误（目录无法列出、单文件模式失败、批处理被中断）直接返回到 `main`
//! - 单文件级错误在批处理中被记录到对应的 `Job`，只在汇总中体现
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 使用 `parsers/bsor.rs` 的 `DecodeError`

use crate::parsers::bsor::DecodeError;
use thiserror::Error;

/// bsor2json 统一错误类型
#[derive(Error, Debug)]
pub enum ConvertError {
    // ─────────────────────────────────────────────────────────────
    // 目录错误（致命）
    // ─────────────────────────────────────────────────────────────
    #[error("Can not list directory {path}: {source}")]
    DirectoryError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 输入错误
    // ─────────────────────────────────────────────────────────────
    #[error("Can not open replay {path}: {source}")]
    OpenError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Can not get replay size {path}: {source}")]
    StatError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is a directory")]
    IsDirectory { path: String },

    #[error("Can not read replay {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 解码 / 编码错误
    // ─────────────────────────────────────────────────────────────
    #[error("Replay decode error in {path}: {source}")]
    DecodeError {
        path: String,
        #[source]
        source: DecodeError,
    },

    #[error("JSON marshaling error for {path}: {source}")]
    EncodeError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 输出错误
    // ─────────────────────────────────────────────────────────────
    #[error("File already exists: {path}")]
    AlreadyExists { path: String },

    #[error("Can not create output file {path}: {source}")]
    CreateError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Can not write output {path}: {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数 / 运行时错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Can not start worker pool: {0}")]
    ThreadPool(String),

    #[error("Conversion interrupted")]
    Cancelled,
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ConvertError>;

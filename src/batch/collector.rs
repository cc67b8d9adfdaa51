//! # 文件收集器
//!
//! 列出目录的直接子项，按扩展名（不区分大小写）筛选出待转换的回放文件。
//!
//! ## 功能
//! - 非递归，跳过子目录
//! - 目录无法列出时返回致命的 `DirectoryError`
//! - 输出顺序为目录列出顺序
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 产出 `batch/runner.rs` 的 `Job`

use super::runner::Job;
use crate::error::{ConvertError, Result};

use std::fs;
use std::path::{Path, PathBuf};

/// 回放扩展名（不区分大小写）
pub const REPLAY_EXTENSION: &str = "bsor";

/// 文件收集器
pub struct FileCollector {
    /// 输入目录
    dir: PathBuf,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// 收集所有匹配的文件，每个文件生成一个 Pending 任务
    pub fn collect(&self) -> Result<Vec<Job>> {
        let directory_error = |e| ConvertError::DirectoryError {
            path: self.dir.display().to_string(),
            source: e,
        };

        let mut jobs = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(directory_error)? {
            let entry = entry.map_err(directory_error)?;
            let file_type = entry.file_type().map_err(directory_error)?;

            if file_type.is_dir() {
                continue;
            }

            let file_name = entry.file_name();
            if Self::matches_extension(Path::new(&file_name)) {
                jobs.push(Job::new(self.dir.clone(), PathBuf::from(file_name)));
            }
        }

        Ok(jobs)
    }

    /// 检查扩展名是否匹配
    fn matches_extension(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(REPLAY_EXTENSION))
            .unwrap_or(false)
    }
}

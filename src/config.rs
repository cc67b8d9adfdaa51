//! # 运行配置
//!
//! 命令行参数在 `commands/convert.rs` 中被转换为不可变的 `BatchConfig`，
//! 之后逐层以参数形式传递，不使用全局状态。
//!
//! ## 依赖关系
//! - 被 `commands/`, `converter/` 使用
//! - 使用 `converter/projection.rs` 的 `ProjectionMode`

use crate::converter::ProjectionMode;
use crate::error::{ConvertError, Result};

use std::path::{Path, PathBuf};

/// 输入源：单文件或目录，二者互斥
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Directory(PathBuf),
}

impl Source {
    /// 从可选的文件 / 目录参数构造，要求恰好提供其中一个
    pub fn from_args(file: Option<PathBuf>, dir: Option<PathBuf>) -> Result<Self> {
        match (file, dir) {
            (Some(file), None) if !file.as_os_str().is_empty() => Ok(Source::File(file)),
            (None, Some(dir)) if !dir.as_os_str().is_empty() => Ok(Source::Directory(dir)),
            (None, None) => Err(ConvertError::InvalidArgument(
                "file or directory is required; add -h flag for help".to_string(),
            )),
            _ => Err(ConvertError::InvalidArgument(
                "exactly one of --file or --dir must be given".to_string(),
            )),
        }
    }
}

/// 单文件转换选项（单文件与批量模式共用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// 先将整个文件读入内存再解码
    pub buffered: bool,
    /// 缩进输出 JSON
    pub pretty: bool,
    /// 允许覆盖已存在的输出文件
    pub force: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            buffered: true,
            pretty: false,
            force: false,
        }
    }
}

/// 一次运行的完整配置
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub source: Source,
    /// 输出文件（单文件模式）或输出目录（批量模式）
    pub output: Option<PathBuf>,
    pub mode: ProjectionMode,
    /// 0 表示使用逻辑核心数
    pub parallelism: usize,
    pub options: ConvertOptions,
    pub list_failures: bool,
    pub color: bool,
}

impl BatchConfig {
    /// 在开始任何工作之前校验输入源
    pub fn validate(&self) -> Result<()> {
        match &self.source {
            Source::File(path) if path.is_dir() => Err(ConvertError::IsDirectory {
                path: path.display().to_string(),
            }),
            Source::Directory(path) if !path.is_dir() => Err(ConvertError::DirectoryError {
                path: path.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            }),
            _ => Ok(()),
        }
    }

    /// 批量模式输出目录，默认为输入目录
    pub fn output_dir(&self) -> Option<&Path> {
        match &self.source {
            Source::Directory(dir) => Some(self.output.as_deref().unwrap_or(dir)),
            Source::File(_) => None,
        }
    }
}

/// 实际工作线程数：0 取逻辑核心数，否则至少为 1
pub fn worker_count(parallelism: usize) -> usize {
    if parallelism == 0 {
        num_cpus::get().max(1)
    } else {
        parallelism
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(source: Source) -> BatchConfig {
        BatchConfig {
            source,
            output: None,
            mode: ProjectionMode::Raw,
            parallelism: 0,
            options: ConvertOptions::default(),
            list_failures: true,
            color: false,
        }
    }

    #[test]
    fn test_source_requires_exactly_one() {
        assert!(Source::from_args(None, None).is_err());
        assert!(Source::from_args(Some("a.bsor".into()), Some("dir".into())).is_err());
        assert_eq!(
            Source::from_args(Some("a.bsor".into()), None).unwrap(),
            Source::File("a.bsor".into())
        );
        assert_eq!(
            Source::from_args(None, Some("dir".into())).unwrap(),
            Source::Directory("dir".into())
        );
    }

    #[test]
    fn test_default_options() {
        let options = ConvertOptions::default();
        assert!(options.buffered);
        assert!(!options.pretty);
        assert!(!options.force);
    }

    #[test]
    fn test_worker_count() {
        assert_eq!(worker_count(0), num_cpus::get().max(1));
        assert_eq!(worker_count(3), 3);
    }

    #[test]
    fn test_validate_sources() {
        let dir = tempfile::tempdir().unwrap();
        assert!(config(Source::Directory(dir.path().to_path_buf()))
            .validate()
            .is_ok());
        assert!(matches!(
            config(Source::File(dir.path().to_path_buf())).validate(),
            Err(ConvertError::IsDirectory { .. })
        ));
        assert!(matches!(
            config(Source::Directory(dir.path().join("missing"))).validate(),
            Err(ConvertError::DirectoryError { .. })
        ));
    }

    #[test]
    fn test_output_dir_defaults_to_source() {
        let mut cfg = config(Source::Directory("replays".into()));
        assert_eq!(cfg.output_dir(), Some(Path::new("replays")));
        cfg.output = Some("out".into());
        assert_eq!(cfg.output_dir(), Some(Path::new("out")));
        assert_eq!(config(Source::File("a.bsor".into())).output_dir(), None);
    }
}

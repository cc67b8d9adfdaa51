//! # 转换命令实现
//!
//! ## 功能
//! - 将命令行参数转换为 `BatchConfig` 并校验
//! - 单文件模式：直接调用转换服务，失败即致命
//! - 目录模式：收集文件 → 并行转换 → 汇总；单个文件失败不影响其他文件
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的参数
//! - 使用 `batch/`, `converter/`, `config.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::batch::{summary, BatchResult, BatchRunner, CancelToken, FileCollector};
use crate::cli::convert::ReplayArgs;
use crate::config::{BatchConfig, ConvertOptions, Source};
use crate::converter::{self, Destination, ProjectionMode};
use crate::error::{ConvertError, Result};
use crate::utils::output::{self, ConsolePrinter, LinePrinter};
use crate::utils::progress;

use colored::Colorize;
use std::fs;
use std::path::Path;
use tracing::info;

/// 由命令行参数构造运行配置
pub fn build_config(args: ReplayArgs, mode: ProjectionMode) -> Result<BatchConfig> {
    let source = Source::from_args(args.source.file, args.source.dir)?;
    let color = !args.no_color && console::colors_enabled_stderr();

    let config = BatchConfig {
        source,
        output: args.output,
        mode,
        parallelism: args.parallel,
        options: ConvertOptions {
            buffered: args.buffered,
            pretty: args.pretty,
            force: args.force,
        },
        list_failures: args.display_failed,
        color,
    };
    config.validate()?;
    Ok(config)
}

/// 执行转换
pub fn execute(config: &BatchConfig, cancel: &CancelToken) -> Result<()> {
    colored::control::set_override(config.color);
    console::set_colors_enabled_stderr(config.color);

    match &config.source {
        Source::File(file) => converter::convert_replay(
            file,
            Destination::from_option(config.output.as_deref()),
            config.mode,
            &config.options,
            cancel,
        ),
        Source::Directory(dir) => {
            let mut printer = ConsolePrinter::new(config.color);
            let result = execute_batch(dir, config, cancel, &mut printer)?;
            if cancel.is_cancelled() && result.skipped > 0 {
                return Err(ConvertError::Cancelled);
            }
            Ok(())
        }
    }
}

/// 目录批量模式
fn execute_batch(
    dir: &Path,
    config: &BatchConfig,
    cancel: &CancelToken,
    printer: &mut dyn LinePrinter,
) -> Result<BatchResult> {
    let output_dir = config.output_dir().unwrap_or(dir);

    let mut jobs = FileCollector::new(dir.to_path_buf()).collect()?;

    if jobs.is_empty() {
        output::print_warning(&format!("No bsor files found in {}", dir.display()));
        let result = BatchResult::default();
        summary::report(&result, printer);
        return Ok(result);
    }

    // 创建输出目录
    fs::create_dir_all(output_dir).map_err(|e| ConvertError::DirectoryError {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    let runner = BatchRunner::new(config.parallelism).with_cancel_token(cancel.clone());

    info!(
        dir = %dir.display(),
        output = %output_dir.display(),
        mode = %config.mode,
        files = jobs.len(),
        "batch conversion"
    );

    let description = if config.color {
        format!(
            "{} {}...",
            "Processing replays".green(),
            format!("(parallel: {})", runner.workers()).yellow()
        )
    } else {
        format!("Processing replays (parallel: {})...", runner.workers())
    };
    let mut pb = progress::create_progress_bar(jobs.len() as u64, &description);

    let mode = config.mode;
    let options = config.options;
    runner.run(&mut jobs, &mut pb, |job| {
        let output_path = output_dir.join(converter::output_file_name(&job.file_name, mode));
        converter::convert_replay(
            &job.input_path(),
            Destination::File(&output_path),
            mode,
            &options,
            cancel,
        )
    })?;

    let result = BatchResult::from_jobs(&jobs, config.list_failures);
    summary::report(&result, printer);
    Ok(result)
}

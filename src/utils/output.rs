//! # 美化输出工具
//!
//! 提供统一的终端输出样式，以及汇总报告使用的行输出接口。
//!
//! 是否着色在启动时检测一次（`console`），之后通过 `ConsolePrinter`
//! 传入，不会在每行输出时重新检测。
//!
//! ## 依赖关系
//! - 被 `main.rs`, `commands/`, `batch/summary.rs` 使用
//! - 使用 `colored` crate

use colored::Colorize;
use std::time::Duration;

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    eprintln!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印命令耗时
pub fn print_elapsed(elapsed: Duration) {
    print_info(&format_elapsed(elapsed));
}

fn format_elapsed(elapsed: Duration) -> String {
    format!("Operation took {:.3?}", elapsed)
}

/// 行内片段样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Label,
    Success,
    Failure,
    Accent,
}

/// 带样式的文本片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: Style,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Style::Plain)
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Segment {
            text: text.into(),
            style,
        }
    }
}

/// 行输出接口
pub trait LinePrinter {
    fn print_line(&mut self, segments: &[Segment]);
}

/// 将片段拼接为一行，`color` 为 false 时输出纯文本
pub fn render(segments: &[Segment], color: bool) -> String {
    segments
        .iter()
        .map(|seg| {
            if !color {
                return seg.text.clone();
            }
            match seg.style {
                Style::Plain => seg.text.clone(),
                Style::Label => seg.text.blue().to_string(),
                Style::Success => seg.text.green().to_string(),
                Style::Failure => seg.text.red().to_string(),
                Style::Accent => seg.text.yellow().to_string(),
            }
        })
        .collect()
}

/// 输出到 stderr 的行打印器
pub struct ConsolePrinter {
    color: bool,
}

impl ConsolePrinter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl LinePrinter for ConsolePrinter {
    fn print_line(&mut self, segments: &[Segment]) {
        eprintln!("{}", render(segments, self.color));
    }
}

/// 在内存中收集输出行（纯文本）
#[cfg(test)]
#[derive(Debug, Default)]
pub struct BufferedPrinter {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl LinePrinter for BufferedPrinter {
    fn print_line(&mut self, segments: &[Segment]) {
        self.lines.push(render(segments, false));
    }
}

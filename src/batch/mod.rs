//! # 批量处理模块
//!
//! 目录批量转换流水线。
//!
//! ## 功能
//! - 收集目录中的回放文件
//! - 有界队列 + worker 池并行转换
//! - 单线程聚合结果、驱动进度条
//! - 汇总统计与失败原因
//! - 取消令牌
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 使用
//! - 使用 `crossbeam-channel`, `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod cancel;
pub mod collector;
pub mod runner;
pub mod summary;

pub use cancel::CancelToken;
pub use collector::FileCollector;
pub use runner::BatchRunner;
pub use summary::BatchResult;

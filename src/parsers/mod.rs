//! # 解析器模块
//!
//! 回放二进制格式解析器。
//!
//! ## 依赖关系
//! - 被 `converter/` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: bsor

pub mod bsor;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 客户端配置（超时、重试、请求头）以及从文件/环境变量加载的应用设置
pub mod settings;

pub use settings::{ClientConfig, Settings};

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 结果归一化（result_normalizer）：把原始条目转换为统一的结果记录
/// - 搜索服务（search_service）：选择策略、驱动传输与重试、汇总结果
pub mod result_normalizer;
pub mod search_service;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 搜索请求（search_request）：关键词、条数、页码与垂类
/// - 原始条目（raw_item）：策略定位出的未解析片段
/// - 搜索结果（search_result）：归一化后的输出记录
pub mod raw_item;
pub mod search_request;
pub mod search_result;

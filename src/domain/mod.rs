// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含搜索客户端的核心逻辑，包括：
/// - 领域模型（models）：请求、原始条目与结果记录
/// - 搜索抽象（search）：错误分类与查询策略特质
/// - 服务（services）：结果归一化与搜索入口
///
/// 领域层只依赖传输特质，不关心具体的 HTTP 实现。
pub mod models;
pub mod search;
pub mod services;

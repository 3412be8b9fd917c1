// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 客户端配置与配置文件、环境变量的加载
pub mod config;

/// 领域模块
///
/// 请求与结果模型、错误分类、结果归一化与搜索入口
pub mod domain;

/// 引擎模块
///
/// 传输层特质及其 reqwest 实现
pub mod engines;

/// 基础设施模块
///
/// 百度各搜索垂类的查询策略
pub mod infrastructure;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

pub use config::settings::{ClientConfig, Settings};
pub use domain::models::search_request::{SearchRequest, SearchType};
pub use domain::models::search_result::SearchResult;
pub use domain::search::engine::SearchError;
pub use domain::services::search_service::SearchService;

/// 使用默认配置执行一次网页搜索
///
/// 每次调用都会新建客户端，批量查询请复用 [`SearchService`]。
pub async fn quick_search(query: &str, num: u32) -> Result<Vec<SearchResult>, SearchError> {
    SearchService::new(ClientConfig::default())?
        .web_search(query, num, 1)
        .await
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::raw_item::RawItem;
use crate::domain::models::search_request::{SearchRequest, SearchType};
use crate::engines::traits::{RawResponse, TransportError, TransportRequest};
use std::time::Duration;
use thiserror::Error;

/// 搜索错误类型
///
/// 调用方看到的全部失败情形。单条结果解析失败不在此列，
/// 由归一化层直接丢弃。
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    /// 调用参数非法，不重试
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    /// 连接或 DNS 失败
    #[error("Network error: {0}")]
    NetworkError(String),
    /// 单次请求超时
    #[error("Timeout after {0:?}")]
    Timeout(Duration),
    /// 服务端返回了非 2xx 状态码
    #[error("Unexpected HTTP status: {0}")]
    HttpStatus(u16),
    /// 重试次数耗尽，携带最后一次失败
    #[error("Retries exhausted after {attempts} attempts: {last}")]
    ExhaustedRetries {
        attempts: u32,
        #[source]
        last: Box<SearchError>,
    },
    /// 命中验证码/反爬页面，不重试
    #[error("Blocked by provider: {0}")]
    Blocked(String),
    /// 客户端配置非法
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SearchError {
    /// 是否为瞬时错误（可以通过重试恢复）
    pub fn is_transient(&self) -> bool {
        match self {
            SearchError::NetworkError(_) | SearchError::Timeout(_) => true,
            SearchError::HttpStatus(status) => is_transient_status(*status),
            _ => false,
        }
    }
}

impl From<TransportError> for SearchError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(msg) => SearchError::NetworkError(msg),
            TransportError::Timeout(after) => SearchError::Timeout(after),
            TransportError::Client(msg) => SearchError::Config(msg),
        }
    }
}

/// 429 与 5xx 视为瞬时状态
pub fn is_transient_status(status: u16) -> bool {
    status == 429 || (500..=599).contains(&status)
}

/// 单个搜索垂类的请求构造与响应定位策略
///
/// 每个垂类（网页、图片、资讯、视频、学术）一个实现，
/// 传输层与重试逻辑对垂类一无所知。
pub trait QueryStrategy: Send + Sync {
    /// 对应的搜索类型
    fn search_type(&self) -> SearchType;

    /// 解析相对链接时使用的站点根地址
    fn base_url(&self) -> &'static str;

    /// 单页可请求的最大条数，超出部分会被截断
    fn max_page_size(&self) -> u32;

    /// 构造出站请求
    fn build_request(&self, request: &SearchRequest) -> Result<TransportRequest, SearchError>;

    /// 响应是否为验证码/反爬拦截页
    fn is_blocked(&self, response: &RawResponse) -> bool;

    /// 在响应中定位结果条目，找不到时返回空列表
    fn extract_items(&self, response: &RawResponse) -> Vec<RawItem>;
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_request::SearchType;

/// 未解析的单条结果片段
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    /// 结果容器的外层 HTML
    Html(String),
    /// JSON 接口返回的单个对象
    Json(serde_json::Value),
}

/// 由垂类策略定位出的原始条目
#[derive(Debug, Clone, PartialEq)]
pub struct RawItem {
    pub search_type: SearchType,
    /// 解析相对链接用的站点根地址
    pub base_url: &'static str,
    pub payload: RawPayload,
}

impl RawItem {
    pub fn html(search_type: SearchType, base_url: &'static str, html: impl Into<String>) -> Self {
        Self {
            search_type,
            base_url,
            payload: RawPayload::Html(html.into()),
        }
    }

    pub fn json(search_type: SearchType, base_url: &'static str, value: serde_json::Value) -> Self {
        Self {
            search_type,
            base_url,
            payload: RawPayload::Json(value),
        }
    }
}

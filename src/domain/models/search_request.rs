// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::search::engine::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

pub const DEFAULT_COUNT: u32 = 10;
pub const DEFAULT_PAGE: u32 = 1;

/// 搜索类型（垂类）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Web,
    Image,
    News,
    Video,
    #[serde(alias = "scholar")]
    Academic,
}

impl SearchType {
    pub const ALL: [SearchType; 5] = [
        SearchType::Web,
        SearchType::Image,
        SearchType::News,
        SearchType::Video,
        SearchType::Academic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Web => "web",
            SearchType::Image => "image",
            SearchType::News => "news",
            SearchType::Video => "video",
            SearchType::Academic => "academic",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" => Ok(SearchType::Web),
            "image" | "images" => Ok(SearchType::Image),
            "news" => Ok(SearchType::News),
            "video" | "videos" => Ok(SearchType::Video),
            "academic" | "scholar" => Ok(SearchType::Academic),
            other => Err(SearchError::InvalidQuery(format!(
                "unknown search type: {}",
                other
            ))),
        }
    }
}

/// 单次搜索请求，调用结束即丢弃
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct SearchRequest {
    /// 查询关键词
    #[validate(length(min = 1))]
    pub query: String,
    /// 请求条数
    #[validate(range(min = 1))]
    pub count: u32,
    /// 页码，从 1 开始
    #[validate(range(min = 1))]
    pub page: u32,
    pub search_type: SearchType,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, search_type: SearchType) -> Self {
        Self {
            query: query.into(),
            count: DEFAULT_COUNT,
            page: DEFAULT_PAGE,
            search_type,
        }
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// 校验调用参数，空白关键词同样视为非法
    pub fn check(&self) -> Result<(), SearchError> {
        if self.query.trim().is_empty() {
            return Err(SearchError::InvalidQuery(
                "query text must not be empty".to_string(),
            ));
        }
        self.validate()
            .map_err(|e| SearchError::InvalidQuery(e.to_string()))
    }
}

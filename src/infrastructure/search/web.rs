// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::{extract_html_items, is_captcha_page, page_window};
use crate::domain::models::raw_item::RawItem;
use crate::domain::models::search_request::{SearchRequest, SearchType};
use crate::domain::search::engine::{QueryStrategy, SearchError};
use crate::engines::traits::{RawResponse, TransportRequest};
use once_cell::sync::Lazy;
use scraper::Selector;

pub(crate) const BAIDU_BASE_URL: &str = "https://www.baidu.com";
pub(crate) const BAIDU_SEARCH_URL: &str = "https://www.baidu.com/s";

/// 百度网页、资讯、视频结果共用的容器选择器
pub(crate) static RESULT_CONTAINERS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.result, div.c-container, div.result-op").unwrap());

/// 网页搜索
#[derive(Debug, Default, Clone, Copy)]
pub struct WebStrategy;

/// 构造 www.baidu.com/s 的通用参数，`tn` 区分资讯、视频等频道
pub(crate) fn baidu_request(
    request: &SearchRequest,
    max_page_size: u32,
    channel: Option<&str>,
) -> Result<TransportRequest, SearchError> {
    let window = page_window(request, max_page_size)?;

    let mut built = TransportRequest::new(BAIDU_SEARCH_URL)
        .param("wd", request.query.trim())
        .param("pn", window.offset)
        .param("rn", window.size)
        .param("ie", "utf-8");
    if let Some(tn) = channel {
        built = built.param("tn", tn);
    }
    Ok(built)
}

impl QueryStrategy for WebStrategy {
    fn search_type(&self) -> SearchType {
        SearchType::Web
    }

    fn base_url(&self) -> &'static str {
        BAIDU_BASE_URL
    }

    fn max_page_size(&self) -> u32 {
        50
    }

    fn build_request(&self, request: &SearchRequest) -> Result<TransportRequest, SearchError> {
        baidu_request(request, self.max_page_size(), None)
    }

    fn is_blocked(&self, response: &RawResponse) -> bool {
        is_captcha_page(response)
    }

    fn extract_items(&self, response: &RawResponse) -> Vec<RawItem> {
        extract_html_items(response, &RESULT_CONTAINERS, SearchType::Web, BAIDU_BASE_URL)
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::web::{baidu_request, BAIDU_BASE_URL, RESULT_CONTAINERS};
use super::{extract_html_items, is_captcha_page};
use crate::domain::models::raw_item::RawItem;
use crate::domain::models::search_request::{SearchRequest, SearchType};
use crate::domain::search::engine::{QueryStrategy, SearchError};
use crate::engines::traits::{RawResponse, TransportRequest};

/// 资讯搜索（`tn=news`）
#[derive(Debug, Default, Clone, Copy)]
pub struct NewsStrategy;

impl QueryStrategy for NewsStrategy {
    fn search_type(&self) -> SearchType {
        SearchType::News
    }

    fn base_url(&self) -> &'static str {
        BAIDU_BASE_URL
    }

    fn max_page_size(&self) -> u32 {
        50
    }

    fn build_request(&self, request: &SearchRequest) -> Result<TransportRequest, SearchError> {
        // cl=2 限定在资讯源内
        Ok(baidu_request(request, self.max_page_size(), Some("news"))?.param("cl", 2))
    }

    fn is_blocked(&self, response: &RawResponse) -> bool {
        is_captcha_page(response)
    }

    fn extract_items(&self, response: &RawResponse) -> Vec<RawItem> {
        extract_html_items(response, &RESULT_CONTAINERS, SearchType::News, BAIDU_BASE_URL)
    }
}

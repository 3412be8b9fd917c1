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

const XUESHU_BASE_URL: &str = "https://xueshu.baidu.com";
const XUESHU_SEARCH_URL: &str = "https://xueshu.baidu.com/s";

static PAPER_CONTAINERS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.sc_default_result").unwrap());

/// 学术搜索（百度学术）
#[derive(Debug, Default, Clone, Copy)]
pub struct AcademicStrategy;

impl QueryStrategy for AcademicStrategy {
    fn search_type(&self) -> SearchType {
        SearchType::Academic
    }

    fn base_url(&self) -> &'static str {
        XUESHU_BASE_URL
    }

    fn max_page_size(&self) -> u32 {
        50
    }

    fn build_request(&self, request: &SearchRequest) -> Result<TransportRequest, SearchError> {
        let window = page_window(request, self.max_page_size())?;

        Ok(TransportRequest::new(XUESHU_SEARCH_URL)
            .param("wd", request.query.trim())
            .param("pn", window.offset)
            .param("rn", window.size)
            .param("tn", "SE_baiduxueshu_c1gjeupa")
            .param("ie", "utf-8")
            .param("sc_hit", 1))
    }

    fn is_blocked(&self, response: &RawResponse) -> bool {
        is_captcha_page(response)
    }

    fn extract_items(&self, response: &RawResponse) -> Vec<RawItem> {
        extract_html_items(response, &PAPER_CONTAINERS, SearchType::Academic, XUESHU_BASE_URL)
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::{is_captcha_page, page_window};
use crate::domain::models::raw_item::RawItem;
use crate::domain::models::search_request::{SearchRequest, SearchType};
use crate::domain::search::engine::{QueryStrategy, SearchError};
use crate::engines::traits::{RawResponse, TransportRequest};
use serde_json::Value;
use tracing::warn;

const IMAGE_BASE_URL: &str = "https://image.baidu.com";
const IMAGE_SEARCH_URL: &str = "https://image.baidu.com/search/acjson";

/// 图片接口拒绝爬虫时返回的特征
const IMAGE_BLOCK_MARKERS: &[&str] = &["Forbid spider access", "\"antiFlag\":1"];

/// 图片搜索
///
/// 走 `acjson` JSON 接口，每个结果是 `data` 数组中的一个对象。
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageStrategy;

impl QueryStrategy for ImageStrategy {
    fn search_type(&self) -> SearchType {
        SearchType::Image
    }

    fn base_url(&self) -> &'static str {
        IMAGE_BASE_URL
    }

    fn max_page_size(&self) -> u32 {
        60
    }

    fn build_request(&self, request: &SearchRequest) -> Result<TransportRequest, SearchError> {
        let window = page_window(request, self.max_page_size())?;
        let query = request.query.trim();

        Ok(TransportRequest::new(IMAGE_SEARCH_URL)
            .param("tn", "resultjson_com")
            .param("ipn", "rj")
            .param("fp", "result")
            .param("word", query)
            .param("queryWord", query)
            .param("pn", window.offset)
            .param("rn", window.size)
            .param("ie", "utf-8")
            .param("oe", "utf-8")
            // 用户在配置中设置的同名请求头优先
            .header("Accept", "application/json, text/javascript, */*; q=0.01")
            .header("Referer", "https://image.baidu.com/"))
    }

    fn is_blocked(&self, response: &RawResponse) -> bool {
        is_captcha_page(response)
            || IMAGE_BLOCK_MARKERS
                .iter()
                .any(|marker| response.content.contains(marker))
    }

    fn extract_items(&self, response: &RawResponse) -> Vec<RawItem> {
        if response.content.trim().is_empty() {
            return Vec::new();
        }

        let value = match parse_payload(&response.content) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to parse image search payload: {}", e);
                return Vec::new();
            }
        };

        value
            .get("data")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|entry| entry.as_object().is_some_and(|obj| !obj.is_empty()))
                    .map(|entry| RawItem::json(SearchType::Image, IMAGE_BASE_URL, entry.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// 解析接口返回的 JSON
///
/// 接口偶尔输出非法的 `\'` 转义，只有原文解析失败时才修复后重试，
/// 合法正文中的 `\\'` 不会被改写。
fn parse_payload(body: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(body).or_else(|e| {
        if body.contains("\\'") {
            serde_json::from_str(&body.replace("\\'", "'"))
        } else {
            Err(e)
        }
    })
}

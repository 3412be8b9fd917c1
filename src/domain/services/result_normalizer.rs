// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::raw_item::{RawItem, RawPayload};
use crate::domain::models::search_result::SearchResult;
use crate::utils::text::{clean_html_text, collapse_whitespace};
use crate::utils::timestamp::normalize_timestamp;
use crate::utils::url_utils::{host_of, is_result_url, resolve_against};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::debug;

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").unwrap());
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h3 a[href]").unwrap());
static ABSTRACT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"[class*="content-right_"], [class*="abstract"], .c-span-last"#).unwrap()
});
static SOURCE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"[class*="cite"], [class*="source"], .c-showurl, .c-color-gray"#).unwrap()
});
static TIME_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#".c-color-gray2, [class*="time"]"#).unwrap());

/// 摘要开头的发布日期，如 "2023年12月1日 - ……"
static LEADING_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*((?:\d{4}年)?\d{1,2}月\d{1,2}日|\d{4}[-/.]\d{1,2}[-/.]\d{1,2})(?:\s*\d{1,2}:\d{2})?\s*[-\x{2013}\x{2014}]",
    )
    .unwrap()
});

/// 图片接口中可作为结果地址的字段，按优先级排列
const IMAGE_URL_FIELDS: &[&str] = &["middleURL", "thumbURL", "objURL", "hoverURL"];

/// 结果归一化器
///
/// 将垂类策略定位出的原始条目转换为统一的 [`SearchResult`]。
/// 逐字段容错，标题或链接无法解析时返回 `None`，条目被丢弃，从不报错。
#[derive(Debug, Clone, Default)]
pub struct ResultNormalizer {
    now: Option<DateTime<Utc>>,
}

impl ResultNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 固定相对时间（"3小时前"）换算时使用的当前时刻
    pub fn with_clock(now: DateTime<Utc>) -> Self {
        Self { now: Some(now) }
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }

    /// 归一化单条原始结果
    pub fn normalize(&self, item: &RawItem) -> Option<SearchResult> {
        let result = match &item.payload {
            RawPayload::Html(fragment) => self.normalize_html(fragment, item.base_url),
            RawPayload::Json(value) => self.normalize_json(value),
        };

        if result.is_none() {
            debug!("Dropping {} item without a usable title or url", item.search_type);
        }
        result
    }

    fn normalize_html(&self, fragment: &str, base_url: &str) -> Option<SearchResult> {
        let document = Html::parse_fragment(fragment);
        let container = document
            .root_element()
            .children()
            .find_map(ElementRef::wrap)?;

        let title = first_text(&container, &TITLE_SELECTOR)?;

        // 百度在容器的 mu 属性中给出落地页真实地址，优先于跳转链接
        let url = container
            .value()
            .attr("mu")
            .and_then(|mu| valid_url(base_url, mu))
            .or_else(|| {
                container
                    .select(&LINK_SELECTOR)
                    .filter_map(|a| a.value().attr("href"))
                    .find_map(|href| valid_url(base_url, href))
            })?;

        let abstract_text = first_text(&container, &ABSTRACT_SELECTOR).unwrap_or_default();
        let source = first_text(&container, &SOURCE_SELECTOR)
            .or_else(|| host_of(&url))
            .unwrap_or_default();

        let now = self.now();
        let timestamp = container
            .select(&TIME_SELECTOR)
            .map(|el| normalize_timestamp(&element_text(&el), now))
            .find(|ts| !ts.is_empty())
            .or_else(|| leading_date(&abstract_text, now))
            .unwrap_or_default();

        Some(SearchResult {
            title,
            url,
            abstract_text,
            source,
            timestamp,
        })
    }

    fn normalize_json(&self, value: &Value) -> Option<SearchResult> {
        let title = ["fromPageTitleEnc", "fromPageTitle"]
            .iter()
            .filter_map(|key| value.get(*key).and_then(Value::as_str))
            .map(clean_html_text)
            .find(|title| !title.is_empty())?;

        let original = value
            .get("replaceUrl")
            .and_then(Value::as_array)
            .and_then(|urls| urls.first())
            .and_then(|entry| entry.get("ObjURL"))
            .and_then(Value::as_str);
        let url = original
            .into_iter()
            .chain(
                IMAGE_URL_FIELDS
                    .iter()
                    .filter_map(|key| value.get(*key).and_then(Value::as_str)),
            )
            .find_map(|candidate| valid_url("https://image.baidu.com", candidate))?;

        let abstract_text = value
            .get("desc")
            .and_then(Value::as_str)
            .map(clean_html_text)
            .unwrap_or_default();
        let source = value
            .get("fromURLHost")
            .and_then(Value::as_str)
            .map(collapse_whitespace)
            .filter(|host| !host.is_empty())
            .or_else(|| host_of(&url))
            .unwrap_or_default();
        let timestamp = value
            .get("bdImgnewsDate")
            .and_then(Value::as_str)
            .map(|date| normalize_timestamp(date, self.now()))
            .unwrap_or_default();

        Some(SearchResult {
            title,
            url,
            abstract_text,
            source,
            timestamp,
        })
    }
}

fn element_text(element: &ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// 第一个文本非空的匹配元素
fn first_text(container: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    container
        .select(selector)
        .map(|el| element_text(&el))
        .find(|text| !text.is_empty())
}

/// 只采用位于摘要开头、以分隔符结束的绝对日期
fn leading_date(abstract_text: &str, now: DateTime<Utc>) -> Option<String> {
    let date = LEADING_DATE.find(abstract_text)?.as_str();
    let date = date.trim_end_matches(['-', '\u{2013}', '\u{2014}']);
    Some(normalize_timestamp(date, now)).filter(|ts| !ts.is_empty())
}

fn valid_url(base_url: &str, href: &str) -> Option<String> {
    resolve_against(base_url, href)
        .filter(is_result_url)
        .map(|url| url.to_string())
}

#[cfg(test)]
#[path = "result_normalizer_test.rs"]
mod tests;

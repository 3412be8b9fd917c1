// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 百度各搜索垂类的查询策略
///
/// 每个垂类负责：
/// - 构造请求（端点、分页参数、默认参数）
/// - 识别验证码/反爬拦截页
/// - 在响应中定位结果条目
///
/// 垂类集合是固定的，通过 [`strategy_for`] 按 [`SearchType`] 查表分发。
pub mod academic;
pub mod image;
pub mod news;
pub mod video;
pub mod web;

pub use academic::AcademicStrategy;
pub use image::ImageStrategy;
pub use news::NewsStrategy;
pub use video::VideoStrategy;
pub use web::WebStrategy;

use crate::domain::models::raw_item::RawItem;
use crate::domain::models::search_request::{SearchRequest, SearchType};
use crate::domain::search::engine::{QueryStrategy, SearchError};
use crate::engines::traits::RawResponse;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

static WEB: WebStrategy = WebStrategy;
static IMAGE: ImageStrategy = ImageStrategy;
static NEWS: NewsStrategy = NewsStrategy;
static VIDEO: VideoStrategy = VideoStrategy;
static ACADEMIC: AcademicStrategy = AcademicStrategy;

/// 按搜索类型取得对应的查询策略
pub fn strategy_for(search_type: SearchType) -> &'static dyn QueryStrategy {
    match search_type {
        SearchType::Web => &WEB,
        SearchType::Image => &IMAGE,
        SearchType::News => &NEWS,
        SearchType::Video => &VIDEO,
        SearchType::Academic => &ACADEMIC,
    }
}

/// 百度安全验证页的特征
pub(crate) const CAPTCHA_MARKERS: &[&str] = &[
    "百度安全验证",
    "wappass.baidu.com",
    "请输入验证码",
    "网络不给力，请稍后重试",
    "/static/captcha",
];

/// 响应是否为百度的验证码拦截页
///
/// 被重定向到 wappass 或页面中出现安全验证特征都视为拦截。
pub(crate) fn is_captcha_page(response: &RawResponse) -> bool {
    response.final_url.contains("wappass.baidu.com")
        || CAPTCHA_MARKERS
            .iter()
            .any(|marker| response.content.contains(marker))
}

/// 分页窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageWindow {
    /// 实际请求的条数（已按垂类上限截断）
    pub size: u32,
    /// 结果偏移量 `(page - 1) * size`
    pub offset: u32,
}

/// 校验请求并计算分页参数
///
/// 超过垂类上限的条数会被截断到上限，偏移量溢出时视为非法请求。
pub(crate) fn page_window(
    request: &SearchRequest,
    max_page_size: u32,
) -> Result<PageWindow, SearchError> {
    request.check()?;

    let size = if request.count > max_page_size {
        warn!(
            "Requested {} {} results, clamping to provider maximum {}",
            request.count, request.search_type, max_page_size
        );
        max_page_size
    } else {
        request.count
    };

    let offset = (request.page - 1).checked_mul(size).ok_or_else(|| {
        SearchError::InvalidQuery(format!("page {} is out of range", request.page))
    })?;

    Ok(PageWindow { size, offset })
}

/// 用选择器在 HTML 中定位结果容器
///
/// 只保留最外层匹配的容器，嵌套在其他容器内的元素会被跳过，
/// 返回顺序即文档顺序。
pub(crate) fn extract_html_items(
    response: &RawResponse,
    containers: &Selector,
    search_type: SearchType,
    base_url: &'static str,
) -> Vec<RawItem> {
    let document = Html::parse_document(&response.content);

    document
        .select(containers)
        .filter(|element| {
            !element
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|ancestor| containers.matches(&ancestor))
        })
        .map(|element| RawItem::html(search_type, base_url, element.html()))
        .collect()
}

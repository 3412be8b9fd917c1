// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ClientConfig;
use crate::domain::models::search_request::{SearchRequest, SearchType};
use crate::domain::models::search_result::SearchResult;
use crate::domain::search::engine::SearchError;
use crate::domain::services::result_normalizer::ResultNormalizer;
use crate::engines::reqwest_engine::ReqwestTransport;
use crate::engines::traits::Transport;
use crate::infrastructure::search::strategy_for;
use crate::utils::pacer::RequestPacer;
use crate::utils::retry_policy::RetryPolicy;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// 百度搜索服务
///
/// 对外唯一入口：按搜索类型选择查询策略，经节流与重试执行请求，
/// 归一化全部条目后按百度给出的排序返回。
///
/// 实例可以在多个任务间共享，连接池、Cookie 与节流状态随之共享。
#[derive(Clone)]
pub struct SearchService {
    transport: Arc<dyn Transport>,
    retry_policy: RetryPolicy,
    pacer: RequestPacer,
    normalizer: ResultNormalizer,
    config: ClientConfig,
}

impl SearchService {
    /// 使用 reqwest 传输创建服务
    ///
    /// # 返回值
    ///
    /// * `Ok(SearchService)` - 服务实例
    /// * `Err(SearchError::Config)` - 超时、间隔或请求头配置非法
    pub fn new(config: ClientConfig) -> Result<Self, SearchError> {
        config.check()?;
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// 使用自定义传输创建服务
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, SearchError> {
        config.check()?;
        Ok(Self {
            transport,
            retry_policy: RetryPolicy::from_config(&config),
            pacer: RequestPacer::new(config.min_request_interval()),
            normalizer: ResultNormalizer::new(),
            config,
        })
    }

    /// 替换归一化器（测试中用于固定时钟）
    pub fn with_normalizer(mut self, normalizer: ResultNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// 执行一次搜索
    ///
    /// # 参数
    ///
    /// * `query` - 关键词，不能为空白
    /// * `count` - 期望条数，超过垂类上限时按上限请求
    /// * `page` - 页码，从 1 开始
    /// * `search_type` - 搜索垂类
    ///
    /// # 返回值
    ///
    /// 成功时返回至多 `count` 条结果（可能为空）；失败时不返回任何部分结果。
    pub async fn search(
        &self,
        query: &str,
        count: u32,
        page: u32,
        search_type: SearchType,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let request = SearchRequest::new(query, search_type).count(count).page(page);
        self.search_request(&request).await
    }

    pub async fn search_request(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let strategy = strategy_for(request.search_type);
        let outbound = strategy.build_request(request)?;

        self.pacer.wait_turn().await;

        let started = Instant::now();
        let transport: &dyn Transport = self.transport.as_ref();
        let outbound = &outbound;
        let response = self
            .retry_policy
            .run(
                move |attempt| {
                    debug!(
                        attempt,
                        transport = transport.name(),
                        "GET {}",
                        outbound.full_url()
                    );
                    transport.execute(outbound)
                },
                |response| strategy.is_blocked(response),
            )
            .await?;

        if strategy.is_blocked(&response) {
            warn!(
                search_type = %request.search_type,
                final_url = %response.final_url,
                "request blocked by anti-automation check"
            );
            return Err(SearchError::Blocked(format!(
                "{} search for '{}' hit a verification page",
                request.search_type, request.query
            )));
        }

        if !response.is_success() {
            return Err(SearchError::HttpStatus(response.status_code));
        }

        let items = strategy.extract_items(&response);
        let located = items.len();
        let mut results: Vec<SearchResult> = items
            .iter()
            .filter_map(|item| self.normalizer.normalize(item))
            .collect();
        results.truncate(request.count.min(strategy.max_page_size()) as usize);

        info!(
            search_type = %request.search_type,
            page = request.page,
            located,
            returned = results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search completed for '{}'",
            request.query
        );

        Ok(results)
    }

    /// 网页搜索
    pub async fn web_search(
        &self,
        query: &str,
        num: u32,
        page: u32,
    ) -> Result<Vec<SearchResult>, SearchError> {
        self.search(query, num, page, SearchType::Web).await
    }

    /// 图片搜索
    pub async fn image_search(
        &self,
        query: &str,
        num: u32,
        page: u32,
    ) -> Result<Vec<SearchResult>, SearchError> {
        self.search(query, num, page, SearchType::Image).await
    }

    /// 资讯搜索
    pub async fn news_search(
        &self,
        query: &str,
        num: u32,
        page: u32,
    ) -> Result<Vec<SearchResult>, SearchError> {
        self.search(query, num, page, SearchType::News).await
    }

    /// 视频搜索
    pub async fn video_search(
        &self,
        query: &str,
        num: u32,
        page: u32,
    ) -> Result<Vec<SearchResult>, SearchError> {
        self.search(query, num, page, SearchType::Video).await
    }

    /// 学术搜索
    pub async fn academic_search(
        &self,
        query: &str,
        num: u32,
        page: u32,
    ) -> Result<Vec<SearchResult>, SearchError> {
        self.search(query, num, page, SearchType::Academic).await
    }
}

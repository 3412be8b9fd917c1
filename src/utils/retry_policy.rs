// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ClientConfig;
use crate::domain::search::engine::{is_transient_status, SearchError};
use crate::engines::traits::{RawResponse, TransportError};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// 重试策略配置
///
/// 固定间隔重试：首次尝试失败后最多再尝试 `max_retries` 次，
/// 间隔只出现在两次尝试之间。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 最大重试次数
    pub max_retries: u32,
    /// 两次尝试之间的等待时间
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.max_retries, config.retry_delay())
    }

    /// 总尝试次数上限
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// 已经完成 `attempts` 次尝试后是否还能继续
    pub fn should_retry(&self, attempts: u32) -> bool {
        attempts < self.max_attempts()
    }

    /// 带重试地执行请求
    ///
    /// # 参数
    ///
    /// * `attempt_fn` - 单次尝试，参数为从 1 开始的尝试序号
    /// * `is_blocked` - 判断响应是否为拦截页；命中后立即返回该响应，不再重试
    ///
    /// # 返回值
    ///
    /// * `Ok(RawResponse)` - 成功、被拦截或非瞬时状态码的响应
    /// * `Err(SearchError::ExhaustedRetries)` - 瞬时失败次数超过上限
    /// * `Err(SearchError::Config)` - 请求无法构造，不重试
    pub async fn run<F, Fut, B>(
        &self,
        mut attempt_fn: F,
        is_blocked: B,
    ) -> Result<RawResponse, SearchError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<RawResponse, TransportError>>,
        B: Fn(&RawResponse) -> bool,
    {
        let mut attempts = 0u32;

        loop {
            attempts += 1;

            let failure = match attempt_fn(attempts).await {
                Ok(response) if is_blocked(&response) => {
                    warn!(attempt = attempts, "blocked response detected, not retrying");
                    return Ok(response);
                }
                Ok(response) if is_transient_status(response.status_code) => {
                    SearchError::HttpStatus(response.status_code)
                }
                Ok(response) => {
                    debug!(attempt = attempts, status = response.status_code, "attempt completed");
                    return Ok(response);
                }
                Err(e) if e.is_retryable() => SearchError::from(e),
                Err(e) => return Err(e.into()),
            };

            if !self.should_retry(attempts) {
                warn!(attempts, error = %failure, "retries exhausted");
                return Err(SearchError::ExhaustedRetries {
                    attempts,
                    last: Box::new(failure),
                });
            }

            warn!(
                "attempt {} of {} failed: {}, retrying in {:?}",
                attempts,
                self.max_attempts(),
                failure,
                self.delay
            );
            tokio::time::sleep(self.delay).await;
        }
    }
}

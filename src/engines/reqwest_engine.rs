// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::settings::ClientConfig;
use crate::engines::traits::{RawResponse, Transport, TransportError, TransportRequest};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};
use tracing::debug;

/// HTTP 传输实现
///
/// 基于reqwest，内部持有一个可跨任务共享的连接池客户端。
/// 默认请求头在构造时固化，Cookie 在同一实例的请求之间保留。
/// 用户在配置中显式设置的请求头优先于单次请求携带的同名请求头。
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
    user_headers: HashSet<HeaderName>,
}

impl ReqwestTransport {
    /// 根据客户端配置创建传输实例
    ///
    /// # 参数
    ///
    /// * `config` - 客户端配置（超时、请求头）
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestTransport)` - 传输实例
    /// * `Err(TransportError)` - 请求头非法或客户端无法构造
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let headers = config
            .header_map()
            .map_err(|e| TransportError::Client(e.to_string()))?;
        let timeout = config.timeout();
        let user_headers = config
            .headers
            .keys()
            .filter_map(|name| HeaderName::from_bytes(name.as_bytes()).ok())
            .collect();

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| TransportError::Client(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout,
            user_headers,
        })
    }

    fn map_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if err.is_builder() {
            TransportError::Client(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    /// 执行一次HTTP GET请求
    ///
    /// # 参数
    ///
    /// * `request` - 出站请求
    ///
    /// # 返回值
    ///
    /// * `Ok(RawResponse)` - 任意状态码的响应
    /// * `Err(TransportError)` - 连接失败、超时或请求无法构造
    async fn execute(&self, request: &TransportRequest) -> Result<RawResponse, TransportError> {
        let mut headers = HeaderMap::new();
        for (k, v) in &request.headers {
            let name = HeaderName::from_bytes(k.as_bytes())
                .map_err(|e| TransportError::Client(format!("invalid header name {:?}: {}", k, e)))?;
            let value = HeaderValue::from_str(v)
                .map_err(|e| TransportError::Client(format!("invalid value for header {}: {}", k, e)))?;
            if self.user_headers.contains(&name) {
                continue;
            }
            headers.insert(name, value);
        }

        let start = Instant::now();
        let response = self
            .client
            .get(&request.url)
            .query(&request.query)
            .headers(headers)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();

        let mut response_headers = HashMap::new();
        for (k, v) in response.headers() {
            if let Ok(v_str) = v.to_str() {
                response_headers.insert(k.as_str().to_string(), v_str.to_string());
            }
        }

        let content = response.text().await.map_err(|e| self.map_error(e))?;
        let response_time_ms = start.elapsed().as_millis() as u64;

        debug!(
            status = status_code,
            bytes = content.len(),
            elapsed_ms = response_time_ms,
            "response received from {}",
            final_url
        );

        Ok(RawResponse {
            status_code,
            content,
            final_url,
            headers: response_headers,
            response_time_ms,
        })
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;

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

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// 传输层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// 连接失败、DNS 解析失败、连接被重置
    #[error("Network error: {0}")]
    Network(String),
    /// 超过配置的超时时间
    #[error("Timeout after {0:?}")]
    Timeout(Duration),
    /// 请求本身无法构造（非法 URL、非法请求头）
    #[error("Client error: {0}")]
    Client(String),
}

impl TransportError {
    /// 判断错误是否可重试
    ///
    /// # 返回值
    ///
    /// 网络错误与超时返回true，请求构造错误返回false
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Network(_) | TransportError::Timeout(_) => true,
            TransportError::Client(_) => false,
        }
    }
}

/// 出站请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// 目标地址（不含查询串）
    pub url: String,
    /// 查询参数，按插入顺序发送
    pub query: Vec<(String, String)>,
    /// 本次请求额外附加的请求头
    pub headers: HashMap<String, String>,
}

impl TransportRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: HashMap::new(),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// 按名称读取查询参数
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 拼接完整 URL，用于日志
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        format!(
            "{}?{}",
            self.url,
            serde_urlencoded::to_string(&self.query).unwrap_or_default()
        )
    }
}

/// 单次请求的原始响应
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应内容
    pub content: String,
    /// 跟随重定向后的最终地址
    pub final_url: String,
    /// 响应头
    pub headers: HashMap<String, String>,
    /// 响应时间（毫秒）
    pub response_time_ms: u64,
}

impl RawResponse {
    pub fn new(status_code: u16, content: impl Into<String>) -> Self {
        Self {
            status_code,
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// 传输层特质
///
/// 只负责单次请求，非 2xx 状态码作为数据返回而不是错误。
#[async_trait]
pub trait Transport: Send + Sync {
    /// 执行一次请求
    async fn execute(&self, request: &TransportRequest) -> Result<RawResponse, TransportError>;

    /// 传输实现名称
    fn name(&self) -> &'static str;
}

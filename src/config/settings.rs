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

use crate::domain::models::search_request::SearchType;
use crate::domain::search::engine::SearchError;
use crate::utils::telemetry::LogFormat;
use config::{Config, ConfigError, Environment, File};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use validator::Validate;

pub const DEFAULT_TIMEOUT_SECONDS: f64 = 10.0;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_SECONDS: f64 = 1.0;

/// 默认请求头，用户配置的同名请求头（不区分大小写）会覆盖这里的值
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[
    (
        "User-Agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    ),
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
    ),
    ("Accept-Language", "zh-CN,zh;q=0.9,en;q=0.8"),
    ("Connection", "keep-alive"),
    ("Upgrade-Insecure-Requests", "1"),
];

/// 搜索客户端配置
///
/// 客户端构造完成后只读，由客户端实例独占。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ClientConfig {
    /// 单次请求超时时间（秒）
    #[validate(range(exclusive_min = 0.0))]
    pub timeout_seconds: f64,
    /// 首次请求之外的最大重试次数
    pub max_retries: u32,
    /// 两次尝试之间的固定间隔（秒）
    #[validate(range(min = 0.0))]
    pub retry_delay_seconds: f64,
    /// 同一客户端上两次搜索之间的最小间隔（秒），0 表示不限制
    #[validate(range(min = 0.0))]
    pub min_request_interval_seconds: f64,
    /// 覆盖默认值的请求头
    pub headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_seconds: DEFAULT_RETRY_DELAY_SECONDS,
            min_request_interval_seconds: 0.0,
            headers: HashMap::new(),
        }
    }
}

impl ClientConfig {
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_delay(mut self, seconds: f64) -> Self {
        self.retry_delay_seconds = seconds;
        self
    }

    pub fn with_min_request_interval(mut self, seconds: f64) -> Self {
        self.min_request_interval_seconds = seconds;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// 校验配置
    ///
    /// 除了范围校验，还拒绝 NaN/无穷大以及非法的请求头
    pub fn check(&self) -> Result<(), SearchError> {
        self.validate()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        for (name, value) in [
            ("timeout_seconds", self.timeout_seconds),
            ("retry_delay_seconds", self.retry_delay_seconds),
            ("min_request_interval_seconds", self.min_request_interval_seconds),
        ] {
            if Duration::try_from_secs_f64(value).is_err() {
                return Err(SearchError::Config(format!(
                    "{} must be a finite, non-negative number of seconds",
                    name
                )));
            }
        }

        self.header_map().map(|_| ())
    }

    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_seconds)
            .unwrap_or(Duration::from_secs_f64(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.retry_delay_seconds).unwrap_or_default()
    }

    pub fn min_request_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.min_request_interval_seconds).unwrap_or_default()
    }

    /// 默认请求头与用户请求头合并后的结果
    pub fn header_map(&self) -> Result<HeaderMap, SearchError> {
        let mut headers = HeaderMap::new();
        let user = self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()));

        for (name, value) in DEFAULT_HEADERS.iter().copied().chain(user) {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| SearchError::Config(format!("invalid header name {:?}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| SearchError::Config(format!("invalid value for header {}: {}", name, e)))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }
}

/// 命令行入口使用的搜索默认值
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    /// 默认返回条数
    pub default_count: u32,
    /// 未指定类型时使用的搜索类型
    pub default_type: SearchType,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    pub format: LogFormat,
}

/// 应用程序配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 客户端配置
    pub client: ClientConfig,
    /// 搜索默认值
    pub search: SearchSettings,
    pub log: LogSettings,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加内置默认值、`config/default`、`config/{APP_ENVIRONMENT}`
    /// 以及 `BAIDURS__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_dir("config")
    }

    /// 从指定目录加载配置文件
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            .set_default("client.timeout_seconds", DEFAULT_TIMEOUT_SECONDS)?
            .set_default("client.max_retries", DEFAULT_MAX_RETRIES)?
            .set_default("client.retry_delay_seconds", DEFAULT_RETRY_DELAY_SECONDS)?
            .set_default("client.min_request_interval_seconds", 0.0)?
            .set_default("search.default_count", 10)?
            .set_default("search.default_type", "web")?
            .set_default("log.format", "text")?
            .add_source(File::with_name(&dir.join("default").to_string_lossy()).required(false))
            .add_source(File::with_name(&dir.join(&env).to_string_lossy()).required(false))
            .add_source(
                Environment::with_prefix("BAIDURS")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;

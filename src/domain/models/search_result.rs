// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 归一化后的搜索结果
///
/// `title` 非空且 `url` 是合法的 http(s) 地址；其余字段缺失时为空字符串。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub source: String,
    pub timestamp: String,
}

impl SearchResult {
    pub fn new(title: String, url: String, abstract_text: String) -> Self {
        Self {
            title,
            url,
            abstract_text,
            source: String::new(),
            timestamp: String::new(),
        }
    }
}

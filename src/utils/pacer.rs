// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// 请求节流器
///
/// 保证同一客户端上两次搜索的开始时间至少相隔 `min_interval`。
/// 克隆出的实例共享同一个时间戳，并发调用方会依次排队。
#[derive(Clone, Debug)]
pub struct RequestPacer {
    last_request_time: Arc<Mutex<Option<Instant>>>,
    min_interval: Duration,
}

impl RequestPacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_request_time: Arc::new(Mutex::new(None)),
            min_interval,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.min_interval.is_zero()
    }

    /// 等待到允许发出下一次请求
    pub async fn wait_turn(&self) {
        if !self.is_enabled() {
            return;
        }

        let mut last = self.last_request_time.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!(?wait, "pacing request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }
}

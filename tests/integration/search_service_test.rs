// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use crate::integration::helpers::{captcha_page, ok_page, web_page, StubTransport};
    use baidurs::config::settings::ClientConfig;
    use baidurs::domain::models::search_request::SearchType;
    use baidurs::domain::search::engine::SearchError;
    use baidurs::engines::traits::{RawResponse, TransportError};
    use baidurs::SearchService;
    use std::time::Duration;
    use tokio::time::Instant;

    const FIVE_ITEMS: [(&str, &str); 5] = [
        ("Rust 程序设计语言", "https://www.rust-lang.org/"),
        ("Rust 官方文档", "https://doc.rust-lang.org/book/"),
        ("crates.io", "https://crates.io/"),
        ("Tokio 异步运行时", "https://tokio.rs/"),
        ("Rust 中文社区", "https://rustcc.cn/"),
    ];

    fn config() -> ClientConfig {
        ClientConfig::default().with_retries(3).with_delay(1.0)
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_two_returns_stub_items_in_order() {
        let stub = StubTransport::new(vec![ok_page(&FIVE_ITEMS)]);
        let service = SearchService::with_transport(config(), stub.clone()).unwrap();

        let results = service
            .search("test", 5, 2, SearchType::Web)
            .await
            .unwrap();

        assert_eq!(results.len(), 5);
        for (result, (title, url)) in results.iter().zip(FIVE_ITEMS.iter()) {
            assert_eq!(result.title, *title);
            assert_eq!(result.url, *url);
        }
        assert_eq!(results[0].abstract_text, "第 1 条摘要");
        assert_eq!(results[2].source, "crates.io");

        let requests = stub.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query_param("wd"), Some("test"));
        assert_eq!(requests[0].query_param("pn"), Some("5"));
        assert_eq!(requests[0].query_param("rn"), Some("5"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blocked_response_fails_without_retrying() {
        let stub = StubTransport::repeating(Ok(captcha_page()), 4);
        let service = SearchService::with_transport(config(), stub.clone()).unwrap();

        let started = Instant::now();
        let err = service
            .search("test", 10, 1, SearchType::Web)
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::Blocked(_)), "{:?}", err);
        assert_eq!(stub.calls(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_redirect_to_verification_is_blocked() {
        let mut response = RawResponse::new(200, web_page(&FIVE_ITEMS));
        response.final_url = "https://wappass.baidu.com/static/captcha/tuxing.html".to_string();
        let stub = StubTransport::new(vec![Ok(response)]);
        let service = SearchService::with_transport(config(), stub.clone()).unwrap();

        let err = service.news_search("test", 5, 1).await.unwrap_err();
        assert!(matches!(err, SearchError::Blocked(_)));
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_item_without_url_is_dropped_and_order_kept() {
        let page = r#"<html><body><div id="content_left">
            <div class="result c-container"><h3><a href="https://a.example.com/">A</a></h3></div>
            <div class="result c-container"><h3>B has no link</h3></div>
            <div class="result c-container"><h3><a href="https://c.example.com/">C</a></h3></div>
        </div></body></html>"#;
        let stub = StubTransport::new(vec![Ok(RawResponse::new(200, page))]);
        let service = SearchService::with_transport(config(), stub).unwrap();

        let results = service.web_search("test", 10, 1).await.unwrap();
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_without_results_is_empty() {
        let stub = StubTransport::new(vec![ok_page(&[])]);
        let service = SearchService::with_transport(config(), stub.clone()).unwrap();

        let results = service.video_search("没有结果的查询", 10, 1).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_are_retried_with_delay() {
        let stub = StubTransport::new(vec![
            Err(TransportError::Network("connection reset".to_string())),
            Ok(RawResponse::new(503, "Service Unavailable")),
            ok_page(&FIVE_ITEMS[..2]),
        ]);
        let service = SearchService::with_transport(config(), stub.clone()).unwrap();

        let started = Instant::now();
        let results = service.web_search("test", 10, 1).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(stub.calls(), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_carry_last_failure() {
        let stub = StubTransport::new(vec![
            Err(TransportError::Network("dns error".to_string())),
            Ok(RawResponse::new(429, "")),
            Err(TransportError::Timeout(Duration::from_secs(10))),
        ]);
        let config = ClientConfig::default().with_retries(2).with_delay(0.5);
        let service = SearchService::with_transport(config, stub.clone()).unwrap();

        let started = Instant::now();
        let err = service.web_search("test", 10, 1).await.unwrap_err();

        assert_eq!(
            err,
            SearchError::ExhaustedRetries {
                attempts: 3,
                last: Box::new(SearchError::Timeout(Duration::from_secs(10))),
            }
        );
        assert_eq!(stub.calls(), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_retries_means_single_attempt() {
        let stub = StubTransport::repeating(
            Err(TransportError::Network("connection refused".to_string())),
            3,
        );
        let config = ClientConfig::default().with_retries(0);
        let service = SearchService::with_transport(config, stub.clone()).unwrap();

        let err = service.web_search("test", 10, 1).await.unwrap_err();
        assert!(matches!(err, SearchError::ExhaustedRetries { attempts: 1, .. }));
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_query_never_reaches_transport() {
        let stub = StubTransport::new(vec![ok_page(&FIVE_ITEMS)]);
        let service = SearchService::with_transport(config(), stub.clone()).unwrap();

        for (query, count, page) in [("", 10, 1), ("   ", 10, 1), ("rust", 0, 1), ("rust", 10, 0)] {
            let err = service
                .search(query, count, page, SearchType::Web)
                .await
                .unwrap_err();
            assert!(matches!(err, SearchError::InvalidQuery(_)));
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_status_is_not_retried() {
        let stub = StubTransport::repeating(Ok(RawResponse::new(404, "Not Found")), 4);
        let service = SearchService::with_transport(config(), stub.clone()).unwrap();

        let err = service.web_search("test", 10, 1).await.unwrap_err();
        assert_eq!(err, SearchError::HttpStatus(404));
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_truncated_to_requested_count() {
        let stub = StubTransport::new(vec![ok_page(&FIVE_ITEMS)]);
        let service = SearchService::with_transport(config(), stub).unwrap();

        let results = service.web_search("test", 3, 1).await.unwrap();
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Rust 程序设计语言", "Rust 官方文档", "crates.io"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_oversized_count_is_clamped() {
        let urls: Vec<String> = (0..60).map(|i| format!("https://site{}.example.com/", i)).collect();
        let titles: Vec<String> = (0..60).map(|i| format!("结果 {}", i)).collect();
        let items: Vec<(&str, &str)> = titles
            .iter()
            .zip(urls.iter())
            .map(|(t, u)| (t.as_str(), u.as_str()))
            .collect();
        let stub = StubTransport::new(vec![ok_page(&items)]);
        let service = SearchService::with_transport(config(), stub.clone()).unwrap();

        let results = service.web_search("test", 80, 1).await.unwrap();
        assert_eq!(results.len(), 50);
        assert_eq!(stub.requests()[0].query_param("rn"), Some("50"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_image_search_reads_json_payload() {
        let body = r#"{"queryEnc":"rust","data":[
            {"fromPageTitleEnc":"Rust logo","thumbURL":"https://img0.baidu.com/it/u=1.jpg","fromURLHost":"www.rust-lang.org"},
            {"fromPageTitleEnc":"","thumbURL":"https://img1.baidu.com/it/u=2.jpg"},
            {}
        ]}"#;
        let stub = StubTransport::new(vec![Ok(RawResponse::new(200, body))]);
        let service = SearchService::with_transport(config(), stub.clone()).unwrap();

        let results = service.image_search("rust", 10, 1).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Rust logo");
        assert_eq!(results[0].url, "https://img0.baidu.com/it/u=1.jpg");
        assert_eq!(results[0].source, "www.rust-lang.org");
        assert_eq!(stub.requests()[0].query_param("word"), Some("rust"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_successive_searches_are_paced() {
        let stub = StubTransport::new(vec![ok_page(&FIVE_ITEMS), ok_page(&FIVE_ITEMS)]);
        let config = config().with_min_request_interval(2.0);
        let service = SearchService::with_transport(config, stub.clone()).unwrap();

        let started = Instant::now();
        service.web_search("first", 5, 1).await.unwrap();
        assert_eq!(started.elapsed(), Duration::ZERO);
        service.web_search("second", 5, 1).await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_secs(2));
        assert_eq!(stub.calls(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let stub = StubTransport::new(vec![]);
        let config = ClientConfig::default().with_timeout(0.0);
        assert!(matches!(
            SearchService::with_transport(config, stub),
            Err(SearchError::Config(_))
        ));
    }
}

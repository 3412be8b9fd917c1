// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use baidurs::domain::models::search_request::{SearchRequest, SearchType};
    use baidurs::domain::search::engine::SearchError;
    use baidurs::engines::traits::RawResponse;
    use baidurs::infrastructure::search::strategy_for;

    #[test]
    fn test_offset_follows_page_and_count_for_every_vertical() {
        for search_type in SearchType::ALL {
            let strategy = strategy_for(search_type);
            let request = SearchRequest::new("测试查询", search_type).count(7).page(3);
            let built = strategy.build_request(&request).unwrap();

            assert_eq!(built.query_param("pn"), Some("14"), "{}", search_type);
            assert_eq!(built.query_param("rn"), Some("7"), "{}", search_type);
        }
    }

    #[test]
    fn test_build_request_is_deterministic() {
        for search_type in SearchType::ALL {
            let strategy = strategy_for(search_type);
            let request = SearchRequest::new("rust async", search_type).count(10).page(2);
            let first = strategy.build_request(&request).unwrap();
            let second = strategy.build_request(&request).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.full_url(), second.full_url());
        }
    }

    #[test]
    fn test_invalid_requests_rejected_by_every_vertical() {
        for search_type in SearchType::ALL {
            let strategy = strategy_for(search_type);
            let invalid = [
                SearchRequest::new("", search_type),
                SearchRequest::new(" \t ", search_type),
                SearchRequest::new("rust", search_type).count(0),
                SearchRequest::new("rust", search_type).page(0),
            ];
            for request in &invalid {
                assert!(
                    matches!(
                        strategy.build_request(request),
                        Err(SearchError::InvalidQuery(_))
                    ),
                    "{:?}",
                    request
                );
            }
        }
    }

    #[test]
    fn test_oversized_count_is_clamped() {
        for search_type in SearchType::ALL {
            let strategy = strategy_for(search_type);
            let request = SearchRequest::new("rust", search_type).count(1000).page(2);
            let built = strategy.build_request(&request).unwrap();

            let max = strategy.max_page_size().to_string();
            assert_eq!(built.query_param("rn"), Some(max.as_str()));
            assert_eq!(built.query_param("pn"), Some(max.as_str()));
        }
    }

    #[test]
    fn test_captcha_page_blocks_every_vertical() {
        let captcha = RawResponse::new(
            200,
            "<html><head><title>百度安全验证</title></head><body>请输入验证码</body></html>",
        );
        let mut redirected = RawResponse::new(200, "<html></html>");
        redirected.final_url =
            "https://wappass.baidu.com/static/captcha/tuxing.html?ak=1".to_string();
        let normal = RawResponse::new(200, "<html><body>ok</body></html>");

        for search_type in SearchType::ALL {
            let strategy = strategy_for(search_type);
            assert!(strategy.is_blocked(&captcha), "{}", search_type);
            assert!(strategy.is_blocked(&redirected), "{}", search_type);
            assert!(!strategy.is_blocked(&normal), "{}", search_type);
        }
    }

    #[test]
    fn test_empty_payload_yields_no_items() {
        for search_type in SearchType::ALL {
            let strategy = strategy_for(search_type);
            for body in ["", "<html><body></body></html>", "{}"] {
                assert!(strategy
                    .extract_items(&RawResponse::new(200, body))
                    .is_empty());
            }
        }
    }

    #[test]
    fn test_endpoints() {
        let request = |t| SearchRequest::new("rust", t);
        let url = |t| strategy_for(t).build_request(&request(t)).unwrap().url;

        assert_eq!(url(SearchType::Web), "https://www.baidu.com/s");
        assert_eq!(url(SearchType::News), "https://www.baidu.com/s");
        assert_eq!(url(SearchType::Video), "https://www.baidu.com/s");
        assert_eq!(url(SearchType::Image), "https://image.baidu.com/search/acjson");
        assert_eq!(url(SearchType::Academic), "https://xueshu.baidu.com/s");
    }
}

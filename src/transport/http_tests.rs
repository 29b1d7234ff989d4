//! Tests for the transport value types and the `Arc` forwarding impl.

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};
use serde_json::json;
use std::sync::Arc;

fn url() -> url::Url {
    url::Url::parse("https://api.nope.net/v1/signpost").unwrap()
}

fn response(status: u16, body: &[u8]) -> HttpResponse {
    HttpResponse::new(
        http::StatusCode::from_u16(status).unwrap(),
        http::HeaderMap::new(),
        body.to_vec(),
    )
}

mod request {
    use super::*;

    #[test]
    fn starts_empty() {
        let req = HttpRequest::new(http::Method::GET, url());

        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn query_pairs_are_encoded_in_order() {
        let req = HttpRequest::new(http::Method::GET, url()).with_query(&[
            ("country", "US".to_string()),
            ("scopes", "suicide,domestic violence".to_string()),
        ]);

        assert_eq!(
            req.url.as_str(),
            "https://api.nope.net/v1/signpost?country=US&scopes=suicide%2Cdomestic+violence"
        );
    }

    #[test]
    fn empty_query_leaves_url_untouched() {
        let req = HttpRequest::new(http::Method::GET, url()).with_query(&[]);

        assert_eq!(req.url.as_str(), "https://api.nope.net/v1/signpost");
    }

    #[test]
    fn json_body_sets_content_type() {
        let req = HttpRequest::new(http::Method::POST, url())
            .with_json(&json!({"text": "hi"}))
            .unwrap();

        assert_eq!(
            req.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(req.body.as_deref(), Some(br#"{"text":"hi"}"#.as_slice()));
    }

    #[test]
    fn header_replaces_previous_value() {
        let req = HttpRequest::new(http::Method::GET, url())
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("text/plain"),
            )
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("application/json"),
            );

        assert_eq!(req.headers.get_all(http::header::ACCEPT).iter().count(), 1);
        assert_eq!(req.headers[http::header::ACCEPT], "application/json");
    }
}

mod response {
    use super::*;

    #[test]
    fn success_is_2xx_only() {
        assert!(response(200, b"").is_success());
        assert!(response(201, b"").is_success());
        assert!(!response(302, b"").is_success());
        assert!(!response(429, b"").is_success());
    }

    #[test]
    fn text_rejects_invalid_utf8() {
        assert!(response(200, &[0xff, 0xfe]).text().is_none());
        assert_eq!(response(200, b"ok").text(), Some("ok"));
    }

    #[test]
    fn header_lookup_ignores_case() {
        let mut resp = response(429, b"");
        resp.headers.insert(
            http::header::RETRY_AFTER,
            http::HeaderValue::from_static("42"),
        );

        assert_eq!(resp.header_str("Retry-After"), Some("42"));
        assert_eq!(resp.header_str("x-missing"), None);
    }

    #[test]
    fn json_decodes_body() {
        let resp = response(200, br#"{"country_code":"GB"}"#);

        let value: serde_json::Value = resp.json().unwrap();

        assert_eq!(value["country_code"], "GB");
        assert!(response(200, b"<html>").json::<serde_json::Value>().is_err());
    }
}

mod client_trait {
    use super::*;

    struct Echo;

    impl HttpClient for Echo {
        async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
            Ok(HttpResponse::new(
                http::StatusCode::OK,
                req.headers,
                req.body.unwrap_or_default(),
            ))
        }
    }

    #[tokio::test]
    async fn arc_forwards_to_inner_client() {
        let client = Arc::new(Echo);

        let resp = client
            .send(
                HttpRequest::new(http::Method::POST, url())
                    .with_json(&json!(["ping"]))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.body, br#"["ping"]"#);
        assert_eq!(
            resp.header_str(http::header::CONTENT_TYPE),
            Some("application/json")
        );
    }
}

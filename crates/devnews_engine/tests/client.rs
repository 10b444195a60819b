use std::time::Duration;

use devnews_core::{ConnectivityResult, NewsItemId, GENERIC_FAILURE_MESSAGE};
use devnews_engine::{
    BufferedTrace, ClientSettings, GenerateError, GenerationClient, NullTrace,
    ReqwestGenerationClient,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestGenerationClient {
    ReqwestGenerationClient::new(ClientSettings::new(server.uri())).expect("client")
}

#[tokio::test]
async fn generate_posts_prompt_and_returns_items_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-news"))
        .and(header("content-type", "application/json"))
        .and(header("ngrok-skip-browser-warning", "true"))
        .and(body_json(json!({ "prompt": "rust async" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                { "id": "b-2", "title": "Second", "summary": "s", "category": "Research" },
                { "id": 1, "title": "First", "summary": "f", "category": "Tools",
                  "insight": "x", "code": "fn main(){}", "sourceUrl": "https://dev.to/a" }
            ],
            "message": "Generated 2 news summaries"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let items = client_for(&server)
        .generate("rust async", &NullTrace)
        .await
        .expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, NewsItemId::new("b-2"));
    assert_eq!(items[1].id, NewsItemId::from(1));
    assert_eq!(items[1].source_url.as_deref(), Some("https://dev.to/a"));
}

#[tokio::test]
async fn non_success_status_carries_code_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-news"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate("x", &NullTrace)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GenerateError::HttpStatus {
            status: 500,
            body: "server error".to_string()
        }
    );
    let info = err.to_error_info();
    assert!(info.to_string().contains("500"));
    assert!(info.to_string().contains("server error"));
}

#[tokio::test]
async fn generate_reports_status_and_error_body_to_trace() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-news"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .mount(&server)
        .await;

    let trace = BufferedTrace::new();
    let result = client_for(&server).generate("x", &trace).await;
    assert!(result.is_err());
    assert_eq!(
        trace.into_lines(),
        vec![
            "Response status: 500 Internal Server Error".to_string(),
            "Error response: server error".to_string(),
        ]
    );
}

#[tokio::test]
async fn service_rejection_uses_its_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "No research results found",
            "data": []
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate("x", &NullTrace)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GenerateError::Rejected("No research results found".to_string())
    );
}

#[tokio::test]
async fn rejection_without_message_is_generic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate("x", &NullTrace)
        .await
        .unwrap_err();
    assert_eq!(err.to_error_info().message, GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-news"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "success": true, "data": [] })),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::new(server.uri())
    };
    let client = ReqwestGenerationClient::new(settings).expect("client");
    let err = client.generate("x", &NullTrace).await.unwrap_err();
    assert!(matches!(err, GenerateError::Timeout(_)), "{err:?}");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-news"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
        .mount(&server)
        .await;

    let settings = ClientSettings {
        max_response_bytes: 16,
        ..ClientSettings::new(server.uri())
    };
    let client = ReqwestGenerationClient::new(settings).expect("client");
    let err = client.generate("x", &NullTrace).await.unwrap_err();
    assert_eq!(err, GenerateError::TooLarge { max_bytes: 16 });
}

#[tokio::test]
async fn unreachable_service_is_network_error() {
    // Bind then release a port so nothing is listening on it.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let settings = ClientSettings::new(format!("http://127.0.0.1:{port}"));
    let client = ReqwestGenerationClient::new(settings).expect("client");
    let err = client.generate("x", &NullTrace).await.unwrap_err();
    assert!(
        matches!(err, GenerateError::Network(_) | GenerateError::Timeout(_)),
        "{err:?}"
    );
}

#[test]
fn invalid_header_is_a_config_error() {
    let settings = ClientSettings {
        extra_headers: vec![("bad header".to_string(), "v".to_string())],
        ..ClientSettings::default()
    };
    let err = ReqwestGenerationClient::new(settings).unwrap_err();
    assert!(matches!(err, GenerateError::Config(_)));
}

#[tokio::test]
async fn probe_reports_body_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("ngrok-skip-browser-warning", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"status\":\"ok\"}"))
        .mount(&server)
        .await;

    let result = client_for(&server).probe().await;
    assert_eq!(
        result,
        ConnectivityResult::Reachable {
            body: "{\"status\":\"ok\"}".to_string()
        }
    );
}

#[tokio::test]
async fn probe_reports_bad_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = client_for(&server).probe().await;
    assert_eq!(
        result,
        ConnectivityResult::BadStatus {
            status: 503,
            reason: "Service Unavailable".to_string()
        }
    );
}

use std::path::PathBuf;
use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;
use sniper_ai::SharedModel;

const MODEL_UNAVAILABLE: &str = "Modelo de IA não foi carregado.";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(model: Option<SharedModel>) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = sniper_api::app::build_app(model);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn with_fixture_model() -> Self {
        let model = sniper_ai::load_model(fixture("anomaly_model.json"))
            .expect("fixture should parse")
            .expect("fixture should exist");
        Self::spawn(Some(Arc::new(model) as SharedModel)).await
    }

    async fn without_model() -> Self {
        let model = sniper_ai::load_model(fixture("missing_model.json")).unwrap();
        assert!(model.is_none());
        Self::spawn(None).await
    }

    fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../ai/tests/fixtures")
        .join(name)
}

async fn error_message(res: reqwest::Response) -> String {
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = res.json().await.unwrap();
    body["error"]
        .as_str()
        .expect("error body must carry an `error` string")
        .to_string()
}

#[tokio::test]
async fn normal_transfer_is_classified_as_normal() {
    let srv = TestServer::with_fixture_model().await;

    let res = reqwest::Client::new()
        .post(srv.predict_url())
        .json(&json!({ "value": 0, "gas_limit": 21000, "input_data_size": 0 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "is_anomaly": 1 }));
}

#[tokio::test]
async fn outsized_transfer_is_classified_as_anomaly() {
    let srv = TestServer::with_fixture_model().await;

    let res = reqwest::Client::new()
        .post(srv.predict_url())
        .json(&json!({ "value": 999999999, "gas_limit": 9000000, "input_data_size": 50000 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "is_anomaly": -1 }));
}

#[tokio::test]
async fn wei_amount_sent_as_string_is_accepted() {
    let srv = TestServer::with_fixture_model().await;

    // Shape the bots actually send: `value` is a decimal wei string.
    let res = reqwest::Client::new()
        .post(srv.predict_url())
        .json(&json!({
            "value": "2500000000000000000",
            "gas_limit": 21000,
            "input_data_size": 0,
            "hash": "0xdeadbeef",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: sniper_api::app::dto::PredictResponse = res.json().await.unwrap();
    assert_eq!(body.is_anomaly, -1);
}

#[tokio::test]
async fn body_is_parsed_regardless_of_content_type() {
    let srv = TestServer::with_fixture_model().await;

    let res = reqwest::Client::new()
        .post(srv.predict_url())
        .header("content-type", "text/plain")
        .body(r#"{"value": 0, "gas_limit": 21000, "input_data_size": 0}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["is_anomaly"], 1);
}

#[tokio::test]
async fn repeated_requests_get_the_same_answer() {
    let srv = TestServer::with_fixture_model().await;
    let client = reqwest::Client::new();
    let payload = json!({ "value": 123456, "gas_limit": 60000, "input_data_size": 68 });

    let mut answers = Vec::new();
    for _ in 0..2 {
        let res = client.post(srv.predict_url()).json(&payload).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();
        answers.push(body["is_anomaly"].as_i64().unwrap());
    }

    assert_eq!(answers[0], answers[1]);
}

#[tokio::test]
async fn missing_feature_yields_500_with_message() {
    let srv = TestServer::with_fixture_model().await;

    let res = reqwest::Client::new()
        .post(srv.predict_url())
        .json(&json!({ "value": 0, "input_data_size": 0 }))
        .send()
        .await
        .unwrap();

    let msg = error_message(res).await;
    assert!(msg.contains("gas_limit"), "unexpected error: {msg}");
}

#[tokio::test]
async fn invalid_json_yields_500_with_message() {
    let srv = TestServer::with_fixture_model().await;

    let res = reqwest::Client::new()
        .post(srv.predict_url())
        .header("content-type", "application/json")
        .body("{\"value\": 0, \"gas_limit\":")
        .send()
        .await
        .unwrap();

    let msg = error_message(res).await;
    assert!(!msg.is_empty());
}

#[tokio::test]
async fn absent_model_always_reports_unavailable() {
    let srv = TestServer::without_model().await;
    let client = reqwest::Client::new();

    let valid = client
        .post(srv.predict_url())
        .json(&json!({ "value": 0, "gas_limit": 21000, "input_data_size": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(error_message(valid).await, MODEL_UNAVAILABLE);

    let garbage = client
        .post(srv.predict_url())
        .body("definitely not json")
        .send()
        .await
        .unwrap();
    assert_eq!(error_message(garbage).await, MODEL_UNAVAILABLE);
}

#[tokio::test]
async fn only_post_predict_is_routed() {
    let srv = TestServer::with_fixture_model().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.predict_url()).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    let res = client
        .post(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

//! ReqwestTransport against a local axum server.
//!
//! Covers the status, decode and connection failure mappings and the headers
//! that reach the wire.

#![cfg(feature = "http")]

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use lumigate_core::DeviceId;
use lumigate_devices::{HttpMethod, RelayError, ReqwestTransport, Transport, VendorClient, VendorRequest};
use serde_json::{Value, json};

async fn echo_headers(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    Json(json!({
        "key": header("Govee-API-Key"),
        "ct": header("Content-Type"),
        "requestId": body["requestId"],
        "capability": body["payload"]["capability"],
    }))
}

/// Serve a fake vendor on an ephemeral port and return its base URL.
async fn spawn_vendor() -> String {
    let app = Router::new()
        .route("/user/devices", get(|| async { Json(json!({"code": 200, "data": []})) }))
        .route("/device/control", post(echo_headers))
        .route(
            "/unauthorized",
            get(|| async { (StatusCode::UNAUTHORIZED, "bad key") }),
        )
        .route("/not-json", get(|| async { "plain text" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn get_request(url: String) -> VendorRequest {
    VendorRequest {
        method: HttpMethod::Get,
        url,
        headers: vec![],
        body: None,
    }
}

#[tokio::test]
async fn test_success_body_is_parsed() {
    let base = spawn_vendor().await;
    let transport = ReqwestTransport::new(None).unwrap();

    let value = transport
        .execute(get_request(format!("{}/user/devices", base)))
        .await
        .unwrap();
    assert_eq!(value, json!({"code": 200, "data": []}));
}

#[tokio::test]
async fn test_non_success_status_maps_to_status_error() {
    let base = spawn_vendor().await;
    let transport = ReqwestTransport::new(None).unwrap();

    let err = transport
        .execute(get_request(format!("{}/unauthorized", base)))
        .await
        .unwrap_err();
    match err {
        RelayError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "bad key");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_body_maps_to_decode_error() {
    let base = spawn_vendor().await;
    let transport = ReqwestTransport::new(None).unwrap();

    let err = transport
        .execute(get_request(format!("{}/not-json", base)))
        .await
        .unwrap_err();
    match err {
        RelayError::Decode(message) => assert!(message.contains("plain text")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_refused_connection_maps_to_transport_error() {
    // Bind then drop, so nothing is listening on the port.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = ReqwestTransport::new(Some(std::time::Duration::from_secs(5))).unwrap();
    let err = transport
        .execute(get_request(format!("http://{}/user/devices", addr)))
        .await
        .unwrap_err();
    assert!(matches!(err, RelayError::Transport(_)), "{:?}", err);
}

#[tokio::test]
async fn test_control_headers_reach_the_wire() {
    let base = spawn_vendor().await;
    let transport = Arc::new(ReqwestTransport::new(None).unwrap());
    let client = VendorClient::new("kk", base, transport);

    let echoed = client
        .set_brightness(&DeviceId::new("AA:BB", "H6199"), 30)
        .await
        .unwrap();
    assert_eq!(echoed["key"], "kk");
    assert_eq!(echoed["ct"], "application/json");
    assert!(echoed["requestId"].is_string());
    assert_eq!(
        echoed["capability"],
        json!({"type": "devices.capabilities.range", "instance": "brightness", "value": 30})
    );
}

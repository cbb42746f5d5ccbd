//! Common test utilities for API tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use lumigate_api::{ServerState, create_router};
use lumigate_core::GatewayConfig;
use lumigate_devices::VendorClient;
use lumigate_devices::testing::RecordingTransport;

pub const BASE: &str = "https://vendor.test/router/api/v1";

/// Server state backed by a recording transport.
pub fn create_test_server_state() -> (ServerState, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::ok());
    let mut config = GatewayConfig::new("test-key");
    config.base_url = BASE.to_string();
    let client = VendorClient::with_transport(&config, transport.clone());
    (ServerState::new(client), transport)
}

pub fn create_test_router() -> (Router, Arc<RecordingTransport>) {
    let (state, transport) = create_test_server_state();
    (create_router(state), transport)
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response: Response<Body> = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// A device list with one light strip carrying segment, scene and music capabilities.
pub fn device_list() -> Value {
    serde_json::json!({
        "code": 200,
        "message": "success",
        "data": [{
            "sku": "H6199",
            "device": "AA:BB",
            "deviceName": "Strip",
            "capabilities": [
                {
                    "type": "devices.capabilities.segment_color_setting",
                    "instance": "segmentedColorRgb",
                    "parameters": {
                        "dataType": "STRUCT",
                        "fields": [{
                            "fieldName": "segment",
                            "options": [{"value": 0}, {"value": 1}, {"value": 2}]
                        }]
                    }
                },
                {
                    "type": "devices.capabilities.dynamic_scene",
                    "instance": "lightScene",
                    "parameters": {
                        "dataType": "ENUM",
                        "options": [{"name": "Sunrise", "value": 101}]
                    }
                },
                {
                    "type": "devices.capabilities.music_setting",
                    "instance": "musicMode",
                    "parameters": {
                        "dataType": "STRUCT",
                        "fields": [{
                            "fieldName": "musicMode",
                            "options": [{"name": "Energic", "value": 5}, {"name": "Rhythm", "value": 3}]
                        }]
                    }
                }
            ]
        }]
    })
}

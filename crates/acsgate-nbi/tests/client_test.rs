// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Wire-level tests for NbiClient against a mock ACS.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use acsgate_nbi::{DeviceTask, NbiClient, NbiConfig, NbiError, PppoeCredentials, WirelessCredentials};

fn client_for(server: &MockServer) -> NbiClient {
    NbiClient::new(NbiConfig::new(server.uri())).unwrap()
}

fn body_json(request: &wiremock::Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

#[tokio::test]
async fn device_by_id_sends_id_equality_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/devices"))
        .and(query_param("query", r#"{"_id":"202BC1-BM632w-0000001"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"_id": "202BC1-BM632w-0000001"}])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let devices = client.device_by_id("202BC1-BM632w-0000001").await.unwrap();
    assert_eq!(devices[0]["_id"], "202BC1-BM632w-0000001");
}

#[tokio::test]
async fn devices_informed_before_sends_lt_filter() {
    let server = MockServer::start().await;

    let before = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    Mock::given(method("GET"))
        .and(path("/devices"))
        .and(query_param(
            "query",
            r#"{"_lastInform":{"$lt":"2024-03-01T00:00:00.000Z"}}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let devices = client.devices_informed_before(before).await.unwrap();
    assert_eq!(devices, json!([]));
}

#[tokio::test]
async fn device_by_mac_filters_on_the_wan_mac_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/devices"))
        .and(query_param(
            "query",
            r#"{"InternetGatewayDevice.WANDevice.1.WANConnectionDevice.1.WANIPConnection.1.MACAddress":"AA:BB:CC:DD:EE:FF"}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"_id": "dev-1"}])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let devices = client.device_by_mac("AA:BB:CC:DD:EE:FF").await.unwrap();
    assert_eq!(devices[0]["_id"], "dev-1");
}

#[tokio::test]
async fn delete_device_removes_the_record() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/devices/dev-1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.delete_device("dev-1").await.unwrap();
}

#[tokio::test]
async fn pending_tasks_queries_task_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(query_param("query", r#"{"device":"dev-1"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "reboot"}])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let tasks = client.pending_tasks("dev-1").await.unwrap();
    assert_eq!(tasks[0]["name"], "reboot");
}

#[tokio::test]
async fn device_projection_passes_field_list_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/devices"))
        .and(query_param("query", r#"{"_id":"dev-1"}"#))
        .and(query_param("projection", "_lastInform,_deviceId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"_id": "dev-1"}])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .device_projection("dev-1", "_lastInform,_deviceId")
        .await
        .unwrap();
}

#[tokio::test]
async fn submit_task_posts_with_bounded_connection_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/devices/dev-1/tasks"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let task = DeviceTask::GetParameterValues {
        parameter_names: vec!["InternetGatewayDevice.DeviceInfo.UpTime".to_string()],
    };
    client.submit_task("dev-1", &task).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let query = requests[0].url.query().unwrap();
    assert!(query.contains("timeout=3000"), "query was {query}");
    assert!(query.contains("connection_request"), "query was {query}");
    assert_eq!(
        body_json(&requests[0]),
        json!({
            "name": "getParameterValues",
            "parameterNames": ["InternetGatewayDevice.DeviceInfo.UpTime"],
        })
    );
}

#[tokio::test]
async fn wireless_credentials_post_one_task_with_four_triples() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/devices/dev-1/tasks"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .set_wireless_credentials(&WirelessCredentials {
            device_id: "dev-1".to_string(),
            manufacturer: "HWTC".to_string(),
            username: "alice".to_string(),
            password: "secret12".to_string(),
        })
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    // Immediate session attempt, but no bounded wait on credential pushes.
    let query = requests[0].url.query().unwrap();
    assert!(query.contains("connection_request"));
    assert!(!query.contains("timeout="), "query was {query}");

    let body = body_json(&requests[0]);
    assert_eq!(body["name"], "setParameterValues");
    let triples = body["parameterValues"].as_array().unwrap();
    assert_eq!(triples.len(), 4);
    assert_eq!(triples[0][1], "BitFiber_alice");
}

#[tokio::test]
async fn pppoe_credentials_set_then_reset_wan_connection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/devices/dev-1/tasks"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .set_pppoe_credentials(&PppoeCredentials {
            device_id: "dev-1".to_string(),
            manufacturer: "HWTC".to_string(),
            username: "sub01".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    let first = body_json(&requests[0]);
    assert_eq!(first["name"], "setParameterValues");
    assert_eq!(
        first["parameterValues"][0][0],
        "InternetGatewayDevice.WANDevice.1.WANConnectionDevice.1.WANPPPConnection.1.Username"
    );

    let second = body_json(&requests[1]);
    assert_eq!(second["name"], "setParameterValues");
    assert_eq!(
        second["parameterValues"][0],
        json!([
            "InternetGatewayDevice.WANDevice.1.WANConnectionDevice.1.WANPPPConnection.1.Reset",
            true,
            "xsd:boolean"
        ])
    );
    // The bounce carries the bounded wait; the credential write does not.
    assert!(!requests[0].url.query().unwrap().contains("timeout="));
    assert!(requests[1].url.query().unwrap().contains("timeout=3000"));
}

#[tokio::test]
async fn pppoe_credentials_reboot_asft_devices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/devices/dev-1/tasks"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .set_pppoe_credentials(&PppoeCredentials {
            device_id: "dev-1".to_string(),
            manufacturer: "ASFT".to_string(),
            username: "sub01".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(body_json(&requests[0])["name"], "setParameterValues");
    assert_eq!(body_json(&requests[1]), json!({"name": "reboot"}));
}

#[tokio::test]
async fn pppoe_bounce_is_skipped_when_credential_write_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/devices/dev-1/tasks"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .set_pppoe_credentials(&PppoeCredentials {
            device_id: "dev-1".to_string(),
            manufacturer: "HWTC".to_string(),
            username: "sub01".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, NbiError::Status { status: 503, .. }));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "bounce must not run after a failed write");
}

#[tokio::test]
async fn reboot_device_posts_reboot_task() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/devices/dev-1/tasks"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.reboot_device("dev-1").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(body_json(&requests[0]), json!({"name": "reboot"}));
}

#[tokio::test]
async fn refresh_device_posts_whole_tree_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/devices/dev-1/tasks"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.refresh_device("dev-1").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        body_json(&requests[0]),
        json!({"name": "refreshObject", "objectName": ""})
    );
    assert!(!requests[0].url.query().unwrap().contains("timeout="));
}

#[tokio::test]
async fn retry_and_delete_task_hit_task_resources() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tasks/task-9/retry"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/tasks/task-9"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.retry_task("task-9").await.unwrap();
    client.delete_task("task-9").await.unwrap();
}

#[tokio::test]
async fn non_success_status_is_classified_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(500).set_body_string("queue full"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.device_by_id("dev-1").await.unwrap_err();
    match err {
        NbiError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "queue full");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_acs_surfaces_as_transport_error_not_a_hang() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/devices/dev-1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&server)
        .await;

    let config = NbiConfig::new(server.uri()).with_request_timeout(Duration::from_millis(100));
    let client = NbiClient::new(config).unwrap();

    let err = client.reboot_device("dev-1").await.unwrap_err();
    assert!(matches!(err, NbiError::Transport(_)), "got {err:?}");
}

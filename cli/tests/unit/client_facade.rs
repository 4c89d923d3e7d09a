//! Client facade over the fake service: error mapping, deadlines, filters.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use hammertime_cli::application::ports::ClientFactory;
use hammertime_cli::application::services::client::MicrovmClient;
use hammertime_cli::domain::{ListFilter, ServiceError};
use hammertime_common::MicroVmSpec;

use crate::fakes::{Call, FakeServer};
use crate::helpers::client_config;

async fn client(server: &FakeServer, timeout: Duration) -> MicrovmClient<crate::fakes::FakeService> {
    let service = server.factory().connect(&client_config()).await.unwrap();
    MicrovmClient::new(service, timeout)
}

#[tokio::test]
async fn test_create_returns_microvm_with_uid() {
    let server = FakeServer::new();
    let mut client = client(&server, Duration::from_secs(5)).await;

    let created = client
        .create(MicroVmSpec {
            id: "mvm0".to_string(),
            namespace: "ns0".to_string(),
            ..MicroVmSpec::default()
        })
        .await
        .unwrap();

    assert_eq!(created.uid(), Some("uid-1"));
    assert_eq!(created.state_name(), "CREATED");
    client.close();
    assert_eq!(server.closes(), 1);
}

#[tokio::test]
async fn test_get_unknown_uid_is_not_found() {
    let server = FakeServer::new();
    let mut client = client(&server, Duration::from_secs(5)).await;

    let err = client.get("ghost").await.unwrap_err();
    assert!(
        matches!(&err, ServiceError::NotFound { uid, .. } if uid == "ghost"),
        "got: {err}"
    );
}

#[tokio::test]
async fn test_delete_failure_keeps_service_message() {
    let server = FakeServer::with_microvms(&[("mvm0", "ns0")]);
    server.fail_delete("uid-1");
    let mut client = client(&server, Duration::from_secs(5)).await;

    let err = client.delete("uid-1").await.unwrap_err();
    match err {
        ServiceError::Rpc {
            operation,
            code,
            message,
        } => {
            assert_eq!(operation, "delete");
            assert_eq!(code, "Internal");
            assert_eq!(message, "failed to delete uid-1");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_list_empty_name_is_absent_on_the_wire() {
    let server = FakeServer::new();
    let mut client = client(&server, Duration::from_secs(5)).await;

    client
        .list(&ListFilter::new(Some(String::new()), Some(String::new())))
        .await
        .unwrap();

    assert_eq!(
        server.calls(),
        vec![Call::List {
            name: None,
            namespace: String::new(),
        }]
    );
}

#[tokio::test]
async fn test_every_call_carries_a_deadline() {
    let server = FakeServer::with_microvms(&[("mvm0", "ns0")]);
    let mut client = client(&server, Duration::from_secs(5)).await;

    client.get("uid-1").await.unwrap();
    client.list(&ListFilter::default()).await.unwrap();
    client.delete("uid-1").await.unwrap();

    assert_eq!(server.state().deadlines, vec![true, true, true]);
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let server = FakeServer::with_microvms(&[("mvm0", "ns0")]);
    server.delay(Duration::from_millis(500));
    let mut client = client(&server, Duration::from_millis(20)).await;

    let err = client.get("uid-1").await.unwrap_err();
    assert!(
        matches!(err, ServiceError::Timeout { operation: "get", .. }),
        "got: {err}"
    );
}

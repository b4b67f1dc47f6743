use anyhow::Result;
use httpmock::prelude::*;
use poof_connector::domain::model::Operation;
use poof_connector::{ApiKeyCredential, Connector, InputRecord, PoofClient, PoofConnector};

fn connector_for(server: &MockServer) -> PoofConnector {
    let client = PoofClient::with_base_url(ApiKeyCredential::new("test-key"), server.base_url());
    PoofConnector::new(client, Operation::GetAccount)
}

/// 帳戶資訊逐字轉為結果的結構化欄位，不增減任何欄位
#[tokio::test]
async fn test_account_json_passes_through_verbatim() -> Result<()> {
    let server = MockServer::start();
    let body = serde_json::json!({
        "email": "user@example.com",
        "plan": "pro",
        "credits": { "remaining": 42, "used": 8 },
        "features": ["hd", "batch"]
    });

    let account_mock = server.mock(|when, then| {
        when.method(GET).path("/me").header("x-api-key", "test-key");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(body.clone());
    });

    let connector = connector_for(&server);
    let results = connector.execute(vec![InputRecord::new()]).await?;

    account_mock.assert();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].json, body);
    assert!(results[0].binary.is_empty());
    Ok(())
}

/// 帳戶查詢不讀取記錄上的二進位欄位
#[tokio::test]
async fn test_account_lookup_ignores_binary_input() -> Result<()> {
    let server = MockServer::start();

    let account_mock = server.mock(|when, then| {
        when.method(GET).path("/me");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({"credits": 1}));
    });

    let connector = connector_for(&server);
    let record = poof_connector::InputRecord::with_binary(
        "data",
        poof_connector::BinaryData::new(b"ignored".to_vec()),
    );
    let results = connector.execute(vec![record]).await?;

    account_mock.assert();
    assert_eq!(results[0].json["credits"], 1);
    Ok(())
}

/// 遠端失敗在批次繼續模式下轉為 {error} 記錄
#[tokio::test]
async fn test_account_failure_becomes_error_record_when_continuing() -> Result<()> {
    let server = MockServer::start();

    let account_mock = server.mock(|when, then| {
        when.method(GET).path("/me");
        then.status(402).body("payment required");
    });

    let connector = connector_for(&server).with_continue_on_fail(true);
    let results = connector.execute(vec![InputRecord::new()]).await?;

    account_mock.assert();
    assert_eq!(results.len(), 1);
    assert!(results[0].is_error());
    let message = results[0].json["error"].as_str().unwrap();
    assert!(message.contains("402"));
    Ok(())
}

use anyhow::Result;
use httpmock::prelude::*;
use poof_connector::credentials::{self, ApiKeyCredential};
use poof_connector::PoofClient;

/// 有效金鑰的探測請求回傳成功狀態，原樣交給宿主
#[tokio::test]
async fn test_probe_with_valid_key_returns_success_status() -> Result<()> {
    let server = MockServer::start();

    let probe_mock = server.mock(|when, then| {
        when.method(GET).path("/me").header("x-api-key", "valid-key");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({"email": "user@example.com"}));
    });

    let client = PoofClient::with_base_url(ApiKeyCredential::new("valid-key"), server.base_url());
    let status = client.verify_credential().await?;

    probe_mock.assert();
    assert_eq!(status.as_u16(), 200);
    Ok(())
}

/// 無效金鑰的探測請求回傳失敗狀態，同樣不在本層解讀
#[tokio::test]
async fn test_probe_with_invalid_key_returns_failure_status() -> Result<()> {
    let server = MockServer::start();

    let probe_mock = server.mock(|when, then| {
        when.method(GET).path("/me");
        then.status(401).body("invalid api key");
    });

    let client = PoofClient::with_base_url(ApiKeyCredential::new("wrong-key"), server.base_url());
    let status = client.verify_credential().await?;

    probe_mock.assert();
    assert_eq!(status.as_u16(), 401);
    Ok(())
}

/// 探測請求必須帶上認證標頭
#[tokio::test]
async fn test_probe_sends_auth_header() -> Result<()> {
    let server = MockServer::start();

    let probe_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/me")
            .header(credentials::AUTH_HEADER, "probe-key");
        then.status(200).json_body(serde_json::json!({}));
    });

    let client = PoofClient::with_base_url(ApiKeyCredential::new("probe-key"), server.base_url());
    client.verify_credential().await?;

    probe_mock.assert();
    Ok(())
}

#[test]
fn test_descriptor_matches_probe_endpoint() {
    let descriptor = credentials::credential_descriptor();
    assert_eq!(descriptor.test.method, "GET");
    assert_eq!(descriptor.test.path, credentials::ACCOUNT_PATH);
    assert_eq!(descriptor.authenticate.header_name, credentials::AUTH_HEADER);
}

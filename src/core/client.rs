use crate::credentials::{ApiKeyCredential, ACCOUNT_PATH};
use crate::domain::model::{BinaryData, RemoveBackgroundOptions};
use crate::utils::error::{PoofError, Result};
use reqwest::header::HeaderMap;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};

const REMOVE_PATH: &str = "/remove";

/// 移除背景端點的原始回應：二進位內容加上逐字轉發的診斷標頭
#[derive(Debug, Clone)]
pub struct RemovalResponse {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
    pub request_id: Option<String>,
    pub processing_time_ms: Option<String>,
    pub image_width: Option<String>,
    pub image_height: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PoofClient {
    client: Client,
    base_url: String,
    credential: ApiKeyCredential,
}

impl PoofClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.poof.bg/v1";

    pub fn new(credential: ApiKeyCredential) -> Self {
        Self::with_base_url(credential, Self::DEFAULT_BASE_URL)
    }

    /// 測試或自架 gateway 可覆寫 base URL
    pub fn with_base_url(credential: ApiKeyCredential, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credential,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn remove_background(
        &self,
        image: BinaryData,
        options: &RemoveBackgroundOptions,
    ) -> Result<RemovalResponse> {
        // 構建 multipart 請求：一個檔案欄位，加上有提供才送出的選項欄位
        let file_name = image
            .file_name
            .unwrap_or_else(|| "image.png".to_string());
        let mime_type = image
            .mime_type
            .unwrap_or_else(|| "image/png".to_string());
        let part = Part::bytes(image.data)
            .file_name(file_name)
            .mime_str(&mime_type)?;

        let mut form = Form::new().part("image_file", part);
        if let Some(format) = options.format {
            form = form.text("format", format.as_str());
        }
        if let Some(channels) = options.channels {
            form = form.text("channels", channels.as_str());
        }
        if let Some(color) = &options.bg_color {
            if !color.is_empty() {
                form = form.text("bg_color", color.clone());
            }
        }
        if let Some(size) = options.size {
            form = form.text("size", size.as_str());
        }
        // crop 有設定就送出，包含明確的 false
        if let Some(crop) = options.crop {
            form = form.text("crop", crop.to_string());
        }

        tracing::debug!("📡 poof: POST {}", self.endpoint(REMOVE_PATH));
        let request = self.credential.sign(self.client.post(self.endpoint(REMOVE_PATH)));
        let response = request.multipart(form).send().await?;
        tracing::debug!("📡 poof: remove response status: {}", response.status());

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| String::new());
            return Err(PoofError::StatusError { status, message });
        }

        // 標頭逐字轉發，不做型別轉換或驗證
        let headers = response.headers();
        let content_type = header_string(headers, "content-type");
        let request_id = header_string(headers, "x-request-id");
        let processing_time_ms = header_string(headers, "x-processing-time-ms");
        let image_width = header_string(headers, "x-image-width");
        let image_height = header_string(headers, "x-image-height");

        let body = response.bytes().await?.to_vec();

        Ok(RemovalResponse {
            body,
            content_type,
            request_id,
            processing_time_ms,
            image_width,
            image_height,
        })
    }

    pub async fn get_account(&self) -> Result<serde_json::Value> {
        tracing::debug!("📡 poof: GET {}", self.endpoint(ACCOUNT_PATH));
        let request = self.credential.sign(self.client.get(self.endpoint(ACCOUNT_PATH)));
        let response = request.send().await?;
        tracing::debug!("📡 poof: account response status: {}", response.status());

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| String::new());
            return Err(PoofError::StatusError { status, message });
        }

        Ok(response.json().await?)
    }

    /// 發出宣告式的憑證測試請求；狀態碼原樣回傳，成敗由宿主解讀
    pub async fn verify_credential(&self) -> Result<StatusCode> {
        let request = self.credential.sign(self.client.get(self.endpoint(ACCOUNT_PATH)));
        let response = request.send().await?;
        Ok(response.status())
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> PoofClient {
        PoofClient::with_base_url(ApiKeyCredential::new("test-key"), server.base_url())
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client =
            PoofClient::with_base_url(ApiKeyCredential::new("k"), "https://api.poof.bg/v1/");
        assert_eq!(client.base_url(), "https://api.poof.bg/v1");
    }

    #[tokio::test]
    async fn test_remove_background_collects_diagnostic_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/remove").header("x-api-key", "test-key");
            then.status(200)
                .header("content-type", "image/png")
                .header("x-request-id", "req_42")
                .header("x-processing-time-ms", "180")
                .header("x-image-width", "640")
                .header("x-image-height", "480")
                .body("processed-bytes");
        });

        let client = client_for(&server);
        let response = client
            .remove_background(
                BinaryData::new(b"fake image bytes".to_vec()),
                &RemoveBackgroundOptions::default(),
            )
            .await
            .unwrap();

        mock.assert();
        assert_eq!(response.body, b"processed-bytes");
        assert_eq!(response.content_type.as_deref(), Some("image/png"));
        assert_eq!(response.request_id.as_deref(), Some("req_42"));
        assert_eq!(response.processing_time_ms.as_deref(), Some("180"));
        assert_eq!(response.image_width.as_deref(), Some("640"));
        assert_eq!(response.image_height.as_deref(), Some("480"));
    }

    #[tokio::test]
    async fn test_remove_background_non_success_status_is_an_error() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/remove");
            then.status(402).body("insufficient credits");
        });

        let client = client_for(&server);
        let err = client
            .remove_background(
                BinaryData::new(b"fake image bytes".to_vec()),
                &RemoveBackgroundOptions::default(),
            )
            .await
            .unwrap_err();

        mock.assert();
        match err {
            PoofError::StatusError { status, message } => {
                assert_eq!(status.as_u16(), 402);
                assert_eq!(message, "insufficient credits");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_account_returns_parsed_json() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/me").header("x-api-key", "test-key");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({"email": "user@example.com", "credits": 12}));
        });

        let client = client_for(&server);
        let account = client.get_account().await.unwrap();

        mock.assert();
        assert_eq!(account["email"], "user@example.com");
        assert_eq!(account["credits"], 12);
    }
}

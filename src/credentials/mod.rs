//! Poof API 憑證：單一 API key，以 `x-api-key` 標頭附加於每個請求。

use crate::core::descriptor::PropertyDescriptor;
use serde::Serialize;
use serde_json::json;
use std::fmt;

pub const CREDENTIAL_NAME: &str = "poofApi";
pub const AUTH_HEADER: &str = "x-api-key";

/// 憑證測試與 GetAccount 共用的帳戶端點（相對於版本化 base URL）
pub const ACCOUNT_PATH: &str = "/me";

#[derive(Clone)]
pub struct ApiKeyCredential {
    api_key: String,
}

impl ApiKeyCredential {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// 在傳出的請求上附加認證標頭
    pub fn sign(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header(AUTH_HEADER, self.api_key.as_str())
    }
}

// Debug 輸出遮蔽金鑰本身
impl fmt::Debug for ApiKeyCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyCredential")
            .field("api_key", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDescriptor {
    pub name: String,
    pub display_name: String,
    pub documentation_url: String,
    pub properties: Vec<PropertyDescriptor>,
    pub authenticate: AuthenticateRule,
    pub test: TestRequest,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateRule {
    pub header_name: String,
}

/// 宣告式的憑證測試請求；成功與否由宿主依 HTTP 狀態碼判定
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRequest {
    pub method: String,
    pub path: String,
}

pub fn credential_descriptor() -> CredentialDescriptor {
    let api_key = PropertyDescriptor {
        default: Some(json!("")),
        required: true,
        description: Some(
            "Your Poof API key. Get one at https://dash.poof.bg".to_string(),
        ),
        ..PropertyDescriptor::masked_string("API Key", "apiKey")
    };

    CredentialDescriptor {
        name: CREDENTIAL_NAME.to_string(),
        display_name: "Poof API".to_string(),
        documentation_url: "https://docs.poof.bg".to_string(),
        properties: vec![api_key],
        authenticate: AuthenticateRule {
            header_name: AUTH_HEADER.to_string(),
        },
        test: TestRequest {
            method: "GET".to_string(),
            path: ACCOUNT_PATH.to_string(),
        },
    }
}

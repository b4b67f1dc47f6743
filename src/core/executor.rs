use crate::core::client::{PoofClient, RemovalResponse};
use crate::domain::model::{
    BinaryData, InputRecord, Operation, OperationResult, OutputFormat, RemoveBackgroundParams,
};
use crate::domain::ports::{ConfigProvider, Connector};
use crate::utils::error::{PoofError, Result};
use serde::Serialize;

/// 每筆輸入記錄翻譯為一個對遠端 API 的請求，並把回應翻譯回一筆結果。
/// 操作在建構時決定，整個批次共用。
pub struct PoofConnector {
    client: PoofClient,
    operation: Operation,
    continue_on_fail: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RemovalSummary {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    processing_time_ms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_height: Option<String>,
}

impl PoofConnector {
    pub fn new(client: PoofClient, operation: Operation) -> Self {
        Self {
            client,
            operation,
            continue_on_fail: false,
        }
    }

    pub fn with_continue_on_fail(mut self, continue_on_fail: bool) -> Self {
        self.continue_on_fail = continue_on_fail;
        self
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let credential = crate::credentials::ApiKeyCredential::new(config.api_key());
        let client = PoofClient::with_base_url(credential, config.base_url());

        let operation = match config.operation() {
            Operation::REMOVE_BACKGROUND => Operation::RemoveBackground(RemoveBackgroundParams {
                binary_property: config.binary_property().to_string(),
                output_binary_property: config.output_binary_property().to_string(),
                options: config.removal_options()?,
            }),
            Operation::GET_ACCOUNT => Operation::GetAccount,
            other => {
                return Err(PoofError::InvalidConfigValueError {
                    field: "operation".to_string(),
                    value: other.to_string(),
                    reason: format!(
                        "Supported operations: {}, {}",
                        Operation::REMOVE_BACKGROUND,
                        Operation::GET_ACCOUNT
                    ),
                })
            }
        };

        Ok(Self::new(client, operation).with_continue_on_fail(config.continue_on_fail()))
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    async fn execute_item(&self, mut item: InputRecord) -> Result<OperationResult> {
        match &self.operation {
            Operation::RemoveBackground(params) => {
                let image = item.take_binary(&params.binary_property)?;
                let response = self.client.remove_background(image, &params.options).await?;
                removal_result(response, params)
            }
            Operation::GetAccount => {
                let account = self.client.get_account().await?;
                Ok(OperationResult::from_json(account))
            }
        }
    }
}

#[async_trait::async_trait]
impl Connector for PoofConnector {
    async fn execute(&self, items: Vec<InputRecord>) -> Result<Vec<OperationResult>> {
        tracing::info!(
            "📡 poof: Processing {} input items ({})",
            items.len(),
            self.operation.name()
        );

        let mut results = Vec::with_capacity(items.len());

        // 依輸入順序逐筆處理，每筆的呼叫完全等待結束後才開始下一筆
        for (index, item) in items.into_iter().enumerate() {
            match self.execute_item(item).await {
                Ok(result) => results.push(result),
                Err(error) if self.continue_on_fail => {
                    // 批次繼續模式：在原位置放入錯誤記錄後繼續
                    tracing::warn!("🔶 poof: Item {} failed: {}", index, error);
                    results.push(OperationResult::error(error.to_string()));
                }
                Err(error) => {
                    tracing::error!("❌ poof: Item {} failed: {}", index, error);
                    return Err(PoofError::ItemError {
                        index,
                        source: Box::new(error),
                    });
                }
            }
        }

        tracing::info!("📡 poof: Produced {} results", results.len());
        Ok(results)
    }
}

fn removal_result(
    response: RemovalResponse,
    params: &RemoveBackgroundParams,
) -> Result<OperationResult> {
    let extension = output_extension(response.content_type.as_deref(), params.options.format);
    let content_type = response
        .content_type
        .unwrap_or_else(|| "image/png".to_string());

    let summary = RemovalSummary {
        success: true,
        request_id: response.request_id,
        processing_time_ms: response.processing_time_ms,
        image_width: response.image_width,
        image_height: response.image_height,
    };
    let json = serde_json::to_value(summary)?;

    let binary = BinaryData {
        data: response.body,
        file_name: Some(format!("processed.{}", extension)),
        mime_type: Some(content_type),
    };

    Ok(OperationResult::with_binary(
        json,
        params.output_binary_property.clone(),
        binary,
    ))
}

/// 副檔名優先依回應的 content-type 判斷（寬鬆的子字串比對），
/// 標頭缺漏或無法辨識時退回請求的 format 選項，最後是 png。
fn output_extension(content_type: Option<&str>, format: Option<OutputFormat>) -> &'static str {
    if let Some(content_type) = content_type {
        if content_type.contains("jpeg") || content_type.contains("jpg") {
            return "jpg";
        }
        if content_type.contains("webp") {
            return "webp";
        }
        if content_type.contains("png") {
            return "png";
        }
    }
    match format {
        Some(format) => format.extension(),
        None => "png",
    }
}

use crate::utils::error::{PoofError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinaryData {
    pub data: Vec<u8>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
}

impl BinaryData {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            file_name: None,
            mime_type: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputRecord {
    pub data: HashMap<String, serde_json::Value>,
    pub binary: HashMap<String, BinaryData>,
}

impl InputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binary(name: impl Into<String>, binary: BinaryData) -> Self {
        let mut record = Self::new();
        record.binary.insert(name.into(), binary);
        record
    }

    /// 取出指定名稱的二進位欄位；不存在或內容為空都視為缺漏
    pub fn take_binary(&mut self, name: &str) -> Result<BinaryData> {
        match self.binary.remove(name) {
            Some(binary) if !binary.data.is_empty() => Ok(binary),
            _ => Err(PoofError::MissingBinaryField {
                field: name.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult {
    pub json: serde_json::Value,
    pub binary: HashMap<String, BinaryData>,
}

impl OperationResult {
    pub fn from_json(json: serde_json::Value) -> Self {
        Self {
            json,
            binary: HashMap::new(),
        }
    }

    pub fn with_binary(
        json: serde_json::Value,
        name: impl Into<String>,
        binary: BinaryData,
    ) -> Self {
        let mut result = Self::from_json(json);
        result.binary.insert(name.into(), binary);
        result
    }

    /// 批次繼續模式下代替失敗記錄的錯誤結果
    pub fn error(message: impl Into<String>) -> Self {
        Self::from_json(serde_json::json!({ "error": message.into() }))
    }

    pub fn is_error(&self) -> bool {
        self.json.get("error").is_some()
    }
}

/// 整個批次共用的操作選擇，於配置階段解析一次
#[derive(Debug, Clone)]
pub enum Operation {
    RemoveBackground(RemoveBackgroundParams),
    GetAccount,
}

impl Operation {
    pub const REMOVE_BACKGROUND: &'static str = "removeBackground";
    pub const GET_ACCOUNT: &'static str = "getAccount";

    pub fn name(&self) -> &'static str {
        match self {
            Operation::RemoveBackground(_) => Self::REMOVE_BACKGROUND,
            Operation::GetAccount => Self::GET_ACCOUNT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RemoveBackgroundParams {
    pub binary_property: String,
    pub output_binary_property: String,
    pub options: RemoveBackgroundOptions,
}

impl Default for RemoveBackgroundParams {
    fn default() -> Self {
        Self {
            binary_property: "data".to_string(),
            output_binary_property: "data".to_string(),
            options: RemoveBackgroundOptions::default(),
        }
    }
}

/// 移除背景的可選參數。未設定的欄位完全不送出，讓遠端 API 套用自己的預設值。
/// `crop` 保留 Option<bool>：明確設定的 false 仍需序列化。
#[derive(Debug, Clone, Default)]
pub struct RemoveBackgroundOptions {
    pub format: Option<OutputFormat>,
    pub channels: Option<Channels>,
    pub bg_color: Option<String>,
    pub size: Option<SizePreset>,
    pub crop: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpg,
    Webp,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Webp => "webp",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl FromStr for OutputFormat {
    type Err = PoofError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "png" => Ok(OutputFormat::Png),
            "jpg" => Ok(OutputFormat::Jpg),
            "webp" => Ok(OutputFormat::Webp),
            other => Err(PoofError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Supported formats: png, jpg, webp".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    Rgba,
    Rgb,
}

impl Channels {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channels::Rgba => "rgba",
            Channels::Rgb => "rgb",
        }
    }
}

impl FromStr for Channels {
    type Err = PoofError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rgba" => Ok(Channels::Rgba),
            "rgb" => Ok(Channels::Rgb),
            other => Err(PoofError::InvalidConfigValueError {
                field: "channels".to_string(),
                value: other.to_string(),
                reason: "Supported channels: rgba, rgb".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizePreset {
    Full,
    Preview,
    Small,
    Medium,
    Large,
}

impl SizePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizePreset::Full => "full",
            SizePreset::Preview => "preview",
            SizePreset::Small => "small",
            SizePreset::Medium => "medium",
            SizePreset::Large => "large",
        }
    }
}

impl FromStr for SizePreset {
    type Err = PoofError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "full" => Ok(SizePreset::Full),
            "preview" => Ok(SizePreset::Preview),
            "small" => Ok(SizePreset::Small),
            "medium" => Ok(SizePreset::Medium),
            "large" => Ok(SizePreset::Large),
            other => Err(PoofError::InvalidConfigValueError {
                field: "size".to_string(),
                value: other.to_string(),
                reason: "Supported sizes: full, preview, small, medium, large".to_string(),
            }),
        }
    }
}

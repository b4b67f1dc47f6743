use crate::core::client::PoofClient;
use crate::domain::model::{Channels, Operation, OutputFormat, RemoveBackgroundOptions, SizePreset};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PoofError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub connector: ConnectorSection,
    pub credentials: CredentialsSection,
    pub remove_background: Option<RemoveBackgroundSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorSection {
    pub operation: Option<String>,
    pub base_url: Option<String>,
    pub continue_on_fail: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsSection {
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveBackgroundSection {
    pub binary_property: Option<String>,
    pub output_binary_property: Option<String>,
    pub options: Option<OptionsSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsSection {
    pub format: Option<String>,
    pub channels: Option<String>,
    pub bg_color: Option<String>,
    pub size: Option<String>,
    pub crop: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PoofError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PoofError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${POOF_API_KEY})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        // 使用正規表達式匹配 ${VAR_NAME} 格式
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        // 驗證操作名稱
        match self.operation() {
            Operation::REMOVE_BACKGROUND | Operation::GET_ACCOUNT => {}
            other => {
                return Err(PoofError::InvalidConfigValueError {
                    field: "connector.operation".to_string(),
                    value: other.to_string(),
                    reason: format!(
                        "Supported operations: {}, {}",
                        Operation::REMOVE_BACKGROUND,
                        Operation::GET_ACCOUNT
                    ),
                })
            }
        }

        // 驗證 base URL
        crate::utils::validation::validate_url("connector.base_url", self.base_url())?;

        // API key 必須存在且完成環境變數替換
        let api_key = crate::utils::validation::validate_required_field(
            "credentials.api_key",
            &self.credentials.api_key,
        )?;
        crate::utils::validation::validate_non_empty_string("credentials.api_key", api_key)?;
        if api_key.contains("${") {
            return Err(PoofError::InvalidConfigValueError {
                field: "credentials.api_key".to_string(),
                value: api_key.clone(),
                reason: "Environment variable was not substituted".to_string(),
            });
        }

        // 驗證二進位欄位名稱與選項值
        crate::utils::validation::validate_non_empty_string(
            "remove_background.binary_property",
            self.binary_property(),
        )?;
        crate::utils::validation::validate_non_empty_string(
            "remove_background.output_binary_property",
            self.output_binary_property(),
        )?;
        self.removal_options()?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn operation(&self) -> &str {
        self.connector
            .operation
            .as_deref()
            .unwrap_or(Operation::REMOVE_BACKGROUND)
    }

    fn api_key(&self) -> &str {
        self.credentials.api_key.as_deref().unwrap_or("")
    }

    fn base_url(&self) -> &str {
        self.connector
            .base_url
            .as_deref()
            .unwrap_or(PoofClient::DEFAULT_BASE_URL)
    }

    fn continue_on_fail(&self) -> bool {
        self.connector.continue_on_fail.unwrap_or(false)
    }

    fn binary_property(&self) -> &str {
        self.remove_background
            .as_ref()
            .and_then(|section| section.binary_property.as_deref())
            .unwrap_or("data")
    }

    fn output_binary_property(&self) -> &str {
        self.remove_background
            .as_ref()
            .and_then(|section| section.output_binary_property.as_deref())
            .unwrap_or("data")
    }

    fn removal_options(&self) -> Result<RemoveBackgroundOptions> {
        let section = match self
            .remove_background
            .as_ref()
            .and_then(|section| section.options.as_ref())
        {
            Some(section) => section,
            None => return Ok(RemoveBackgroundOptions::default()),
        };

        Ok(RemoveBackgroundOptions {
            format: section
                .format
                .as_deref()
                .map(str::parse::<OutputFormat>)
                .transpose()?,
            channels: section
                .channels
                .as_deref()
                .map(str::parse::<Channels>)
                .transpose()?,
            bg_color: section.bg_color.clone(),
            size: section
                .size
                .as_deref()
                .map(str::parse::<SizePreset>)
                .transpose()?,
            crop: section.crop,
        })
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

use crate::core::client::PoofClient;
use crate::domain::model::{Channels, Operation, OutputFormat, RemoveBackgroundOptions, SizePreset};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "poof-connector")]
#[command(about = "Remove image backgrounds with the Poof API")]
pub struct CliConfig {
    #[arg(long, default_value = Operation::REMOVE_BACKGROUND)]
    pub operation: String,

    #[arg(long, env = "POOF_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, default_value = PoofClient::DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, value_delimiter = ',')]
    pub input_files: Vec<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "data")]
    pub binary_property: String,

    #[arg(long, default_value = "data")]
    pub output_binary_property: String,

    #[arg(long)]
    pub format: Option<String>,

    #[arg(long)]
    pub channels: Option<String>,

    #[arg(long)]
    pub bg_color: Option<String>,

    #[arg(long)]
    pub size: Option<String>,

    // 保留三態：未給、明確 true、明確 false
    #[arg(long)]
    pub crop: Option<bool>,

    #[arg(long)]
    pub continue_on_fail: bool,

    #[arg(long, help = "Load connector settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn operation(&self) -> &str {
        &self.operation
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn continue_on_fail(&self) -> bool {
        self.continue_on_fail
    }

    fn binary_property(&self) -> &str {
        &self.binary_property
    }

    fn output_binary_property(&self) -> &str {
        &self.output_binary_property
    }

    fn removal_options(&self) -> Result<RemoveBackgroundOptions> {
        Ok(RemoveBackgroundOptions {
            format: self
                .format
                .as_deref()
                .map(str::parse::<OutputFormat>)
                .transpose()?,
            channels: self
                .channels
                .as_deref()
                .map(str::parse::<Channels>)
                .transpose()?,
            bg_color: self.bg_color.clone(),
            size: self
                .size
                .as_deref()
                .map(str::parse::<SizePreset>)
                .transpose()?,
            crop: self.crop,
        })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("api_key", &self.api_key)?;
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_non_empty_string("binary_property", &self.binary_property)?;
        validation::validate_non_empty_string(
            "output_binary_property",
            &self.output_binary_property,
        )?;
        self.removal_options()?;
        Ok(())
    }
}

pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    // 讀取以呼叫端給的路徑為準；寫入一律落在 base_path 下
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(path).await?)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        let full_path = Path::new(&self.base_path).join(path);
        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

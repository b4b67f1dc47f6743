use clap::Parser;
use poof_connector::utils::{logger, validation, validation::Validate};
use poof_connector::{
    BinaryData, CliConfig, Connector, InputRecord, LocalStorage, Operation, PoofConnector,
    PoofError, Result, Storage, TomlConfig,
};
use std::path::Path;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting poof-connector CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(config).await {
        tracing::error!("❌ Connector run failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(config: CliConfig) -> Result<()> {
    // 建立連接器：優先採用 TOML 配置檔，否則使用命令列旗標
    let connector = if let Some(path) = &config.config {
        let file_config = TomlConfig::from_file(path)?;
        file_config.validate()?;
        PoofConnector::from_config(&file_config)?
    } else {
        config.validate()?;
        PoofConnector::from_config(&config)?
    };

    let storage = LocalStorage::new(config.output_path.clone());

    match connector.operation() {
        Operation::RemoveBackground(params) => {
            if config.input_files.is_empty() {
                return Err(PoofError::MissingConfigError {
                    field: "input_files".to_string(),
                });
            }
            validation::validate_file_extensions(
                "input_files",
                &config.input_files,
                &["png", "jpg", "jpeg", "webp"],
            )?;

            // 每個輸入檔對應一筆記錄
            let binary_property = params.binary_property.clone();
            let mut items = Vec::with_capacity(config.input_files.len());
            for path in &config.input_files {
                let bytes = storage.read_file(path).await?;
                items.push(InputRecord::with_binary(
                    binary_property.clone(),
                    binary_from_path(path, bytes),
                ));
            }

            tracing::info!("📥 Loaded {} input image(s)", items.len());
            let results = connector.execute(items).await?;

            for (index, result) in results.iter().enumerate() {
                if result.is_error() {
                    tracing::warn!("🔶 Item {}: {}", index, result.json["error"]);
                    println!("{}", serde_json::to_string_pretty(&result.json)?);
                    continue;
                }
                for binary in result.binary.values() {
                    let file_name = binary.file_name.as_deref().unwrap_or("processed.png");
                    let output_name = format!("{}_{}", index, file_name);
                    storage.write_file(&output_name, &binary.data).await?;
                    println!("📁 Saved {}/{}", config.output_path, output_name);
                }
                println!("{}", serde_json::to_string_pretty(&result.json)?);
            }

            tracing::info!("✅ Processed {} image(s)", results.len());
        }
        Operation::GetAccount => {
            // 帳戶查詢不需要輸入記錄，以單筆空記錄執行
            let results = connector.execute(vec![InputRecord::new()]).await?;
            for result in &results {
                println!("{}", serde_json::to_string_pretty(&result.json)?);
            }
            tracing::info!("✅ Account information fetched");
        }
    }

    Ok(())
}

fn binary_from_path(path: &str, bytes: Vec<u8>) -> BinaryData {
    let file_name = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string);
    let mime_type = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(mime_for_extension)
        .map(str::to_string);

    BinaryData {
        data: bytes,
        file_name,
        mime_type,
    }
}

fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

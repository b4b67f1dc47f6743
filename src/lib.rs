pub mod config;
pub mod core;
pub mod credentials;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, LocalStorage};
pub use crate::config::TomlConfig;
pub use crate::core::{client::PoofClient, descriptor::NodeDescriptor, executor::PoofConnector};
pub use crate::credentials::{ApiKeyCredential, CredentialDescriptor};
pub use crate::domain::model::{BinaryData, InputRecord, Operation, OperationResult};
pub use crate::domain::ports::{ConfigProvider, Connector, Storage};
pub use crate::utils::error::{PoofError, Result};

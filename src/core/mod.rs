pub mod client;
pub mod descriptor;
pub mod executor;

pub use crate::domain::model::{
    BinaryData, InputRecord, Operation, OperationResult, RemoveBackgroundOptions,
    RemoveBackgroundParams,
};
pub use crate::domain::ports::{ConfigProvider, Connector, Storage};
pub use crate::utils::error::Result;

use crate::domain::model::{InputRecord, OperationResult, RemoveBackgroundOptions};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn operation(&self) -> &str;
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn continue_on_fail(&self) -> bool;
    fn binary_property(&self) -> &str;
    fn output_binary_property(&self) -> &str;
    fn removal_options(&self) -> Result<RemoveBackgroundOptions>;
}

#[async_trait]
pub trait Connector: Send + Sync {
    async fn execute(&self, items: Vec<InputRecord>) -> Result<Vec<OperationResult>>;
}

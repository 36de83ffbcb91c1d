use crate::domain::model::{LeadSheet, OutputFormat, OutreachResult, RetryPolicy};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Where the run waits between retries and between rows.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn api_endpoint(&self) -> &str;
    fn api_key(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn retry_policy(&self) -> RetryPolicy;
    fn throttle_delay(&self) -> Duration;
    fn output_path(&self) -> &str;
    fn output_name(&self) -> &str;
    fn output_formats(&self) -> &[OutputFormat];
    fn compress_output(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<LeadSheet>;
    async fn transform(&self, sheet: LeadSheet) -> Result<OutreachResult>;
    async fn load(&self, result: OutreachResult) -> Result<String>;
}

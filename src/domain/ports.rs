use crate::utils::error::Result;
use async_trait::async_trait;

/// Carries one SOAP envelope to the remote endpoint and returns the raw reply body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, soap_action: &str, envelope: String) -> Result<String>;
}

pub trait ApiSettings: Send + Sync {
    fn endpoint(&self) -> &str;
    fn session_id(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
}

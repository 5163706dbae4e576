//! SMS channel contract

use async_trait::async_trait;

use crate::InfrastructureError;

/// One SMS provider
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send `body` to `to` (E.164), returning the provider's message id
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, InfrastructureError>;

    /// Name reported to clients when this channel delivers
    fn provider_name(&self) -> &str;

    /// Whether credentials are present; unconfigured channels are never tried
    fn is_configured(&self) -> bool;
}

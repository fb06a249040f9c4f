use serde_json::Value;

use crate::error::RelayError;

/// Seam between the relay and whichever provider performs the skin analysis
#[async_trait::async_trait]
pub trait SkinAnalysisService: Send + Sync {
    /// Submit a raw base64 image and return the provider's JSON response untouched
    async fn analyze(&self, image_base64: &str) -> Result<Value, RelayError>;
}

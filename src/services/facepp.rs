use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine};
use reqwest::multipart::Form;
use serde_json::Value;
use std::fs;

use super::SkinAnalysisService;
use crate::error::RelayError;

pub const FACEPP_SKIN_ANALYZE_URL: &str = "https://api-us.faceplusplus.com/facepp/v1/skinanalyze";

/// Face++ skinanalyze client
pub struct FacePlusPlusClient {
    api_key: String,
    api_secret: String,
    endpoint: String,
    client: reqwest::Client,
}

impl FacePlusPlusClient {
    pub fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
            endpoint: FACEPP_SKIN_ANALYZE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the client at a different skinanalyze-compatible URL
    #[cfg(test)]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Read a local image, encode it and submit it for analysis
    pub async fn analyze_file(&self, image_path: &str) -> Result<Value> {
        log::debug!("📸 Starting skin analysis for: {}", image_path);

        let image_data = fs::read(image_path)
            .with_context(|| format!("Failed to read image {}", image_path))?;
        let base64_image = general_purpose::STANDARD.encode(&image_data);

        log::debug!("📊 Image file size: {} bytes", image_data.len());
        log::debug!("🔄 Base64 encoded size: {} bytes", base64_image.len());

        Ok(self.analyze(&base64_image).await?)
    }
}

#[async_trait::async_trait]
impl SkinAnalysisService for FacePlusPlusClient {
    async fn analyze(&self, image_base64: &str) -> Result<Value, RelayError> {
        let form = Form::new()
            .text("api_key", self.api_key.clone())
            .text("api_secret", self.api_secret.clone())
            .text("image_base64", image_base64.to_string());

        log::info!("🤖 Sending image to Face++ ({} base64 chars)", image_base64.len());

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        log::debug!("📥 Face++ response status: {}", status);

        let response_text = response.text().await?;

        let result: Value = serde_json::from_str(&response_text).map_err(|e| {
            log::error!("❌ Face++ returned a non-JSON body ({}): {}", status, response_text);
            RelayError::Transport(format!("Invalid response from analysis provider ({}): {}", status, e))
        })?;

        if !status.is_success() {
            // Face++ reports its own failures as JSON (error_message); pass them through
            log::warn!("⚠️ Face++ API error ({}): {}", status, response_text);
        } else {
            log::info!("✅ Received skin analysis successfully");
        }

        Ok(result)
    }
}

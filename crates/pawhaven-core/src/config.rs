//! Configuration module
//!
//! Environment configuration consumed by the pipeline: the backend base URL,
//! the media host's cloud name and upload preset, and client-side limits.

use std::env;
use std::time::Duration;

use crate::validation::ImageValidator;

// Common constants
const API_BASE_URL: &str = "http://localhost:5000";
const CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com/v1_1";
const PET_CREATE_PATH: &str = "/pets";
const PET_UPDATE_PATH: &str = "/pets/{id}";
const MAX_IMAGE_SIZE_MB: usize = 10;
const HTTP_TIMEOUT_SECS: u64 = 60;
const ALLOWED_IMAGE_CONTENT_TYPES: &str = "image/jpeg,image/png,image/gif,image/webp";

/// Pipeline configuration
#[derive(Clone)]
pub struct PipelineConfig {
    pub api_base_url: String,
    pub cloudinary_cloud_name: String,
    /// Unsigned upload preset. Never log this field.
    pub cloudinary_upload_preset: String,
    pub cloudinary_api_base: String,
    pub pet_create_path: String,
    /// Update endpoint template containing an `{id}` placeholder
    pub pet_update_path: String,
    pub max_image_size_bytes: usize,
    pub allowed_image_content_types: Vec<String>,
    pub http_timeout_secs: u64,
    pub environment: String,
}

impl std::fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("api_base_url", &self.api_base_url)
            .field("cloudinary_cloud_name", &self.cloudinary_cloud_name)
            .field("cloudinary_upload_preset", &"<redacted>")
            .field("cloudinary_api_base", &self.cloudinary_api_base)
            .field("pet_create_path", &self.pet_create_path)
            .field("pet_update_path", &self.pet_update_path)
            .field("max_image_size_bytes", &self.max_image_size_bytes)
            .field("allowed_image_content_types", &self.allowed_image_content_types)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("environment", &self.environment)
            .finish()
    }
}

impl PipelineConfig {
    /// Load configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let max_image_size_mb = match var("MAX_IMAGE_SIZE_MB") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("MAX_IMAGE_SIZE_MB must be a valid number"))?,
            None => MAX_IMAGE_SIZE_MB,
        };
        let max_image_size_bytes = max_image_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow::anyhow!("MAX_IMAGE_SIZE_MB is too large"))?;

        let http_timeout_secs = match var("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("HTTP_TIMEOUT_SECS must be a valid number"))?,
            None => HTTP_TIMEOUT_SECS,
        };

        let allowed_image_content_types = var("ALLOWED_IMAGE_CONTENT_TYPES")
            .unwrap_or_else(|| ALLOWED_IMAGE_CONTENT_TYPES.to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let config = PipelineConfig {
            api_base_url: var("API_BASE_URL")
                .or_else(|| var("VITE_API_URL"))
                .unwrap_or_else(|| API_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            cloudinary_cloud_name: var("CLOUDINARY_CLOUD_NAME")
                .ok_or_else(|| anyhow::anyhow!("CLOUDINARY_CLOUD_NAME must be set"))?,
            cloudinary_upload_preset: var("CLOUDINARY_UPLOAD_PRESET")
                .ok_or_else(|| anyhow::anyhow!("CLOUDINARY_UPLOAD_PRESET must be set"))?,
            cloudinary_api_base: var("CLOUDINARY_API_BASE")
                .unwrap_or_else(|| CLOUDINARY_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            pet_create_path: var("PET_CREATE_PATH").unwrap_or_else(|| PET_CREATE_PATH.to_string()),
            pet_update_path: var("PET_UPDATE_PATH").unwrap_or_else(|| PET_UPDATE_PATH.to_string()),
            max_image_size_bytes,
            allowed_image_content_types,
            http_timeout_secs,
            environment,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn image_validator(&self) -> ImageValidator {
        ImageValidator::new(
            self.max_image_size_bytes,
            self.allowed_image_content_types.clone(),
        )
    }

    /// Full Cloudinary upload endpoint for the configured cloud.
    pub fn cloudinary_upload_url(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.cloudinary_api_base, self.cloudinary_cloud_name
        )
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.cloudinary_cloud_name.trim().is_empty() {
            return Err(anyhow::anyhow!("CLOUDINARY_CLOUD_NAME cannot be empty"));
        }

        if self.cloudinary_upload_preset.trim().is_empty() {
            return Err(anyhow::anyhow!("CLOUDINARY_UPLOAD_PRESET cannot be empty"));
        }

        for (name, url) in [
            ("API_BASE_URL", &self.api_base_url),
            ("CLOUDINARY_API_BASE", &self.cloudinary_api_base),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(anyhow::anyhow!("{} must be an http(s) URL", name));
            }
        }

        if self.is_production() && self.api_base_url.starts_with("http://") {
            return Err(anyhow::anyhow!(
                "API_BASE_URL must use https in production"
            ));
        }

        if !self.pet_update_path.contains("{id}") {
            return Err(anyhow::anyhow!(
                "PET_UPDATE_PATH must contain an {{id}} placeholder"
            ));
        }

        if self.max_image_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_IMAGE_SIZE_MB must be greater than 0"));
        }

        if self.allowed_image_content_types.is_empty() {
            return Err(anyhow::anyhow!(
                "ALLOWED_IMAGE_CONTENT_TYPES must list at least one type"
            ));
        }

        Ok(())
    }
}

//! Argument types and output helpers shared by the `pawhaven` binary.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{json, Value as JsonValue};
use std::path::PathBuf;

use pawhaven_core::models::{ImageFile, PetCategory};
use pawhaven_core::{ErrorMetadata, Session, SubmissionError};
use pawhaven_pipeline::{PetForm, SubmissionReport};

/// Signed-in user the command acts as.
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Identifier of the user adding or editing the pet
    #[arg(long)]
    pub user_id: String,
    /// Email of the signed-in user
    #[arg(long)]
    pub email: String,
    /// Bearer token forwarded to the backend
    #[arg(long)]
    pub token: Option<String>,
}

impl SessionArgs {
    pub fn into_session(self) -> Session {
        let session = Session::new(self.user_id, self.email);
        match self.token {
            Some(token) => session.with_token(token),
            None => session,
        }
    }
}

/// Pet form fields. Omitted fields keep their current value.
#[derive(Args, Debug, Clone, Default)]
pub struct PetFields {
    #[arg(long)]
    pub name: Option<String>,
    /// Category code: dog, cat, rabbit, bird or fish
    #[arg(long)]
    pub category: Option<PetCategory>,
    #[arg(long)]
    pub age: Option<u32>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub short_description: Option<String>,
    #[arg(long)]
    pub long_description: Option<String>,
    /// Path to the pet's picture
    #[arg(long)]
    pub image: Option<PathBuf>,
}

impl PetFields {
    /// Overwrite the form fields given on the command line.
    pub fn apply_to(&self, form: &mut PetForm) -> Result<()> {
        if let Some(name) = &self.name {
            form.name = name.clone();
        }
        if let Some(category) = self.category {
            form.category = Some(category);
        }
        if let Some(age) = self.age {
            form.age = Some(age);
        }
        if let Some(location) = &self.location {
            form.location = location.clone();
        }
        if let Some(short) = &self.short_description {
            form.short_description = short.clone();
        }
        if let Some(long) = &self.long_description {
            form.long_description = long.clone();
        }
        if let Some(path) = &self.image {
            let file = ImageFile::from_path(path)
                .with_context(|| format!("Failed to load image {}", path.display()))?;
            form.image = Some(file);
        }
        Ok(())
    }
}

/// JSON body describing a failed operation.
pub fn error_json(error: &SubmissionError) -> JsonValue {
    json!({
        "code": error.error_code(),
        "message": error.client_message(),
        "recoverable": error.is_recoverable(),
        "suggestedAction": error.suggested_action(),
    })
}

/// JSON summary of one submission attempt.
pub fn report_json(report: &SubmissionReport) -> JsonValue {
    let trail: Vec<String> = report.trail.iter().map(|k| format!("{:?}", k)).collect();
    match report.outcome.error() {
        None => json!({
            "success": true,
            "trail": trail,
            "pet": report.outcome.stored(),
        }),
        Some(error) => json!({
            "success": false,
            "trail": trail,
            "error": error_json(error),
        }),
    }
}

pub fn print_json(value: &impl serde::Serialize) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Initialize tracing for the CLI binary.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

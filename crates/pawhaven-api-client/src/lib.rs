//! HTTP client for the PawHaven backend.
//!
//! Provides a minimal client with optional Bearer auth, generic GET/POST/PATCH
//! helpers that map failures onto [`SubmissionError`], and domain methods for
//! pets and users. The submission pipeline uses it through [`RecordSubmitter`].

pub mod api;
pub mod submitter;

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use pawhaven_core::{PipelineConfig, Session, SubmissionError};

pub use submitter::RecordSubmitter;

const NETWORK_ERROR_MESSAGE: &str = "Network error while contacting the server";

/// Authentication strategy for the API.
#[derive(Clone)]
pub enum Auth {
    /// No credentials
    Anonymous,
    /// `Authorization: Bearer {token}`
    Bearer(String),
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::Anonymous => f.write_str("Anonymous"),
            Auth::Bearer(_) => f.write_str("Bearer(<redacted>)"),
        }
    }
}

/// Endpoint paths owned by the backend.
#[derive(Clone, Debug)]
pub struct PetRoutes {
    pub create: String,
    /// Template with an `{id}` placeholder
    pub update: String,
}

impl Default for PetRoutes {
    fn default() -> Self {
        Self {
            create: "/pets".to_string(),
            update: "/pets/{id}".to_string(),
        }
    }
}

impl PetRoutes {
    pub fn update_path(&self, id: &str) -> String {
        self.update.replace("{id}", &urlencoding::encode(id))
    }
}

/// HTTP client for the PawHaven backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Auth,
    routes: PetRoutes,
}

// Error bodies the backend is known to return.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BackendErrorBody {
    Nested { error: NestedMessage },
    Message { message: String },
    Error { error: String },
}

#[derive(Debug, Deserialize)]
struct NestedMessage {
    message: String,
}

impl BackendErrorBody {
    fn into_message(self) -> String {
        match self {
            BackendErrorBody::Nested { error } => error.message,
            BackendErrorBody::Message { message } => message,
            BackendErrorBody::Error { error } => error,
        }
    }
}

impl ApiClient {
    pub fn new(base_url: String, auth: Auth, config: &PipelineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
            routes: PetRoutes {
                create: config.pet_create_path.clone(),
                update: config.pet_update_path.clone(),
            },
        })
    }

    /// Anonymous client for the configured backend.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        Self::new(config.api_base_url.clone(), Auth::Anonymous, config)
    }

    /// Copy of this client authenticated as the session's user.
    pub fn for_session(&self, session: &Session) -> Self {
        match &session.token {
            Some(token) => self.with_auth(Auth::Bearer(token.clone())),
            None => self.with_auth(Auth::Anonymous),
        }
    }

    pub fn with_auth(&self, auth: Auth) -> Self {
        Self {
            auth,
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn routes(&self) -> &PetRoutes {
        &self.routes
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Auth::Anonymous => request,
            Auth::Bearer(token) => request.header("Authorization", format!("Bearer {}", token)),
        }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<Response, SubmissionError> {
        self.apply_auth(request).send().await.map_err(|e| {
            tracing::debug!(error = %e, path = %path, "Backend request failed");
            SubmissionError::Transport(NETWORK_ERROR_MESSAGE.to_string())
        })
    }

    /// GET request. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, SubmissionError> {
        let request = self.client.get(self.build_url(path));
        let response = self.send(request, path).await?;
        read_json(response, path).await
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, SubmissionError> {
        let request = self.client.post(self.build_url(path)).json(body);
        let response = self.send(request, path).await?;
        read_json(response, path).await
    }

    /// PATCH JSON body and deserialize response.
    pub async fn patch_json<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, SubmissionError> {
        let request = self.client.patch(self.build_url(path)).json(body);
        let response = self.send(request, path).await?;
        read_json(response, path).await
    }

    /// Raw client for custom requests. Caller must apply auth via build_url and headers.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

async fn read_json<T: DeserializeOwned>(
    response: Response,
    path: &str,
) -> Result<T, SubmissionError> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(error_from_body(status, &error_text, path));
    }

    let body = response.text().await.map_err(|e| {
        tracing::debug!(error = %e, path = %path, "Failed to read backend response");
        SubmissionError::Transport(NETWORK_ERROR_MESSAGE.to_string())
    })?;

    parse_body(&body, path)
}

/// An empty success body (e.g. `204 No Content`) reads as JSON `null`.
fn parse_body<T: DeserializeOwned>(body: &str, path: &str) -> Result<T, SubmissionError> {
    let parsed = if body.trim().is_empty() {
        serde_json::from_value(serde_json::Value::Null)
    } else {
        serde_json::from_str(body)
    };

    parsed.map_err(|e| {
        tracing::debug!(error = %e, path = %path, "Failed to parse backend response");
        SubmissionError::Transport("Failed to parse response as JSON".to_string())
    })
}

fn error_from_body(status: StatusCode, body: &str, path: &str) -> SubmissionError {
    let message = serde_json::from_str::<BackendErrorBody>(body)
        .ok()
        .map(BackendErrorBody::into_message)
        .filter(|m| !m.is_empty());

    match (status, message) {
        (StatusCode::NOT_FOUND, Some(message)) => SubmissionError::NotFound(message),
        (StatusCode::NOT_FOUND, None) => {
            SubmissionError::NotFound(format!("Resource not found: {}", path))
        }
        (status, Some(message)) => SubmissionError::RemoteRejection {
            status: status.as_u16(),
            message,
        },
        (status, None) => SubmissionError::http_status(status.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_shapes() {
        let nested = error_from_body(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"message":"bad age"}}"#,
            "/pets",
        );
        assert_eq!(
            nested,
            SubmissionError::RemoteRejection {
                status: 400,
                message: "bad age".to_string()
            }
        );

        let flat = error_from_body(StatusCode::FORBIDDEN, r#"{"message":"forbidden access"}"#, "/pets");
        assert_eq!(
            flat,
            SubmissionError::RemoteRejection {
                status: 403,
                message: "forbidden access".to_string()
            }
        );

        let plain = error_from_body(StatusCode::CONFLICT, r#"{"error":"duplicate"}"#, "/user");
        assert_eq!(
            plain,
            SubmissionError::RemoteRejection {
                status: 409,
                message: "duplicate".to_string()
            }
        );
    }

    #[test]
    fn unparseable_bodies_fall_back() {
        assert_eq!(
            error_from_body(StatusCode::INTERNAL_SERVER_ERROR, "oops", "/pets"),
            SubmissionError::http_status(500)
        );
        assert_eq!(
            error_from_body(StatusCode::NOT_FOUND, "", "/pet-detail/42"),
            SubmissionError::NotFound("Resource not found: /pet-detail/42".to_string())
        );
    }

    #[test]
    fn empty_success_body_reads_as_null() {
        let value: serde_json::Value = parse_body("", "/pets/1").unwrap();
        assert!(value.is_null());

        let err = parse_body::<CreateOnly>("  ", "/pets/1");
        assert!(err.is_err());
    }

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct CreateOnly {
        create: String,
    }

    #[test]
    fn update_path_substitutes_encoded_id() {
        let routes = PetRoutes::default();
        assert_eq!(routes.update_path("665f1c"), "/pets/665f1c");
        assert_eq!(routes.update_path("a/b"), "/pets/a%2Fb");
    }

    #[test]
    fn auth_debug_is_redacted() {
        assert_eq!(
            format!("{:?}", Auth::Bearer("tok".to_string())),
            "Bearer(<redacted>)"
        );
    }
}

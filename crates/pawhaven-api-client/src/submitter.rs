//! Record Submitter: one persistence request per submission, no retries.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::ApiClient;
use pawhaven_core::models::{PetRecord, StoredPet, SubmitTarget};
use pawhaven_core::SubmissionError;

/// Persists an assembled pet record.
#[async_trait]
pub trait RecordSubmitter: Send + Sync {
    async fn submit(
        &self,
        record: &PetRecord,
        target: &SubmitTarget,
    ) -> Result<StoredPet, SubmissionError>;
}

#[async_trait]
impl RecordSubmitter for ApiClient {
    async fn submit(
        &self,
        record: &PetRecord,
        target: &SubmitTarget,
    ) -> Result<StoredPet, SubmissionError> {
        let (response, known_id) = match target {
            SubmitTarget::Create => (self.create_pet(record).await?, None),
            SubmitTarget::Update { id } => {
                (self.update_pet(id, record).await?, Some(id.as_str()))
            }
        };

        let stored = stored_from_response(response, record, known_id)?;
        tracing::info!(pet_id = %stored.id, update = target.is_update(), "Pet record persisted");
        Ok(stored)
    }
}

/// Accept either the stored document or a write acknowledgement.
fn stored_from_response(
    response: JsonValue,
    record: &PetRecord,
    known_id: Option<&str>,
) -> Result<StoredPet, SubmissionError> {
    if let Ok(stored) = serde_json::from_value::<StoredPet>(response.clone()) {
        return Ok(stored);
    }

    let id = response
        .get("insertedId")
        .and_then(JsonValue::as_str)
        .or(known_id)
        .ok_or_else(|| {
            SubmissionError::Transport("Malformed response: missing pet id".to_string())
        })?;

    Ok(StoredPet {
        id: id.to_string(),
        record: record.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mockito::Matcher;
    use pawhaven_core::models::PetCategory;
    use pawhaven_core::PipelineConfig;
    use serde_json::json;

    fn record() -> PetRecord {
        PetRecord {
            name: "Buddy".to_string(),
            category: PetCategory::Dog,
            age: 3,
            location: "Dhaka".to_string(),
            short_description: "Friendly".to_string(),
            long_description: "Loves long walks".to_string(),
            image_url: "https://res/img123.jpg".to_string(),
            added_by_user_id: "user-1".to_string(),
            adopted: false,
            created_at: Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap(),
        }
    }

    fn client(base: &str) -> ApiClient {
        let config = PipelineConfig::from_lookup(|key: &str| match key {
            "CLOUDINARY_CLOUD_NAME" => Some("demo".to_string()),
            "CLOUDINARY_UPLOAD_PRESET" => Some("pets".to_string()),
            _ => None,
        })
        .unwrap();
        ApiClient::new(base.to_string(), crate::Auth::Anonymous, &config).unwrap()
    }

    #[tokio::test]
    async fn test_create_accepts_inserted_id_ack() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/pets")
            .match_body(Matcher::PartialJson(json!({
                "name": "Buddy",
                "category": "dog",
                "imageUrl": "https://res/img123.jpg",
                "addedByUserId": "user-1"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"acknowledged":true,"insertedId":"665f1c"}"#)
            .create_async()
            .await;

        let stored = client(&server.url())
            .submit(&record(), &SubmitTarget::Create)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(stored.id, "665f1c");
        assert_eq!(stored.record.image_url, "https://res/img123.jpg");
    }

    #[tokio::test]
    async fn test_update_patches_by_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/pets/665f1c")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"acknowledged":true,"modifiedCount":1}"#)
            .create_async()
            .await;

        let stored = client(&server.url())
            .submit(
                &record(),
                &SubmitTarget::Update {
                    id: "665f1c".to_string(),
                },
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(stored.id, "665f1c");
    }

    #[tokio::test]
    async fn test_update_with_no_content_uses_known_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/pets/665f1c")
            .with_status(204)
            .create_async()
            .await;

        let stored = client(&server.url())
            .submit(
                &record(),
                &SubmitTarget::Update {
                    id: "665f1c".to_string(),
                },
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(stored.id, "665f1c");
        assert_eq!(stored.record, record());
    }

    #[tokio::test]
    async fn test_create_with_empty_body_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/pets")
            .with_status(201)
            .create_async()
            .await;

        let err = client(&server.url())
            .submit(&record(), &SubmitTarget::Create)
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Transport(_)));
    }

    #[tokio::test]
    async fn test_create_returning_document() {
        let mut server = mockito::Server::new_async().await;
        let mut body = serde_json::to_value(record()).unwrap();
        body["_id"] = json!("abc");
        let _mock = server
            .mock("POST", "/pets")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let stored = client(&server.url())
            .submit(&record(), &SubmitTarget::Create)
            .await
            .unwrap();
        assert_eq!(stored.id, "abc");
        assert_eq!(stored.record, record());
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/pets")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let err = client(&server.url())
            .submit(&record(), &SubmitTarget::Create)
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert_eq!(err, SubmissionError::http_status(500));
    }

    #[test]
    fn ack_without_id_is_malformed() {
        let err = stored_from_response(json!({"acknowledged": true}), &record(), None).unwrap_err();
        assert!(matches!(err, SubmissionError::Transport(_)));
    }
}

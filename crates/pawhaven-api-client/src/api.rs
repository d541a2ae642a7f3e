//! Domain methods for the PawHaven backend client.

use serde_json::Value as JsonValue;

use crate::ApiClient;
use pawhaven_core::models::{PetRecord, StoredPet, UserRecord};
use pawhaven_core::SubmissionError;

impl ApiClient {
    /// Fetch one pet for the update flow.
    pub async fn get_pet(&self, id: &str) -> Result<StoredPet, SubmissionError> {
        self.get(&format!("/pet-detail/{}", urlencoding::encode(id)))
            .await
    }

    /// Create a pet. Returns the backend's raw acknowledgement or document.
    pub async fn create_pet(&self, record: &PetRecord) -> Result<JsonValue, SubmissionError> {
        let path = self.routes().create.clone();
        self.post_json(&path, record).await
    }

    /// Replace a pet's fields with the refreshed record.
    pub async fn update_pet(
        &self,
        id: &str,
        record: &PetRecord,
    ) -> Result<JsonValue, SubmissionError> {
        let path = self.routes().update_path(id);
        self.patch_json(&path, record).await
    }

    /// Persist a user after sign-up or social sign-in.
    pub async fn register_user(&self, user: &UserRecord) -> Result<JsonValue, SubmissionError> {
        self.post_json("/user", user).await
    }
}

#[cfg(test)]
mod tests {
    use crate::ApiClient;
    use mockito::Matcher;
    use pawhaven_core::models::UserRecord;
    use pawhaven_core::{PipelineConfig, Session, SubmissionError};
    use serde_json::json;

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
    async fn test_get_pet_parses_detail() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/pet-detail/665f1c")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "_id": "665f1c",
                    "name": "Milo",
                    "category": "cat",
                    "age": 2,
                    "location": "Sylhet",
                    "shortDescription": "Calm",
                    "longDescription": "Sleeps a lot",
                    "imageUrl": "https://res/milo.jpg",
                    "addedByUserId": "user-2",
                    "adopted": false,
                    "createdAt": "2026-01-05T10:00:00Z"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let pet = client(&server.url()).get_pet("665f1c").await.unwrap();
        mock.assert_async().await;
        assert_eq!(pet.id, "665f1c");
        assert_eq!(pet.record.name, "Milo");
    }

    #[tokio::test]
    async fn test_get_pet_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/pet-detail/missing")
            .with_status(404)
            .with_body(r#"{"message":"Pet not found"}"#)
            .create_async()
            .await;

        let err = client(&server.url()).get_pet("missing").await.unwrap_err();
        assert_eq!(err, SubmissionError::NotFound("Pet not found".to_string()));
    }

    #[tokio::test]
    async fn test_register_user_sends_bearer_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/user")
            .match_header("authorization", "Bearer tok-1")
            .match_body(Matcher::PartialJson(json!({
                "name": "Ayesha",
                "email": "ayesha@example.com",
                "photoUrl": "https://img/me.png",
                "role": "user"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"acknowledged":true,"insertedId":"u1"}"#)
            .create_async()
            .await;

        let session = Session::new("uid-1", "ayesha@example.com").with_token("tok-1");
        let user = UserRecord::new("Ayesha", "ayesha@example.com")
            .with_photo_url("https://img/me.png");

        let ack = client(&server.url())
            .for_session(&session)
            .register_user(&user)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(ack["insertedId"], "u1");
    }
}

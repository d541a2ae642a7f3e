//! Recording fakes for pipeline unit tests.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::{Arc, Mutex};

use pawhaven_api_client::RecordSubmitter;
use pawhaven_core::models::{
    ImageFile, PetCategory, PetRecord, StoredPet, SubmitTarget, UploadResult,
};
use pawhaven_core::validation::ImageValidator;
use pawhaven_core::{NotificationKind, Notifier, Session, SubmissionError};
use pawhaven_media::MediaUploader;

use crate::capture::Collaborators;
use crate::form::PetForm;

pub struct FakeUploader {
    result: UploadResult,
    calls: Mutex<usize>,
}

impl FakeUploader {
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl MediaUploader for FakeUploader {
    async fn upload(&self, _file: &ImageFile) -> UploadResult {
        *self.calls.lock().unwrap() += 1;
        self.result.clone()
    }
}

pub struct FakeSubmitter {
    result: Result<String, SubmissionError>,
    calls: Mutex<Vec<(PetRecord, SubmitTarget)>>,
}

impl FakeSubmitter {
    pub fn calls(&self) -> Vec<(PetRecord, SubmitTarget)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordSubmitter for FakeSubmitter {
    async fn submit(
        &self,
        record: &PetRecord,
        target: &SubmitTarget,
    ) -> Result<StoredPet, SubmissionError> {
        self.calls
            .lock()
            .unwrap()
            .push((record.clone(), target.clone()));
        self.result.clone().map(|id| StoredPet {
            id,
            record: record.clone(),
        })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<(NotificationKind, String)>>,
}

impl RecordingNotifier {
    pub fn seen(&self) -> Vec<(NotificationKind, String)> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        self.seen.lock().unwrap().push((kind, message.to_string()));
    }
}

pub struct Fakes {
    pub uploader: Arc<FakeUploader>,
    pub submitter: Arc<FakeSubmitter>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Fakes {
    pub fn new(upload: UploadResult, persist: Result<&str, SubmissionError>) -> Self {
        Self {
            uploader: Arc::new(FakeUploader {
                result: upload,
                calls: Mutex::new(0),
            }),
            submitter: Arc::new(FakeSubmitter {
                result: persist.map(str::to_string),
                calls: Mutex::new(Vec::new()),
            }),
            notifier: Arc::new(RecordingNotifier::default()),
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            uploader: self.uploader.clone(),
            submitter: self.submitter.clone(),
            notifier: self.notifier.clone(),
            image_validator: ImageValidator::new(
                1024 * 1024,
                vec!["image/jpeg".to_string(), "image/png".to_string()],
            ),
        }
    }
}

pub fn session() -> Session {
    Session::new("uid-1", "owner@example.com").with_token("tok-1")
}

pub fn filled_form() -> PetForm {
    PetForm {
        name: "Buddy".to_string(),
        category: Some(PetCategory::Dog),
        age: Some(3),
        location: "Dhaka".to_string(),
        short_description: "Friendly".to_string(),
        long_description: "Loves long walks".to_string(),
        image: Some(ImageFile::new("buddy.jpg", "image/jpeg", b"jpeg".to_vec())),
    }
}

pub fn stored_pet(id: &str) -> StoredPet {
    StoredPet {
        id: id.to_string(),
        record: PetRecord {
            name: "Milo".to_string(),
            category: PetCategory::Cat,
            age: 2,
            location: "Sylhet".to_string(),
            short_description: "Calm".to_string(),
            long_description: "Sleeps a lot".to_string(),
            image_url: "https://res/old.jpg".to_string(),
            added_by_user_id: "uid-1".to_string(),
            adopted: false,
            created_at: Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap(),
        },
    }
}

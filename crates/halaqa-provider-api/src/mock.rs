//! Mock provider for testing

use async_trait::async_trait;
use halaqa_api::RecordingFile;
use halaqa_util::MeetingId;
use std::sync::{Arc, Mutex};

use crate::{
    MeetingProvider, MeetingRequest, ProviderError, ProviderResult, ProvisionedMeeting,
    RecordingStorage, StoredRecording,
};

/// Mock provider for unit/integration testing
#[derive(Default)]
pub struct MockProvider {
    requests: Arc<Mutex<Vec<MeetingRequest>>>,
    uploads: Arc<Mutex<Vec<String>>>,

    /// Configure meeting creation to fail
    pub fail_create: Arc<Mutex<bool>>,

    /// Configure uploads to fail
    pub fail_upload: Arc<Mutex<bool>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<MeetingRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Object paths uploaded so far, in order
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl MeetingProvider for MockProvider {
    async fn create_meeting(&self, request: &MeetingRequest) -> ProviderResult<ProvisionedMeeting> {
        if *self.fail_create.lock().unwrap() {
            return Err(ProviderError::CreateFailed("Mock create failure".into()));
        }

        self.requests.lock().unwrap().push(request.clone());

        let meeting_id = MeetingId::generate();
        Ok(ProvisionedMeeting {
            join_url: format!("https://mock.invalid/j/{}", meeting_id),
            start_url: format!("https://mock.invalid/s/{}", meeting_id),
            meeting_id,
        })
    }

    fn is_healthy(&self) -> bool {
        !*self.fail_create.lock().unwrap()
    }
}

#[async_trait]
impl RecordingStorage for MockProvider {
    async fn upload(
        &self,
        object_path: &str,
        _file: &RecordingFile,
    ) -> ProviderResult<StoredRecording> {
        if *self.fail_upload.lock().unwrap() {
            return Err(ProviderError::UploadFailed("Mock upload failure".into()));
        }

        self.uploads.lock().unwrap().push(object_path.to_string());
        Ok(StoredRecording {
            object_path: object_path.to_string(),
            url: format!("https://mock.invalid/{}", object_path),
        })
    }
}

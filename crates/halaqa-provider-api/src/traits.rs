//! Provider traits

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use halaqa_api::RecordingFile;
use halaqa_util::{MeetingId, SessionId};
use thiserror::Error;

/// Errors from provider operations
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Meeting creation failed: {0}")]
    CreateFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// What the link generation job asks the provider for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingRequest {
    pub session_id: SessionId,
    pub topic: String,
    pub instructor: String,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: u32,
}

/// Links returned by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedMeeting {
    pub meeting_id: MeetingId,
    /// Link handed to students
    pub join_url: String,
    /// Link that starts the meeting as host
    pub start_url: String,
}

/// Where an uploaded recording ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecording {
    pub object_path: String,
    pub url: String,
}

/// Video-conferencing vendor
#[async_trait]
pub trait MeetingProvider: Send + Sync {
    /// Create a meeting and return its links
    async fn create_meeting(&self, request: &MeetingRequest) -> ProviderResult<ProvisionedMeeting>;

    /// Optional: check if the provider is reachable
    fn is_healthy(&self) -> bool {
        true
    }
}

/// Cloud storage receiving completed recordings
#[async_trait]
pub trait RecordingStorage: Send + Sync {
    /// Store one recording file under `object_path`
    async fn upload(
        &self,
        object_path: &str,
        file: &RecordingFile,
    ) -> ProviderResult<StoredRecording>;
}

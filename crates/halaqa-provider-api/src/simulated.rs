//! Simulated provider
//!
//! Produces deterministic links without talking to any vendor, so a
//! schedule can be walked end to end on a laptop.

use async_trait::async_trait;
use halaqa_api::RecordingFile;
use halaqa_util::MeetingId;
use tracing::debug;

use crate::{
    MeetingProvider, MeetingRequest, ProviderResult, ProvisionedMeeting, RecordingStorage,
    StoredRecording,
};

/// Default base URL for simulated links
pub const SIMULATED_BASE_URL: &str = "https://meet.halaqa.invalid";

/// Provider that derives links from the session ID
#[derive(Debug, Clone)]
pub struct SimulatedProvider {
    base_url: String,
}

impl SimulatedProvider {
    pub fn new() -> Self {
        Self::with_base_url(SIMULATED_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MeetingProvider for SimulatedProvider {
    async fn create_meeting(&self, request: &MeetingRequest) -> ProviderResult<ProvisionedMeeting> {
        let meeting_id = MeetingId::new(format!("sim-{}", request.session_id));
        debug!(
            session_id = %request.session_id,
            meeting_id = %meeting_id,
            "Simulated meeting created"
        );

        Ok(ProvisionedMeeting {
            join_url: format!("{}/j/{}", self.base_url, meeting_id),
            start_url: format!("{}/s/{}", self.base_url, meeting_id),
            meeting_id,
        })
    }
}

#[async_trait]
impl RecordingStorage for SimulatedProvider {
    async fn upload(
        &self,
        object_path: &str,
        file: &RecordingFile,
    ) -> ProviderResult<StoredRecording> {
        debug!(object_path, size = file.file_size, "Simulated recording upload");
        Ok(StoredRecording {
            object_path: object_path.to_string(),
            url: format!("{}/recordings/{}", self.base_url, object_path),
        })
    }
}

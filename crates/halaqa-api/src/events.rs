//! Payloads exchanged with the external meeting provider
//!
//! Only the shapes live here. Receiving webhooks is the provider
//! integration's job, not this workspace's.

use chrono::{DateTime, Utc};
use halaqa_util::MeetingId;
use serde::{Deserialize, Serialize};

/// Sent by the provider when a cloud recording has finished processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingCompletedEvent {
    pub meeting_id: MeetingId,
    pub topic: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub recording_files: Vec<RecordingFile>,
}

/// One file of a completed recording
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingFile {
    /// Provider file type, e.g. `MP4` or `M4A`
    pub file_type: String,
    pub download_url: String,
    /// Size in bytes
    pub file_size: u64,
}

impl RecordingCompletedEvent {
    /// Video files only; audio-only and chat files are skipped on upload
    pub fn video_files(&self) -> impl Iterator<Item = &RecordingFile> {
        self.recording_files
            .iter()
            .filter(|f| f.file_type.eq_ignore_ascii_case("mp4"))
    }
}

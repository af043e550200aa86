//! Recording archival
//!
//! Completed recordings are filed as
//! `root/YYYY/MM/DD/<instructor>/<filename>`, dated by the meeting's start
//! in UTC.

use chrono::{DateTime, Utc};
use halaqa_api::RecordingCompletedEvent;
use halaqa_provider_api::{ProviderResult, RecordingStorage, StoredRecording};
use tracing::{debug, info};

/// Object path for one recording file
pub fn recording_object_path(
    root: &str,
    recorded_at: DateTime<Utc>,
    instructor: &str,
    filename: &str,
) -> String {
    let root = root.trim_matches('/');
    let date = recorded_at.format("%Y/%m/%d");
    let instructor = path_segment(instructor);
    let filename = path_segment(filename);

    if root.is_empty() {
        format!("{}/{}/{}", date, instructor, filename)
    } else {
        format!("{}/{}/{}/{}", root, date, instructor, filename)
    }
}

/// Make a string safe to use as a single path segment
fn path_segment(s: &str) -> String {
    let cleaned: String = s
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => "unknown".to_string(),
        _ => cleaned,
    }
}

/// Upload the video files of a completed recording
pub async fn archive_recording(
    storage: &dyn RecordingStorage,
    root: &str,
    instructor: &str,
    event: &RecordingCompletedEvent,
) -> ProviderResult<Vec<StoredRecording>> {
    let mut stored = Vec::new();

    for (index, file) in event.video_files().enumerate() {
        let filename = format!(
            "{}-{}-{}.{}",
            event.topic,
            event.meeting_id,
            index + 1,
            file.file_type.to_lowercase()
        );
        let path = recording_object_path(root, event.start_time, instructor, &filename);
        debug!(meeting_id = %event.meeting_id, path = %path, "Uploading recording");
        stored.push(storage.upload(&path, file).await?);
    }

    info!(
        meeting_id = %event.meeting_id,
        files = stored.len(),
        "Recording archived"
    );

    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use halaqa_api::RecordingFile;
    use halaqa_provider_api::MockProvider;
    use halaqa_util::MeetingId;

    fn recorded_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 7, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_path_layout() {
        let path = recording_object_path("recordings", recorded_at(), "Ustadh Karim", "a.mp4");
        assert_eq!(path, "recordings/2026/03/07/Ustadh Karim/a.mp4");
    }

    #[test]
    fn test_path_sanitises_segments() {
        let path = recording_object_path("/recordings/", recorded_at(), "../etc", "x/y.mp4");
        assert_eq!(path, "recordings/2026/03/07/.._etc/x_y.mp4");

        let path = recording_object_path("", recorded_at(), "  ", "..");
        assert_eq!(path, "2026/03/07/unknown/unknown");
    }

    #[tokio::test]
    async fn test_archive_uploads_video_only() {
        let storage = MockProvider::new();
        let event = RecordingCompletedEvent {
            meeting_id: MeetingId::new("84512"),
            topic: "Tajweed Basics".into(),
            start_time: recorded_at(),
            recording_files: vec![
                RecordingFile {
                    file_type: "MP4".into(),
                    download_url: "https://rec.invalid/1.mp4".into(),
                    file_size: 1024,
                },
                RecordingFile {
                    file_type: "CHAT".into(),
                    download_url: "https://rec.invalid/chat.txt".into(),
                    file_size: 12,
                },
            ],
        };

        let stored = archive_recording(&storage, "recordings", "Ustadh Karim", &event)
            .await
            .unwrap();

        assert_eq!(stored.len(), 1);
        assert_eq!(
            storage.uploads(),
            vec!["recordings/2026/03/07/Ustadh Karim/Tajweed Basics-84512-1.mp4".to_string()]
        );
    }

    #[tokio::test]
    async fn test_archive_stops_on_upload_failure() {
        let storage = MockProvider::new();
        *storage.fail_upload.lock().unwrap() = true;

        let event = RecordingCompletedEvent {
            meeting_id: MeetingId::new("1"),
            topic: "Hifz".into(),
            start_time: recorded_at(),
            recording_files: vec![RecordingFile {
                file_type: "MP4".into(),
                download_url: "https://rec.invalid/1.mp4".into(),
                file_size: 1,
            }],
        };

        assert!(archive_recording(&storage, "r", "i", &event).await.is_err());
    }
}

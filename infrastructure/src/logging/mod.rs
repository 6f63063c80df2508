//! Logging infrastructure: structured deliberation transcripts.
//!
//! Provides [`JsonlTranscriptLogger`], a JSONL file writer implementing the
//! [`TranscriptLogger`](council_application::TranscriptLogger) port, plus
//! the default location for transcript files.

mod jsonl_logger;

pub use jsonl_logger::JsonlTranscriptLogger;

use std::path::{Path, PathBuf};

/// Default transcript path: `<data_dir>/council/transcripts/<UTC stamp>.jsonl`.
///
/// `dir_override` replaces the directory part when configured. Returns `None`
/// when no platform data directory exists and no override is given.
pub fn default_transcript_path(dir_override: Option<&Path>) -> Option<PathBuf> {
    let dir = match dir_override {
        Some(dir) => dir.to_path_buf(),
        None => dirs::data_dir()?.join("council").join("transcripts"),
    };
    let stamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
    Some(dir.join(format!("{}.jsonl", stamp)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_directory_is_used_verbatim() {
        let path = default_transcript_path(Some(Path::new("/tmp/transcripts"))).unwrap();
        assert!(path.starts_with("/tmp/transcripts"));
        assert_eq!(path.extension().unwrap(), "jsonl");
    }
}

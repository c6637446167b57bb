//! Common fields of a file gathered in one session.

use crate::StreamKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The usual questions about a media file, answered from a single
/// open/close cycle.
///
/// String fields carry the engine's values verbatim and are empty when the
/// engine has nothing to report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSummary {
    /// Path as passed to the engine.
    pub path: PathBuf,
    /// Container format (General `Format`).
    pub format: String,
    /// General `Duration`, in the engine's units (milliseconds).
    pub duration: String,
    /// First video stream `Format`.
    pub video_format: String,
    /// First audio stream `Format`.
    pub audio_format: String,
    /// First video stream width in pixels.
    pub width: Option<u32>,
    /// First video stream height in pixels.
    pub height: Option<u32>,
    /// `"{width}x{height}"` when both are known.
    pub resolution: Option<String>,
    /// Number of streams per kind; kinds with no streams are omitted.
    pub streams: BTreeMap<StreamKind, usize>,
}

impl MediaSummary {
    /// Number of streams of `kind`.
    pub fn stream_count(&self, kind: StreamKind) -> usize {
        self.streams.get(&kind).copied().unwrap_or(0)
    }

    /// Whether the file has at least one video stream.
    pub fn has_video(&self) -> bool {
        self.stream_count(StreamKind::Video) > 0
    }

    /// Whether the file has at least one audio stream.
    pub fn has_audio(&self) -> bool {
        self.stream_count(StreamKind::Audio) > 0
    }
}

/// Join width and height as `"{width}x{height}"`, or `None` if either is
/// empty.
pub fn format_resolution(width: &str, height: &str) -> Option<String> {
    if width.is_empty() || height.is_empty() {
        return None;
    }
    Some(format!("{}x{}", width, height))
}

pub(crate) fn parse_numeric<T: std::str::FromStr>(s: &str) -> Option<T> {
    // Drop unit suffixes like " pixels"
    s.split_whitespace().next().and_then(|n| n.parse().ok())
}

//! Stream kinds as understood by the MediaInfo engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of stream inside a media file.
///
/// The discriminants are the engine's own `stream_t` codes and are passed
/// across the native boundary unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum StreamKind {
    /// Container-level information.
    General = 0,
    /// Video stream.
    Video = 1,
    /// Audio stream.
    Audio = 2,
    /// Text (subtitle) stream.
    Text = 3,
    /// Timecode and other auxiliary streams.
    Other = 4,
    /// Still image stream.
    Image = 5,
    /// Chapters.
    Menu = 6,
}

impl StreamKind {
    /// All stream kinds in code order.
    pub const ALL: [StreamKind; 7] = [
        Self::General,
        Self::Video,
        Self::Audio,
        Self::Text,
        Self::Other,
        Self::Image,
        Self::Menu,
    ];

    /// The engine code for this kind.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Look up a kind by engine code.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Name used by the engine in its text reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Text => "Text",
            Self::Other => "Other",
            Self::Image => "Image",
            Self::Menu => "Menu",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl TryFrom<i32> for StreamKind {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("Invalid stream kind code: {}", code))
    }
}

impl std::str::FromStr for StreamKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.parse::<i32>() {
            return Self::try_from(code);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid stream kind: {}", s))
    }
}

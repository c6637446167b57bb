//! Shared fixtures for integration tests.
//!
//! Provides a [`MediaInfo`] facade over the in-memory `FakeEngine` with a
//! small library of scripted files.

#![allow(dead_code)]

use infoscope::probe::{MediaInfo, StreamKind};
use infoscope_mediainfo::testing::{FakeEngine, FakeMedia};

pub const MP4_AVC_AAC: &str = "/library/movies/sample_avc_aac.mp4";
pub const MKV_MULTI_AUDIO: &str = "/library/movies/multi_audio.mkv";
pub const FLAC_ALBUM_TRACK: &str = "/library/music/track01.flac";
pub const NONEXISTENT: &str = "/library/movies/does_not_exist.mkv";

pub fn mkv_multi_audio() -> FakeMedia {
    FakeMedia::new()
        .stream(
            StreamKind::General,
            &[("Format", "Matroska"), ("Duration", "7200000")],
        )
        .stream(
            StreamKind::Video,
            &[("Format", "HEVC"), ("Width", "3840"), ("Height", "2160")],
        )
        .stream(
            StreamKind::Audio,
            &[("Format", "MLP FBA"), ("Channels", "8"), ("Language", "en")],
        )
        .stream(
            StreamKind::Audio,
            &[("Format", "AC-3"), ("Channels", "6"), ("Language", "de")],
        )
        .stream(StreamKind::Text, &[("Format", "PGS"), ("Language", "en")])
        .stream(StreamKind::Menu, &[("00:00:00.000", "Chapter 1")])
}

/// Engine that knows every fixture path.
pub fn fake_engine() -> FakeEngine {
    FakeEngine::new()
        .with_file(MP4_AVC_AAC, FakeMedia::mp4_avc_aac())
        .with_file(MKV_MULTI_AUDIO, mkv_multi_audio())
        .with_file(FLAC_ALBUM_TRACK, FakeMedia::flac_audio())
}

/// Initialized facade over [`fake_engine`].
pub fn media_info() -> MediaInfo<FakeEngine> {
    let mut media_info = MediaInfo::with_engine(fake_engine());
    media_info.init().expect("fake engine always initializes");
    media_info
}

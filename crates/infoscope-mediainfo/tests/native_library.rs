//! Tests against the real libmediainfo.
//!
//! Skipped when the library is not installed. Media checks additionally
//! need a small MP4 with one H.264 video stream and one AAC audio stream:
//! `tests/fixtures/media/sample_avc_aac.mp4` when present, otherwise one
//! generated with `ffmpeg` (see `tests/fixtures/media/README.md`).

use infoscope_mediainfo::{
    Error, LibraryLocator, MediaInfo, NativeEngine, StreamKind, OPEN_FAILED,
};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn native_media_info() -> Option<MediaInfo<NativeEngine>> {
    match MediaInfo::load(&LibraryLocator::new()) {
        Ok(mut media_info) => {
            media_info.init().ok()?;
            Some(media_info)
        }
        Err(e) => {
            eprintln!("Skipping: {}", e);
            None
        }
    }
}

/// A sample clip, plus the directory that holds it when it was generated.
struct Sample {
    path: PathBuf,
    _dir: Option<TempDir>,
}

/// Encode a two second 320x240 H.264 + AAC clip.
fn generate_sample(output: &Path) -> bool {
    Command::new("ffmpeg")
        .args(["-hide_banner", "-loglevel", "error"])
        .args(["-f", "lavfi", "-i", "testsrc=duration=2:size=320x240:rate=25"])
        .args(["-f", "lavfi", "-i", "sine=frequency=1000:duration=2"])
        .args(["-c:v", "libx264", "-pix_fmt", "yuv420p", "-c:a", "aac", "-shortest", "-y"])
        .arg(output)
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

fn sample_mp4() -> Option<Sample> {
    let shipped = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/media/sample_avc_aac.mp4");
    if shipped.exists() {
        return Some(Sample {
            path: shipped,
            _dir: None,
        });
    }

    let dir = tempfile::tempdir().ok()?;
    let path = dir.path().join("sample_avc_aac.mp4");
    if generate_sample(&path) {
        Some(Sample {
            path,
            _dir: Some(dir),
        })
    } else {
        eprintln!(
            "Skipping: no fixture at {} and ffmpeg could not generate one",
            shipped.display()
        );
        None
    }
}

#[test]
fn test_version_reported() {
    let Some(mut media_info) = native_media_info() else {
        return;
    };
    assert!(media_info.version().contains("MediaInfoLib"));
}

#[test]
fn test_nonexistent_file() {
    let Some(mut media_info) = native_media_info() else {
        return;
    };
    let path = "/nonexistent/path/movie.mkv";

    assert!(media_info.open_file(path).is_err());
    assert_eq!(media_info.duration(path), "");
    assert_eq!(media_info.resolution(path), "");
    assert_eq!(media_info.general_info(path), OPEN_FAILED);
}

#[test]
fn test_mp4_avc_aac() {
    let Some(mut media_info) = native_media_info() else {
        return;
    };
    let Some(sample) = sample_mp4() else {
        return;
    };
    let path = sample.path.clone();

    assert_eq!(media_info.video_format(&path), "AVC");
    assert_eq!(media_info.audio_format(&path), "AAC");
    assert!(!media_info.duration(&path).is_empty());

    let resolution = media_info.resolution(&path);
    let (width, height) = resolution.split_once('x').unwrap();
    assert!(width.chars().all(|c| c.is_ascii_digit()));
    assert!(height.chars().all(|c| c.is_ascii_digit()));

    let mut session = media_info.session(&path).unwrap();
    assert_eq!(session.stream_count(StreamKind::Video), 1);
    assert_eq!(session.stream_count(StreamKind::Audio), 1);
}

#[test]
fn test_repeated_open_close() {
    let Some(mut media_info) = native_media_info() else {
        return;
    };
    let Some(sample) = sample_mp4() else {
        return;
    };
    let path = sample.path.clone();

    let first = media_info.format(&path);
    assert!(!first.is_empty());
    for _ in 0..1000 {
        assert_eq!(media_info.format(&path), first);
    }

    // Index 0 again means the earlier files were all released
    let file = media_info.open_file(&path).unwrap();
    assert_eq!(file.get(), 0);
    media_info.close_all();
}

#[test]
fn test_failed_open_while_file_open() {
    let Some(mut media_info) = native_media_info() else {
        return;
    };
    let Some(sample) = sample_mp4() else {
        return;
    };

    let clip = media_info.open_file(&sample.path).unwrap();
    assert!(matches!(
        media_info.open_file("/nonexistent/path/movie.mkv"),
        Err(Error::OpenFailed { .. })
    ));
    assert_eq!(media_info.parameter(clip, "Format"), "MPEG-4");
    media_info.close_all();
}

#[test]
fn test_reports_and_parameter_listing() {
    let Some(mut media_info) = native_media_info() else {
        return;
    };
    let Some(sample) = sample_mp4() else {
        return;
    };

    let mut session = media_info.session(&sample.path).unwrap();
    let inform = session.inform();
    let full = session.full_info();
    assert!(inform.contains("AVC"));
    assert!(full.len() > inform.len());

    let parameters = session.available_parameters();
    let general = parameters.lines().next().unwrap();
    assert!(general.starts_with("General: "));
    assert!(general.contains("Format"));
    assert!(parameters.lines().any(|line| line.starts_with("Video: ")));
}

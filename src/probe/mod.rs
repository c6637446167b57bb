// Re-export the binding facade from infoscope-mediainfo
pub use infoscope_mediainfo::{
    format_resolution, Engine, Error, FileIndex, LibraryLocator, MediaInfo, MediaSummary,
    NativeEngine, Session, StreamKind, LIBRARY_NAMES, OPEN_FAILED,
};

use crate::config::{library_locator, LibraryConfig};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Load libmediainfo as configured and initialize it
pub fn open_media_info(library: &LibraryConfig) -> Result<MediaInfo> {
    let mut media_info = MediaInfo::load(&library_locator(library))
        .context("Could not load the MediaInfo library")?;
    media_info
        .init()
        .context("Could not initialize the MediaInfo library")?;
    Ok(media_info)
}

/// Outcome of looking for the native library
#[derive(Debug, Clone)]
pub struct LibraryStatus {
    /// Where the library was loaded from, if it was found
    pub path: Option<PathBuf>,
    /// Engine version string
    pub version: Option<String>,
    /// Why loading failed
    pub error: Option<String>,
}

impl LibraryStatus {
    pub fn available(&self) -> bool {
        self.path.is_some() && self.error.is_none()
    }
}

/// Try to load and initialize the library, reporting instead of failing
pub fn check_library(library: &LibraryConfig) -> LibraryStatus {
    let engine = match library_locator(library).load() {
        Ok(engine) => engine,
        Err(e) => {
            return LibraryStatus {
                path: None,
                version: None,
                error: Some(e.to_string()),
            }
        }
    };

    let path = engine.path().to_path_buf();
    let mut media_info = MediaInfo::with_engine(engine);
    match media_info.init() {
        Ok(()) => LibraryStatus {
            path: Some(path),
            version: Some(media_info.version()),
            error: None,
        },
        Err(e) => LibraryStatus {
            path: Some(path),
            version: None,
            error: Some(e.to_string()),
        },
    }
}

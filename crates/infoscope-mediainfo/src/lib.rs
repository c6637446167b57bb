//! # infoscope-mediainfo
//!
//! Binding facade over the native MediaInfo library (`libmediainfo`).
//!
//! This crate provides:
//! - Runtime loading of `libmediainfo` and its list API ([`NativeEngine`])
//! - The [`Engine`] trait describing that API, so the facade can run
//!   against other engines (see the `testing` feature)
//! - [`MediaInfo`], the facade: explicit initialization, file sessions,
//!   parameter lookups and one-call convenience queries
//!
//! All parsing of containers and codecs happens inside the native library.
//!
//! ## Features
//!
//! - `testing` - In-memory `FakeEngine` for tests of downstream crates
//!
//! ## Example
//!
//! ```no_run
//! use infoscope_mediainfo::{LibraryLocator, MediaInfo, StreamKind};
//!
//! let mut media_info = MediaInfo::load(&LibraryLocator::new())?;
//! media_info.init()?;
//!
//! println!("Resolution: {}", media_info.resolution("/path/to/video.mp4"));
//!
//! let mut session = media_info.session("/path/to/video.mp4")?;
//! println!("Audio tracks: {}", session.stream_count(StreamKind::Audio));
//! # Ok::<(), infoscope_mediainfo::Error>(())
//! ```

mod engine;
mod error;
mod facade;
mod native;
mod session;
mod stream;
mod summary;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-exports
pub use engine::Engine;
pub use error::{Error, Result};
pub use facade::{MediaInfo, OPEN_FAILED};
pub use native::{LibraryLocator, NativeEngine, LIBRARY_NAMES};
pub use session::{FileIndex, Session};
pub use stream::StreamKind;
pub use summary::{format_resolution, MediaSummary};

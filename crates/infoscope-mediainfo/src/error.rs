//! Error types for infoscope-mediainfo.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or driving the MediaInfo engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No candidate location yielded a loadable MediaInfo library.
    #[error("MediaInfo library not found (tried: {})", tried.join(", "))]
    LibraryNotFound { tried: Vec<String> },

    /// The library file exists but the system loader rejected it.
    #[error("failed to load MediaInfo library {}: {message}", path.display())]
    LibraryLoad { path: PathBuf, message: String },

    /// A required entry point is missing from the loaded library.
    #[error("MediaInfo library is missing symbol {symbol}: {message}")]
    MissingSymbol { symbol: String, message: String },

    /// The engine refused to create its handle.
    #[error("MediaInfo initialization failed")]
    InitFailed,

    /// An operation that needs the engine was called before `init`.
    #[error("MediaInfo not initialized")]
    NotInitialized,

    /// The engine could not open the file.
    ///
    /// Missing files, unreadable files, unsupported formats and engine
    /// failures all end up here; the engine does not tell them apart.
    #[error("failed to open file: {}", path.display())]
    OpenFailed { path: PathBuf },

    /// The path cannot be passed through the engine's C string API.
    #[error("invalid path: {}", path.display())]
    InvalidPath { path: PathBuf },
}

impl Error {
    /// Create a library load error.
    pub fn library_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::LibraryLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a missing symbol error.
    pub fn missing_symbol(symbol: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MissingSymbol {
            symbol: symbol.into(),
            message: message.into(),
        }
    }

    /// Create an open failure error.
    pub fn open_failed(path: impl Into<PathBuf>) -> Self {
        Self::OpenFailed { path: path.into() }
    }

    /// Create an invalid path error.
    pub fn invalid_path(path: impl Into<PathBuf>) -> Self {
        Self::InvalidPath { path: path.into() }
    }
}

//! The binding facade.

use crate::engine::Engine;
use crate::native::{LibraryLocator, NativeEngine};
use crate::session::{FileIndex, Session};
use crate::summary::{format_resolution, parse_numeric, MediaSummary};
use crate::{Error, Result, StreamKind};
use std::path::Path;

/// Returned by [`MediaInfo::general_info`] when the file cannot be opened.
pub const OPEN_FAILED: &str = "Failed to open file";

/// Facade over a MediaInfo engine.
///
/// The engine must be initialized with [`MediaInfo::init`] before any file
/// can be opened. Per-file queries go through a [`FileIndex`] obtained from
/// [`MediaInfo::open_file`], or through a [`Session`] that closes itself.
///
/// The convenience queries ([`MediaInfo::duration`], [`MediaInfo::format`],
/// ...) each open and close the file on their own and report failure as an
/// empty string.
pub struct MediaInfo<E: Engine = NativeEngine> {
    engine: E,
    initialized: bool,
    // Bumped whenever open files are released; see `FileIndex`.
    generation: u64,
}

impl<E: Engine> std::fmt::Debug for MediaInfo<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaInfo")
            .field("initialized", &self.initialized)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl MediaInfo<NativeEngine> {
    /// Load the native library found by `locator`.
    pub fn load(locator: &LibraryLocator) -> Result<Self> {
        Ok(Self::with_engine(locator.load()?))
    }
}

impl<E: Engine> MediaInfo<E> {
    /// Wrap an engine. The facade starts uninitialized.
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            initialized: false,
            generation: 0,
        }
    }

    /// Prepare the engine. Idempotent.
    pub fn init(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        if !self.engine.init() {
            return Err(Error::InitFailed);
        }
        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The engine's version string, e.g. `"MediaInfoLib - v24.01"`.
    pub fn version(&mut self) -> String {
        self.engine.option("Info_Version", "")
    }

    /// Open a file for querying.
    ///
    /// Every successful open must be followed by [`MediaInfo::close_all`];
    /// prefer [`MediaInfo::session`], which does that on drop.
    pub fn open_file(&mut self, path: impl AsRef<Path>) -> Result<FileIndex> {
        let path = path.as_ref();
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        let Some(native_path) = path.to_str().filter(|p| !p.contains('\0')) else {
            return Err(Error::invalid_path(path));
        };

        match self.engine.open(native_path) {
            Some(index) => {
                tracing::debug!("Opened {} as file {}", path.display(), index);
                Ok(FileIndex::new(index, self.generation))
            }
            None => {
                tracing::warn!("MediaInfo could not open {}", path.display());
                Err(Error::open_failed(path))
            }
        }
    }

    /// Open a file and close it again when the returned session drops.
    pub fn session(&mut self, path: impl AsRef<Path>) -> Result<Session<'_, E>> {
        let index = self.open_file(path)?;
        Ok(Session::new(self, index))
    }

    /// Close every open file.
    pub fn close_all(&mut self) {
        self.engine.close_all();
        self.generation += 1;
        tracing::trace!("Closed all files");
    }

    /// Release the engine. [`MediaInfo::init`] must be called again before
    /// further use.
    pub fn cleanup(&mut self) {
        self.engine.cleanup();
        self.initialized = false;
        self.generation += 1;
    }

    /// Engine index of `file` if it is still open.
    fn live(&self, file: FileIndex) -> Option<usize> {
        (file.generation() == self.generation).then_some(file.get())
    }

    /// The engine's default text report.
    pub fn inform(&mut self, file: FileIndex) -> String {
        match self.live(file) {
            Some(index) => self.engine.inform(index),
            None => String::new(),
        }
    }

    /// The engine's report with every parameter it knows, not just the
    /// default selection.
    pub fn full_info(&mut self, file: FileIndex) -> String {
        let Some(index) = self.live(file) else {
            return String::new();
        };
        self.engine.option("Complete", "1");
        let info = self.engine.inform(index);
        self.engine.option("Complete", "");
        info
    }

    /// Names of the parameters that have a value, one line per stream:
    ///
    /// ```text
    /// General: Format, Duration
    /// Audio #1: Format, Channels
    /// Audio #2: Format, Channels
    /// ```
    pub fn available_parameters(&mut self, file: FileIndex) -> String {
        let Some(index) = self.live(file) else {
            return String::new();
        };
        let mut lines = Vec::new();

        for kind in StreamKind::ALL {
            let count = self.engine.stream_count(index, kind);
            for stream in 0..count {
                let mut names = Vec::new();
                for position in 0..self.engine.parameter_count(index, kind, stream) {
                    if self
                        .engine
                        .parameter_value(index, kind, stream, position)
                        .is_empty()
                    {
                        continue;
                    }
                    let name = self.engine.parameter_name(index, kind, stream, position);
                    if !name.is_empty() {
                        names.push(name);
                    }
                }

                let label = if count > 1 {
                    format!("{} #{}", kind, stream + 1)
                } else {
                    kind.to_string()
                };
                lines.push(format!("{}: {}", label, names.join(", ")));
            }
        }

        lines.join("\n")
    }

    /// A General-stream parameter, or `""` if absent.
    pub fn parameter(&mut self, file: FileIndex, name: &str) -> String {
        self.parameter_with_stream(file, StreamKind::General, 0, name)
    }

    /// A parameter of one stream, or `""` if the stream or parameter is
    /// absent.
    pub fn parameter_with_stream(
        &mut self,
        file: FileIndex,
        kind: StreamKind,
        stream: usize,
        name: &str,
    ) -> String {
        match self.live(file) {
            Some(index) => self.engine.get(index, kind, stream, name),
            None => String::new(),
        }
    }

    /// Look a parameter up on General, then the first video stream, then
    /// the first audio stream.
    pub fn find_parameter(&mut self, file: FileIndex, name: &str) -> String {
        [StreamKind::General, StreamKind::Video, StreamKind::Audio]
            .into_iter()
            .map(|kind| self.parameter_with_stream(file, kind, 0, name))
            .find(|value| !value.is_empty())
            .unwrap_or_default()
    }

    /// Number of streams of `kind`.
    pub fn stream_count(&mut self, file: FileIndex, kind: StreamKind) -> usize {
        self.live(file)
            .map_or(0, |index| self.engine.stream_count(index, kind))
    }

    /// Full report for `path`, or [`OPEN_FAILED`].
    pub fn general_info(&mut self, path: impl AsRef<Path>) -> String {
        match self.session(path) {
            Ok(mut session) => session.full_info(),
            Err(_) => OPEN_FAILED.to_string(),
        }
    }

    /// General `Duration`, or `""`.
    pub fn duration(&mut self, path: impl AsRef<Path>) -> String {
        self.query(path.as_ref(), |session| session.parameter("Duration"))
    }

    /// General `Format`, or `""`.
    pub fn format(&mut self, path: impl AsRef<Path>) -> String {
        self.query(path.as_ref(), |session| session.parameter("Format"))
    }

    /// `Format` of the first video stream, or `""`.
    pub fn video_format(&mut self, path: impl AsRef<Path>) -> String {
        self.query(path.as_ref(), |session| {
            session.parameter_with_stream(StreamKind::Video, 0, "Format")
        })
    }

    /// `Format` of the first audio stream, or `""`.
    pub fn audio_format(&mut self, path: impl AsRef<Path>) -> String {
        self.query(path.as_ref(), |session| {
            session.parameter_with_stream(StreamKind::Audio, 0, "Format")
        })
    }

    /// `"{width}x{height}"` of the first video stream, or `""` if either
    /// is missing.
    pub fn resolution(&mut self, path: impl AsRef<Path>) -> String {
        self.query(path.as_ref(), |session| {
            let width = session.parameter_with_stream(StreamKind::Video, 0, "Width");
            let height = session.parameter_with_stream(StreamKind::Video, 0, "Height");
            format_resolution(&width, &height).unwrap_or_default()
        })
    }

    /// Collect the common fields in one session; `None` if the file
    /// cannot be opened.
    pub fn summary(&mut self, path: impl AsRef<Path>) -> Option<MediaSummary> {
        let path = path.as_ref();
        let mut session = self.session(path).ok()?;

        let width = session.parameter_with_stream(StreamKind::Video, 0, "Width");
        let height = session.parameter_with_stream(StreamKind::Video, 0, "Height");
        let streams = StreamKind::ALL
            .into_iter()
            .map(|kind| (kind, session.stream_count(kind)))
            .filter(|(_, count)| *count > 0)
            .collect();

        Some(MediaSummary {
            path: path.to_path_buf(),
            format: session.parameter("Format"),
            duration: session.parameter("Duration"),
            video_format: session.parameter_with_stream(StreamKind::Video, 0, "Format"),
            audio_format: session.parameter_with_stream(StreamKind::Audio, 0, "Format"),
            width: parse_numeric(&width),
            height: parse_numeric(&height),
            resolution: format_resolution(&width, &height),
            streams,
        })
    }

    fn query<F>(&mut self, path: &Path, f: F) -> String
    where
        F: FnOnce(&mut Session<'_, E>) -> String,
    {
        match self.session(path) {
            Ok(mut session) => f(&mut session),
            Err(_) => String::new(),
        }
    }
}

impl<E: Engine> Drop for MediaInfo<E> {
    fn drop(&mut self) {
        if self.initialized {
            self.cleanup();
        }
    }
}

//! Scoped file sessions.

use crate::engine::Engine;
use crate::{MediaInfo, StreamKind};

/// Index of an open file, as handed out by the engine.
///
/// The engine reuses index numbers once files are closed, so an index also
/// records which open cycle of its [`MediaInfo`] it belongs to. After
/// [`MediaInfo::close_all`] or [`MediaInfo::cleanup`] it no longer matches
/// anything and queries through it come back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileIndex {
    index: usize,
    generation: u64,
}

impl FileIndex {
    pub(crate) fn new(index: usize, generation: u64) -> Self {
        Self { index, generation }
    }

    /// The raw engine index.
    pub fn get(self) -> usize {
        self.index
    }

    pub(crate) fn generation(self) -> u64 {
        self.generation
    }
}

/// An open file that is closed when dropped.
///
/// The session mutably borrows its [`MediaInfo`], so no other file can be
/// opened through the same facade while it is alive.
pub struct Session<'a, E: Engine> {
    media_info: &'a mut MediaInfo<E>,
    index: FileIndex,
}

impl<'a, E: Engine> Session<'a, E> {
    pub(crate) fn new(media_info: &'a mut MediaInfo<E>, index: FileIndex) -> Self {
        Self { media_info, index }
    }

    pub fn index(&self) -> FileIndex {
        self.index
    }

    pub fn inform(&mut self) -> String {
        self.media_info.inform(self.index)
    }

    pub fn full_info(&mut self) -> String {
        self.media_info.full_info(self.index)
    }

    pub fn available_parameters(&mut self) -> String {
        self.media_info.available_parameters(self.index)
    }

    pub fn parameter(&mut self, name: &str) -> String {
        self.media_info.parameter(self.index, name)
    }

    pub fn parameter_with_stream(&mut self, kind: StreamKind, stream: usize, name: &str) -> String {
        self.media_info.parameter_with_stream(self.index, kind, stream, name)
    }

    pub fn find_parameter(&mut self, name: &str) -> String {
        self.media_info.find_parameter(self.index, name)
    }

    pub fn stream_count(&mut self, kind: StreamKind) -> usize {
        self.media_info.stream_count(self.index, kind)
    }

    /// Close the file now instead of at the end of scope.
    pub fn close(self) {}
}

impl<E: Engine> Drop for Session<'_, E> {
    fn drop(&mut self) {
        self.media_info.close_all();
    }
}

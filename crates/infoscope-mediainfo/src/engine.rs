//! The boundary between the facade and a MediaInfo engine.

use crate::StreamKind;

/// The native engine's function surface.
///
/// Every method maps onto one entry point of the MediaInfo list API. File
/// indices are the values returned by [`Engine::open`]; querying an index
/// that is not open yields empty strings and zero counts, never a panic.
///
/// Implementations are driven through `&mut self`: the engine keeps a
/// process-wide handle table and offers no locking of its own.
pub trait Engine {
    /// Create the engine handle. Calling it again once it succeeded is a
    /// no-op that returns `true`.
    fn init(&mut self) -> bool;

    /// Release the engine handle. Safe to call when not initialized.
    fn cleanup(&mut self);

    /// Open a file, returning its index, or `None` when the engine cannot
    /// open it (or is not initialized).
    fn open(&mut self, path: &str) -> Option<usize>;

    /// Close every open file.
    fn close_all(&mut self);

    /// The engine's text report for an open file.
    fn inform(&mut self, index: usize) -> String;

    /// Value of a named parameter on one stream.
    fn get(&mut self, index: usize, kind: StreamKind, stream: usize, parameter: &str) -> String;

    /// Name of the parameter at `position` on one stream.
    fn parameter_name(
        &mut self,
        index: usize,
        kind: StreamKind,
        stream: usize,
        position: usize,
    ) -> String;

    /// Value of the parameter at `position` on one stream.
    fn parameter_value(
        &mut self,
        index: usize,
        kind: StreamKind,
        stream: usize,
        position: usize,
    ) -> String;

    /// Number of parameters the engine reports for one stream.
    fn parameter_count(&mut self, index: usize, kind: StreamKind, stream: usize) -> usize;

    /// Number of streams of a kind in an open file.
    fn stream_count(&mut self, index: usize, kind: StreamKind) -> usize;

    /// Set (or read, for `Info_*` options) an engine option.
    fn option(&mut self, option: &str, value: &str) -> String;
}

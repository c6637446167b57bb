//! In-memory engine for tests.
//!
//! [`FakeEngine`] answers queries from scripted [`FakeMedia`] and keeps
//! counters so tests can check that every open is matched by a close.

use crate::engine::Engine;
use crate::StreamKind;
use std::collections::HashMap;

const NAME_WIDTH: usize = 41;

#[derive(Debug, Clone)]
struct FakeParameter {
    name: String,
    value: String,
    complete_only: bool,
}

/// Scripted content of one media file.
#[derive(Debug, Clone, Default)]
pub struct FakeMedia {
    streams: Vec<(StreamKind, Vec<FakeParameter>)>,
}

impl FakeMedia {
    /// Media with no streams at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stream with the given parameters.
    pub fn stream(mut self, kind: StreamKind, parameters: &[(&str, &str)]) -> Self {
        let parameters = parameters
            .iter()
            .map(|(name, value)| FakeParameter {
                name: name.to_string(),
                value: value.to_string(),
                complete_only: false,
            })
            .collect();
        self.streams.push((kind, parameters));
        self
    }

    /// Add a parameter to the last stream that only shows up in the
    /// complete report.
    pub fn detail(mut self, name: &str, value: &str) -> Self {
        if let Some((_, parameters)) = self.streams.last_mut() {
            parameters.push(FakeParameter {
                name: name.to_string(),
                value: value.to_string(),
                complete_only: true,
            });
        }
        self
    }

    /// An MP4 with one H.264 video stream and one AAC audio stream.
    pub fn mp4_avc_aac() -> Self {
        Self::new()
            .stream(
                StreamKind::General,
                &[
                    ("Format", "MPEG-4"),
                    ("Duration", "5280"),
                    ("FileSize", "1048576"),
                ],
            )
            .detail("Format_Profile", "Base Media")
            .stream(
                StreamKind::Video,
                &[
                    ("Format", "AVC"),
                    ("Width", "1920"),
                    ("Height", "1080"),
                    ("FrameRate", "25.000"),
                ],
            )
            .detail("Format_Profile", "High@L4")
            .stream(
                StreamKind::Audio,
                &[
                    ("Format", "AAC"),
                    ("Channels", "2"),
                    ("SamplingRate", "48000"),
                ],
            )
    }

    /// An audio-only file.
    pub fn flac_audio() -> Self {
        Self::new()
            .stream(
                StreamKind::General,
                &[("Format", "FLAC"), ("Duration", "184000")],
            )
            .stream(
                StreamKind::Audio,
                &[("Format", "FLAC"), ("Channels", "2")],
            )
    }

    fn streams_of(&self, kind: StreamKind) -> impl Iterator<Item = &Vec<FakeParameter>> {
        self.streams
            .iter()
            .filter(move |(k, _)| *k == kind)
            .map(|(_, parameters)| parameters)
    }

    fn stream_at(&self, kind: StreamKind, stream: usize) -> Option<&Vec<FakeParameter>> {
        self.streams_of(kind).nth(stream)
    }

    fn report(&self, complete: bool) -> String {
        let mut out = String::new();
        for kind in StreamKind::ALL {
            let streams: Vec<_> = self.streams_of(kind).collect();
            for (number, parameters) in streams.iter().enumerate() {
                if streams.len() > 1 {
                    out.push_str(&format!("{} #{}\n", kind, number + 1));
                } else {
                    out.push_str(&format!("{}\n", kind));
                }
                for parameter in parameters.iter() {
                    if parameter.complete_only && !complete {
                        continue;
                    }
                    out.push_str(&format!(
                        "{:<width$}: {}\n",
                        parameter.name,
                        parameter.value,
                        width = NAME_WIDTH
                    ));
                }
                out.push('\n');
            }
        }
        out
    }
}

/// Call counters kept by [`FakeEngine`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeStats {
    pub inits: usize,
    pub opens: usize,
    pub failed_opens: usize,
    pub close_alls: usize,
    pub cleanups: usize,
    /// Largest number of files open at the same time.
    pub max_open: usize,
}

/// Engine that serves [`FakeMedia`] registered by path.
#[derive(Debug, Default)]
pub struct FakeEngine {
    files: HashMap<String, FakeMedia>,
    open: Vec<FakeMedia>,
    options: HashMap<String, String>,
    initialized: bool,
    fail_init: bool,
    stats: FakeStats,
}

impl FakeEngine {
    /// Engine with no known files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register media under `path`.
    pub fn with_file(mut self, path: impl Into<String>, media: FakeMedia) -> Self {
        self.files.insert(path.into(), media);
        self
    }

    /// Make every `init` call fail.
    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// Counters so far.
    pub fn stats(&self) -> &FakeStats {
        &self.stats
    }

    /// Number of files currently open.
    pub fn open_files(&self) -> usize {
        self.open.len()
    }

    /// Whether the engine handle currently exists.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn file(&self, index: usize) -> Option<&FakeMedia> {
        self.open.get(index)
    }

    fn complete(&self) -> bool {
        self.options.get("Complete").is_some_and(|v| v == "1")
    }
}

impl Engine for FakeEngine {
    fn init(&mut self) -> bool {
        self.stats.inits += 1;
        if self.fail_init {
            return false;
        }
        self.initialized = true;
        true
    }

    fn cleanup(&mut self) {
        if self.initialized {
            self.stats.cleanups += 1;
            self.initialized = false;
            self.open.clear();
        }
    }

    fn open(&mut self, path: &str) -> Option<usize> {
        if !self.initialized {
            self.stats.failed_opens += 1;
            return None;
        }
        match self.files.get(path) {
            Some(media) => {
                self.open.push(media.clone());
                self.stats.opens += 1;
                self.stats.max_open = self.stats.max_open.max(self.open.len());
                Some(self.open.len() - 1)
            }
            None => {
                self.stats.failed_opens += 1;
                None
            }
        }
    }

    fn close_all(&mut self) {
        if self.initialized {
            self.stats.close_alls += 1;
            self.open.clear();
        }
    }

    fn inform(&mut self, index: usize) -> String {
        let complete = self.complete();
        self.file(index)
            .map(|media| media.report(complete))
            .unwrap_or_default()
    }

    fn get(&mut self, index: usize, kind: StreamKind, stream: usize, parameter: &str) -> String {
        self.file(index)
            .and_then(|media| media.stream_at(kind, stream))
            .and_then(|parameters| parameters.iter().find(|p| p.name == parameter))
            .map(|p| p.value.clone())
            .unwrap_or_default()
    }

    fn parameter_name(
        &mut self,
        index: usize,
        kind: StreamKind,
        stream: usize,
        position: usize,
    ) -> String {
        self.file(index)
            .and_then(|media| media.stream_at(kind, stream))
            .and_then(|parameters| parameters.get(position))
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }

    fn parameter_value(
        &mut self,
        index: usize,
        kind: StreamKind,
        stream: usize,
        position: usize,
    ) -> String {
        self.file(index)
            .and_then(|media| media.stream_at(kind, stream))
            .and_then(|parameters| parameters.get(position))
            .map(|p| p.value.clone())
            .unwrap_or_default()
    }

    fn parameter_count(&mut self, index: usize, kind: StreamKind, stream: usize) -> usize {
        self.file(index)
            .and_then(|media| media.stream_at(kind, stream))
            .map_or(0, Vec::len)
    }

    fn stream_count(&mut self, index: usize, kind: StreamKind) -> usize {
        self.file(index)
            .map_or(0, |media| media.streams_of(kind).count())
    }

    fn option(&mut self, option: &str, value: &str) -> String {
        if option == "Info_Version" {
            return "MediaInfoLib - v24.01".to_string();
        }
        self.options.insert(option.to_string(), value.to_string());
        String::new()
    }
}

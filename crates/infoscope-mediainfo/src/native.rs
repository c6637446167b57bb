//! Dynamically loaded `libmediainfo`.
//!
//! Uses the narrow-character `MediaInfoListA_*` entry points with the
//! library switched to UTF-8. Strings returned by the library live in a
//! buffer that the next call overwrites, so every result is copied out
//! immediately.

use crate::engine::Engine;
use crate::{Error, Result, StreamKind};
use libloading::Library;
use std::ffi::{c_char, c_int, c_void, CStr, CString};
use std::path::{Path, PathBuf};

/// Platform file names tried when no explicit path is configured.
#[cfg(target_os = "linux")]
pub const LIBRARY_NAMES: &[&str] = &["libmediainfo.so.0", "libmediainfo.so"];
#[cfg(target_os = "macos")]
pub const LIBRARY_NAMES: &[&str] = &["libmediainfo.0.dylib", "libmediainfo.dylib"];
#[cfg(target_os = "windows")]
pub const LIBRARY_NAMES: &[&str] = &["MediaInfo.dll"];
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub const LIBRARY_NAMES: &[&str] = &["libmediainfo.so"];

// MediaInfo_info_C
const INFO_NAME: c_int = 0;
const INFO_TEXT: c_int = 1;
// MediaInfo_fileoptions_C
const FILE_OPTION_NOTHING: c_int = 0;
// size_t(-1) selects "all files" for Close and "stream count" for Count_Get
const ALL: usize = usize::MAX;

type NewFn = unsafe extern "system" fn() -> *mut c_void;
type DeleteFn = unsafe extern "system" fn(*mut c_void);
type OpenFn = unsafe extern "system" fn(*mut c_void, *const c_char, c_int) -> usize;
type CloseFn = unsafe extern "system" fn(*mut c_void, usize);
type InformFn = unsafe extern "system" fn(*mut c_void, usize, usize) -> *const c_char;
type GetFn = unsafe extern "system" fn(
    *mut c_void,
    usize,
    c_int,
    usize,
    *const c_char,
    c_int,
    c_int,
) -> *const c_char;
type GetIFn =
    unsafe extern "system" fn(*mut c_void, usize, c_int, usize, usize, c_int) -> *const c_char;
type OptionFn = unsafe extern "system" fn(*mut c_void, *const c_char, *const c_char) -> *const c_char;
type CountGetFn = unsafe extern "system" fn(*mut c_void, usize, c_int, usize) -> usize;
type CountFilesFn = unsafe extern "system" fn(*mut c_void) -> usize;

/// Resolved entry points. The pointers stay valid while the owning
/// [`Library`] is loaded.
struct Api {
    new: NewFn,
    delete: DeleteFn,
    open: OpenFn,
    close: CloseFn,
    inform: InformFn,
    get: GetFn,
    get_i: GetIFn,
    option: OptionFn,
    count_get: CountGetFn,
    count_files: CountFilesFn,
}

impl Api {
    fn resolve(library: &Library) -> Result<Self> {
        // SAFETY: the types match the declarations in MediaInfoDLL.h.
        unsafe {
            Ok(Self {
                new: symbol(library, "MediaInfoListA_New")?,
                delete: symbol(library, "MediaInfoListA_Delete")?,
                open: symbol(library, "MediaInfoListA_Open")?,
                close: symbol(library, "MediaInfoListA_Close")?,
                inform: symbol(library, "MediaInfoListA_Inform")?,
                get: symbol(library, "MediaInfoListA_Get")?,
                get_i: symbol(library, "MediaInfoListA_GetI")?,
                option: symbol(library, "MediaInfoListA_Option")?,
                count_get: symbol(library, "MediaInfoListA_Count_Get")?,
                count_files: symbol(library, "MediaInfoListA_Count_Get_Files")?,
            })
        }
    }
}

unsafe fn symbol<T: Copy>(library: &Library, name: &str) -> Result<T> {
    let symbol: libloading::Symbol<T> = library
        .get(name.as_bytes())
        .map_err(|e| Error::missing_symbol(name, e.to_string()))?;
    Ok(*symbol)
}

/// Copy a library-owned C string. Null is treated as empty.
unsafe fn owned(ptr: *const c_char) -> String {
    if ptr.is_null() {
        String::new()
    } else {
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

/// Index of the file added by an open, given the file count before and
/// after the call.
///
/// `Open`'s own return value is the size of the list, which stays non-zero
/// on failure once another file is open, so only growth counts.
fn opened_index(before: usize, after: usize) -> Option<usize> {
    (after > before).then_some(before)
}

/// The MediaInfo engine backed by the native library.
pub struct NativeEngine {
    api: Api,
    handle: *mut c_void,
    path: PathBuf,
    // Dropped after `Drop::drop` has deleted the handle.
    _library: Library,
}

impl NativeEngine {
    /// Load the library at `path` and resolve its entry points.
    ///
    /// The engine handle is not created until [`Engine::init`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        // SAFETY: loading libmediainfo runs only its static initializers.
        let library = unsafe { Library::new(path.as_os_str()) }
            .map_err(|e| Error::library_load(path, e.to_string()))?;
        let api = Api::resolve(&library)?;

        tracing::debug!("Loaded MediaInfo library from {}", path.display());

        Ok(Self {
            api,
            handle: std::ptr::null_mut(),
            path: path.to_path_buf(),
            _library: library,
        })
    }

    /// Path the library was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_open(&self) -> bool {
        !self.handle.is_null()
    }
}

impl Engine for NativeEngine {
    fn init(&mut self) -> bool {
        if self.is_open() {
            return true;
        }

        let handle = unsafe { (self.api.new)() };
        if handle.is_null() {
            tracing::error!("Failed to initialize MediaInfo");
            return false;
        }
        self.handle = handle;
        self.option("CharSet", "UTF-8");

        tracing::info!("MediaInfo initialized");
        true
    }

    fn cleanup(&mut self) {
        if self.is_open() {
            unsafe { (self.api.delete)(self.handle) };
            self.handle = std::ptr::null_mut();
            tracing::info!("MediaInfo cleaned up");
        }
    }

    fn open(&mut self, path: &str) -> Option<usize> {
        if !self.is_open() {
            tracing::error!("MediaInfo not initialized");
            return None;
        }
        let c_path = CString::new(path).ok()?;

        let (before, after) = unsafe {
            let before = (self.api.count_files)(self.handle);
            let opened = (self.api.open)(self.handle, c_path.as_ptr(), FILE_OPTION_NOTHING);
            tracing::debug!("Open file result: {}", opened);
            (before, (self.api.count_files)(self.handle))
        };

        opened_index(before, after)
    }

    fn close_all(&mut self) {
        if self.is_open() {
            unsafe { (self.api.close)(self.handle, ALL) };
        }
    }

    fn inform(&mut self, index: usize) -> String {
        if !self.is_open() {
            return String::new();
        }
        unsafe { owned((self.api.inform)(self.handle, index, 0)) }
    }

    fn get(&mut self, index: usize, kind: StreamKind, stream: usize, parameter: &str) -> String {
        if !self.is_open() {
            return String::new();
        }
        let Ok(c_parameter) = CString::new(parameter) else {
            return String::new();
        };
        unsafe {
            owned((self.api.get)(
                self.handle,
                index,
                kind.code(),
                stream,
                c_parameter.as_ptr(),
                INFO_TEXT,
                INFO_NAME,
            ))
        }
    }

    fn parameter_name(
        &mut self,
        index: usize,
        kind: StreamKind,
        stream: usize,
        position: usize,
    ) -> String {
        if !self.is_open() {
            return String::new();
        }
        unsafe {
            owned((self.api.get_i)(
                self.handle,
                index,
                kind.code(),
                stream,
                position,
                INFO_NAME,
            ))
        }
    }

    fn parameter_value(
        &mut self,
        index: usize,
        kind: StreamKind,
        stream: usize,
        position: usize,
    ) -> String {
        if !self.is_open() {
            return String::new();
        }
        unsafe {
            owned((self.api.get_i)(
                self.handle,
                index,
                kind.code(),
                stream,
                position,
                INFO_TEXT,
            ))
        }
    }

    fn parameter_count(&mut self, index: usize, kind: StreamKind, stream: usize) -> usize {
        if !self.is_open() {
            return 0;
        }
        unsafe { (self.api.count_get)(self.handle, index, kind.code(), stream) }
    }

    fn stream_count(&mut self, index: usize, kind: StreamKind) -> usize {
        if !self.is_open() {
            return 0;
        }
        unsafe { (self.api.count_get)(self.handle, index, kind.code(), ALL) }
    }

    fn option(&mut self, option: &str, value: &str) -> String {
        if !self.is_open() {
            return String::new();
        }
        let (Ok(c_option), Ok(c_value)) = (CString::new(option), CString::new(value)) else {
            return String::new();
        };
        unsafe { owned((self.api.option)(self.handle, c_option.as_ptr(), c_value.as_ptr())) }
    }
}

impl Drop for NativeEngine {
    fn drop(&mut self) {
        self.cleanup();
    }
}

impl std::fmt::Debug for NativeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeEngine")
            .field("path", &self.path)
            .field("initialized", &self.is_open())
            .finish()
    }
}

/// Where to look for the MediaInfo library.
#[derive(Debug, Clone, Default)]
pub struct LibraryLocator {
    path: Option<PathBuf>,
    search_dirs: Vec<PathBuf>,
}

impl LibraryLocator {
    /// Locator that only consults the system loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use exactly this library file.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Search this directory before falling back to the system loader.
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    /// Candidates in the order [`LibraryLocator::load`] tries them.
    pub fn candidates(&self) -> Vec<PathBuf> {
        if let Some(ref path) = self.path {
            return vec![path.clone()];
        }

        let mut candidates = Vec::new();
        for dir in &self.search_dirs {
            for name in LIBRARY_NAMES {
                candidates.push(dir.join(name));
            }
        }
        candidates.extend(LIBRARY_NAMES.iter().map(PathBuf::from));
        candidates
    }

    /// Load the first candidate that works.
    ///
    /// Files that exist but fail to load are reported as
    /// [`Error::LibraryLoad`]; a library missing entry points aborts the
    /// search with [`Error::MissingSymbol`].
    pub fn load(&self) -> Result<NativeEngine> {
        let mut tried = Vec::new();
        let mut load_error = None;

        for candidate in self.candidates() {
            let bare = candidate.components().count() == 1 && self.path.is_none();
            if !bare && !candidate.exists() {
                tried.push(candidate.display().to_string());
                continue;
            }

            match NativeEngine::load(&candidate) {
                Ok(engine) => return Ok(engine),
                Err(e @ Error::MissingSymbol { .. }) => return Err(e),
                Err(e) => {
                    tracing::debug!("Could not load {}: {}", candidate.display(), e);
                    tried.push(candidate.display().to_string());
                    if !bare {
                        load_error = Some(e);
                    }
                }
            }
        }

        Err(load_error.unwrap_or(Error::LibraryNotFound { tried }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_opened_index_needs_list_growth() {
        assert_eq!(opened_index(0, 1), Some(0));
        assert_eq!(opened_index(2, 3), Some(2));
        // Failed open with other files already in the list
        assert_eq!(opened_index(1, 1), None);
        assert_eq!(opened_index(0, 0), None);
    }

    #[test]
    fn test_candidates_default() {
        let candidates = LibraryLocator::new().candidates();
        let expected: Vec<PathBuf> = LIBRARY_NAMES.iter().map(PathBuf::from).collect();
        assert_eq!(candidates, expected);
    }

    #[test]
    fn test_candidates_search_dirs_first() {
        let locator = LibraryLocator::new()
            .with_search_dir("/opt/mediainfo/lib")
            .with_search_dir("/usr/local/lib");
        let candidates = locator.candidates();

        assert_eq!(candidates.len(), LIBRARY_NAMES.len() * 3);
        assert_eq!(
            candidates[0],
            Path::new("/opt/mediainfo/lib").join(LIBRARY_NAMES[0])
        );
        assert_eq!(
            candidates[LIBRARY_NAMES.len()],
            Path::new("/usr/local/lib").join(LIBRARY_NAMES[0])
        );
        assert_eq!(
            candidates[candidates.len() - 1],
            PathBuf::from(LIBRARY_NAMES[LIBRARY_NAMES.len() - 1])
        );
    }

    #[test]
    fn test_explicit_path_replaces_search() {
        let locator = LibraryLocator::new()
            .with_search_dir("/usr/local/lib")
            .with_path("/custom/libmediainfo.so");
        assert_eq!(
            locator.candidates(),
            vec![PathBuf::from("/custom/libmediainfo.so")]
        );
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let locator = LibraryLocator::new().with_path("/nonexistent/libmediainfo.so.0");
        match locator.load() {
            Err(Error::LibraryNotFound { tried }) => {
                assert_eq!(tried, vec!["/nonexistent/libmediainfo.so.0".to_string()]);
            }
            other => panic!("expected LibraryNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_non_library_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a shared object").unwrap();

        let locator = LibraryLocator::new().with_path(file.path());
        assert!(matches!(locator.load(), Err(Error::LibraryLoad { .. })));
    }
}

//! Integration tests for configuration loading.

use infoscope::config::{library_locator, load_config, load_config_or_default, LibraryConfig};
use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn load_full_config() {
    let temp = tempdir().unwrap();
    let lib_dir = temp.path().join("lib");
    fs::create_dir(&lib_dir).unwrap();
    let config_file = temp.path().join("infoscope.toml");

    fs::write(
        &config_file,
        format!(
            r#"
[library]
path = "/opt/mediainfo/lib/libmediainfo.so.0"
search_paths = ["{}"]

[output]
json = true
"#,
            lib_dir.display()
        ),
    )
    .unwrap();

    let config = load_config(&config_file).unwrap();
    assert_eq!(
        config.library.path,
        Some(PathBuf::from("/opt/mediainfo/lib/libmediainfo.so.0"))
    );
    assert_eq!(config.library.search_paths, vec![lib_dir]);
    assert!(config.output.json);
}

#[test]
fn empty_config_uses_defaults() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("infoscope.toml");
    fs::write(&config_file, "").unwrap();

    let config = load_config(&config_file).unwrap();
    assert!(config.library.path.is_none());
    assert!(config.library.search_paths.is_empty());
    assert!(!config.output.json);
}

#[test]
fn library_path_must_not_be_directory() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("infoscope.toml");
    fs::write(
        &config_file,
        format!("[library]\npath = \"{}\"\n", temp.path().display()),
    )
    .unwrap();

    let err = load_config(&config_file).unwrap_err();
    assert!(err.to_string().contains("is a directory"));
}

#[test]
fn malformed_config_is_rejected() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("infoscope.toml");
    fs::write(&config_file, "[library\npath = ").unwrap();

    let err = load_config(&config_file).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn missing_config_file_is_an_error() {
    let err = load_config(std::path::Path::new("/nonexistent/infoscope.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn tilde_is_expanded() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("infoscope.toml");
    fs::write(
        &config_file,
        "[library]\nsearch_paths = [\"~/mediainfo/lib\"]\n",
    )
    .unwrap();

    let config = load_config(&config_file).unwrap();
    let search = &config.library.search_paths[0];
    assert!(!search.to_string_lossy().starts_with('~'));
    assert!(search.ends_with("mediainfo/lib"));
}

#[test]
#[serial]
fn default_locations_pick_up_local_file() {
    let temp = tempdir().unwrap();
    fs::write(
        temp.path().join("infoscope.toml"),
        "[output]\njson = true\n",
    )
    .unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp.path()).unwrap();
    let config = load_config_or_default(None);
    std::env::set_current_dir(previous).unwrap();

    assert!(config.unwrap().output.json);
}

#[test]
fn locator_follows_library_section() {
    let library = LibraryConfig {
        path: None,
        search_paths: vec![PathBuf::from("/opt/mediainfo/lib")],
    };
    let candidates = library_locator(&library).candidates();
    assert!(candidates[0].starts_with("/opt/mediainfo/lib"));

    let library = LibraryConfig {
        path: Some(PathBuf::from("/custom/libmediainfo.so")),
        search_paths: vec![PathBuf::from("/opt/mediainfo/lib")],
    };
    assert_eq!(
        library_locator(&library).candidates(),
        vec![PathBuf::from("/custom/libmediainfo.so")]
    );
}

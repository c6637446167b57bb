mod types;

pub use types::*;

use anyhow::{Context, Result};
use infoscope_mediainfo::LibraryLocator;
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    expand_paths(&mut config.library);

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./infoscope.toml",
        "~/.config/infoscope/config.toml",
        "/etc/infoscope/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Build the library locator described by the `[library]` section
pub fn library_locator(library: &LibraryConfig) -> LibraryLocator {
    let mut locator = LibraryLocator::new();
    for dir in &library.search_paths {
        locator = locator.with_search_dir(dir);
    }
    if let Some(ref path) = library.path {
        locator = locator.with_path(path);
    }
    locator
}

fn expand_paths(library: &mut LibraryConfig) {
    if let Some(path) = library.path.take() {
        library.path = Some(expand_tilde(&path));
    }
    library.search_paths = library
        .search_paths
        .iter()
        .map(|p| expand_tilde(p))
        .collect();
}

fn expand_tilde(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if let Some(ref path) = config.library.path {
        if path.is_dir() {
            anyhow::bail!(
                "Library path {:?} is a directory; use search_paths for directories",
                path
            );
        }
        if !path.exists() {
            tracing::warn!("Library path does not exist: {:?}", path);
        }
    }

    for dir in &config.library.search_paths {
        if !dir.is_dir() {
            tracing::warn!("Library search path is not a directory: {:?}", dir);
        }
    }

    Ok(())
}

//! Default file locations.

use std::path::{Path, PathBuf};

/// Config file picked up from the working directory.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// The explicit path if given, else `./config.toml` when it exists.
#[must_use]
pub fn resolve_config(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG);
            fallback.is_file().then_some(fallback)
        }
    }
}

//! Filesystem path utilities.
//!
//! This module resolves where keja keeps its on-disk state (recent-search
//! history and trace files) and handles tilde expansion for user-supplied
//! paths such as the static catalog file.

use std::path::PathBuf;

/// Returns the user's home directory, falling back to the current directory.
///
/// Resolution uses the `HOME` environment variable only; keja targets POSIX
/// systems where it is always set for interactive use.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from)
}

/// Returns the data directory for keja storage.
///
/// The directory is `~/.local/share/keja`. Both the recent-searches file
/// `recents.json` and the trace file `keja-otlp.json` live here.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("keja")
}

/// Expands a leading tilde to the user's home directory.
///
/// Paths without a tilde prefix are returned unchanged.
///
/// # Examples
///
/// ```
/// use keja::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/catalog.json"), "/absolute/catalog.json");
/// assert_eq!(expand_tilde("relative/catalog.json"), "relative/catalog.json");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let home = home_dir();

    if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest).to_string_lossy().into_owned()
    } else if path == "~" {
        home.to_string_lossy().into_owned()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_ends_with_the_app_directory() {
        let dir = get_data_dir();
        assert!(dir.ends_with(".local/share/keja"));
    }

    #[test]
    fn tilde_prefix_expands_to_home() {
        let expanded = expand_tilde("~/catalogs/fixture.json");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("catalogs/fixture.json"));
    }

    #[test]
    fn plain_paths_pass_through() {
        assert_eq!(expand_tilde("/etc/keja.toml"), "/etc/keja.toml");
    }
}

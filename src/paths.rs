//! Platform-specific filesystem path helpers.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable that overrides where settings are stored.
pub const SETTINGS_PATH_ENV: &str = "AUTOSCROLL_SETTINGS_PATH";

/// Path to the debug log file.
///
/// This is located in the OS temp directory.
#[must_use]
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("autoscroll.log")
}

/// Where the JSON settings store lives.
///
/// `AUTOSCROLL_SETTINGS_PATH` wins when set; otherwise the file sits under the
/// platform's local data directory, or the working directory as a last resort.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut var_os = |key: &'static str| std::env::var_os(key);
    settings_path_from(&mut var_os)
}

fn settings_path_from(var_os: &mut impl FnMut(&'static str) -> Option<OsString>) -> PathBuf {
    if let Some(path) = var_os(SETTINGS_PATH_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    data_local_dir_from(var_os)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("autoscroll")
        .join("settings.json")
}

#[cfg(not(windows))]
fn home_dir_from(var_os: &mut impl FnMut(&'static str) -> Option<OsString>) -> Option<PathBuf> {
    var_os("HOME").map(PathBuf::from)
}

#[cfg(windows)]
fn data_local_dir_from(
    var_os: &mut impl FnMut(&'static str) -> Option<OsString>,
) -> Option<PathBuf> {
    var_os("LOCALAPPDATA")
        .or_else(|| var_os("APPDATA"))
        .map(PathBuf::from)
}

#[cfg(not(windows))]
fn data_local_dir_from(
    var_os: &mut impl FnMut(&'static str) -> Option<OsString>,
) -> Option<PathBuf> {
    if let Some(xdg) = var_os("XDG_DATA_HOME") {
        return Some(PathBuf::from(xdg));
    }
    let home = home_dir_from(var_os)?;
    if cfg!(target_os = "macos") {
        Some(home.join("Library").join("Application Support"))
    } else {
        Some(home.join(".local").join("share"))
    }
}

/// Resolve the local application data directory for the current platform.
#[must_use]
pub fn data_local_dir() -> Option<PathBuf> {
    let mut var_os = |key: &'static str| std::env::var_os(key);
    data_local_dir_from(&mut var_os)
}

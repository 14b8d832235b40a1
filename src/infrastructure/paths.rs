//! Sandbox path helpers.
//!
//! Inside the Zellij sandbox the host filesystem is mounted under `/host`,
//! which usually resolves to the directory Zellij was started from.

use std::path::PathBuf;

const HOST_ROOT: &str = "/host";

/// Directory holding the plugin's trace files.
///
/// ```
/// use pantry::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir().to_str(),
///     Some("/host/.local/share/zellij/pantry")
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT)
        .join(".local/share/zellij")
        .join("pantry")
}

/// Maps a `~`-prefixed path from the plugin configuration into the sandbox.
///
/// ```
/// use pantry::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/pantry.toml"), "/etc/pantry.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}

//! Pantry: a Zellij plugin that keeps a list of items in sync with a remote
//! REST collection.
//!
//! The plugin shows the collection as a table, lets the user add and remove
//! items, and filters the list by exact title through a debounced live query.
//! Every request runs in its own slot with a pending/succeeded/failed
//! lifecycle, and completions are folded into the local collection by a pure
//! reducer.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← host calls
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling, actions                          │
//! │  - Coordinator                                      │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Request Layer │   │ Query Layer   │   │ Store Layer   │
//! │ (request/)    │   │ (query/)      │   │ (store/)      │
//! │ - Slots       │   │ - Debounce    │   │ - Reducer     │
//! │ - Lifecycle   │   │ - Timer tokens│   │ - Items       │
//! │ - Endpoint    │   │               │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure, UI, Observability          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/pantry.wasm" {
//!         base_url "https://my-project.firebaseio.com"
//!         collection "ingredients"
//!         debounce_ms "500"
//!         theme "pantry-dark"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use pantry::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert!(matches!(actions.as_slice(), [Action::ArmTimer(_)]));
//! # Ok::<(), pantry::PantryError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod query;
pub mod request;
pub mod store;
pub mod ui;

pub use app::{handle_event, Action, AppState, Coordinator, Event, InputMode};
pub use domain::{Item, ItemId, NewItem, PantryError, Result};
pub use ui::Theme;

use infrastructure::expand_tilde;
use query::DEFAULT_DEBOUNCE;
use request::Endpoint;
use std::collections::BTreeMap;
use std::time::Duration;

/// Address used when `base_url` is not configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:9000";
/// Collection used when `collection` is not configured.
pub const DEFAULT_COLLECTION: &str = "ingredients";

/// Plugin configuration parsed from the layout's plugin block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the REST database, without a trailing slash.
    pub base_url: String,

    /// Collection holding the items.
    pub collection: String,

    /// Quiet period before a filter change queries the remote side.
    pub debounce_ms: u64,

    /// Built-in theme name (`pantry-dark`, `pantry-light`). Ignored if
    /// `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme; `~` refers to the host home directory.
    pub theme_file: Option<String>,

    /// Tracing filter directive (`trace`, `debug`, `info`, ...). Defaults to
    /// `info` when unset or unparsable.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            debounce_ms: duration_millis(DEFAULT_DEBOUNCE),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the configuration map Zellij hands to `load`.
    ///
    /// Missing or unparsable values fall back to their defaults.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use pantry::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("base_url".to_string(), "https://db.example.com/".to_string());
    /// map.insert("debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.base_url, "https://db.example.com");
    /// assert_eq!(config.debounce_ms, 500);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        };

        let base_url = non_empty("base_url")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let collection = non_empty("collection")
            .map(|name| name.trim_matches('/').to_string())
            .unwrap_or(defaults.collection);

        let debounce_ms = non_empty("debounce_ms")
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(defaults.debounce_ms);

        Self {
            base_url,
            collection,
            debounce_ms,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").map(|path| expand_tilde(path)),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.base_url.as_str(), self.collection.as_str())
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Builds the initial application state from configuration.
///
/// The collection starts empty; the first load begins once the host grants
/// web access.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        base_url = %config.base_url,
        collection = %config.collection,
        debounce_ms = config.debounce_ms,
        "initializing pantry plugin"
    );

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(Coordinator::new(config.endpoint(), config.debounce()), theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_every_key() {
        let config = Config::from_zellij(&map(&[
            ("base_url", "https://db.example.com//"),
            ("collection", "/spices/"),
            ("debounce_ms", "250"),
            ("theme", "pantry-light"),
            ("theme_file", "~/themes/mine.toml"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.base_url, "https://db.example.com");
        assert_eq!(config.collection, "spices");
        assert_eq!(config.debounce(), Duration::from_millis(250));
        assert_eq!(config.theme_name.as_deref(), Some("pantry-light"));
        assert_eq!(config.theme_file.as_deref(), Some("/host/themes/mine.toml"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.endpoint().collection_url(), "https://db.example.com/spices.json");
    }

    #[test]
    fn blank_values_fall_back() {
        let config = Config::from_zellij(&map(&[("base_url", "  "), ("debounce_ms", "-1")]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.debounce_ms, 500);
    }

    #[test]
    fn initialize_picks_configured_theme() {
        let config = Config {
            theme_name: Some("pantry-light".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme.name, "pantry-light");
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("nope".to_string()),
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme, Theme::default());
    }
}

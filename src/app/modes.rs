//! Input modes.
//!
//! The mode decides what printable keys do:
//!
//! - **Normal**: single-key commands (`j`/`k`, `/`, `a`, `d`, `c`, `q`)
//! - **Filter**: keys edit the live filter text, which drives the debounced query
//! - **Add**: keys edit the `title amount` prompt; `Enter` submits it

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys are commands: navigation, delete, mode switches.
    #[default]
    Normal,
    /// Keys edit the filter text; each edit rearms the query debounce.
    Filter,
    /// Keys edit the `title amount` draft submitted on Enter.
    Add,
}

impl InputMode {
    /// Whether printable keys are text input rather than commands.
    #[must_use]
    pub const fn is_editing(self) -> bool {
        matches!(self, Self::Filter | Self::Add)
    }
}

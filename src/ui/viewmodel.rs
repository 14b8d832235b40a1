//! Display-ready data computed from application state.
//!
//! Produced by [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer. Nothing here knows about requests or slots.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Visible window of the item list.
    pub rows: Vec<ItemRow>,

    /// Index of the selected row within `rows`.
    pub selected_index: usize,

    pub header: HeaderInfo,

    /// Filter or add prompt, when one is shown.
    pub input_bar: Option<InputBarInfo>,

    /// Request failure or input notice shown above the list.
    pub error_banner: Option<String>,

    pub footer: FooterInfo,

    /// Replaces the list when there is nothing to show.
    pub empty_state: Option<EmptyState>,
}

/// One line of the item table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub title: String,
    pub amount: String,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Some request is in flight.
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBarInfo {
    pub label: String,
    pub text: String,
    /// The request this input drives is in flight.
    pub busy: bool,
    /// Keys currently go to this input.
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

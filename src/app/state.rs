//! Application state and view model computation.
//!
//! [`AppState`] holds the [`Coordinator`] (the authoritative item list and the
//! request slots) plus the transient UI state around it: selection, input
//! mode, the text being typed, and a local notice for input the plugin could
//! not understand.
//!
//! View models are computed on demand by [`AppState::compute_viewmodel`] and
//! contain only display-ready data.
//!
//! # State Components
//!
//! - **Coordinator**: collection, request slots and debounced filter
//! - **Selection**: cursor position within the coordinator's items
//! - **Input Mode**: decides whether keys are commands or text
//! - **Inputs**: live filter text and the add prompt
//! - **Notice**: local message for input that could not be parsed
//!
//! # View Model Computation
//!
//! `compute_viewmodel` windows the item list around the selection so the
//! cursor stays visible, sizes the window from the pane height minus the
//! chrome (header, borders, input box, banner, footer), and picks the empty
//! state message.
//!
//! # Example
//!
//! ```rust
//! use pantry::{initialize, Config};
//!
//! let state = initialize(&Config::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.rows.is_empty());
//! assert_eq!(viewmodel.empty_state.map(|e| e.message), Some("No items yet".to_string()));
//! ```

use super::coordinator::Coordinator;
use super::modes::InputMode;
use crate::domain::Item;
use crate::request::Slot;
use crate::ui::components::TITLE_COLUMN;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    EmptyState, FooterInfo, HeaderInfo, InputBarInfo, ItemRow, UIViewModel,
};

/// Rows taken by header, borders, column headings and footer.
const CHROME_ROWS: usize = 6;
/// Extra rows taken by the input box.
const INPUT_BAR_ROWS: usize = 3;
/// Extra rows taken by the error banner.
const BANNER_ROWS: usize = 1;

/// Central application state container.
///
/// Mutated only by [`handle_event`](crate::app::handle_event); rendered via
/// [`compute_viewmodel`](Self::compute_viewmodel).
#[derive(Debug, Clone)]
pub struct AppState {
    /// Item list and request tracking.
    ///
    /// The authoritative source for what the list shows; the UI never edits
    /// items directly.
    pub coordinator: Coordinator,

    /// Zero-based index into the coordinator's items.
    ///
    /// Wraps during navigation and is clamped after a completion shrinks the
    /// list.
    pub selected_index: usize,

    /// Current input handling mode.
    ///
    /// Determines keybindings, the input box and the footer text.
    pub input_mode: InputMode,

    /// Live value of the filter input. The debounce timer compares against
    /// this when it fires.
    pub filter_input: String,

    /// Contents of the `title amount` prompt.
    pub add_input: String,

    /// Local message about rejected input; never a request failure.
    ///
    /// Shown in the banner when no request has failed. Cleared by dismissing
    /// the error or by a successful add.
    pub notice: Option<String>,

    /// Color scheme for rendering, loaded from configuration.
    pub theme: Theme,
}

impl AppState {
    /// Creates application state around a coordinator.
    ///
    /// Starts in normal mode with the cursor on the first row and the filter
    /// input showing the coordinator's filter text.
    ///
    /// # Parameters
    ///
    /// * `coordinator` - Collection and request tracking
    /// * `theme` - Color scheme for rendering
    #[must_use]
    pub fn new(coordinator: Coordinator, theme: Theme) -> Self {
        let filter_input = coordinator.filter_text().to_string();
        Self {
            coordinator,
            selected_index: 0,
            input_mode: InputMode::Normal,
            filter_input,
            add_input: String::new(),
            notice: None,
            theme,
        }
    }

    /// Moves the cursor down, wrapping to the top.
    ///
    /// Does nothing on an empty list.
    pub fn move_selection_down(&mut self) {
        let len = self.coordinator.items().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the cursor up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.coordinator.items().len();
        if len == 0 {
            return;
        }
        self.selected_index = self.selected_index.checked_sub(1).unwrap_or(len - 1);
    }

    /// Item under the cursor, if the list is not empty.
    #[must_use]
    pub fn selected_item(&self) -> Option<&Item> {
        self.coordinator.items().get(self.selected_index)
    }

    /// Keeps the cursor inside the list after it shrinks.
    pub fn clamp_selection(&mut self) {
        let len = self.coordinator.items().len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    /// Builds the view model for a `rows` x `cols` pane.
    ///
    /// # Parameters
    ///
    /// * `rows` - Pane height; decides how many items fit
    /// * `cols` - Pane width; long titles and amounts are truncated to fit
    ///
    /// # Returns
    ///
    /// A [`UIViewModel`] whose `rows` hold the visible window, with
    /// `selected_index` relative to that window.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let items = self.coordinator.items();
        let input_bar = self.compute_input_bar();
        let error_banner = self.compute_error_banner();

        let mut chrome = CHROME_ROWS;
        if input_bar.is_some() {
            chrome += INPUT_BAR_ROWS;
        }
        if error_banner.is_some() {
            chrome += BANNER_ROWS;
        }
        let available = rows.saturating_sub(chrome).max(1);

        let mut start = self.selected_index.saturating_sub(available / 2);
        let end = (start + available).min(items.len());
        if end - start < available && items.len() >= available {
            start = end.saturating_sub(available);
        }

        let amount_width = cols.saturating_sub(TITLE_COLUMN);
        let rows: Vec<ItemRow> = items[start..end]
            .iter()
            .enumerate()
            .map(|(offset, item)| ItemRow {
                title: truncate(&item.title, TITLE_COLUMN - 2),
                amount: truncate(&format_amount(item.amount), amount_width),
                is_selected: start + offset == self.selected_index,
            })
            .collect();

        UIViewModel {
            empty_state: rows.is_empty().then(|| self.compute_empty_state()),
            rows,
            selected_index: self.selected_index.saturating_sub(start),
            header: self.compute_header(),
            input_bar,
            error_banner,
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let collection = self.coordinator.endpoint().collection();
        HeaderInfo {
            title: format!(" Pantry · {collection} ({}) ", self.coordinator.items().len()),
            loading: self.coordinator.loading(),
        }
    }

    fn compute_input_bar(&self) -> Option<InputBarInfo> {
        match self.input_mode {
            InputMode::Add => Some(InputBarInfo {
                label: "Add (title amount)".to_string(),
                text: self.add_input.clone(),
                busy: self.coordinator.is_pending(Slot::Add) || self.coordinator.is_pending(Slot::Remove),
                focused: true,
            }),
            InputMode::Filter => Some(InputBarInfo {
                label: "Filter by title".to_string(),
                text: self.filter_input.clone(),
                busy: self.coordinator.is_pending(Slot::Query),
                focused: true,
            }),
            InputMode::Normal if !self.filter_input.is_empty() => Some(InputBarInfo {
                label: "Filter by title".to_string(),
                text: self.filter_input.clone(),
                busy: self.coordinator.is_pending(Slot::Query),
                focused: false,
            }),
            InputMode::Normal => None,
        }
    }

    fn compute_error_banner(&self) -> Option<String> {
        self.coordinator
            .error_message()
            .map(str::to_string)
            .or_else(|| self.notice.clone())
    }

    fn compute_empty_state(&self) -> EmptyState {
        if self.coordinator.is_pending(Slot::Query) {
            return EmptyState {
                message: "Loading...".to_string(),
                subtitle: String::new(),
            };
        }
        if self.filter_input.is_empty() {
            EmptyState {
                message: "No items yet".to_string(),
                subtitle: "Press 'a' to add one".to_string(),
            }
        } else {
            EmptyState {
                message: format!("No items titled \"{}\"", self.filter_input),
                subtitle: "Press '/' to change the filter".to_string(),
            }
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Normal if self.compute_error_banner().is_some() => {
                "c/Enter: dismiss  j/k: navigate  /: filter  a: add  d: remove  q: quit"
            }
            InputMode::Normal => "j/k: navigate  /: filter  a: add  d: remove  q: quit",
            InputMode::Filter => "Type to filter  Enter/Esc: done",
            InputMode::Add => "Type \"title amount\"  Enter: add  Esc: cancel",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Formats an amount without a trailing `.0` for whole numbers.
fn format_amount(amount: f64) -> String {
    format!("{amount}")
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemId, NewItem};
    use crate::app::Action;
    use crate::request::{Endpoint, HttpResponse};
    use std::time::Duration;

    fn state_with(titles: &[&str]) -> AppState {
        let mut coordinator = Coordinator::new(
            Endpoint::new("https://example.test", "ingredients"),
            Duration::from_millis(500),
        );
        for (index, title) in titles.iter().enumerate() {
            let actions = coordinator.add_item(NewItem::new(*title, 1.0)).unwrap();
            let Some(Action::SendRequest(request)) = actions.first() else {
                panic!("expected a request");
            };
            let body = format!(r#"{{"name":"id{index}"}}"#);
            coordinator.on_response(&request.context, &HttpResponse::new(200, body));
        }
        AppState::new(coordinator, Theme::default())
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut state = state_with(&["Salt", "Flour", "Sugar"]);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn selection_on_empty_list_stays_put() {
        let mut state = state_with(&[]);
        state.move_selection_down();
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);
        assert!(state.selected_item().is_none());
    }

    #[test]
    fn clamp_keeps_cursor_on_last_item() {
        let mut state = state_with(&["Salt", "Flour"]);
        state.selected_index = 5;
        state.clamp_selection();
        assert_eq!(state.selected_item().map(|item| &item.id), Some(&ItemId::new("id1")));
    }

    #[test]
    fn viewmodel_windows_around_selection() {
        let titles: Vec<String> = (0..30).map(|i| format!("item{i}")).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let mut state = state_with(&refs);
        state.selected_index = 20;

        let vm = state.compute_viewmodel(16, 80);
        assert_eq!(vm.rows.len(), 10);
        assert!(vm.rows[vm.selected_index].is_selected);
        assert_eq!(vm.rows[vm.selected_index].title, "item20");
    }

    #[test]
    fn whole_amounts_drop_the_fraction() {
        assert_eq!(format_amount(2.0), "2");
        assert_eq!(format_amount(0.5), "0.5");
    }

    #[test]
    fn long_titles_are_truncated() {
        assert_eq!(truncate("abcdefgh", 6), "abc...");
        assert_eq!(truncate("abc", 6), "abc");
    }

    #[test]
    fn notice_shows_in_the_banner() {
        let mut state = state_with(&[]);
        state.notice = Some("Invalid input: missing amount".to_string());
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.error_banner.as_deref(), Some("Invalid input: missing amount"));
    }

    #[test]
    fn empty_filtered_list_names_the_filter() {
        let mut state = state_with(&[]);
        state.filter_input = "Salt".to_string();
        let vm = state.compute_viewmodel(24, 80);
        let empty = vm.empty_state.unwrap();
        assert_eq!(empty.message, "No items titled \"Salt\"");
    }
}

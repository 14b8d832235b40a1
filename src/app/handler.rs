//! Event handling and state transitions.
//!
//! [`handle_event`] is the only place application state changes. The plugin
//! runtime translates host events into [`Event`]s, calls the handler, renders
//! when asked to, and carries out the returned [`Action`]s in order.
//!
//! ```text
//! key / timer / completion → Event → handle_event → (render?, Vec<Action>)
//!                                                            ↓
//!                                         web_request / set_timeout / hide_self
//! ```

use crate::app::{Action, AppState, InputMode};
use crate::domain::{NewItem, Result};
use crate::query::TimerToken;
use crate::request::{HttpResponse, RequestContext};

/// Something the application reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the cursor down (wraps).
    KeyDown,
    /// Moves the cursor up (wraps).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,
    /// Focuses the filter input.
    FilterMode,
    /// Opens the `title amount` prompt.
    AddMode,
    /// Leaves the current input mode.
    Escape,
    /// Types a character into the focused input.
    Char(char),
    /// Deletes the last character of the focused input.
    Backspace,
    /// Enter: submits the add prompt, leaves the filter, or dismisses an error.
    Submit,
    /// Deletes the item under the cursor.
    RemoveSelected,
    /// Dismisses the error banner.
    DismissError,

    /// The host granted web access; the initial load may start.
    PermissionsGranted,
    /// The host refused web access.
    PermissionsDenied,

    /// A debounce timer elapsed.
    TimerFired(TimerToken),

    /// The host finished a request handed out with [`Action::SendRequest`].
    RequestCompleted {
        context: RequestContext,
        response: HttpResponse,
    },

    /// The plugin is closing.
    Teardown,
}

/// Processes an event and returns whether to re-render plus the actions to run.
///
/// # Errors
///
/// Returns an error if a request cannot be built.
///
/// # Example
///
/// ```rust
/// use pantry::{handle_event, initialize, Config, Event};
///
/// let mut state = initialize(&Config::default());
/// let (render, actions) = handle_event(&mut state, &Event::FilterMode)?;
/// assert!(render);
/// assert!(actions.is_empty());
/// # Ok::<(), pantry::PantryError>(())
/// ```
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::FilterMode => {
            state.input_mode = InputMode::Filter;
            Ok((true, vec![]))
        }
        Event::AddMode => {
            state.input_mode = InputMode::Add;
            state.add_input.clear();
            state.notice = None;
            Ok((true, vec![]))
        }
        Event::Escape => {
            if state.input_mode == InputMode::Add {
                state.add_input.clear();
            }
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Char(c) => match state.input_mode {
            InputMode::Filter => {
                state.filter_input.push(*c);
                Ok((true, update_filter(state)))
            }
            InputMode::Add => {
                state.add_input.push(*c);
                Ok((true, vec![]))
            }
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::Backspace => match state.input_mode {
            InputMode::Filter => {
                if state.filter_input.pop().is_none() {
                    return Ok((false, vec![]));
                }
                Ok((true, update_filter(state)))
            }
            InputMode::Add => {
                state.add_input.pop();
                Ok((true, vec![]))
            }
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::Submit => match state.input_mode {
            InputMode::Add => submit_new_item(state),
            InputMode::Filter => {
                state.input_mode = InputMode::Normal;
                Ok((true, vec![]))
            }
            InputMode::Normal => Ok((dismiss_error(state), vec![])),
        },
        Event::RemoveSelected => {
            let Some(item) = state.selected_item() else {
                tracing::debug!("no item selected to remove");
                return Ok((false, vec![]));
            };
            tracing::debug!(item_id = %item.id, title = %item.title, "removing item");
            let id = item.id.clone();
            let actions = state.coordinator.remove_item(id)?;
            Ok((true, actions))
        }
        Event::DismissError => Ok((dismiss_error(state), vec![])),
        Event::PermissionsGranted => {
            tracing::debug!("web access granted, starting initial load");
            Ok((true, state.coordinator.mount()))
        }
        Event::PermissionsDenied => {
            tracing::warn!("web access denied");
            state.notice = Some("Web access was denied; the list cannot load".to_string());
            Ok((true, vec![]))
        }
        Event::TimerFired(token) => {
            let actions = state
                .coordinator
                .on_timer_fired(*token, &state.filter_input)?;
            Ok((!actions.is_empty(), actions))
        }
        Event::RequestCompleted { context, response } => {
            let changed = state.coordinator.on_response(context, response);
            state.clamp_selection();
            Ok((changed, vec![]))
        }
        Event::Teardown => {
            state.coordinator.teardown();
            Ok((false, vec![]))
        }
    }
}

fn update_filter(state: &mut AppState) -> Vec<Action> {
    tracing::trace!(filter = %state.filter_input, "filter text updated");
    state.coordinator.set_filter_text(state.filter_input.clone())
}

fn submit_new_item(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let draft = match NewItem::parse(&state.add_input) {
        Ok(draft) => draft,
        Err(e) => {
            tracing::debug!(input = %state.add_input, error = %e, "rejected add input");
            state.notice = Some(e.to_string());
            return Ok((true, vec![]));
        }
    };

    tracing::debug!(title = %draft.title, amount = draft.amount, "adding item");
    let actions = state.coordinator.add_item(draft)?;
    state.add_input.clear();
    state.notice = None;
    state.input_mode = InputMode::Normal;
    Ok((true, actions))
}

/// Clears the request error and any notice; returns whether one was shown.
fn dismiss_error(state: &mut AppState) -> bool {
    let shown = state.coordinator.error_message().is_some() || state.notice.is_some();
    state.coordinator.clear_error();
    state.notice = None;
    shown
}

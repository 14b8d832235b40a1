//! Zellij plugin wrapper and entry point.
//!
//! Translates host events into library [`Event`]s and carries out the
//! [`Action`]s the library returns. Everything else lives in the library.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, create `AppState`, request
//!    permissions, subscribe to events
//! 2. **Permissions granted**: the library arms the first debounce timer,
//!    which issues the unfiltered load
//! 3. **Update**: keys, timers and request completions go through `handle_event`
//! 4. **Before close**: the armed debounce timer is cancelled
//!
//! # Timers
//!
//! Host timers cannot be cancelled and carry no payload. Every debounce timer
//! has the same delay, so they fire in the order they were armed; the plugin
//! keeps the tokens in a queue and pairs each `Timer` event with the oldest.
//!
//! # Keybindings
//!
//! Normal mode:
//! - `j`/`Down`, `k`/`Up`: move (also `Ctrl+n`/`Ctrl+p` in every mode)
//! - `/`: filter by title
//! - `a`: add an item (`title amount`)
//! - `d`/`Delete`: remove the selected item
//! - `c`/`Enter`: dismiss the error
//! - `q`/`Esc`: close
//!
//! Filter and add modes:
//! - printable keys edit the input, `Backspace` deletes
//! - `Enter` submits, `Esc` leaves the mode

#![allow(clippy::multiple_crate_versions)]

use std::collections::{BTreeMap, VecDeque};
use zellij_tile::prelude::*;

use pantry::query::TimerToken;
use pantry::request::{HttpResponse, Method, RequestContext};
use pantry::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

struct State {
    app: pantry::AppState,

    /// Tokens of armed host timers, oldest first.
    pending_timers: VecDeque<TimerToken>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: pantry::initialize(&Config::default()),
            pending_timers: VecDeque::new(),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, requests permissions and subscribes to events.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: REST calls against the collection
    /// - `ReadApplicationState` / `ChangeApplicationState`: hiding the pane
    ///
    /// # Subscriptions
    ///
    /// - `Key`: keyboard input
    /// - `Timer`: query debounce deadlines
    /// - `WebRequestResult`: request completions
    /// - `PermissionRequestResult`: initial load once access is granted
    /// - `BeforeClose`: debounce teardown
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        pantry::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(base_url = %config.base_url, collection = %config.collection, "parsed configuration");
        self.app = pantry::initialize(&config);

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::ReadApplicationState,
            PermissionType::ChangeApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
            EventType::BeforeClose,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Translates host events to library events, delegates to `handle_event`
    /// and executes the resulting actions. Returns `true` if the UI should
    /// re-render.
    ///
    /// # Timers
    ///
    /// Host `Timer` events carry no identity. They are paired with armed
    /// tokens oldest first, which holds because every timer uses the same
    /// delay.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(elapsed) => match self.pending_timers.pop_front() {
                Some(token) => Event::TimerFired(token),
                None => {
                    tracing::debug!(elapsed, "timer fired with no armed token");
                    return false;
                }
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => Event::PermissionsGranted,
                PermissionStatus::Denied => Event::PermissionsDenied,
            },
            zellij_tile::prelude::Event::BeforeClose => Event::Teardown,
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        pantry::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            zellij_tile::prelude::Event::BeforeClose => "BeforeClose".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        if self.app.input_mode.is_editing() {
            return Some(match key.bare_key {
                BareKey::Esc => Event::Escape,
                BareKey::Enter => Event::Submit,
                BareKey::Backspace => Event::Backspace,
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        debug_assert_eq!(self.app.input_mode, InputMode::Normal);
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Char('/') => Event::FilterMode,
            BareKey::Char('a') => Event::AddMode,
            BareKey::Char('d') | BareKey::Delete => Event::RemoveSelected,
            BareKey::Char('c') => Event::DismissError,
            BareKey::Enter => Event::Submit,
            BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Rebuilds the completion; responses without a readable context are dropped.
    fn map_web_request_result(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        match RequestContext::from_map(context) {
            Ok(context) => Some(Event::RequestCompleted {
                context,
                response: HttpResponse::new(status, body),
            }),
            Err(e) => {
                tracing::warn!(error = %e, status, "dropping response without request context");
                None
            }
        }
    }

    /// Performs one side effect requested by the library.
    ///
    /// # Parameters
    ///
    /// * `action` - request to send, timer to arm or focus to release
    fn execute_action(&mut self, action: Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::ArmTimer(timer) => {
                tracing::trace!(token = %timer.token, delay_ms = timer.delay.as_millis(), "arming timer");
                self.pending_timers.push_back(timer.token);
                set_timeout(timer.delay.as_secs_f64());
            }
            Action::SendRequest(request) => {
                tracing::debug!(method = ?request.method, url = %request.url, "sending request");
                let mut headers = BTreeMap::new();
                let verb = match request.method {
                    Method::Get => HttpVerb::Get,
                    Method::Post => {
                        headers.insert("Content-Type".to_string(), "application/json".to_string());
                        HttpVerb::Post
                    }
                    Method::Delete => HttpVerb::Delete,
                };
                web_request(
                    request.url,
                    verb,
                    headers,
                    request.body.unwrap_or_default(),
                    request.context.to_map(),
                );
            }
        }
    }
}

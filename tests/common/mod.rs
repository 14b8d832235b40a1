//! Virtual-time stand-in for the Zellij host.
//!
//! Runs the library the way `main.rs` does: events go through
//! `handle_event`, timers are queued against a virtual clock, and requests are
//! recorded so tests can answer them in any order.

#![allow(dead_code)]

use pantry::query::TimerToken;
use pantry::request::{HttpRequest, HttpResponse};
use pantry::{handle_event, initialize, Action, AppState, Config, Event};

pub struct FakeHost {
    pub state: AppState,
    now_ms: u64,
    timers: Vec<(u64, TimerToken)>,
    pub sent: Vec<(u64, HttpRequest)>,
    pub closed: bool,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            state: initialize(config),
            now_ms: 0,
            timers: Vec::new(),
            sent: Vec::new(),
            closed: false,
        }
    }

    /// A host that has granted permissions and answered the initial load
    /// with an empty collection.
    pub fn mounted() -> Self {
        let mut host = Self::new();
        host.dispatch(Event::PermissionsGranted);
        let wait = host.state.coordinator.filter().delay().as_millis() as u64;
        host.advance(wait);
        let request = host.take_single_request();
        host.respond(&request, 200, "null");
        host
    }

    pub const fn now(&self) -> u64 {
        self.now_ms
    }

    pub fn dispatch(&mut self, event: Event) -> bool {
        let (render, actions) = handle_event(&mut self.state, &event).expect("event handled");
        for action in actions {
            self.execute(action);
        }
        render
    }

    /// Replaces the whole filter text, as a paste would.
    pub fn set_filter(&mut self, text: &str) {
        self.state.filter_input = text.to_string();
        let actions = self.state.coordinator.set_filter_text(text);
        for action in actions {
            self.execute(action);
        }
    }

    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.dispatch(Event::Char(c));
        }
    }

    /// Moves the clock forward, firing due timers in arm order.
    pub fn advance(&mut self, ms: u64) {
        let target = self.now_ms + ms;
        loop {
            let Some(index) = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, (due, _))| *due <= target)
                .min_by_key(|(_, (due, _))| *due)
                .map(|(index, _)| index)
            else {
                break;
            };
            let (due, token) = self.timers.remove(index);
            self.now_ms = due;
            self.dispatch(Event::TimerFired(token));
        }
        self.now_ms = target;
    }

    pub fn advance_to(&mut self, at_ms: u64) {
        self.advance(at_ms.saturating_sub(self.now_ms));
    }

    pub fn respond(&mut self, request: &HttpRequest, status: u16, body: &str) -> bool {
        self.dispatch(Event::RequestCompleted {
            context: request.context.clone(),
            response: HttpResponse::new(status, body),
        })
    }

    pub fn take_requests(&mut self) -> Vec<(u64, HttpRequest)> {
        std::mem::take(&mut self.sent)
    }

    pub fn take_single_request(&mut self) -> HttpRequest {
        let mut sent = self.take_requests();
        assert_eq!(sent.len(), 1, "expected exactly one request, got {sent:?}");
        sent.remove(0).1
    }

    pub fn titles(&self) -> Vec<String> {
        self.state
            .coordinator
            .items()
            .iter()
            .map(|item| item.title.clone())
            .collect()
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::SendRequest(request) => self.sent.push((self.now_ms, request)),
            Action::ArmTimer(timer) => {
                let due = self.now_ms + timer.delay.as_millis() as u64;
                self.timers.push((due, timer.token));
            }
            Action::CloseFocus => self.closed = true,
        }
    }
}

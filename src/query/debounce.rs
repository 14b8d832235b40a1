//! Debounced filter-text controller.
//!
//! Bursts of keystrokes collapse into a single query per pause. Every text
//! change re-arms a timer; only the most recently armed timer may start a
//! query, and only if the text it was armed for is still the live text when
//! it fires.
//!
//! Host timers cannot be cancelled, so cancellation is by token: each arm
//! hands out a fresh [`TimerToken`] and a fire carrying any other token is
//! ignored.
//!
//! # Phases
//!
//! ```text
//! Idle ──set_text──▶ TimerArmed(text) ──fire, text still live──▶ Fetching(text)
//!   ▲                   │   ▲                                        │
//!   │    fire, stale /  │   └──────────── set_text ◀─────────────────┤
//!   └──── teardown ─────┘                                            │
//!   └──────────────────────────── on_query_settled(text) ◀───────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use pantry::query::QueryController;
//! use std::time::Duration;
//!
//! let mut filter = QueryController::new(Duration::from_millis(500));
//! let first = filter.set_text("s");
//! let second = filter.set_text("salt");
//!
//! assert_eq!(filter.on_timer_fired(first.token, "salt"), None);
//! assert_eq!(filter.on_timer_fired(second.token, "salt"), Some("salt".to_string()));
//! ```

use std::fmt;
use std::time::Duration;

/// Default idle interval before a query is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Identifies one armed timer.
///
/// Tokens are handed out in increasing order by [`QueryController::set_text`]
/// and are only meaningful to the controller that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// A timer the host should start; report `token` back when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    /// Token to report back through `on_timer_fired`.
    pub token: TimerToken,

    /// How long the host should wait before firing.
    pub delay: Duration,
}

/// Where the controller is between keystrokes and results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryPhase {
    /// No timer armed and no query outstanding.
    #[default]
    Idle,
    /// Waiting for the input to go quiet; carries the text the timer is for.
    TimerArmed(String),
    /// A query for this text has been handed to the request layer.
    Fetching(String),
}

/// Debounce state for the live filter input.
///
/// Owns the filter text the user last asked for, the single armed timer and
/// the phase. The controller never talks to the host: arming returns a
/// [`TimerRequest`] for the caller to schedule, and a fire returns the text to
/// query, if any.
///
/// # Invariants
///
/// - At most one timer is armed; arming cancels the previous one.
/// - A query is only started for text that is still live when its timer fires.
#[derive(Debug, Clone)]
pub struct QueryController {
    /// Filter text last passed to `set_text`.
    text: String,
    phase: QueryPhase,
    /// Wait applied to every armed timer.
    delay: Duration,
    /// The only token whose fire is honored.
    armed: Option<TimerToken>,
    next_token: u64,
}

impl Default for QueryController {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl QueryController {
    /// Creates an idle controller with empty filter text.
    ///
    /// # Parameters
    ///
    /// * `delay` - Quiet period before an armed timer fires
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            text: String::new(),
            phase: QueryPhase::Idle,
            delay,
            armed: None,
            next_token: 0,
        }
    }

    /// The filter text last set.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> &QueryPhase {
        &self.phase
    }

    /// Wait applied to every armed timer.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a timer is armed and not yet fired or cancelled.
    #[must_use]
    pub const fn has_armed_timer(&self) -> bool {
        self.armed.is_some()
    }

    /// Records new filter text and arms a fresh timer for it.
    ///
    /// Any previously armed timer is cancelled. Setting the same text again
    /// still re-arms, restarting the quiet period.
    ///
    /// # Returns
    ///
    /// The timer the caller must schedule with the host.
    pub fn set_text(&mut self, text: impl Into<String>) -> TimerRequest {
        self.text = text.into();
        self.next_token += 1;
        let token = TimerToken(self.next_token);

        if let Some(previous) = self.armed.replace(token) {
            tracing::trace!(cancelled = %previous, "re-arming debounce timer");
        }
        self.phase = QueryPhase::TimerArmed(self.text.clone());

        TimerRequest {
            token,
            delay: self.delay,
        }
    }

    /// Handles a fired timer; returns the text to query, if any.
    ///
    /// # Parameters
    ///
    /// * `token` - Token the host reported for the fired timer
    /// * `live_text` - Value the input shows right now, read at fire time
    ///
    /// # Returns
    ///
    /// - `None` if `token` was cancelled, or the armed text is no longer live
    /// - `Some(text)` otherwise; the controller is then `Fetching(text)`
    pub fn on_timer_fired(&mut self, token: TimerToken, live_text: &str) -> Option<String> {
        if self.armed != Some(token) {
            tracing::trace!(%token, "ignoring cancelled timer");
            return None;
        }
        self.armed = None;

        let QueryPhase::TimerArmed(armed_text) = &self.phase else {
            return None;
        };
        if armed_text != live_text {
            tracing::debug!(
                armed = %armed_text,
                live = %live_text,
                "filter text changed under the timer, skipping query"
            );
            self.phase = QueryPhase::Idle;
            return None;
        }

        let text = armed_text.clone();
        self.phase = QueryPhase::Fetching(text.clone());
        Some(text)
    }

    /// Cancels the armed timer, if any. Queries already issued still settle.
    pub fn teardown(&mut self) {
        if self.armed.take().is_some() {
            tracing::debug!("debounce timer cancelled on teardown");
            if matches!(self.phase, QueryPhase::TimerArmed(_)) {
                self.phase = QueryPhase::Idle;
            }
        }
    }

    /// Marks the query for `text` as finished.
    ///
    /// Leaves an armed timer for newer text in place.
    pub fn on_query_settled(&mut self, text: &str) {
        if matches!(&self.phase, QueryPhase::Fetching(fetching) if fetching == text) {
            self.phase = QueryPhase::Idle;
        }
    }

    /// Whether a result for `text` still reflects what the user asked for.
    #[must_use]
    pub fn is_current(&self, text: &str) -> bool {
        self.text == text
    }
}

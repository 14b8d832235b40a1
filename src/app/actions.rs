//! Side effects produced by the event handler.
//!
//! The handler never talks to the host. It returns [`Action`]s and the plugin
//! runtime in `main.rs` carries them out in order.

use crate::query::TimerRequest;
use crate::request::HttpRequest;

/// A command for the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hand a request to the host; its completion comes back as
    /// [`Event::RequestCompleted`](crate::app::Event::RequestCompleted).
    SendRequest(HttpRequest),

    /// Start a host timer; when it elapses the runtime reports
    /// [`Event::TimerFired`](crate::app::Event::TimerFired) with the token.
    ArmTimer(TimerRequest),

    /// Hide the plugin pane.
    CloseFocus,
}

//! Per-slot request lifecycle tracking.
//!
//! A [`RequestLifecycle`] follows one logical operation slot through
//! `Idle → Pending → {Succeeded | Failed} → (clear) → Idle`. Issuing records
//! the operation and returns the wire request; settling performs the single
//! terminal transition and hands back a [`Settlement`] for exactly one
//! consumer.
//!
//! # Invariants
//!
//! - `error_message` is `Some` iff the phase is `Failed`.
//! - `payload` is `Some` only while the phase is `Succeeded`.
//! - The operation persists from `issue` until the next `issue`.
//!
//! # Single-slot semantics
//!
//! A slot is not a queue. Issuing while a request is pending overwrites the
//! recorded operation, and whichever completion arrives last decides the final
//! state. Completions are never dropped for being superseded.
//!
//! # Example
//!
//! ```rust
//! use pantry::domain::ItemId;
//! use pantry::request::{
//!     Endpoint, HttpResponse, Operation, Phase, RequestLifecycle, Slot,
//! };
//!
//! let endpoint = Endpoint::new("http://127.0.0.1:9000", "ingredients");
//! let mut slot = RequestLifecycle::new(Slot::Remove);
//!
//! let request = slot.issue(Operation::RemoveItem(ItemId::new("x1")), &endpoint, 1)?;
//! assert_eq!(slot.state().phase, Phase::Pending);
//!
//! let settlement = slot.settle(1, &HttpResponse::new(200, "null")).unwrap();
//! assert!(settlement.outcome.is_ok());
//! assert_eq!(slot.state().phase, Phase::Succeeded);
//! # let _ = request;
//! # Ok::<(), pantry::PantryError>(())
//! ```

use super::channel::{decode_response, HttpRequest, HttpResponse, RequestContext, ResponseBody};
use super::endpoint::Endpoint;
use super::operation::{Operation, Slot};
use crate::domain::{RequestError, Result, REQUEST_FAILED_MESSAGE};
use crate::observability::TraceContext;
use chrono::{DateTime, Utc};

/// Lifecycle phase of a request slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing issued yet, or a failure was dismissed.
    Idle,
    /// A request is in flight.
    Pending,
    /// The last completion decoded successfully.
    Succeeded,
    /// The last completion failed; `error_message` is set.
    Failed,
}

/// Observable state of one request slot.
///
/// Read by the UI through [`Coordinator::request_state`](crate::app::Coordinator::request_state);
/// only [`RequestLifecycle`] writes it.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState {
    pub phase: Phase,

    /// Decoded body of the last successful completion.
    ///
    /// Cleared when a new request is issued or a completion fails.
    pub payload: Option<ResponseBody>,

    /// Fixed user-facing message, present exactly while `phase` is `Failed`.
    pub error_message: Option<String>,

    /// Operation of the most recent `issue`; kept until the next one.
    pub operation: Option<Operation>,

    /// When the most recent request was issued, for elapsed-time logging.
    pub issued_at: Option<DateTime<Utc>>,

    /// Sequence number of the most recent request.
    pub sequence: Option<u64>,
}

impl Default for RequestState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            payload: None,
            error_message: None,
            operation: None,
            issued_at: None,
            sequence: None,
        }
    }
}

/// The terminal outcome of one issued request, handed to its consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    /// Operation recorded in the slot when the completion arrived.
    pub operation: Operation,
    /// Decoded body, or why there is none.
    pub outcome: std::result::Result<ResponseBody, RequestError>,
}

/// Tracks the request issued into a single slot.
///
/// One lifecycle exists per [`Slot`]. It owns the slot's [`RequestState`] and
/// performs every transition on it.
#[derive(Debug, Clone)]
pub struct RequestLifecycle {
    slot: Slot,
    state: RequestState,
}

impl RequestLifecycle {
    /// Creates an idle lifecycle for `slot`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pantry::request::{Phase, RequestLifecycle, Slot};
    ///
    /// let slot = RequestLifecycle::new(Slot::Add);
    /// assert_eq!(slot.state().phase, Phase::Idle);
    /// assert!(slot.state().operation.is_none());
    /// ```
    #[must_use]
    pub fn new(slot: Slot) -> Self {
        Self {
            slot,
            state: RequestState::default(),
        }
    }

    /// Slot this lifecycle tracks.
    #[must_use]
    pub const fn slot(&self) -> Slot {
        self.slot
    }

    /// Current observable state.
    #[must_use]
    pub const fn state(&self) -> &RequestState {
        &self.state
    }

    /// Whether a request is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.phase == Phase::Pending
    }

    /// Moves the slot to `Pending` and returns the request to dispatch.
    ///
    /// Clears any previous payload and error, and records the operation as
    /// the slot's correlation context.
    ///
    /// # Parameters
    ///
    /// * `operation` - What to do; must belong to this slot
    /// * `endpoint` - Where the remote collection lives
    /// * `sequence` - Issue number echoed back in the completion's context
    ///
    /// # Errors
    ///
    /// Returns an error if the request body cannot be built. The slot is left
    /// untouched in that case.
    pub fn issue(
        &mut self,
        operation: Operation,
        endpoint: &Endpoint,
        sequence: u64,
    ) -> Result<HttpRequest> {
        debug_assert_eq!(operation.slot(), self.slot, "operation issued into the wrong slot");

        let _span = tracing::debug_span!(
            "request_issue",
            slot = %self.slot,
            tag = operation.tag(),
            sequence = sequence
        )
        .entered();

        let context = RequestContext {
            slot: self.slot,
            sequence,
            trace_context: TraceContext::from_current(),
        };
        let request = endpoint.request_for(&operation, context)?;

        if self.is_pending() {
            tracing::debug!(
                previous_sequence = ?self.state.sequence,
                "slot reissued before the previous request settled"
            );
        }

        self.state = RequestState {
            phase: Phase::Pending,
            payload: None,
            error_message: None,
            operation: Some(operation),
            issued_at: Some(Utc::now()),
            sequence: Some(sequence),
        };

        tracing::debug!(method = ?request.method, url = %request.url, "request issued");
        Ok(request)
    }

    /// Records the completion of a request issued into this slot.
    ///
    /// Success moves to `Succeeded` with the decoded payload. Any failure
    /// moves to `Failed` with the fixed user-facing message; the cause is
    /// only logged.
    ///
    /// # Parameters
    ///
    /// * `sequence` - Issue number from the completion's context; a stale one
    ///   is logged but still settles against the recorded operation
    /// * `response` - Status and body reported by the host
    ///
    /// # Returns
    ///
    /// The [`Settlement`] for the single consumer, or `None` only when nothing
    /// was ever issued into the slot.
    pub fn settle(&mut self, sequence: u64, response: &HttpResponse) -> Option<Settlement> {
        let Some(operation) = self.state.operation.clone() else {
            tracing::warn!(slot = %self.slot, sequence, "completion for a slot that was never issued");
            return None;
        };

        if self.state.sequence != Some(sequence) {
            tracing::debug!(
                slot = %self.slot,
                sequence,
                current_sequence = ?self.state.sequence,
                "superseded completion, applying anyway"
            );
        }
        if !self.is_pending() {
            tracing::debug!(slot = %self.slot, phase = ?self.state.phase, "completion for a settled slot");
        }

        let elapsed_ms = self
            .state
            .issued_at
            .map(|issued_at| (Utc::now() - issued_at).num_milliseconds());

        let outcome = decode_response(self.slot, response);
        match &outcome {
            Ok(body) => {
                tracing::debug!(
                    slot = %self.slot,
                    status = response.status,
                    elapsed_ms = ?elapsed_ms,
                    "request succeeded"
                );
                self.state.phase = Phase::Succeeded;
                self.state.payload = Some(body.clone());
                self.state.error_message = None;
            }
            Err(error) => {
                tracing::warn!(
                    slot = %self.slot,
                    status = response.status,
                    elapsed_ms = ?elapsed_ms,
                    error = %error,
                    "request failed"
                );
                self.state.phase = Phase::Failed;
                self.state.payload = None;
                self.state.error_message = Some(REQUEST_FAILED_MESSAGE.to_string());
            }
        }

        Some(Settlement { operation, outcome })
    }

    /// Clears the error without touching the payload.
    ///
    /// A `Failed` slot returns to `Idle`; other phases keep their phase.
    pub fn clear_error(&mut self) {
        self.state.error_message = None;
        if self.state.phase == Phase::Failed {
            self.state.phase = Phase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemId, NewItem};

    fn endpoint() -> Endpoint {
        Endpoint::new("https://example.test", "ingredients")
    }

    fn assert_invariants(state: &RequestState) {
        assert_eq!(state.error_message.is_some(), state.phase == Phase::Failed);
        if state.payload.is_some() {
            assert_eq!(state.phase, Phase::Succeeded);
        }
    }

    #[test]
    fn starts_idle() {
        let slot = RequestLifecycle::new(Slot::Add);
        assert_eq!(slot.state(), &RequestState::default());
        assert_invariants(slot.state());
    }

    #[test]
    fn issue_moves_to_pending_and_records_operation() {
        let mut slot = RequestLifecycle::new(Slot::Add);
        let operation = Operation::AddItem(NewItem::new("Salt", 2.0));
        let request = slot.issue(operation.clone(), &endpoint(), 7).unwrap();

        assert_eq!(request.context.sequence, 7);
        assert_eq!(request.context.slot, Slot::Add);
        assert_eq!(slot.state().phase, Phase::Pending);
        assert_eq!(slot.state().operation.as_ref(), Some(&operation));
        assert!(slot.state().issued_at.is_some());
        assert_invariants(slot.state());
    }

    #[test]
    fn success_sets_payload_and_no_error() {
        let mut slot = RequestLifecycle::new(Slot::Add);
        slot.issue(Operation::AddItem(NewItem::new("Salt", 2.0)), &endpoint(), 1)
            .unwrap();

        let settlement = slot
            .settle(1, &HttpResponse::new(200, r#"{"name":"x1"}"#))
            .unwrap();

        assert_eq!(settlement.outcome, Ok(ResponseBody::Created(ItemId::new("x1"))));
        assert_eq!(slot.state().phase, Phase::Succeeded);
        assert!(slot.state().error_message.is_none());
        assert_invariants(slot.state());
    }

    #[test]
    fn failure_sets_generic_message() {
        let mut slot = RequestLifecycle::new(Slot::Remove);
        slot.issue(Operation::RemoveItem(ItemId::new("x1")), &endpoint(), 1)
            .unwrap();

        let settlement = slot.settle(1, &HttpResponse::new(500, "boom")).unwrap();

        assert_eq!(settlement.outcome, Err(RequestError::Rejected { status: 500 }));
        assert_eq!(slot.state().phase, Phase::Failed);
        assert_eq!(slot.state().error_message.as_deref(), Some(REQUEST_FAILED_MESSAGE));
        assert_invariants(slot.state());
    }

    #[test]
    fn reissue_clears_previous_error() {
        let mut slot = RequestLifecycle::new(Slot::Remove);
        slot.issue(Operation::RemoveItem(ItemId::new("x1")), &endpoint(), 1)
            .unwrap();
        slot.settle(1, &HttpResponse::new(0, "unreachable"));
        assert_eq!(slot.state().phase, Phase::Failed);

        slot.issue(Operation::RemoveItem(ItemId::new("x2")), &endpoint(), 2)
            .unwrap();
        assert_eq!(slot.state().phase, Phase::Pending);
        assert!(slot.state().error_message.is_none());
        assert_invariants(slot.state());
    }

    #[test]
    fn clear_error_returns_failed_slot_to_idle() {
        let mut slot = RequestLifecycle::new(Slot::Remove);
        slot.issue(Operation::RemoveItem(ItemId::new("x1")), &endpoint(), 1)
            .unwrap();
        slot.settle(1, &HttpResponse::new(503, ""));

        slot.clear_error();
        assert_eq!(slot.state().phase, Phase::Idle);
        assert!(slot.state().error_message.is_none());
        assert_invariants(slot.state());
    }

    #[test]
    fn clear_error_keeps_payload_of_succeeded_slot() {
        let mut slot = RequestLifecycle::new(Slot::Query);
        slot.issue(Operation::QueryItems { text: String::new() }, &endpoint(), 1)
            .unwrap();
        slot.settle(1, &HttpResponse::new(200, "null"));

        slot.clear_error();
        assert_eq!(slot.state().phase, Phase::Succeeded);
        assert_eq!(slot.state().payload, Some(ResponseBody::Items(vec![])));
    }

    #[test]
    fn settle_without_issue_is_ignored() {
        let mut slot = RequestLifecycle::new(Slot::Query);
        assert!(slot.settle(1, &HttpResponse::new(200, "null")).is_none());
        assert_eq!(slot.state().phase, Phase::Idle);
    }

    #[test]
    fn superseded_completion_still_settles_with_latest_operation() {
        let mut slot = RequestLifecycle::new(Slot::Remove);
        slot.issue(Operation::RemoveItem(ItemId::new("old")), &endpoint(), 1)
            .unwrap();
        slot.issue(Operation::RemoveItem(ItemId::new("new")), &endpoint(), 2)
            .unwrap();

        let first = slot.settle(1, &HttpResponse::new(200, "null")).unwrap();
        assert_eq!(first.operation, Operation::RemoveItem(ItemId::new("new")));

        let second = slot.settle(2, &HttpResponse::new(500, "")).unwrap();
        assert!(second.outcome.is_err());
        assert_eq!(slot.state().phase, Phase::Failed);
    }
}

//! Wiring between request completions, the debounced filter, and the local
//! collection.
//!
//! The [`Coordinator`] is the single owner of everything the list view shows:
//! the collection, one [`RequestLifecycle`] per slot, and the
//! [`QueryController`]. Commands from the UI return [`Action`]s for the
//! runtime; host callbacks feed completions and timer fires back in.
//!
//! # Consuming a settlement
//!
//! | Operation          | Success                                   | Failure |
//! |--------------------|-------------------------------------------|---------|
//! | `AddItem(draft)`   | append `draft` with the assigned id       | nothing |
//! | `RemoveItem(id)`   | remove `id`                               | nothing |
//! | `QueryItems{text}` | replace everything, if `text` is still live | nothing |
//!
//! Each settlement causes at most one collection mutation. Failures surface
//! only through [`Coordinator::error_message`].

use crate::app::Action;
use crate::domain::{Item, ItemId, NewItem, Result};
use crate::observability::TraceContext;
use crate::query::{QueryController, TimerToken};
use crate::request::{
    Endpoint, HttpResponse, Operation, RequestContext, RequestLifecycle, RequestState,
    ResponseBody, Settlement, Slot,
};
use crate::store::{reduce, CollectionAction, CollectionState};
use std::time::Duration;

/// Owner of the local collection and every request that changes it.
///
/// # Example
///
/// ```rust
/// use pantry::request::{Endpoint, HttpResponse};
/// use pantry::{Action, Coordinator, NewItem};
/// use std::time::Duration;
///
/// let endpoint = Endpoint::new("http://127.0.0.1:9000", "ingredients");
/// let mut coordinator = Coordinator::new(endpoint, Duration::from_millis(500));
///
/// let actions = coordinator.add_item(NewItem::new("Salt", 1.0))?;
/// let [Action::SendRequest(request)] = actions.as_slice() else { unreachable!() };
/// assert!(coordinator.loading());
///
/// coordinator.on_response(&request.context, &HttpResponse::new(200, r#"{"name":"-Nx1"}"#));
/// assert_eq!(coordinator.items()[0].title, "Salt");
/// # Ok::<(), pantry::PantryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Coordinator {
    /// Where requests are sent.
    endpoint: Endpoint,

    /// Items shown by the UI; changed only through [`reduce`].
    collection: CollectionState,

    add: RequestLifecycle,
    remove: RequestLifecycle,
    query: RequestLifecycle,

    /// Debounce state of the live filter.
    filter: QueryController,

    /// Last sequence number handed out; shared by all slots.
    next_sequence: u64,
}

impl Coordinator {
    /// Creates a coordinator with an empty collection and idle slots.
    ///
    /// # Parameters
    ///
    /// * `endpoint` - Location of the remote collection
    /// * `debounce` - Quiet period before a filter change is queried
    #[must_use]
    pub fn new(endpoint: Endpoint, debounce: Duration) -> Self {
        Self {
            endpoint,
            collection: CollectionState::default(),
            add: RequestLifecycle::new(Slot::Add),
            remove: RequestLifecycle::new(Slot::Remove),
            query: RequestLifecycle::new(Slot::Query),
            filter: QueryController::new(debounce),
            next_sequence: 0,
        }
    }

    /// Items in display order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        self.collection.items()
    }

    /// Filter text the collection is (or will be) filtered by.
    #[must_use]
    pub fn filter_text(&self) -> &str {
        self.filter.text()
    }

    /// Debounce state of the filter, for inspection.
    #[must_use]
    pub const fn filter(&self) -> &QueryController {
        &self.filter
    }

    /// Location of the remote collection.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Whether any slot has a request in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        Slot::ALL.into_iter().any(|slot| self.is_pending(slot))
    }

    /// Whether `slot` has a request in flight.
    #[must_use]
    pub fn is_pending(&self, slot: Slot) -> bool {
        self.lifecycle(slot).is_pending()
    }

    /// The message of the first failed slot, in [`Slot::ALL`] order.
    ///
    /// # Returns
    ///
    /// `Some("Something went wrong!")` while any slot is failed, else `None`.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        Slot::ALL
            .into_iter()
            .find_map(|slot| self.lifecycle(slot).state().error_message.as_deref())
    }

    /// Full state of one slot.
    #[must_use]
    pub const fn request_state(&self, slot: Slot) -> &RequestState {
        self.lifecycle(slot).state()
    }

    /// Starts the initial unfiltered load through the debounce path.
    pub fn mount(&mut self) -> Vec<Action> {
        let text = self.filter.text().to_string();
        tracing::debug!(filter = %text, "coordinator mounted");
        vec![Action::ArmTimer(self.filter.set_text(text))]
    }

    /// Stops the armed debounce timer. Requests already sent still settle.
    pub fn teardown(&mut self) {
        self.filter.teardown();
    }

    /// Sends a create request for `draft`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request body cannot be built.
    pub fn add_item(&mut self, draft: NewItem) -> Result<Vec<Action>> {
        self.issue(Operation::AddItem(draft))
    }

    /// Sends a delete request for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built.
    pub fn remove_item(&mut self, id: ItemId) -> Result<Vec<Action>> {
        self.issue(Operation::RemoveItem(id))
    }

    /// Records new filter text and re-arms the debounce timer.
    pub fn set_filter_text(&mut self, text: impl Into<String>) -> Vec<Action> {
        vec![Action::ArmTimer(self.filter.set_text(text))]
    }

    /// Dismisses the error on every slot.
    pub fn clear_error(&mut self) {
        for slot in Slot::ALL {
            self.lifecycle_mut(slot).clear_error();
        }
    }

    /// Handles a fired debounce timer.
    ///
    /// `live_text` is what the filter input shows right now.
    ///
    /// # Errors
    ///
    /// Returns an error if the query request cannot be built.
    pub fn on_timer_fired(&mut self, token: TimerToken, live_text: &str) -> Result<Vec<Action>> {
        match self.filter.on_timer_fired(token, live_text) {
            Some(text) => self.issue(Operation::QueryItems { text }),
            None => Ok(vec![]),
        }
    }

    /// Applies a completion from the host.
    ///
    /// Settles the slot named by `context`, then consumes the settlement:
    /// at most one [`CollectionAction`] is applied. A query completion that
    /// is not the query slot's latest request is dropped unsettled.
    ///
    /// # Parameters
    ///
    /// * `context` - Correlation data the host echoed back
    /// * `response` - Status and body of the completion
    ///
    /// # Returns
    ///
    /// Whether anything visible changed.
    pub fn on_response(&mut self, context: &RequestContext, response: &HttpResponse) -> bool {
        let _parent = context.trace_context.as_ref().and_then(TraceContext::attach);
        let _span = tracing::debug_span!(
            "request_settle",
            slot = %context.slot,
            sequence = context.sequence,
            status = response.status
        )
        .entered();

        // The query slot only records the latest text, so an older completion
        // would be read as a result for the newer text.
        if context.slot == Slot::Query && self.query.state().sequence != Some(context.sequence) {
            tracing::debug!(
                current_sequence = ?self.query.state().sequence,
                "dropping superseded query completion"
            );
            return false;
        }

        let Some(settlement) = self.lifecycle_mut(context.slot).settle(context.sequence, response)
        else {
            return false;
        };

        if let Some(action) = self.consume(settlement) {
            tracing::debug!(action = action.kind(), "applying settlement");
            self.collection = reduce(std::mem::take(&mut self.collection), action);
        }
        true
    }

    fn consume(&mut self, settlement: Settlement) -> Option<CollectionAction> {
        let Settlement { operation, outcome } = settlement;

        if let Operation::QueryItems { text } = &operation {
            self.filter.on_query_settled(text);
        }

        let body = outcome.ok()?;
        match (operation, body) {
            (Operation::AddItem(draft), ResponseBody::Created(id)) => {
                Some(CollectionAction::Add(draft.with_id(id)))
            }
            (Operation::RemoveItem(id), ResponseBody::Empty) => Some(CollectionAction::Remove(id)),
            (Operation::QueryItems { text }, ResponseBody::Items(items)) => {
                if self.filter.is_current(&text) {
                    Some(CollectionAction::Set(items))
                } else {
                    tracing::debug!(
                        query = %text,
                        live = %self.filter.text(),
                        "discarding result for outdated filter text"
                    );
                    None
                }
            }
            (operation, body) => {
                tracing::warn!(tag = operation.tag(), body = ?body, "response shape does not match operation");
                None
            }
        }
    }

    fn issue(&mut self, operation: Operation) -> Result<Vec<Action>> {
        let sequence = self.next_sequence + 1;
        let Self {
            endpoint,
            add,
            remove,
            query,
            ..
        } = self;
        let lifecycle = match operation.slot() {
            Slot::Add => add,
            Slot::Remove => remove,
            Slot::Query => query,
        };
        let request = lifecycle.issue(operation, endpoint, sequence)?;
        self.next_sequence = sequence;
        Ok(vec![Action::SendRequest(request)])
    }

    const fn lifecycle(&self, slot: Slot) -> &RequestLifecycle {
        match slot {
            Slot::Add => &self.add,
            Slot::Remove => &self.remove,
            Slot::Query => &self.query,
        }
    }

    fn lifecycle_mut(&mut self, slot: Slot) -> &mut RequestLifecycle {
        match slot {
            Slot::Add => &mut self.add,
            Slot::Remove => &mut self.remove,
            Slot::Query => &mut self.query,
        }
    }
}

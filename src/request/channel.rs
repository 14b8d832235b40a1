//! Wire-level request and response types for the opaque request channel.
//!
//! The plugin never performs I/O itself: it hands an [`HttpRequest`] to the
//! host and later receives an [`HttpResponse`] together with the
//! [`RequestContext`] it attached. The context is the only thing that ties a
//! completion back to its slot, so it travels through the host as a flat
//! string map.
//!
//! # Response shapes
//!
//! | Slot     | Success body                               |
//! |----------|--------------------------------------------|
//! | `add`    | `{"name": "<assigned id>"}`                |
//! | `remove` | empty or `null`                            |
//! | `query`  | `{"<id>": {"title": .., "amount": ..}}` or `null` |
//!
//! Query entries that cannot be read as an item are skipped and logged; the
//! rest of the result still applies.

use super::operation::Slot;
use crate::domain::{Item, ItemId, NewItem, PantryError, RequestError};
use crate::observability::TraceContext;
use serde::Deserialize;
use std::collections::BTreeMap;

const SLOT_KEY: &str = "pantry.slot";
const SEQUENCE_KEY: &str = "pantry.sequence";
const TRACE_ID_KEY: &str = "pantry.trace_id";
const PARENT_SPAN_ID_KEY: &str = "pantry.parent_span_id";

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// Correlation data attached to a request and echoed back by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Slot the request was issued into.
    pub slot: Slot,

    /// Monotonic issue number, unique per coordinator.
    ///
    /// A superseded query completion is dropped. Superseded add and remove
    /// completions are still applied.
    pub sequence: u64,

    /// Tracing context of the span that issued the request.
    pub trace_context: Option<TraceContext>,
}

impl RequestContext {
    /// Flattens the context into the host's string map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(SLOT_KEY.to_string(), self.slot.as_str().to_string());
        map.insert(SEQUENCE_KEY.to_string(), self.sequence.to_string());
        if let Some(trace) = &self.trace_context {
            map.insert(TRACE_ID_KEY.to_string(), trace.trace_id.clone());
            map.insert(PARENT_SPAN_ID_KEY.to_string(), trace.parent_span_id.clone());
        }
        map
    }

    /// Rebuilds a context from the map the host echoed back.
    ///
    /// # Errors
    ///
    /// Returns [`PantryError::Correlation`] if the slot or sequence entry is
    /// missing or unreadable. Trace entries are optional.
    pub fn from_map(map: &BTreeMap<String, String>) -> crate::domain::Result<Self> {
        let slot = map
            .get(SLOT_KEY)
            .ok_or_else(|| PantryError::Correlation("missing slot".to_string()))?
            .parse::<Slot>()
            .map_err(PantryError::Correlation)?;

        let sequence = map
            .get(SEQUENCE_KEY)
            .ok_or_else(|| PantryError::Correlation("missing sequence".to_string()))?
            .parse::<u64>()
            .map_err(|e| PantryError::Correlation(format!("bad sequence: {e}")))?;

        let trace_context = match (map.get(TRACE_ID_KEY), map.get(PARENT_SPAN_ID_KEY)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Ok(Self {
            slot,
            sequence,
            trace_context,
        })
    }
}

/// A request ready to be handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL, query string already encoded.
    pub url: String,
    /// JSON body, present only for creates.
    pub body: Option<Vec<u8>>,
    /// Echoed back by the host with the completion.
    pub context: RequestContext,
}

/// What the host reported back for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status; `0` when the host could not reach the server.
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Decoded success body, shaped by the slot that issued the request.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Create succeeded; the remote side assigned this id.
    Created(ItemId),
    /// Delete succeeded; nothing to decode.
    Empty,
    /// Query succeeded with these items, in key order.
    Items(Vec<Item>),
}

#[derive(Deserialize)]
struct CreatedBody {
    name: String,
}

/// Turns a host response into a decoded body or a request failure.
///
/// Status `0` means the host never reached the remote side and is reported as
/// a transport failure; any other non-2xx status is a rejection.
///
/// # Errors
///
/// Returns the [`RequestError`] describing why the response is unusable.
pub fn decode_response(slot: Slot, response: &HttpResponse) -> Result<ResponseBody, RequestError> {
    if response.status == 0 {
        return Err(RequestError::Transport(
            String::from_utf8_lossy(&response.body).into_owned(),
        ));
    }
    if !response.is_success() {
        return Err(RequestError::Rejected {
            status: response.status,
        });
    }

    let body = if response.body.iter().all(u8::is_ascii_whitespace) {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&response.body)
            .map_err(|e| RequestError::Decode(e.to_string()))?
    };

    match slot {
        Slot::Add => {
            let created: CreatedBody =
                serde_json::from_value(body).map_err(|e| RequestError::Decode(e.to_string()))?;
            Ok(ResponseBody::Created(ItemId::new(created.name)))
        }
        Slot::Remove => Ok(ResponseBody::Empty),
        Slot::Query => {
            let entries: Option<BTreeMap<String, serde_json::Value>> =
                serde_json::from_value(body).map_err(|e| RequestError::Decode(e.to_string()))?;
            let items = entries
                .unwrap_or_default()
                .into_iter()
                .filter_map(|(id, fields)| match serde_json::from_value::<NewItem>(fields) {
                    Ok(fields) => Some(fields.with_id(ItemId::new(id))),
                    Err(e) => {
                        tracing::warn!(item_id = %id, error = %e, "skipping unreadable entry");
                        None
                    }
                })
                .collect();
            Ok(ResponseBody::Items(items))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn context_survives_the_host_map() {
        let context = RequestContext {
            slot: Slot::Query,
            sequence: 42,
            trace_context: Some(TraceContext {
                trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
                parent_span_id: "b7ad6b7169203331".to_string(),
            }),
        };
        assert_eq!(RequestContext::from_map(&context.to_map()).unwrap(), context);
    }

    #[test]
    fn context_without_slot_is_a_correlation_error() {
        let mut map = BTreeMap::new();
        map.insert(SEQUENCE_KEY.to_string(), "1".to_string());
        assert!(matches!(
            RequestContext::from_map(&map),
            Err(PantryError::Correlation(_))
        ));
    }

    #[test]
    fn create_response_yields_assigned_id() {
        let response = HttpResponse::new(200, r#"{"name":"-Nx1"}"#);
        assert_eq!(
            decode_response(Slot::Add, &response),
            Ok(ResponseBody::Created(ItemId::new("-Nx1")))
        );
    }

    #[test]
    fn create_response_without_name_is_a_decode_error() {
        let response = HttpResponse::new(200, "{}");
        assert!(matches!(
            decode_response(Slot::Add, &response),
            Err(RequestError::Decode(_))
        ));
    }

    #[test]
    fn delete_response_accepts_null_and_empty_bodies() {
        assert_eq!(
            decode_response(Slot::Remove, &HttpResponse::new(200, "null")),
            Ok(ResponseBody::Empty)
        );
        assert_eq!(
            decode_response(Slot::Remove, &HttpResponse::new(204, "")),
            Ok(ResponseBody::Empty)
        );
    }

    #[test]
    fn query_response_maps_keys_to_ids() {
        let response = HttpResponse::new(
            200,
            r#"{"b":{"title":"Salt","amount":"2"},"a":{"title":"Flour","amount":1}}"#,
        );
        assert_eq!(
            decode_response(Slot::Query, &response),
            Ok(ResponseBody::Items(vec![
                Item::new(ItemId::new("a"), "Flour", 1.0),
                Item::new(ItemId::new("b"), "Salt", 2.0),
            ]))
        );
    }

    #[test]
    fn query_response_keeps_readable_entries() {
        let response = HttpResponse::new(
            200,
            r#"{"a":{"title":"Salt","amount":1},"b":{"title":"Pepper"},"c":{"amount":3},"d":"junk"}"#,
        );
        assert_eq!(
            decode_response(Slot::Query, &response),
            Ok(ResponseBody::Items(vec![
                Item::new(ItemId::new("a"), "Salt", 1.0),
                Item::new(ItemId::new("b"), "Pepper", 0.0),
            ]))
        );
    }

    #[test]
    fn query_response_null_means_no_matches() {
        assert_eq!(
            decode_response(Slot::Query, &HttpResponse::new(200, "null")),
            Ok(ResponseBody::Items(vec![]))
        );
    }

    #[test]
    fn error_statuses_are_rejections_and_zero_is_transport() {
        assert_eq!(
            decode_response(Slot::Remove, &HttpResponse::new(404, "")),
            Err(RequestError::Rejected { status: 404 })
        );
        assert!(matches!(
            decode_response(Slot::Remove, &HttpResponse::new(0, "connection refused")),
            Err(RequestError::Transport(reason)) if reason == "connection refused"
        ));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        assert!(matches!(
            decode_response(Slot::Query, &HttpResponse::new(200, "{not json")),
            Err(RequestError::Decode(_))
        ));
    }
}

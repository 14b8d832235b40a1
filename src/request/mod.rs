//! Request lifecycle layer.
//!
//! Everything between "the UI wants something from the remote collection" and
//! "here is the decoded outcome":
//!
//! - [`operation`]: request slots and the typed operation union
//! - [`channel`]: wire request/response types, host correlation context, decoding
//! - [`endpoint`]: URL and body construction for the remote collection
//! - [`lifecycle`]: per-slot phase tracking and settlement

pub mod channel;
pub mod endpoint;
pub mod lifecycle;
pub mod operation;

pub use channel::{decode_response, HttpRequest, HttpResponse, Method, RequestContext, ResponseBody};
pub use endpoint::Endpoint;
pub use lifecycle::{Phase, RequestLifecycle, RequestState, Settlement};
pub use operation::{Operation, Slot};

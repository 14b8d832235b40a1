//! Domain layer for the pantry plugin.
//!
//! Core types independent of Zellij APIs or transport details.
//!
//! # Organization
//!
//! - [`error`]: Error types, the request failure taxonomy, and result aliases
//! - [`item`]: Item, item draft, and item id models
//!
//! # Examples
//!
//! ```
//! use pantry::domain::{ItemId, NewItem};
//!
//! let item = NewItem::new("Salt", 2.0).with_id(ItemId::new("x1"));
//! assert_eq!(item.id.as_str(), "x1");
//! ```

pub mod error;
pub mod item;

pub use error::{PantryError, RequestError, Result, REQUEST_FAILED_MESSAGE};
pub use item::{Item, ItemId, NewItem};

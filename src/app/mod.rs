//! Application layer: state, events and actions.
//!
//! ```text
//! User input / host callbacks → Event → handle_event → state changes → Actions
//!                                             │
//!                                        Coordinator
//!                           (collection, request slots, debounced filter)
//! ```
//!
//! - [`actions`]: side effects for the plugin runtime
//! - [`coordinator`]: request completions, debounce and collection wiring
//! - [`handler`]: event processing
//! - [`modes`]: input modes
//! - [`state`]: application state and view model computation

pub mod actions;
pub mod coordinator;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use coordinator::Coordinator;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::AppState;

//! Live filter handling.

pub mod debounce;

pub use debounce::{QueryController, QueryPhase, TimerRequest, TimerToken, DEFAULT_DEBOUNCE};

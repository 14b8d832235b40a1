//! Local collection store.
//!
//! Holds the in-memory ordered item sequence and the pure reducer that
//! mutates it. See [`collection`] for the mutation semantics.

pub mod collection;

pub use collection::{reduce, CollectionAction, CollectionState};

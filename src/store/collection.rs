//! The authoritative local item collection and its reducer.
//!
//! [`CollectionState`] is an ordered sequence of [`Item`]s. It changes only
//! through [`reduce`], a pure function of the current state and a
//! [`CollectionAction`]. Reductions never block and never fail.
//!
//! # Semantics
//!
//! - **Set** replaces the whole sequence atomically.
//! - **Add** appends to the end without checking for a duplicate id.
//! - **Remove** drops the first item with a matching id and is a no-op when
//!   nothing matches.
//!
//! # Example
//!
//! ```rust
//! use pantry::domain::{Item, ItemId};
//! use pantry::store::{reduce, CollectionAction, CollectionState};
//!
//! let state = CollectionState::default();
//! let state = reduce(state, CollectionAction::Add(Item::new(ItemId::new("x1"), "Salt", 2.0)));
//! let state = reduce(state, CollectionAction::Remove(ItemId::new("x1")));
//! assert!(state.is_empty());
//! ```

use crate::domain::{Item, ItemId};

/// A mutation of the local collection.
///
/// This is a closed set: a reducer input can only ever be one of these
/// variants, so there is no "unknown action" path.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionAction {
    /// Replace the whole collection, used when a filtered result set arrives.
    Set(Vec<Item>),
    /// Append one newly created item.
    Add(Item),
    /// Drop the item with this id.
    Remove(ItemId),
}

impl CollectionAction {
    /// Short name of the action kind for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Set(_) => "set",
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
        }
    }
}

/// Ordered sequence of items held for the lifetime of a UI session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionState {
    items: Vec<Item>,
}

impl CollectionState {
    /// Creates a collection holding exactly `items`, in order.
    #[must_use]
    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Unconditionally overwrites the collection.
    #[must_use]
    pub fn replace(self, items: Vec<Item>) -> Self {
        reduce(self, CollectionAction::Set(items))
    }

    /// Adds one item to the end.
    #[must_use]
    pub fn append(self, item: Item) -> Self {
        reduce(self, CollectionAction::Add(item))
    }

    /// Drops the first item whose id matches.
    #[must_use]
    pub fn remove(self, id: &ItemId) -> Self {
        reduce(self, CollectionAction::Remove(id.clone()))
    }
}

/// Applies one action to the collection and returns the new state.
///
/// # Parameters
///
/// * `state` - collection before the action, consumed
/// * `action` - `Set` replaces every item, `Add` appends one, `Remove` drops
///   the first item with a matching id and is a no-op when none matches
///
/// # Returns
///
/// The collection after the action. Input items are never modified.
///
/// # Example
///
/// ```rust
/// use pantry::domain::{Item, ItemId};
/// use pantry::store::{reduce, CollectionAction, CollectionState};
///
/// let items = vec![Item::new(ItemId::new("a"), "Flour", 1.0)];
/// let state = reduce(CollectionState::default(), CollectionAction::Set(items.clone()));
/// assert_eq!(state.items(), items.as_slice());
/// ```
#[must_use]
pub fn reduce(state: CollectionState, action: CollectionAction) -> CollectionState {
    let kind = action.kind();

    let next = match action {
        CollectionAction::Set(items) => CollectionState { items },
        CollectionAction::Add(item) => {
            let mut items = state.items;
            items.push(item);
            CollectionState { items }
        }
        CollectionAction::Remove(id) => {
            let mut items = state.items;
            if let Some(position) = items.iter().position(|item| item.id == id) {
                items.remove(position);
            } else {
                tracing::debug!(item_id = %id, "remove matched no item");
            }
            CollectionState { items }
        }
    };

    tracing::debug!(action = kind, item_count = next.len(), "collection reduced");
    next
}

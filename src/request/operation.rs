//! Typed correlation between a request and the UI action that issued it.
//!
//! Each logical operation category owns one request slot. The operation
//! issued into a slot carries its own strongly typed context, so the kind of a
//! completion and the data needed to apply it can never disagree.

use crate::domain::{ItemId, NewItem};
use std::fmt;
use std::str::FromStr;

/// Logical request slot, one per operation category.
///
/// A slot holds at most one active request; issuing again before the previous
/// request settles makes the earlier completion indistinguishable from the
/// later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    /// Creating an item.
    Add,
    /// Deleting an item.
    Remove,
    /// Loading the filtered collection.
    Query,
}

impl Slot {
    /// Every slot, in a stable order.
    pub const ALL: [Self; 3] = [Self::Add, Self::Remove, Self::Query];

    /// Wire name used in the host correlation context.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Query => "query",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            "query" => Ok(Self::Query),
            other => Err(format!("unknown request slot `{other}`")),
        }
    }
}

/// An operation issued against the remote collection, with its context.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Create an item; the draft becomes the local item once an id is known.
    AddItem(NewItem),
    /// Delete the item with this id.
    RemoveItem(ItemId),
    /// Load the collection filtered by title; empty text loads everything.
    QueryItems {
        /// Filter text the query was built from.
        text: String,
    },
}

impl Operation {
    /// The slot this operation is tracked in.
    #[must_use]
    pub const fn slot(&self) -> Slot {
        match self {
            Self::AddItem(_) => Slot::Add,
            Self::RemoveItem(_) => Slot::Remove,
            Self::QueryItems { .. } => Slot::Query,
        }
    }

    /// Correlation tag for logging.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::AddItem(_) => "add-item",
            Self::RemoveItem(_) => "remove-item",
            Self::QueryItems { .. } => "query-items",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_names_round_trip() {
        for slot in Slot::ALL {
            assert_eq!(slot.as_str().parse::<Slot>(), Ok(slot));
        }
        assert!("ADD".parse::<Slot>().is_err());
    }

    #[test]
    fn operations_map_to_their_slots() {
        assert_eq!(Operation::AddItem(NewItem::new("Salt", 1.0)).slot(), Slot::Add);
        assert_eq!(Operation::RemoveItem(ItemId::new("x1")).slot(), Slot::Remove);
        assert_eq!(
            Operation::QueryItems { text: String::new() }.slot(),
            Slot::Query
        );
    }
}

//! Item domain model.
//!
//! An [`Item`] is one entry of the remote collection: a title and an amount,
//! identified by an id the remote side assigns on creation. Before that id is
//! known the same data travels as a [`NewItem`].

use super::error::{PantryError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier assigned to an item by the remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wraps a remote-assigned identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An item whose id has not been assigned yet.
///
/// This is the body of a create request and the context carried by an
/// add-item operation until the remote id comes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub title: String,
    /// Missing or `null` amounts read as `0`.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: f64,
}

impl NewItem {
    /// Creates an item draft from a title and an amount.
    #[must_use]
    pub fn new(title: impl Into<String>, amount: f64) -> Self {
        Self {
            title: title.into(),
            amount,
        }
    }

    /// Parses the add-item prompt.
    ///
    /// The last whitespace-separated token is the amount; everything before
    /// it is the title, so titles may contain spaces.
    ///
    /// # Errors
    ///
    /// Returns [`PantryError::Input`] if the title is empty, the amount is
    /// missing, or the amount is not a finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// use pantry::domain::NewItem;
    ///
    /// let item = NewItem::parse("Sea salt 2")?;
    /// assert_eq!(item.title, "Sea salt");
    /// assert!((item.amount - 2.0).abs() < f64::EPSILON);
    /// # Ok::<(), pantry::PantryError>(())
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let (title, amount) = trimmed
            .rsplit_once(char::is_whitespace)
            .ok_or_else(|| PantryError::Input("expected `<title> <amount>`".to_string()))?;

        let title = title.trim();
        if title.is_empty() {
            return Err(PantryError::Input("title must not be empty".to_string()));
        }

        let amount: f64 = amount
            .parse()
            .map_err(|_| PantryError::Input(format!("`{amount}` is not a number")))?;
        if !amount.is_finite() {
            return Err(PantryError::Input(format!("`{amount}` is not a finite number")));
        }

        Ok(Self::new(title, amount))
    }

    /// Attaches the remote-assigned id, producing a settled [`Item`].
    #[must_use]
    pub fn with_id(self, id: ItemId) -> Item {
        Item {
            id,
            title: self.title,
            amount: self.amount,
        }
    }
}

/// An item as held in the local collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub amount: f64,
}

impl Item {
    /// Creates an item with a known id.
    #[must_use]
    pub fn new(id: ItemId, title: impl Into<String>, amount: f64) -> Self {
        Self {
            id,
            title: title.into(),
            amount,
        }
    }
}

/// Accepts amounts stored as JSON numbers, numeric strings or `null`.
///
/// Collections written by form-based clients often hold the raw input text.
fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    match Option::<RawAmount>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(RawAmount::Number(n)) => Ok(n),
        Some(RawAmount::Text(s)) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_title_and_amount_on_last_space() {
        let item = NewItem::parse("  brown sugar 250 ").unwrap();
        assert_eq!(item.title, "brown sugar");
        assert!((item.amount - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_rejects_missing_amount() {
        assert!(matches!(NewItem::parse("Salt"), Err(PantryError::Input(_))));
        assert!(matches!(NewItem::parse("Salt lots"), Err(PantryError::Input(_))));
        assert!(matches!(NewItem::parse("   3"), Err(PantryError::Input(_))));
    }

    #[test]
    fn parse_rejects_non_finite_amount() {
        assert!(NewItem::parse("Salt NaN").is_err());
        assert!(NewItem::parse("Salt inf").is_err());
    }

    #[test]
    fn amount_decodes_from_number_or_string() {
        let from_number: NewItem = serde_json::from_str(r#"{"title":"Salt","amount":2}"#).unwrap();
        let from_text: NewItem = serde_json::from_str(r#"{"title":"Salt","amount":"2"}"#).unwrap();
        assert_eq!(from_number, from_text);
    }

    #[test]
    fn missing_or_null_amount_reads_as_zero() {
        let missing: NewItem = serde_json::from_str(r#"{"title":"Pepper"}"#).unwrap();
        let null: NewItem = serde_json::from_str(r#"{"title":"Pepper","amount":null}"#).unwrap();
        assert_eq!(missing, NewItem::new("Pepper", 0.0));
        assert_eq!(null, NewItem::new("Pepper", 0.0));
    }

    #[test]
    fn new_item_serializes_without_id() {
        let json = serde_json::to_value(NewItem::new("Salt", 2.0)).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "Salt", "amount": 2.0 }));
    }
}

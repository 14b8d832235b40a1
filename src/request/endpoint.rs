//! URL and body construction for the remote collection.
//!
//! The remote side follows the Realtime Database REST layout: the collection
//! lives at `<base>/<collection>.json` and one entry at
//! `<base>/<collection>/<id>.json`. Filtering uses the `orderBy`/`equalTo`
//! query parameters on the `title` field; both take JSON values, so the
//! filter text is JSON-quoted and then form-urlencoded.

use super::channel::{HttpRequest, Method, RequestContext};
use super::operation::Operation;
use crate::domain::Result;
use url::form_urlencoded;

/// Location of the remote collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base_url: String,
    collection: String,
}

impl Endpoint {
    /// Creates an endpoint; trailing slashes on `base_url` and surrounding
    /// slashes on `collection` are dropped.
    #[must_use]
    pub fn new(base_url: impl AsRef<str>, collection: impl AsRef<str>) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            collection: collection.as_ref().trim_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// URL of the whole collection.
    #[must_use]
    pub fn collection_url(&self) -> String {
        format!("{}/{}.json", self.base_url, self.collection)
    }

    /// URL of a single entry.
    #[must_use]
    pub fn item_url(&self, id: &str) -> String {
        format!("{}/{}/{}.json", self.base_url, self.collection, id)
    }

    /// URL of a title-filtered query; empty text queries the whole collection.
    ///
    /// # Parameters
    ///
    /// * `text` - Exact title to match. Quotes and backslashes are escaped as
    ///   JSON before the value is percent-encoded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pantry::request::Endpoint;
    ///
    /// let endpoint = Endpoint::new("http://127.0.0.1:9000/", "ingredients");
    /// assert_eq!(endpoint.query_url(""), "http://127.0.0.1:9000/ingredients.json");
    /// assert_eq!(
    ///     endpoint.query_url("Salt"),
    ///     "http://127.0.0.1:9000/ingredients.json?orderBy=%22title%22&equalTo=%22Salt%22"
    /// );
    /// ```
    #[must_use]
    pub fn query_url(&self, text: &str) -> String {
        if text.is_empty() {
            self.collection_url()
        } else {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("orderBy", "\"title\"")
                .append_pair("equalTo", &serde_json::Value::from(text).to_string())
                .finish();
            format!("{}?{query}", self.collection_url())
        }
    }

    /// Builds the wire request for an operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the create body cannot be serialized.
    pub fn request_for(&self, operation: &Operation, context: RequestContext) -> Result<HttpRequest> {
        let (method, url, body) = match operation {
            Operation::AddItem(item) => (
                Method::Post,
                self.collection_url(),
                Some(serde_json::to_vec(item)?),
            ),
            Operation::RemoveItem(id) => (Method::Delete, self.item_url(id.as_str()), None),
            Operation::QueryItems { text } => (Method::Get, self.query_url(text), None),
        };

        Ok(HttpRequest {
            method,
            url,
            body,
            context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemId, NewItem};
    use crate::request::Slot;

    fn context(slot: Slot) -> RequestContext {
        RequestContext {
            slot,
            sequence: 1,
            trace_context: None,
        }
    }

    #[test]
    fn normalizes_slashes() {
        let endpoint = Endpoint::new("https://example.test//", "/ingredients/");
        assert_eq!(endpoint.collection_url(), "https://example.test/ingredients.json");
        assert_eq!(endpoint.item_url("x1"), "https://example.test/ingredients/x1.json");
    }

    #[test]
    fn create_posts_item_without_id() {
        let endpoint = Endpoint::new("https://example.test", "ingredients");
        let request = endpoint
            .request_for(&Operation::AddItem(NewItem::new("Salt", 2.0)), context(Slot::Add))
            .unwrap();

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "https://example.test/ingredients.json");
        let body: serde_json::Value = serde_json::from_slice(&request.body.unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "title": "Salt", "amount": 2.0 }));
    }

    #[test]
    fn delete_targets_the_entry() {
        let endpoint = Endpoint::new("https://example.test", "ingredients");
        let request = endpoint
            .request_for(&Operation::RemoveItem(ItemId::new("x1")), context(Slot::Remove))
            .unwrap();

        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.url, "https://example.test/ingredients/x1.json");
        assert!(request.body.is_none());
    }

    fn equal_to(url: &str) -> String {
        let (_, query) = url.split_once('?').unwrap();
        let (_, value) = form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "equalTo")
            .unwrap();
        serde_json::from_str(&value).unwrap()
    }

    #[test]
    fn query_escapes_separators_in_filter_text() {
        let endpoint = Endpoint::new("https://example.test", "ingredients");
        let url = endpoint.query_url("salt & pepper #1+2%");

        assert!(!url.contains(' ') && !url.contains('#'));
        assert_eq!(equal_to(&url), "salt & pepper #1+2%");
    }

    #[test]
    fn query_json_escapes_quotes_and_backslashes() {
        let endpoint = Endpoint::new("https://example.test", "ingredients");
        let url = endpoint.query_url(r#"5" nails \ screws"#);

        assert!(url.contains("equalTo=%225%5C%22+nails"));
        assert_eq!(equal_to(&url), r#"5" nails \ screws"#);
    }

    #[test]
    fn query_orders_by_title() {
        let endpoint = Endpoint::new("https://example.test", "ingredients");
        assert_eq!(
            endpoint.query_url("Salt"),
            "https://example.test/ingredients.json?orderBy=%22title%22&equalTo=%22Salt%22"
        );
    }
}

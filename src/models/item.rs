//! Item data models and API request/response types.
//!
//! This module defines:
//! - `Item`: a stored item, also the body of create and replace requests
//! - `ItemUpdate`: partial update body for `PATCH`
//! - `ItemResponse`: an item together with its id
//! - `ReadItemResponse`: body returned by `GET /items/{item_id}`

use serde::{Deserialize, Deserializer, Serialize};

/// Maximum length, in characters, of the optional `q` search parameter.
pub const MAX_QUERY_LEN: usize = 50;

/// An item in the catalogue.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Widget",
///   "description": "A small widget",
///   "price": 9.99,
///   "tax": 0.5
/// }
/// ```
///
/// `name` and `price` are required; `description` and `tax` default to `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    pub price: f64,

    #[serde(default)]
    pub tax: Option<f64>,
}

/// Partial update of an item.
///
/// Only the fields present in the request body are applied. Nullable fields
/// distinguish "absent" (`None`) from "set to null" (`Some(None)`); the
/// required fields may be omitted but never set to `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemUpdate {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "present")]
    pub price: Option<f64>,

    #[serde(default, deserialize_with = "present")]
    pub tax: Option<Option<f64>>,
}

/// Marks a field as present. An explicit `null` becomes `Some(None)` for
/// nullable fields and is rejected for the others.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ItemUpdate {
    /// Merge the provided fields into `item`.
    pub fn apply_to(self, item: &mut Item) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(tax) = self.tax {
            item.tax = tax;
        }
    }
}

/// An item together with its id.
///
/// The item fields are flattened next to `item_id`:
///
/// ```json
/// {
///   "item_id": 1,
///   "name": "Widget",
///   "description": null,
///   "price": 9.99,
///   "tax": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemResponse {
    pub item_id: i64,

    #[serde(flatten)]
    pub item: Item,
}

impl ItemResponse {
    pub fn new(item_id: i64, item: Item) -> Self {
        Self { item_id, item }
    }
}

/// Query string of `GET /items/{item_id}`.
#[derive(Debug, Default, Deserialize)]
pub struct ReadItemQuery {
    pub q: Option<String>,
}

/// Body of `GET /items/{item_id}`. A missing item is reported as `"item": null`.
#[derive(Debug, Serialize)]
pub struct ReadItemResponse {
    pub item_id: i64,
    pub item: Option<Item>,
    pub q: Option<String>,
}

//! Stored records the read side resolves across.
//!
//! These are owned by the write side (cart and listing use cases); this crate
//! only reads them. All fields default so partially written records still
//! decode, and each record binds the alias table for its collection.

use std::collections::BTreeMap;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

mod blueprint;
mod cart;
mod listing;
mod organization;

pub use blueprint::{
    ModelVariation, ProductBlueprint, TokenBlueprint, MODEL_VARIATION_ALIASES,
    PRODUCT_BLUEPRINT_ALIASES, TOKEN_BLUEPRINT_ALIASES,
};
pub use cart::{Cart, LineItem, CART_ALIASES, LINE_ITEM_ALIASES};
pub use listing::{
    Inventory, Listing, ListingPrice, INVENTORY_ALIASES, LISTING_ALIASES, LISTING_PRICE_ALIASES,
};
pub use organization::{Brand, Company, BRAND_ALIASES, COMPANY_ALIASES};

/// Trimmed value of `s`, or `None` when it is blank.
pub(crate) fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseInt {
    Int(i64),
    Float(f64),
    Text(String),
}

fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64)
        .then(|| f as i64)
}

/// An integer written as an integer, an integral float (`2000.0`) or a
/// numeric string (`"2000"`).
pub(crate) fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let parsed = match LooseInt::deserialize(deserializer)? {
        LooseInt::Int(n) => Some(n),
        LooseInt::Float(f) => integral(f),
        LooseInt::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
    };
    parsed.ok_or_else(|| D::Error::custom("expected an integral number"))
}

/// `lenient_i64` for optional fields.
pub(crate) fn lenient_opt_i64<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    #[derive(Deserialize)]
    struct Wrapped(#[serde(deserialize_with = "lenient_i64")] i64);

    Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(n)| n))
}

/// Array of rows where an undecodable row is dropped on its own.
pub(crate) fn lenient_rows<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(rows) = Value::deserialize(deserializer)? else {
        tracing::debug!("expected an array of rows; treating as empty");
        return Ok(Vec::new());
    };
    Ok(rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(row) => Some(row),
            Err(e) => {
                tracing::debug!(index, error = %e, "dropping undecodable row");
                None
            }
        })
        .collect())
}

/// Keyed map of rows where an undecodable entry is dropped on its own.
pub(crate) fn lenient_entries<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        tracing::debug!("expected a keyed map of rows; treating as empty");
        return Ok(BTreeMap::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|(key, row)| match serde_json::from_value(row) {
            Ok(row) => Some((key, row)),
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "dropping undecodable entry");
                None
            }
        })
        .collect())
}

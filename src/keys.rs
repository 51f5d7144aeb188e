//! Inventory composite keys: `productBlueprintId__tokenBlueprintId`.

/// Separator between the product and token blueprint IDs.
pub const SEPARATOR: &str = "__";

/// The two blueprint IDs an inventory key is made of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryKey {
    pub product_blueprint_id: String,
    pub token_blueprint_id: String,
}

impl InventoryKey {
    /// Decode an inventory key. `None` means "not decodable", which callers
    /// treat as a normal fallback signal.
    pub fn parse(key: &str) -> Option<Self> {
        decode(key).map(|(product, token)| Self {
            product_blueprint_id: product,
            token_blueprint_id: token,
        })
    }

    pub fn encode(&self) -> String {
        encode(&self.product_blueprint_id, &self.token_blueprint_id)
    }
}

/// Split `key` on the separator.
///
/// Succeeds only when the separator occurs exactly once and both trimmed
/// parts are non-empty.
pub fn decode(key: &str) -> Option<(String, String)> {
    let mut parts = key.split(SEPARATOR);
    let first = parts.next()?.trim();
    let second = parts.next()?.trim();
    if parts.next().is_some() || first.is_empty() || second.is_empty() {
        return None;
    }
    Some((first.to_string(), second.to_string()))
}

/// Join two IDs with the separator. Empty string when either part is blank.
pub fn encode(first: &str, second: &str) -> String {
    let (first, second) = (first.trim(), second.trim());
    if first.is_empty() || second.is_empty() {
        return String::new();
    }
    format!("{}{}{}", first, SEPARATOR, second)
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{lenient_entries, lenient_i64, non_blank};
use crate::document::{AliasTable, Nested};
use crate::Document;

pub const LINE_ITEM_ALIASES: AliasTable = AliasTable {
    collection: "carts.items",
    version: 2,
    aliases: &[
        ("InventoryID", "inventoryId"),
        ("inventory_id", "inventoryId"),
        ("ListID", "listingId"),
        ("listId", "listingId"),
        ("listing_id", "listingId"),
        ("ModelID", "modelId"),
        ("model_id", "modelId"),
        ("Qty", "quantity"),
        ("qty", "quantity"),
        ("Quantity", "quantity"),
    ],
    nested: &[],
};

pub const CART_ALIASES: AliasTable = AliasTable {
    collection: "carts",
    version: 2,
    aliases: &[
        ("AvatarID", "avatarId"),
        ("avatar_id", "avatarId"),
        ("id", "avatarId"),
        ("Items", "items"),
    ],
    nested: &[("items", Nested::Values(&LINE_ITEM_ALIASES))],
};

/// A buyer's cart, keyed by avatar ID.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "carts", aliases = CART_ALIASES)]
#[serde(rename_all = "camelCase", default)]
pub struct Cart {
    #[document(id)]
    pub avatar_id: String,
    /// Item key -> line item. Ordered by key so every view over it is deterministic.
    /// A line item that cannot be decoded is dropped alone.
    #[serde(deserialize_with = "lenient_entries")]
    pub items: BTreeMap<String, LineItem>,
}

/// One line of a cart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    pub inventory_id: String,
    pub listing_id: String,
    pub model_id: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub quantity: i64,
}

impl LineItem {
    pub fn new(inventory_id: &str, listing_id: &str, model_id: &str, quantity: i64) -> Self {
        Self {
            inventory_id: inventory_id.to_string(),
            listing_id: listing_id.to_string(),
            model_id: model_id.to_string(),
            quantity,
        }
    }

    /// All three references present and a positive quantity.
    pub fn is_valid(&self) -> bool {
        non_blank(&self.inventory_id).is_some()
            && non_blank(&self.listing_id).is_some()
            && non_blank(&self.model_id).is_some()
            && self.quantity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validity() {
        assert!(LineItem::new("PB1__TB1", "L1", "M1", 1).is_valid());
        assert!(!LineItem::new("PB1__TB1", "L1", "M1", 0).is_valid());
        assert!(!LineItem::new("PB1__TB1", "L1", "M1", -2).is_valid());
        assert!(!LineItem::new("  ", "L1", "M1", 1).is_valid());
        assert!(!LineItem::new("PB1__TB1", "", "M1", 1).is_valid());
        assert!(!LineItem::new("PB1__TB1", "L1", "", 1).is_valid());
    }

    #[test]
    fn decodes_legacy_cart_shape() {
        let cart = Cart::decode(json!({
            "AvatarID": "avatar-1",
            "Items": {
                "k1": { "InventoryID": "PB1__TB1", "ListID": "L1", "ModelID": "M1", "Qty": 2 }
            }
        }))
        .unwrap();

        assert_eq!(cart.avatar_id, "avatar-1");
        assert_eq!(cart.items["k1"], LineItem::new("PB1__TB1", "L1", "M1", 2));
    }

    #[test]
    fn mistyped_item_dropped_alone() {
        let cart = Cart::decode(json!({
            "avatarId": "a",
            "items": {
                "good": { "inventoryId": "PB1__TB1", "listingId": "L1", "modelId": "M1", "quantity": 2 },
                "float": { "inventoryId": "PB1__TB1", "listingId": "L1", "modelId": "M2", "quantity": 3.0 },
                "bad": { "inventoryId": "PB1__TB1", "listingId": "L1", "modelId": "M1", "quantity": "two" },
                "worse": { "inventoryId": 7, "listingId": "L1", "modelId": "M1", "quantity": 1 }
            }
        }))
        .unwrap();

        assert_eq!(cart.items.keys().collect::<Vec<_>>(), vec!["float", "good"]);
        assert_eq!(cart.items["float"].quantity, 3);
    }

    #[test]
    fn missing_fields_default() {
        let cart = Cart::decode(json!({ "avatarId": "a", "items": { "k": {} } })).unwrap();
        assert_eq!(cart.items["k"], LineItem::default());
    }
}

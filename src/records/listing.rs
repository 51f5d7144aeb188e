use serde::{Deserialize, Serialize};

use super::{lenient_i64, lenient_rows};
use crate::document::{AliasTable, Nested};
use crate::Document;

pub const LISTING_PRICE_ALIASES: AliasTable = AliasTable {
    collection: "listings.prices",
    version: 2,
    aliases: &[
        ("ModelID", "modelId"),
        ("model_id", "modelId"),
        ("Price", "price"),
    ],
    nested: &[],
};

pub const LISTING_ALIASES: AliasTable = AliasTable {
    collection: "listings",
    version: 2,
    aliases: &[
        ("Title", "title"),
        ("name", "title"),
        ("Name", "title"),
        ("ImageID", "imageId"),
        ("image_id", "imageId"),
        ("imageUrl", "imageId"),
        ("Prices", "prices"),
        ("InventoryID", "inventoryId"),
        ("inventory_id", "inventoryId"),
        ("Status", "status"),
    ],
    nested: &[("prices", Nested::Rows(&LISTING_PRICE_ALIASES))],
};

pub const INVENTORY_ALIASES: AliasTable = AliasTable {
    collection: "inventories",
    version: 2,
    aliases: &[
        ("ProductBlueprintID", "productBlueprintId"),
        ("product_blueprint_id", "productBlueprintId"),
        ("TokenBlueprintID", "tokenBlueprintId"),
        ("token_blueprint_id", "tokenBlueprintId"),
    ],
    nested: &[],
};

/// A listing offered on the marketplace.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "listings", aliases = LISTING_ALIASES)]
#[serde(rename_all = "camelCase", default)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub image_id: String,
    #[serde(deserialize_with = "lenient_rows")]
    pub prices: Vec<ListingPrice>,
    pub inventory_id: String,
    pub status: String,
}

/// Price of one model variation within a listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingPrice {
    pub model_id: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub price: i64,
}

/// Stock record keyed by `productBlueprintId__tokenBlueprintId`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Document)]
#[document(collection = "inventories", aliases = INVENTORY_ALIASES)]
#[serde(rename_all = "camelCase", default)]
pub struct Inventory {
    pub id: String,
    pub product_blueprint_id: String,
    pub token_blueprint_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_legacy_listing_shape() {
        let listing = Listing::decode(json!({
            "Title": "Tee",
            "ImageID": "img-1",
            "Prices": [{ "ModelID": "M1", "Price": 2000 }],
            "Status": "listing"
        }))
        .unwrap();

        assert_eq!(listing.title, "Tee");
        assert_eq!(listing.image_id, "img-1");
        assert_eq!(
            listing.prices,
            vec![ListingPrice {
                model_id: "M1".into(),
                price: 2000
            }]
        );
        assert_eq!(listing.status, "listing");
    }

    #[test]
    fn float_price_keeps_the_listing() {
        let listing = Listing::decode(json!({
            "title": "Tee",
            "imageId": "img-1",
            "prices": [
                { "modelId": "M1", "price": 2000.0 },
                { "modelId": "M2", "price": "1500" },
                { "modelId": "M3", "price": "call us" }
            ]
        }))
        .unwrap();

        assert_eq!(listing.title, "Tee");
        assert_eq!(listing.image_id, "img-1");
        let prices: Vec<(&str, i64)> = listing
            .prices
            .iter()
            .map(|p| (p.model_id.as_str(), p.price))
            .collect();
        assert_eq!(prices, vec![("M1", 2000), ("M2", 1500)]);
    }

    #[test]
    fn mistyped_field_fails_decode() {
        assert!(Listing::decode(json!({ "title": 42 })).is_err());
    }

    #[test]
    fn inventory_accepts_snake_case() {
        let inventory = Inventory::decode(json!({
            "product_blueprint_id": "PB1",
            "TokenBlueprintID": "TB1"
        }))
        .unwrap();
        assert_eq!(inventory.product_blueprint_id, "PB1");
        assert_eq!(inventory.token_blueprint_id, "TB1");
    }
}

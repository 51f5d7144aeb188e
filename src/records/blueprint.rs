use serde::{Deserialize, Serialize};

use super::lenient_opt_i64;
use crate::document::AliasTable;
use crate::Document;

pub const PRODUCT_BLUEPRINT_ALIASES: AliasTable = AliasTable {
    collection: "product_blueprints",
    version: 2,
    aliases: &[
        ("ProductName", "productName"),
        ("name", "productName"),
        ("Name", "productName"),
        ("BrandID", "brandId"),
        ("brand_id", "brandId"),
        ("CompanyID", "companyId"),
        ("company_id", "companyId"),
    ],
    nested: &[],
};

pub const TOKEN_BLUEPRINT_ALIASES: AliasTable = AliasTable {
    collection: "token_blueprints",
    version: 2,
    aliases: &[
        ("Name", "name"),
        ("Symbol", "symbol"),
        ("BrandID", "brandId"),
        ("brand_id", "brandId"),
        ("CompanyID", "companyId"),
        ("company_id", "companyId"),
        ("IconURL", "iconUrl"),
        ("icon_url", "iconUrl"),
    ],
    nested: &[],
};

pub const MODEL_VARIATION_ALIASES: AliasTable = AliasTable {
    collection: "model_variations",
    version: 1,
    aliases: &[
        ("Size", "size"),
        ("Color", "color"),
        ("ModelNumber", "modelNumber"),
        ("model_number", "modelNumber"),
        ("RGB", "rgb"),
    ],
    nested: &[],
};

/// Product design a listing's inventory is minted from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Document)]
#[document(collection = "product_blueprints", aliases = PRODUCT_BLUEPRINT_ALIASES)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductBlueprint {
    pub id: String,
    pub product_name: String,
    pub brand_id: String,
    pub company_id: String,
}

/// Token design paired with a product blueprint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Document)]
#[document(collection = "token_blueprints", aliases = TOKEN_BLUEPRINT_ALIASES)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenBlueprint {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub brand_id: String,
    pub company_id: String,
    pub icon_url: String,
}

impl TokenBlueprint {
    /// Display name: `name`, falling back to `symbol`.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.symbol.trim()
        } else {
            self.name.trim()
        }
    }
}

/// Size/color variation of a product blueprint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Document)]
#[document(collection = "model_variations", aliases = MODEL_VARIATION_ALIASES)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelVariation {
    pub id: String,
    pub size: String,
    pub color: String,
    pub model_number: String,
    #[serde(deserialize_with = "lenient_opt_i64")]
    pub rgb: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_name_from_legacy_name() {
        let blueprint = ProductBlueprint::decode(json!({ "name": "Tee", "BrandID": "B1" })).unwrap();
        assert_eq!(blueprint.product_name, "Tee");
        assert_eq!(blueprint.brand_id, "B1");
    }

    #[test]
    fn rgb_written_as_float() {
        let model = ModelVariation::decode(json!({ "size": "M", "RGB": 128.0 })).unwrap();
        assert_eq!(model.rgb, Some(128));
        assert_eq!(model.size, "M");
    }

    #[test]
    fn token_display_name_falls_back_to_symbol() {
        let token = TokenBlueprint {
            symbol: "TEE".into(),
            ..Default::default()
        };
        assert_eq!(token.display_name(), "TEE");

        let token = TokenBlueprint {
            name: "Tee Token".into(),
            symbol: "TEE".into(),
            ..Default::default()
        };
        assert_eq!(token.display_name(), "Tee Token");
    }
}

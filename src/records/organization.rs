use serde::{Deserialize, Serialize};

use crate::document::AliasTable;
use crate::Document;

pub const BRAND_ALIASES: AliasTable = AliasTable {
    collection: "brands",
    version: 1,
    aliases: &[
        ("Name", "name"),
        ("brandName", "name"),
        ("CompanyID", "companyId"),
        ("company_id", "companyId"),
    ],
    nested: &[],
};

pub const COMPANY_ALIASES: AliasTable = AliasTable {
    collection: "companies",
    version: 1,
    aliases: &[("Name", "name"), ("companyName", "name")],
    nested: &[],
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Document)]
#[document(collection = "brands", aliases = BRAND_ALIASES)]
#[serde(rename_all = "camelCase", default)]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub company_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Document)]
#[document(collection = "companies", aliases = COMPANY_ALIASES)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
    pub id: String,
    pub name: String,
}

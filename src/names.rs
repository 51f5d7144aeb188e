//! Name resolution - best-effort display names for referenced IDs.
//!
//! Used as a fallback when a direct record lookup came back empty. Every
//! method answers with an empty value on failure; nothing here can abort a
//! query.

use std::sync::Arc;

use async_trait::async_trait;

use crate::document::{BatchStore, Document, DocumentsExt};
use crate::records::{non_blank, Brand, Company, ModelVariation, ProductBlueprint, TokenBlueprint};

/// Display attributes of a model variation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelVariant {
    pub size: String,
    pub color: String,
    pub model_number: String,
    pub rgb: Option<i64>,
}

impl ModelVariant {
    pub fn is_empty(&self) -> bool {
        self.size.trim().is_empty() && self.color.trim().is_empty()
    }
}

/// Best-effort name lookups. Empty string / empty struct means "unknown".
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn resolve_product_name(&self, product_blueprint_id: &str) -> String;

    async fn resolve_token_name(&self, token_blueprint_id: &str) -> String;

    async fn resolve_brand_name(&self, brand_id: &str) -> String;

    async fn resolve_company_name(&self, company_id: &str) -> String;

    async fn resolve_model_variant(&self, model_id: &str) -> ModelVariant;

    /// The company a brand belongs to.
    async fn resolve_brand_company_id(&self, _brand_id: &str) -> String {
        String::new()
    }

    /// Company name from `company_id`, or through `brand_id` when the company
    /// ID is blank. Stops after the brand hop.
    async fn resolve_company_name_for(&self, company_id: &str, brand_id: &str) -> String {
        if let Some(company_id) = non_blank(company_id) {
            return self.resolve_company_name(company_id).await;
        }
        let Some(brand_id) = non_blank(brand_id) else {
            return String::new();
        };
        let company_id = self.resolve_brand_company_id(brand_id).await;
        match non_blank(&company_id) {
            Some(company_id) => self.resolve_company_name(company_id).await,
            None => String::new(),
        }
    }
}

/// `NameResolver` reading the blueprint, brand and company collections.
#[derive(Clone)]
pub struct DocumentNameResolver {
    store: Arc<dyn BatchStore>,
}

impl DocumentNameResolver {
    pub fn new(store: Arc<dyn BatchStore>) -> Self {
        Self { store }
    }

    async fn fetch_one<M: Document>(&self, id: &str) -> Option<M> {
        let id = non_blank(id)?;
        match self
            .store
            .as_ref()
            .documents::<M>()
            .get_many(&[id.to_string()])
            .await
        {
            Ok(mut docs) => docs.pop().flatten(),
            Err(e) => {
                tracing::debug!(collection = M::COLLECTION, id = %id, error = %e, "name lookup failed");
                None
            }
        }
    }
}

#[async_trait]
impl NameResolver for DocumentNameResolver {
    async fn resolve_product_name(&self, product_blueprint_id: &str) -> String {
        self.fetch_one::<ProductBlueprint>(product_blueprint_id)
            .await
            .map(|b| b.product_name.trim().to_string())
            .unwrap_or_default()
    }

    async fn resolve_token_name(&self, token_blueprint_id: &str) -> String {
        self.fetch_one::<TokenBlueprint>(token_blueprint_id)
            .await
            .map(|t| t.display_name().to_string())
            .unwrap_or_default()
    }

    async fn resolve_brand_name(&self, brand_id: &str) -> String {
        self.fetch_one::<Brand>(brand_id)
            .await
            .map(|b| b.name.trim().to_string())
            .unwrap_or_default()
    }

    async fn resolve_company_name(&self, company_id: &str) -> String {
        self.fetch_one::<Company>(company_id)
            .await
            .map(|c| c.name.trim().to_string())
            .unwrap_or_default()
    }

    async fn resolve_model_variant(&self, model_id: &str) -> ModelVariant {
        self.fetch_one::<ModelVariation>(model_id)
            .await
            .map(|m| ModelVariant {
                size: m.size.trim().to_string(),
                color: m.color.trim().to_string(),
                model_number: m.model_number.trim().to_string(),
                rgb: m.rgb,
            })
            .unwrap_or_default()
    }

    async fn resolve_brand_company_id(&self, brand_id: &str) -> String {
        self.fetch_one::<Brand>(brand_id)
            .await
            .map(|b| b.company_id.trim().to_string())
            .unwrap_or_default()
    }
}

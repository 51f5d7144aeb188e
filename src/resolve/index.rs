//! Index building - request-scoped lookup maps over fetched records.
//!
//! Each index maps a natural key to only the fields assembly needs. Any index
//! may be absent (its collection was unavailable) and every accessor treats an
//! absent index exactly like a missing key.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use futures::future::join_all;

use super::fetch::{within, Batch, BatchFetcher};
use super::references::{IdSet, References};
use crate::keys::InventoryKey;
use crate::names::NameResolver;
use crate::records::{
    non_blank, Brand, Company, Inventory, Listing, ProductBlueprint, TokenBlueprint,
};

fn owned(s: &str) -> Option<String> {
    non_blank(s).map(str::to_string)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingMeta {
    pub title: Option<String>,
    pub image_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlueprintRefs {
    pub product_blueprint_id: Option<String>,
    pub token_blueprint_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelMeta {
    pub size: Option<String>,
    pub color: Option<String>,
    pub model_number: Option<String>,
    pub rgb: Option<i64>,
}

/// Ownership references of a product or token blueprint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerRefs {
    pub brand_id: Option<String>,
    pub company_id: Option<String>,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandMeta {
    pub name: Option<String>,
    pub company_id: Option<String>,
}

/// Which optional indices a use case needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexPlan {
    /// Size/color per model (name resolver only).
    pub model_details: bool,
    /// Token blueprint names and owners.
    pub token_details: bool,
    /// Brand and company names.
    pub organization_details: bool,
    /// Ask the name resolver for names the direct records lack.
    pub name_fallbacks: bool,
}

impl IndexPlan {
    pub fn cart() -> Self {
        Self {
            model_details: true,
            name_fallbacks: true,
            ..Self::default()
        }
    }

    pub fn preview() -> Self {
        Self {
            model_details: true,
            token_details: true,
            organization_details: true,
            name_fallbacks: true,
        }
    }

    pub fn catalog() -> Self {
        Self {
            token_details: true,
            organization_details: true,
            name_fallbacks: true,
            ..Self::default()
        }
    }
}

/// All indices of one request.
#[derive(Debug, Clone, Default)]
pub struct Indices {
    pub listings: Option<HashMap<String, ListingMeta>>,
    /// listing ID -> model ID -> price.
    pub prices: Option<HashMap<String, HashMap<String, i64>>>,
    pub inventories: Option<HashMap<String, BlueprintRefs>>,
    pub models: Option<HashMap<String, ModelMeta>>,
    pub product_names: Option<HashMap<String, String>>,
    pub products: Option<HashMap<String, OwnerRefs>>,
    pub token_names: Option<HashMap<String, String>>,
    pub tokens: Option<HashMap<String, OwnerRefs>>,
    pub brands: Option<HashMap<String, BrandMeta>>,
    pub company_names: Option<HashMap<String, String>>,
}

fn lookup<'a, V>(index: &'a Option<HashMap<String, V>>, key: &str) -> Option<&'a V> {
    index.as_ref().and_then(|map| map.get(key))
}

impl Indices {
    pub fn listing(&self, listing_id: &str) -> Option<&ListingMeta> {
        lookup(&self.listings, listing_id)
    }

    pub fn price(&self, listing_id: &str, model_id: &str) -> Option<i64> {
        lookup(&self.prices, listing_id).and_then(|by_model| by_model.get(model_id).copied())
    }

    /// Blueprint IDs for an inventory: the inventory record's explicit
    /// fields first, then the decoded inventory key, else unresolved.
    pub fn blueprints(&self, inventory_id: &str) -> BlueprintRefs {
        let explicit = lookup(&self.inventories, inventory_id);
        let decoded = InventoryKey::parse(inventory_id);
        BlueprintRefs {
            product_blueprint_id: explicit
                .and_then(|refs| refs.product_blueprint_id.clone())
                .or_else(|| decoded.as_ref().map(|k| k.product_blueprint_id.clone())),
            token_blueprint_id: explicit
                .and_then(|refs| refs.token_blueprint_id.clone())
                .or_else(|| decoded.map(|k| k.token_blueprint_id)),
        }
    }

    pub fn model(&self, model_id: &str) -> Option<&ModelMeta> {
        lookup(&self.models, model_id)
    }

    pub fn product_name(&self, product_blueprint_id: &str) -> Option<&str> {
        lookup(&self.product_names, product_blueprint_id).map(String::as_str)
    }

    pub fn product(&self, product_blueprint_id: &str) -> Option<&OwnerRefs> {
        lookup(&self.products, product_blueprint_id)
    }

    pub fn token_name(&self, token_blueprint_id: &str) -> Option<&str> {
        lookup(&self.token_names, token_blueprint_id).map(String::as_str)
    }

    pub fn token(&self, token_blueprint_id: &str) -> Option<&OwnerRefs> {
        lookup(&self.tokens, token_blueprint_id)
    }

    pub fn brand_name(&self, brand_id: &str) -> Option<&str> {
        lookup(&self.brands, brand_id).and_then(|brand| brand.name.as_deref())
    }

    /// Company name by ID, or through the brand when the company ID is blank.
    pub fn company_name(&self, company_id: Option<&str>, brand_id: Option<&str>) -> Option<&str> {
        let company_id = match company_id.and_then(non_blank) {
            Some(id) => id,
            None => lookup(&self.brands, brand_id?)?.company_id.as_deref()?,
        };
        lookup(&self.company_names, company_id).map(String::as_str)
    }

    /// Add listings to the listing and price indices.
    pub fn insert_listings<'a, I>(&mut self, listings: I)
    where
        I: IntoIterator<Item = (&'a str, &'a Listing)>,
    {
        let metas = self.listings.get_or_insert_with(HashMap::new);
        let prices = self.prices.get_or_insert_with(HashMap::new);
        for (id, listing) in listings {
            metas.insert(
                id.to_string(),
                ListingMeta {
                    title: owned(&listing.title),
                    image_id: owned(&listing.image_id),
                },
            );

            let by_model = prices.entry(id.to_string()).or_default();
            for row in &listing.prices {
                if let Some(model_id) = non_blank(&row.model_id) {
                    by_model.entry(model_id.to_string()).or_insert(row.price);
                }
            }
        }
    }
}

/// `inventoryId -> blueprint IDs`, filling blanks from the inventory key.
pub fn inventory_index(batch: &Batch) -> HashMap<String, BlueprintRefs> {
    batch
        .decoded::<Inventory>()
        .map(|(id, inventory)| {
            let decoded = InventoryKey::parse(id);
            let refs = BlueprintRefs {
                product_blueprint_id: owned(&inventory.product_blueprint_id)
                    .or_else(|| decoded.as_ref().map(|k| k.product_blueprint_id.clone())),
                token_blueprint_id: owned(&inventory.token_blueprint_id)
                    .or_else(|| decoded.map(|k| k.token_blueprint_id)),
            };
            (id.to_string(), refs)
        })
        .collect()
}

/// Builds the indices a plan asks for, fetching each collection once.
pub struct IndexBuilder<'a> {
    fetcher: BatchFetcher<'a>,
    names: Option<&'a dyn NameResolver>,
    timeout: Option<Duration>,
    plan: IndexPlan,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(
        fetcher: BatchFetcher<'a>,
        names: Option<&'a dyn NameResolver>,
        timeout: Option<Duration>,
        plan: IndexPlan,
    ) -> Self {
        Self {
            fetcher,
            names,
            timeout,
            plan,
        }
    }

    /// The resolver, when fallbacks are both wanted and possible.
    fn fallback(&self) -> Option<&'a dyn NameResolver> {
        self.names.filter(|_| self.plan.name_fallbacks)
    }

    /// One resolver call, bounded by the fetch timeout.
    async fn ask<T: Default, F: Future<Output = T>>(&self, what: &str, id: &str, call: F) -> T {
        match within(self.timeout, call).await {
            Some(value) => value,
            None => {
                tracing::warn!(lookup = what, id = %id, "name resolution timed out");
                T::default()
            }
        }
    }

    /// Indices for a set of line-item references.
    pub async fn build(&self, refs: &References) -> Indices {
        let mut indices = Indices::default();

        let (listings, inventories, models) = futures::join!(
            self.fetcher.fetch_for::<Listing>(&refs.listing_ids),
            self.fetcher.fetch_for::<Inventory>(&refs.inventory_ids),
            self.models(&refs.model_ids),
        );

        if let Some(batch) = listings {
            let decoded: Vec<(&str, Listing)> = batch.decoded::<Listing>().collect();
            indices.insert_listings(decoded.iter().map(|(id, listing)| (*id, listing)));
        }
        indices.inventories = inventories.as_ref().map(inventory_index);
        indices.models = models;

        self.extend_blueprints(&mut indices, &refs.inventory_ids).await;
        indices
    }

    /// Indices for listings that were already loaded (the catalog).
    pub async fn build_for_listings(&self, listings: &[Listing]) -> Indices {
        let mut indices = Indices::default();
        indices.insert_listings(listings.iter().map(|l| (l.id.as_str(), l)));

        let inventory_ids: IdSet = listings.iter().map(|l| l.inventory_id.as_str()).collect();
        let inventory_ids = inventory_ids.into_vec();
        let inventories = self.fetcher.fetch_for::<Inventory>(&inventory_ids).await;
        indices.inventories = inventories.as_ref().map(inventory_index);

        self.extend_blueprints(&mut indices, &inventory_ids).await;
        indices
    }

    /// Product (and optionally token and organization) indices for the
    /// blueprints the given inventories resolve to.
    async fn extend_blueprints(&self, indices: &mut Indices, inventory_ids: &[String]) {
        let mut product_ids = IdSet::new();
        let mut token_ids = IdSet::new();
        for inventory_id in inventory_ids {
            let refs = indices.blueprints(inventory_id);
            if let Some(id) = &refs.product_blueprint_id {
                product_ids.insert(id);
            }
            if let Some(id) = &refs.token_blueprint_id {
                token_ids.insert(id);
            }
        }

        let ((product_names, products), tokens) = futures::join!(
            self.products(product_ids.as_slice()),
            async {
                if self.plan.token_details {
                    Some(self.tokens(token_ids.as_slice()).await)
                } else {
                    None
                }
            }
        );
        indices.product_names = Some(product_names);
        indices.products = products;
        if let Some((token_names, tokens)) = tokens {
            indices.token_names = Some(token_names);
            indices.tokens = tokens;
        }

        if self.plan.organization_details {
            self.extend_organizations(indices).await;
        }
    }

    /// `modelId -> size/color`, through the name resolver only.
    async fn models(&self, model_ids: &[String]) -> Option<HashMap<String, ModelMeta>> {
        if !self.plan.model_details || model_ids.is_empty() {
            return None;
        }
        let resolver = self.names?;

        let resolved = join_all(model_ids.iter().map(|id| async move {
            let variant = self
                .ask("model_variant", id, resolver.resolve_model_variant(id))
                .await;
            (id, variant)
        }))
        .await;

        Some(
            resolved
                .into_iter()
                .filter(|(_, variant)| !variant.is_empty())
                .map(|(id, variant)| {
                    let meta = ModelMeta {
                        size: owned(&variant.size),
                        color: owned(&variant.color),
                        model_number: owned(&variant.model_number),
                        rgb: variant.rgb,
                    };
                    (id.clone(), meta)
                })
                .collect(),
        )
    }

    /// Product names from the blueprint records, resolver for the rest.
    async fn products(
        &self,
        ids: &[String],
    ) -> (HashMap<String, String>, Option<HashMap<String, OwnerRefs>>) {
        let batch = self.fetcher.fetch_for::<ProductBlueprint>(ids).await;

        let mut names = HashMap::new();
        let owners: Option<HashMap<String, OwnerRefs>> = batch.as_ref().map(|batch| {
            batch
                .decoded::<ProductBlueprint>()
                .map(|(id, blueprint)| {
                    if let Some(name) = owned(&blueprint.product_name) {
                        names.insert(id.to_string(), name);
                    }
                    let owner = OwnerRefs {
                        brand_id: owned(&blueprint.brand_id),
                        company_id: owned(&blueprint.company_id),
                        icon_url: None,
                    };
                    (id.to_string(), owner)
                })
                .collect()
        });

        if let Some(resolver) = self.fallback() {
            let missing: Vec<&String> = ids.iter().filter(|id| !names.contains_key(*id)).collect();
            let resolved = join_all(missing.into_iter().map(|id| async move {
                let name = self
                    .ask("product_name", id, resolver.resolve_product_name(id))
                    .await;
                (id, name)
            }))
            .await;
            for (id, name) in resolved {
                if let Some(name) = owned(&name) {
                    names.insert(id.clone(), name);
                }
            }
        }

        (names, owners)
    }

    /// Token names (name, else symbol) and owners, resolver for missing names.
    async fn tokens(
        &self,
        ids: &[String],
    ) -> (HashMap<String, String>, Option<HashMap<String, OwnerRefs>>) {
        let batch = self.fetcher.fetch_for::<TokenBlueprint>(ids).await;

        let mut names = HashMap::new();
        let owners: Option<HashMap<String, OwnerRefs>> = batch.as_ref().map(|batch| {
            batch
                .decoded::<TokenBlueprint>()
                .map(|(id, token)| {
                    if let Some(name) = owned(token.display_name()) {
                        names.insert(id.to_string(), name);
                    }
                    let owner = OwnerRefs {
                        brand_id: owned(&token.brand_id),
                        company_id: owned(&token.company_id),
                        icon_url: owned(&token.icon_url),
                    };
                    (id.to_string(), owner)
                })
                .collect()
        });

        if let Some(resolver) = self.fallback() {
            let missing: Vec<&String> = ids.iter().filter(|id| !names.contains_key(*id)).collect();
            let resolved = join_all(missing.into_iter().map(|id| async move {
                let name = self
                    .ask("token_name", id, resolver.resolve_token_name(id))
                    .await;
                (id, name)
            }))
            .await;
            for (id, name) in resolved {
                if let Some(name) = owned(&name) {
                    names.insert(id.clone(), name);
                }
            }
        }

        (names, owners)
    }

    /// Brand and company indices for every owner reference seen so far.
    async fn extend_organizations(&self, indices: &mut Indices) {
        let owners = || {
            indices
                .products
                .iter()
                .chain(indices.tokens.iter())
                .flat_map(|map| map.values())
        };

        let brand_ids: IdSet = owners()
            .filter_map(|owner| owner.brand_id.as_deref())
            .collect();
        let mut company_ids: IdSet = owners()
            .filter_map(|owner| owner.company_id.as_deref())
            .collect();

        let mut brands = self
            .fetcher
            .fetch_for::<Brand>(brand_ids.as_slice())
            .await
            .map(|batch| {
                batch
                    .decoded::<Brand>()
                    .map(|(id, brand)| {
                        let meta = BrandMeta {
                            name: owned(&brand.name),
                            company_id: owned(&brand.company_id),
                        };
                        (id.to_string(), meta)
                    })
                    .collect::<HashMap<_, _>>()
            });

        if let Some(resolver) = self.fallback() {
            let known = brands.get_or_insert_with(HashMap::new);
            let incomplete: Vec<&String> = brand_ids
                .as_slice()
                .iter()
                .filter(|id| {
                    known
                        .get(*id)
                        .map_or(true, |b| b.name.is_none() || b.company_id.is_none())
                })
                .collect();
            let resolved = join_all(incomplete.into_iter().map(|id| async move {
                let (name, company_id) = futures::join!(
                    self.ask("brand_name", id, resolver.resolve_brand_name(id)),
                    self.ask("brand_company", id, resolver.resolve_brand_company_id(id)),
                );
                (id, name, company_id)
            }))
            .await;
            for (id, name, company_id) in resolved {
                let meta = known.entry(id.clone()).or_default();
                if meta.name.is_none() {
                    meta.name = owned(&name);
                }
                if meta.company_id.is_none() {
                    meta.company_id = owned(&company_id);
                }
            }
        }

        for brand in brands.iter().flat_map(|map| map.values()) {
            if let Some(company_id) = &brand.company_id {
                company_ids.insert(company_id);
            }
        }

        let companies = self
            .fetcher
            .fetch_for::<Company>(company_ids.as_slice())
            .await;
        let mut company_names: HashMap<String, String> = companies
            .iter()
            .flat_map(|batch| batch.decoded::<Company>())
            .filter_map(|(id, company)| owned(&company.name).map(|name| (id.to_string(), name)))
            .collect();

        if let Some(resolver) = self.fallback() {
            let missing: Vec<&String> = company_ids
                .as_slice()
                .iter()
                .filter(|id| !company_names.contains_key(*id))
                .collect();
            let resolved = join_all(missing.into_iter().map(|id| async move {
                let name = self
                    .ask("company_name", id, resolver.resolve_company_name(id))
                    .await;
                (id, name)
            }))
            .await;
            for (id, name) in resolved {
                if let Some(name) = owned(&name) {
                    company_names.insert(id.clone(), name);
                }
            }
        }

        indices.brands = brands;
        indices.company_names = Some(company_names);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BatchStore, StoreError};
    use crate::names::ModelVariant;
    use crate::records::ListingPrice;
    use crate::InMemoryDocumentStore;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    struct FixedNames;

    #[async_trait]
    impl NameResolver for FixedNames {
        async fn resolve_product_name(&self, id: &str) -> String {
            format!("resolved {}", id)
        }
        async fn resolve_token_name(&self, _id: &str) -> String {
            String::new()
        }
        async fn resolve_brand_name(&self, id: &str) -> String {
            format!("brand {}", id)
        }
        async fn resolve_company_name(&self, id: &str) -> String {
            format!("company {}", id)
        }
        async fn resolve_model_variant(&self, id: &str) -> ModelVariant {
            match id {
                "M1" => ModelVariant {
                    size: "M".into(),
                    color: "Navy".into(),
                    ..Default::default()
                },
                _ => ModelVariant::default(),
            }
        }
        async fn resolve_brand_company_id(&self, _id: &str) -> String {
            "C9".into()
        }
    }

    struct FailingCollection {
        inner: InMemoryDocumentStore,
        failing: &'static str,
    }

    #[async_trait]
    impl BatchStore for FailingCollection {
        async fn multi_get(
            &self,
            collection: &str,
            ids: &[String],
        ) -> Result<Vec<Option<Value>>, StoreError> {
            if collection == self.failing {
                return Err(StoreError::unavailable(collection, "down"));
            }
            self.inner.multi_get(collection, ids).await
        }
    }

    #[test]
    fn absent_index_reads_as_unresolved() {
        let indices = Indices::default();
        assert!(indices.listing("L1").is_none());
        assert!(indices.price("L1", "M1").is_none());
        assert!(indices.model("M1").is_none());
        assert!(indices.product_name("PB1").is_none());
        assert!(indices.company_name(Some("C1"), Some("B1")).is_none());
        assert_eq!(
            indices.blueprints("PB1__TB1"),
            BlueprintRefs {
                product_blueprint_id: Some("PB1".into()),
                token_blueprint_id: Some("TB1".into()),
            }
        );
        assert_eq!(indices.blueprints("garbage"), BlueprintRefs::default());
    }

    #[test]
    fn explicit_inventory_fields_win_over_key() {
        let batch = Batch::new(
            "inventories",
            ids(&["PB1__TB1"]),
            vec![Some(json!({ "productBlueprintId": "PB-EXPLICIT" }))],
        );
        let indices = Indices {
            inventories: Some(inventory_index(&batch)),
            ..Default::default()
        };

        let refs = indices.blueprints("PB1__TB1");
        assert_eq!(refs.product_blueprint_id.as_deref(), Some("PB-EXPLICIT"));
        assert_eq!(refs.token_blueprint_id.as_deref(), Some("TB1"));
    }

    #[test]
    fn inventory_without_ids_and_bad_key_stays_unresolved() {
        let batch = Batch::new("inventories", ids(&["INV-9"]), vec![Some(json!({}))]);
        let index = inventory_index(&batch);
        assert_eq!(index["INV-9"], BlueprintRefs::default());
    }

    #[test]
    fn listing_and_price_indices() {
        let listing = Listing {
            id: "L1".into(),
            title: "Tee".into(),
            image_id: "  ".into(),
            prices: vec![
                ListingPrice {
                    model_id: "M1".into(),
                    price: 2000,
                },
                ListingPrice {
                    model_id: "M1".into(),
                    price: 9999,
                },
                ListingPrice {
                    model_id: "".into(),
                    price: 1,
                },
            ],
            ..Default::default()
        };
        let mut indices = Indices::default();
        indices.insert_listings([("L1", &listing)]);

        let meta = indices.listing("L1").unwrap();
        assert_eq!(meta.title.as_deref(), Some("Tee"));
        assert_eq!(meta.image_id, None);
        assert_eq!(indices.price("L1", "M1"), Some(2000));
        assert_eq!(indices.price("L1", "M2"), None);
        assert_eq!(indices.prices.as_ref().unwrap()["L1"].len(), 1);
    }

    #[test]
    fn company_through_brand() {
        let mut brands = HashMap::new();
        brands.insert(
            "B1".to_string(),
            BrandMeta {
                name: Some("Acme Wear".into()),
                company_id: Some("C1".into()),
            },
        );
        let mut companies = HashMap::new();
        companies.insert("C1".to_string(), "Acme Inc".to_string());
        let indices = Indices {
            brands: Some(brands),
            company_names: Some(companies),
            ..Default::default()
        };

        assert_eq!(indices.company_name(Some("C1"), None), Some("Acme Inc"));
        assert_eq!(indices.company_name(Some(" "), Some("B1")), Some("Acme Inc"));
        assert_eq!(indices.company_name(None, Some("B2")), None);
        assert_eq!(indices.brand_name("B1"), Some("Acme Wear"));
    }

    #[tokio::test]
    async fn builds_cart_indices_in_one_pass() {
        let store = InMemoryDocumentStore::new();
        store
            .upsert_raw(
                "listings",
                "L1",
                &json!({ "title": "Tee", "prices": [{ "modelId": "M1", "price": 2000 }] }),
            )
            .unwrap();
        store
            .upsert(&ProductBlueprint {
                id: "PB1".into(),
                product_name: "Classic Tee".into(),
                ..Default::default()
            })
            .unwrap();

        let builder = IndexBuilder::new(
            BatchFetcher::new(&store, None),
            Some(&FixedNames),
            None,
            IndexPlan::cart(),
        );
        let refs = References {
            listing_ids: ids(&["L1"]),
            inventory_ids: ids(&["PB1__TB1", "PB2__TB1"]),
            model_ids: ids(&["M1", "M2"]),
        };
        let indices = builder.build(&refs).await;

        assert_eq!(indices.price("L1", "M1"), Some(2000));
        assert_eq!(indices.product_name("PB1"), Some("Classic Tee"));
        assert_eq!(indices.product_name("PB2"), Some("resolved PB2"));
        assert_eq!(indices.model("M1").unwrap().size.as_deref(), Some("M"));
        assert!(indices.model("M2").is_none());
        assert!(indices.tokens.is_none());
        assert!(indices.brands.is_none());

        for collection in ["listings", "inventories", "product_blueprints"] {
            assert_eq!(store.multi_get_calls(collection), 1, "{}", collection);
        }
        assert_eq!(store.multi_get_calls("token_blueprints"), 0);
    }

    #[tokio::test]
    async fn failed_collection_poisons_only_its_fields() {
        let inner = InMemoryDocumentStore::new();
        inner
            .upsert(&ProductBlueprint {
                id: "PB1".into(),
                product_name: "Classic Tee".into(),
                ..Default::default()
            })
            .unwrap();
        let store = FailingCollection {
            inner,
            failing: "listings",
        };

        let builder = IndexBuilder::new(BatchFetcher::new(&store, None), None, None, IndexPlan::cart());
        let refs = References {
            listing_ids: ids(&["L1"]),
            inventory_ids: ids(&["PB1__TB1"]),
            model_ids: vec![],
        };
        let indices = builder.build(&refs).await;

        assert!(indices.listings.is_none());
        assert!(indices.prices.is_none());
        assert_eq!(indices.product_name("PB1"), Some("Classic Tee"));
    }

    #[tokio::test]
    async fn organizations_fall_back_to_resolver() {
        let store = InMemoryDocumentStore::new();
        store
            .upsert(&ProductBlueprint {
                id: "PB1".into(),
                product_name: "Classic Tee".into(),
                brand_id: "B1".into(),
                ..Default::default()
            })
            .unwrap();
        store
            .upsert(&TokenBlueprint {
                id: "TB1".into(),
                name: "Tee Token".into(),
                icon_url: "https://cdn.example/tee.png".into(),
                ..Default::default()
            })
            .unwrap();

        let builder = IndexBuilder::new(
            BatchFetcher::new(&store, None),
            Some(&FixedNames),
            None,
            IndexPlan::preview(),
        );
        let mut indices = Indices::default();
        builder.extend_blueprints(&mut indices, &ids(&["PB1__TB1"])).await;

        assert_eq!(indices.token_name("TB1"), Some("Tee Token"));
        assert_eq!(
            indices.token("TB1").unwrap().icon_url.as_deref(),
            Some("https://cdn.example/tee.png")
        );
        assert_eq!(indices.brand_name("B1"), Some("brand B1"));
        assert_eq!(indices.company_name(None, Some("B1")), Some("company C9"));
    }
}

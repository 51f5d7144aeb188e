//! ReadModelResolver - buyer-facing queries over the normalized collections.
//!
//! ## Example
//!
//! ```ignore
//! let resolver = ReadModelResolver::new(store.clone(), store.clone())
//!     .with_name_resolver(Arc::new(DocumentNameResolver::new(store.clone())))
//!     .with_config(ResolverConfig::from_toml_str(&source)?);
//!
//! let (ctx, _cancel) = RequestContext::new();
//! let view = resolver.resolve_cart_view(&ctx, "avatar-1").await?;
//! ```

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use tracing::instrument;

use crate::config::ResolverConfig;
use crate::context::RequestContext;
use crate::document::{BatchStore, Document, DocumentsExt, PrimaryStore};
use crate::dto::{CartView, CatalogView, PreviewView};
use crate::error::ResolveError;
use crate::names::NameResolver;
use crate::records::{non_blank, Cart, Listing};
use crate::resolve::{
    assemble_cart_view, assemble_catalog, assemble_preview, collect_references, BatchFetcher,
    IndexBuilder, IndexPlan,
};

/// Resolves cart, preview and catalog views.
///
/// Stateless between requests; share it behind an `Arc`.
#[derive(Clone)]
pub struct ReadModelResolver {
    primary: Arc<dyn PrimaryStore>,
    batch: Arc<dyn BatchStore>,
    names: Option<Arc<dyn NameResolver>>,
    config: ResolverConfig,
}

impl ReadModelResolver {
    /// A resolver with no name resolver and default configuration.
    pub fn new(primary: Arc<dyn PrimaryStore>, batch: Arc<dyn BatchStore>) -> Self {
        Self {
            primary,
            batch,
            names: None,
            config: ResolverConfig::default(),
        }
    }

    /// Fallback for names and model details the direct records lack.
    pub fn with_name_resolver(mut self, names: Arc<dyn NameResolver>) -> Self {
        self.names = Some(names);
        self
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The full cart of `avatar_id`.
    #[instrument(skip(self, ctx))]
    pub async fn resolve_cart_view(
        &self,
        ctx: &RequestContext,
        avatar_id: &str,
    ) -> Result<CartView, ResolveError> {
        self.bound(ctx, async {
            let cart = self.load_cart(avatar_id).await?;
            let Some(refs) = collect_references(cart.items.values(), self.model_details()) else {
                return Ok(CartView {
                    avatar_id: cart.avatar_id,
                    items: BTreeMap::new(),
                });
            };

            let indices = self.builder(IndexPlan::cart()).build(&refs).await;
            Ok(assemble_cart_view(&cart, &indices))
        })
        .await
    }

    /// A single cart line with full detail.
    #[instrument(skip(self, ctx))]
    pub async fn resolve_preview(
        &self,
        ctx: &RequestContext,
        avatar_id: &str,
        item_key: &str,
    ) -> Result<PreviewView, ResolveError> {
        self.bound(ctx, async {
            let cart = self.load_cart(avatar_id).await?;
            let item_not_found = || ResolveError::ItemNotFound {
                cart_id: avatar_id.to_string(),
                item_key: item_key.to_string(),
            };

            let item = cart.items.get(item_key).ok_or_else(item_not_found)?;
            if !item.is_valid() {
                return Err(item_not_found());
            }

            let refs = collect_references([item], self.model_details()).unwrap_or_default();
            let indices = self.builder(IndexPlan::preview()).build(&refs).await;
            assemble_preview(item_key, item, &indices).ok_or_else(item_not_found)
        })
        .await
    }

    /// Listings on sale, filtered by the configured status.
    #[instrument(skip(self, ctx))]
    pub async fn resolve_catalog(&self, ctx: &RequestContext) -> Result<CatalogView, ResolveError> {
        self.bound(ctx, async {
            let mut listings: Vec<Listing> = self
                .primary
                .as_ref()
                .documents::<Listing>()
                .all()
                .await?
                .into_iter()
                .map(|(id, mut listing)| {
                    if listing.id.trim().is_empty() {
                        listing.id = id;
                    }
                    listing
                })
                .collect();
            if let Some(status) = self.config.catalog_status.as_deref() {
                listings.retain(|l| l.status.trim() == status);
            }
            listings.retain(|l| non_blank(&l.id).is_some());
            listings.sort_by(|a, b| a.id.cmp(&b.id));

            let indices = self
                .builder(IndexPlan::catalog())
                .build_for_listings(&listings)
                .await;
            Ok(CatalogView {
                items: assemble_catalog(&listings, &indices),
            })
        })
        .await
    }

    /// Race `pipeline` against the request context.
    async fn bound<T, F>(&self, ctx: &RequestContext, pipeline: F) -> Result<T, ResolveError>
    where
        F: Future<Output = Result<T, ResolveError>>,
    {
        if ctx.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = ctx.cancelled() => {
                tracing::debug!("request cancelled; abandoning resolution");
                Err(ResolveError::Cancelled)
            }
            result = pipeline => result,
        }
    }

    async fn load_cart(&self, avatar_id: &str) -> Result<Cart, ResolveError> {
        let Some(id) = non_blank(avatar_id) else {
            return Err(ResolveError::not_found(Cart::COLLECTION, avatar_id));
        };
        let mut cart = self
            .primary
            .as_ref()
            .documents::<Cart>()
            .get(id)
            .await?
            .ok_or_else(|| ResolveError::not_found(Cart::COLLECTION, id))?;
        if cart.avatar_id.trim().is_empty() {
            cart.avatar_id = id.to_string();
        }
        Ok(cart)
    }

    fn model_details(&self) -> bool {
        self.config.resolve_model_details && self.names.is_some()
    }

    fn builder(&self, mut plan: IndexPlan) -> IndexBuilder<'_> {
        plan.model_details &= self.model_details();
        plan.name_fallbacks &= self.config.resolve_names;
        IndexBuilder::new(
            BatchFetcher::new(self.batch.as_ref(), self.config.fetch_timeout()),
            self.names.as_deref(),
            self.config.fetch_timeout(),
            plan,
        )
    }
}

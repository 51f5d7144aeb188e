//! Buyer-facing read models for a marketplace backend.
//!
//! Carts, listings, inventories and blueprints are stored normalized across
//! independent document collections. [`ReadModelResolver`] answers the
//! buyer-facing queries (cart view, item preview, catalog) by batch-fetching
//! each referenced collection once, indexing the results per request, and
//! assembling an allow-listed DTO. Missing or unavailable secondary data
//! leaves fields unset instead of failing the request.

extern crate self as storefront_views;

mod config;
mod context;
mod document;
mod dto;
mod error;
mod names;
mod query;

pub mod keys;
pub mod records;
pub mod resolve;

pub use config::ResolverConfig;
pub use context::{CancelHandle, RequestContext};
pub use document::{
    AliasTable, BatchStore, Document, DocumentRepository, DocumentsExt, InMemoryDocumentStore,
    Nested, PrimaryStore, StoreError,
};
pub use dto::{CartView, CartViewItem, CatalogItem, CatalogPrice, CatalogView, PreviewView};
pub use error::ResolveError;
pub use names::{DocumentNameResolver, ModelVariant, NameResolver};
pub use query::ReadModelResolver;

// Re-export the derive macro alongside the trait it implements
pub use storefront_views_macros::Document;

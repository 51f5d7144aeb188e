//! Cross-collection read-model resolution.
//!
//! A query runs as a short pipeline:
//!
//! 1. load the primary record (hard failure if missing),
//! 2. collect deduplicated references per collection,
//! 3. batch-fetch each collection once, concurrently where independent,
//! 4. build request-scoped indices,
//! 5. assemble the DTO in one pass.
//!
//! Steps 3 and 4 degrade instead of failing: an unavailable collection only
//! leaves the fields it would have filled unset, for every item.

mod assemble;
mod fetch;
mod index;
mod references;

pub use assemble::{assemble_cart_view, assemble_catalog, assemble_item, assemble_preview};
pub use fetch::{Batch, BatchFetcher};
pub use index::{
    inventory_index, BlueprintRefs, BrandMeta, IndexBuilder, IndexPlan, Indices, ListingMeta,
    ModelMeta, OwnerRefs,
};
pub use references::{collect_references, IdSet, References};

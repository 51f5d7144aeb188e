//! DTO assembly - one pass over the primary record, consulting the indices.

use std::collections::HashSet;

use super::index::Indices;
use crate::dto::{CartView, CartViewItem, CatalogItem, CatalogPrice, PreviewView};
use crate::records::{non_blank, Cart, LineItem, Listing};

/// Build a cart row, or `None` when the line item is invalid.
///
/// Resolution order: listing title/image, price by listing then model,
/// product blueprint (inventory record, then inventory key), product name,
/// model size/color. Anything unresolved stays unset.
pub fn assemble_item(item: &LineItem, indices: &Indices) -> Option<CartViewItem> {
    if !item.is_valid() {
        return None;
    }

    let inventory_id = item.inventory_id.trim();
    let listing_id = item.listing_id.trim();
    let model_id = item.model_id.trim();

    let listing = indices.listing(listing_id);
    let product_blueprint_id = indices.blueprints(inventory_id).product_blueprint_id;
    let product_name = product_blueprint_id
        .as_deref()
        .and_then(|id| indices.product_name(id))
        .map(str::to_string);
    let model = indices.model(model_id);

    Some(CartViewItem {
        inventory_id: inventory_id.to_string(),
        listing_id: listing_id.to_string(),
        model_id: model_id.to_string(),
        quantity: item.quantity,
        title: listing.and_then(|l| l.title.clone()),
        image_id: listing.and_then(|l| l.image_id.clone()),
        price: indices.price(listing_id, model_id),
        product_blueprint_id,
        product_name,
        size: model.and_then(|m| m.size.clone()),
        color: model.and_then(|m| m.color.clone()),
    })
}

/// All valid cart rows, keyed by their item key. Invalid items are dropped.
pub fn assemble_cart_view(cart: &Cart, indices: &Indices) -> CartView {
    let items = cart
        .items
        .iter()
        .filter_map(|(key, item)| match assemble_item(item, indices) {
            Some(row) => Some((key.clone(), row)),
            None => {
                tracing::debug!(item_key = %key, "dropping invalid line item");
                None
            }
        })
        .collect();

    CartView {
        avatar_id: cart.avatar_id.clone(),
        items,
    }
}

/// A cart row plus token, brand, company and model detail.
pub fn assemble_preview(item_key: &str, item: &LineItem, indices: &Indices) -> Option<PreviewView> {
    let row = assemble_item(item, indices)?;

    let blueprints = indices.blueprints(&row.inventory_id);
    let product = blueprints
        .product_blueprint_id
        .as_deref()
        .and_then(|id| indices.product(id));
    let token_id = blueprints.token_blueprint_id.as_deref();
    let token = token_id.and_then(|id| indices.token(id));
    let model = indices.model(&row.model_id);

    let brand_id = product
        .and_then(|p| p.brand_id.as_deref())
        .or_else(|| token.and_then(|t| t.brand_id.as_deref()));
    let company_id = product
        .and_then(|p| p.company_id.as_deref())
        .or_else(|| token.and_then(|t| t.company_id.as_deref()));

    Some(PreviewView {
        item_key: item_key.to_string(),
        model_number: model.and_then(|m| m.model_number.clone()),
        rgb: model.and_then(|m| m.rgb),
        token_name: token_id
            .and_then(|id| indices.token_name(id))
            .map(str::to_string),
        icon_url: token.and_then(|t| t.icon_url.clone()),
        brand_name: brand_id
            .and_then(|id| indices.brand_name(id))
            .map(str::to_string),
        company_name: indices.company_name(company_id, brand_id).map(str::to_string),
        item: row,
    })
}

/// Catalog rows for `listings`, in the order given.
pub fn assemble_catalog(listings: &[Listing], indices: &Indices) -> Vec<CatalogItem> {
    listings
        .iter()
        .filter_map(|listing| {
            let listing_id = non_blank(&listing.id)?;
            let meta = indices.listing(listing_id);

            let mut seen = HashSet::new();
            let prices = listing
                .prices
                .iter()
                .filter_map(|row| non_blank(&row.model_id))
                .filter(|model_id| seen.insert(*model_id))
                .filter_map(|model_id| {
                    indices.price(listing_id, model_id).map(|price| CatalogPrice {
                        model_id: model_id.to_string(),
                        price,
                    })
                })
                .collect();

            let blueprints = indices.blueprints(listing.inventory_id.trim());
            let product_id = blueprints.product_blueprint_id.as_deref();
            let token_id = blueprints.token_blueprint_id.as_deref();
            let brand_id = product_id
                .and_then(|id| indices.product(id))
                .and_then(|p| p.brand_id.as_deref())
                .or_else(|| {
                    token_id
                        .and_then(|id| indices.token(id))
                        .and_then(|t| t.brand_id.as_deref())
                });

            Some(CatalogItem {
                listing_id: listing_id.to_string(),
                title: meta.and_then(|m| m.title.clone()),
                image_id: meta.and_then(|m| m.image_id.clone()),
                prices,
                product_name: product_id
                    .and_then(|id| indices.product_name(id))
                    .map(str::to_string),
                token_name: token_id
                    .and_then(|id| indices.token_name(id))
                    .map(str::to_string),
                brand_name: brand_id
                    .and_then(|id| indices.brand_name(id))
                    .map(str::to_string),
            })
        })
        .collect()
}

mod document;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Document)]
// ============================================================================

/// Derive macro implementing `storefront_views::Document`.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Document)]
/// #[document(collection = "listings", aliases = LISTING_ALIASES)]
/// struct Listing {
///     #[document(id)]
///     pub id: String,
///     pub title: String,
/// }
/// ```
///
/// - `#[document(collection = "...")]` sets the collection name.
///   If omitted, defaults to snake_case struct name + "s".
/// - `#[document(aliases = PATH)]` binds the record's legacy field-name table
///   (a `const AliasTable`). If omitted, no aliases apply.
/// - `#[document(id)]` marks the field used as the unique identifier.
///   If omitted, defaults to a field named `id`.
#[proc_macro_derive(Document, attributes(document))]
pub fn derive_document(input: TokenStream) -> TokenStream {
    document::derive_document(input)
}

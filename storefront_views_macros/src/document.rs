use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, Path};

pub fn derive_document(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let attrs = match StructAttrs::parse(&input) {
        Ok(attrs) => attrs,
        Err(err) => return err.to_compile_error().into(),
    };

    let id_field = match extract_id_field(&input) {
        Some(field) => field,
        None => {
            return syn::Error::new_spanned(
                name,
                "Document derive: no field marked with #[document(id)] and no field named `id`",
            )
            .to_compile_error()
            .into();
        }
    };

    let collection = attrs
        .collection
        .unwrap_or_else(|| format!("{}s", to_snake_case(&name.to_string())));

    let aliases = attrs.aliases.map(|path| {
        quote! {
            const ALIASES: &'static storefront_views::AliasTable = &#path;
        }
    });

    let expanded = quote! {
        impl storefront_views::Document for #name {
            const COLLECTION: &'static str = #collection;
            #aliases

            fn id(&self) -> &str {
                &self.#id_field
            }
        }
    };

    TokenStream::from(expanded)
}

#[derive(Default)]
struct StructAttrs {
    collection: Option<String>,
    aliases: Option<Path>,
}

impl StructAttrs {
    fn parse(input: &DeriveInput) -> syn::Result<Self> {
        let mut attrs = StructAttrs::default();
        for attr in &input.attrs {
            if !attr.path().is_ident("document") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("collection") {
                    let value: LitStr = meta.value()?.parse()?;
                    attrs.collection = Some(value.value());
                    Ok(())
                } else if meta.path.is_ident("aliases") {
                    attrs.aliases = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("expected `collection` or `aliases`"))
                }
            })?;
        }
        Ok(attrs)
    }
}

fn extract_id_field(input: &DeriveInput) -> Option<syn::Ident> {
    let Data::Struct(data_struct) = &input.data else {
        return None;
    };
    let Fields::Named(fields) = &data_struct.fields else {
        return None;
    };

    for field in &fields.named {
        for attr in &field.attrs {
            if !attr.path().is_ident("document") {
                continue;
            }
            let mut is_id = false;
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    is_id = true;
                }
                Ok(())
            });
            if is_id {
                return field.ident.clone();
            }
        }
    }

    // Default: a field named "id"
    fields
        .named
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .find(|ident| *ident == "id")
        .cloned()
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}

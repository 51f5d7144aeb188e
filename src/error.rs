use thiserror::Error;

use crate::document::StoreError;

/// Errors surfaced by the read-model queries.
///
/// Only hard failures live here. A missing secondary record, an unavailable
/// secondary collection or an empty name lookup never becomes an error; the
/// corresponding output field is simply left unset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The primary record does not exist.
    #[error("not found: {collection}:{id}")]
    NotFound { collection: String, id: String },
    /// The requested item key is not a valid line of the cart.
    #[error("item {item_key} not found in cart {cart_id}")]
    ItemNotFound { cart_id: String, item_key: String },
    /// The primary store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// The caller's request context was cancelled.
    #[error("request cancelled")]
    Cancelled,
}

impl ResolveError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        ResolveError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ResolveError::NotFound { .. } | ResolveError::ItemNotFound { .. }
        )
    }

    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ResolveError::NotFound { .. } => 404,
            ResolveError::ItemNotFound { .. } => 404,
            ResolveError::Store(_) => 500,
            ResolveError::Cancelled => 499,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ResolveError::not_found("carts", "a").status_code(), 404);
        assert_eq!(ResolveError::Cancelled.status_code(), 499);
        assert_eq!(
            ResolveError::from(StoreError::Storage("down".into())).status_code(),
            500
        );
    }

    #[test]
    fn display() {
        assert_eq!(
            ResolveError::not_found("carts", "avatar-1").to_string(),
            "not found: carts:avatar-1"
        );
        let err = ResolveError::ItemNotFound {
            cart_id: "avatar-1".into(),
            item_key: "k9".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "item k9 not found in cart avatar-1");
    }
}

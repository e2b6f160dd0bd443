//! HTTP handlers, one module per resource.

pub mod carts;
pub mod categories;
pub mod ops;
pub mod orders;
pub mod products;

use serde::Serialize;

use crate::error::ApiError;

/// Body of every list endpoint.
#[derive(Debug, Serialize)]
pub struct DtoCollectionResponse<T> {
    pub collection: Vec<T>,
}

impl<T> From<Vec<T>> for DtoCollectionResponse<T> {
    fn from(collection: Vec<T>) -> Self {
        Self { collection }
    }
}

/// Parses a path identity, ignoring surrounding whitespace.
fn parse_id<T: From<i32>>(raw: &str) -> Result<T, ApiError> {
    raw.trim()
        .parse::<i32>()
        .map(T::from)
        .map_err(|e| ApiError::BadRequest(format!("Invalid id '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use common::CartId;

    use super::*;

    #[test]
    fn parse_id_trims_whitespace() {
        let id: CartId = parse_id(" 12 ").unwrap();
        assert_eq!(id, CartId::new(12));
    }

    #[test]
    fn parse_id_rejects_non_integers() {
        assert!(matches!(
            parse_id::<CartId>("abc"),
            Err(ApiError::BadRequest(_))
        ));
        assert!(parse_id::<CartId>("1.5").is_err());
    }
}

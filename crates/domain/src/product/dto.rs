use common::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::CategoryDto;

/// Product as exchanged over HTTP, embedding its category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub product_title: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price_unit: Option<Decimal>,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryDto>,
}

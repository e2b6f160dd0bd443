use entity_store::{Category, Product};

use super::ProductDto;
use crate::category::CategoryDto;

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            product_id: product.product_id,
            product_title: product.product_title,
            image_url: product.image_url,
            sku: product.sku,
            price_unit: product.price_unit,
            quantity: product.quantity,
            category: product.category.map(CategoryDto::from),
        }
    }
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Self {
            product_id: dto.product_id,
            product_title: dto.product_title,
            image_url: dto.image_url,
            sku: dto.sku,
            price_unit: dto.price_unit,
            quantity: dto.quantity,
            category: dto
                .category
                .map(|category| Category::reference(category.category_id)),
        }
    }
}

/// Applies the fields present in `dto` to a loaded product. The identity is
/// kept.
pub(crate) fn overlay(mut product: Product, dto: ProductDto) -> Product {
    if dto.product_title.is_some() {
        product.product_title = dto.product_title;
    }
    if dto.image_url.is_some() {
        product.image_url = dto.image_url;
    }
    if dto.sku.is_some() {
        product.sku = dto.sku;
    }
    if dto.price_unit.is_some() {
        product.price_unit = dto.price_unit;
    }
    if dto.quantity.is_some() {
        product.quantity = dto.quantity;
    }
    if let Some(category) = dto.category {
        product.category = Some(Category::reference(category.category_id));
    }
    product
}

use entity_store::Category;

use super::CategoryDto;

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            category_id: category.category_id,
            category_title: category.category_title,
            image_url: category.image_url,
        }
    }
}

impl From<CategoryDto> for Category {
    fn from(dto: CategoryDto) -> Self {
        Self {
            category_id: dto.category_id,
            category_title: dto.category_title,
            image_url: dto.image_url,
        }
    }
}

/// Applies the fields present in `dto` to a loaded category. The identity is
/// kept.
pub(crate) fn overlay(mut category: Category, dto: CategoryDto) -> Category {
    if dto.category_title.is_some() {
        category.category_title = dto.category_title;
    }
    if dto.image_url.is_some() {
        category.image_url = dto.image_url;
    }
    category
}

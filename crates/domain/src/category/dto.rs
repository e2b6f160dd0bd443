use common::CategoryId;
use serde::{Deserialize, Serialize};

/// Category as exchanged over HTTP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub category_title: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

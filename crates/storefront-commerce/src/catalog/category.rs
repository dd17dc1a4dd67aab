//! Categories and the storefront configuration document.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A top-level product category (tab in the listing).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Display title.
    pub title: String,
    /// Category description.
    #[serde(default)]
    pub description: String,
    /// Category image URL.
    #[serde(default)]
    pub image_url: String,
}

/// Brand and category configuration served by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    pub brand_name: String,
    #[serde(default)]
    pub hero_headline: String,
    #[serde(default)]
    pub hero_description: String,
    /// Categories in display order.
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl StorefrontConfig {
    /// Look up a category by ID.
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// The category selected when the listing first opens.
    pub fn default_category(&self) -> Option<&Category> {
        self.categories.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_wire_format() {
        let json = r#"{
            "brandName": "Little Threads",
            "heroHeadline": "Dress the whole family",
            "heroDescription": "Clothing from around the world",
            "categories": [
                {"id": "men", "title": "Men", "description": "", "imageUrl": "/men.png"},
                {"id": "kids", "title": "Kids", "description": "", "imageUrl": "/kids.png"}
            ]
        }"#;
        let config: StorefrontConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.brand_name, "Little Threads");
        assert_eq!(config.default_category().unwrap().id.as_str(), "men");
        assert_eq!(
            config.category(&CategoryId::new("kids")).unwrap().title,
            "Kids"
        );
        assert!(config.category(&CategoryId::new("pets")).is_none());
    }
}

//! Regional style tags and style filtering.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Regional style classification attached to products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegionStyle {
    SouthAmerican,
    European,
    Australian,
    Italian,
    American,
    Canadian,
}

impl RegionStyle {
    /// Every style, in display order.
    pub const ALL: [RegionStyle; 6] = [
        RegionStyle::SouthAmerican,
        RegionStyle::European,
        RegionStyle::Australian,
        RegionStyle::Italian,
        RegionStyle::American,
        RegionStyle::Canadian,
    ];

    /// Wire name (e.g. "southAmerican").
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionStyle::SouthAmerican => "southAmerican",
            RegionStyle::European => "european",
            RegionStyle::Australian => "australian",
            RegionStyle::Italian => "italian",
            RegionStyle::American => "american",
            RegionStyle::Canadian => "canadian",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RegionStyle::SouthAmerican => "South American",
            RegionStyle::European => "European",
            RegionStyle::Australian => "Australian",
            RegionStyle::Italian => "Italian",
            RegionStyle::American => "American",
            RegionStyle::Canadian => "Canadian",
        }
    }

    /// Parse a wire name.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.as_str() == s)
    }
}

impl fmt::Display for RegionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Style filter selected in the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StyleFilter {
    #[default]
    All,
    Only(RegionStyle),
}

impl StyleFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            StyleFilter::All => true,
            StyleFilter::Only(style) => product.has_style(*style),
        }
    }
}

/// Keep the products matching `filter`, preserving catalog order.
pub fn filter_by_style(products: Vec<Product>, filter: StyleFilter) -> Vec<Product> {
    products.into_iter().filter(|p| filter.matches(p)).collect()
}

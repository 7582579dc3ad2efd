use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchasable item from the catalog.
///
/// Products are immutable for the lifetime of a session; the cart copies the
/// display fields it needs rather than holding references into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Unit price in dollars, e.g. `"79.99"`.
    pub price: Decimal,
    pub category: Category,
    /// Product image URL at card size (400x400).
    pub image: String,
    pub description: String,
}

impl Product {
    /// Image URL at the larger size used on the product detail page.
    #[must_use]
    pub fn detail_image(&self) -> String {
        self.image.replace("w=400&h=400", "w=800&h=800")
    }

    /// Case-insensitive substring match against name and description.
    ///
    /// `needle_lower` must already be lowercased.
    #[must_use]
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.name.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Accessories,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Electronics,
        Category::Clothing,
        Category::Accessories,
    ];

    /// Human-readable label shown on the filter bar.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Accessories => "Accessories",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Electronics => write!(f, "electronics"),
            Category::Clothing => write!(f, "clothing"),
            Category::Accessories => write!(f, "accessories"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "electronics" => Ok(Category::Electronics),
            "clothing" => Ok(Category::Clothing),
            "accessories" => Ok(Category::Accessories),
            other => Err(format!(
                "unknown category '{other}'; expected electronics, clothing, or accessories"
            )),
        }
    }
}

/// Category selection on the catalog page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Filter bar entries in display order.
    #[must_use]
    pub fn options() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All Products",
            CategoryFilter::Only(category) => category.label(),
        }
    }

    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse::<Category>().map(CategoryFilter::Only)
        }
    }
}

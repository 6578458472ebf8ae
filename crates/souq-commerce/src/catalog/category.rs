//! Category types used to scope product queries.

use crate::catalog::lenient;
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// Display icon picked from the category name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryIcon {
    Electronics,
    Food,
    Beauty,
    Chocolate,
    Gaming,
    Home,
    Automotive,
    Books,
    #[default]
    Default,
}

impl CategoryIcon {
    const KEYWORDS: [(&'static str, CategoryIcon); 8] = [
        ("electronics", CategoryIcon::Electronics),
        ("food", CategoryIcon::Food),
        ("beauty", CategoryIcon::Beauty),
        ("chocolate", CategoryIcon::Chocolate),
        ("gaming", CategoryIcon::Gaming),
        ("home", CategoryIcon::Home),
        ("automotive", CategoryIcon::Automotive),
        ("books", CategoryIcon::Books),
    ];

    /// First keyword contained in the (lowercased) name wins.
    pub fn for_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, icon)| *icon)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryIcon::Electronics => "electronics",
            CategoryIcon::Food => "food",
            CategoryIcon::Beauty => "beauty",
            CategoryIcon::Chocolate => "chocolate",
            CategoryIcon::Gaming => "gaming",
            CategoryIcon::Home => "home",
            CategoryIcon::Automotive => "automotive",
            CategoryIcon::Books => "books",
            CategoryIcon::Default => "default",
        }
    }
}

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Image path or URL as sent by the backend.
    pub image: Option<String>,
    pub description: String,
    pub icon: CategoryIcon,
}

/// A category record exactly as the backend sends it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCategory {
    pub id: Option<CategoryId>,
    #[serde(alias = "category_name", deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub image: Option<String>,
    #[serde(alias = "desc", deserialize_with = "lenient::string")]
    pub description: Option<String>,
}

impl Category {
    /// Normalize a backend record.
    ///
    /// `position` is the record's zero-based index in the response and
    /// stands in for a missing id.
    pub fn from_raw(raw: RawCategory, position: usize) -> Self {
        let id = raw
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| CategoryId::new((position + 1).to_string()));
        let description = raw.description.unwrap_or_else(|| match &raw.name {
            Some(name) => format!("Explore {name}"),
            None => "Explore this category".to_string(),
        });
        let name = raw.name.unwrap_or_else(|| "Unnamed Category".to_string());
        Self {
            icon: CategoryIcon::for_name(&name),
            id,
            name,
            image: raw.image,
            description,
        }
    }
}

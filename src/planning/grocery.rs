//! Grocery list
//!
//! Aggregates ingredients across a plan and groups them by the first
//! matching keyword category.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use rmcp::schemars;
use serde::Serialize;

use crate::models::Plan;

/// Grocery aisle, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GroceryCategory {
    Proteins,
    Grains,
    Vegetables,
    Fruits,
    Dairy,
    Pantry,
    Other,
}

impl GroceryCategory {
    pub const ALL: [GroceryCategory; 7] = [
        GroceryCategory::Proteins,
        GroceryCategory::Grains,
        GroceryCategory::Vegetables,
        GroceryCategory::Fruits,
        GroceryCategory::Dairy,
        GroceryCategory::Pantry,
        GroceryCategory::Other,
    ];

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            GroceryCategory::Proteins => &[
                "chicken", "beef", "fish", "salmon", "tuna", "eggs", "tofu", "tempeh", "lentils",
                "chickpeas", "beans", "paneer",
            ],
            GroceryCategory::Grains => &[
                "rice", "quinoa", "oats", "bread", "pasta", "roti", "chapati", "noodles", "wheat",
                "barley",
            ],
            GroceryCategory::Vegetables => &[
                "broccoli", "spinach", "carrot", "tomato", "onion", "pepper", "cucumber", "lettuce",
                "cabbage", "cauliflower",
            ],
            GroceryCategory::Fruits => &[
                "apple", "banana", "orange", "berries", "mango", "grapes", "watermelon", "papaya",
            ],
            GroceryCategory::Dairy => &["milk", "yogurt", "cheese", "butter", "cream", "curd"],
            GroceryCategory::Pantry => &["oil", "salt", "pepper", "spices", "sugar", "flour", "sauce", "honey"],
            GroceryCategory::Other => &[],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroceryCategory::Proteins => "Proteins",
            GroceryCategory::Grains => "Grains",
            GroceryCategory::Vegetables => "Vegetables",
            GroceryCategory::Fruits => "Fruits",
            GroceryCategory::Dairy => "Dairy",
            GroceryCategory::Pantry => "Pantry",
            GroceryCategory::Other => "Other",
        }
    }

    /// First category with a keyword inside the ingredient; Other otherwise
    pub fn categorize(ingredient: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|category| category.keywords().iter().any(|k| ingredient.contains(k)))
            .unwrap_or(GroceryCategory::Other)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, schemars::JsonSchema)]
pub struct GroceryItem {
    pub name: String,
    pub quantity: String,
}

/// Items grouped by category, each group sorted by name
#[derive(Debug, Clone, Default, Serialize, schemars::JsonSchema)]
pub struct GroceryList {
    pub categories: BTreeMap<GroceryCategory, Vec<GroceryItem>>,
}

impl GroceryList {
    pub fn items(&self, category: GroceryCategory) -> &[GroceryItem] {
        self.categories.get(&category).map_or(&[], Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.values().all(Vec::is_empty)
    }

    /// Plain-text rendering, empty categories omitted
    pub fn to_text(&self) -> String {
        let mut text = String::from("NUTRINUDGE GROCERY LIST\n\n");
        for category in GroceryCategory::ALL {
            let items = self.items(category);
            if items.is_empty() {
                continue;
            }
            let _ = writeln!(text, "{}", category.label());
            for item in items {
                let _ = writeln!(text, "  • {} ({})", item.name, item.quantity);
            }
            text.push('\n');
        }
        text
    }
}

/// Build a grocery list from every ingredient in the plan.
///
/// Meals without ingredient lists contribute nothing.
pub fn generate_grocery_list(plan: &Plan) -> GroceryList {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for ingredient in plan.meals().flat_map(|m| m.ingredients.iter()) {
        let normalized = ingredient.trim().to_lowercase();
        if normalized.is_empty() {
            continue;
        }
        *counts.entry(normalized).or_default() += 1;
    }

    let mut list = GroceryList::default();
    for (ingredient, count) in counts {
        let quantity = if count > 1 {
            format!("{} servings", count)
        } else {
            "1 serving".to_string()
        };
        list.categories
            .entry(GroceryCategory::categorize(&ingredient))
            .or_default()
            .push(GroceryItem { name: capitalize_first(&ingredient), quantity });
    }

    for items in list.categories.values_mut() {
        items.sort_by(|a, b| a.name.cmp(&b.name));
    }
    list
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

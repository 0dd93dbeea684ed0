//! Dietary lexicon
//!
//! Static, read-only tables: diet type exclusions, allergen keywords, and
//! medical condition guidelines. All entries are lowercase.

// ============================================================================
// Diet Types
// ============================================================================

const VEGAN_EXCLUSIONS: &[&str] = &[
    "chicken", "beef", "pork", "lamb", "fish", "salmon", "tuna", "shrimp", "prawn",
    "egg", "eggs", "dairy", "milk", "cheese", "paneer", "yogurt", "curd", "butter",
    "ghee", "honey", "meat", "mutton",
];

const VEGETARIAN_EXCLUSIONS: &[&str] = &[
    "chicken", "beef", "pork", "lamb", "fish", "salmon", "tuna", "shrimp", "prawn",
    "meat", "mutton", "seafood",
];

const PESCATARIAN_EXCLUSIONS: &[&str] = &["chicken", "beef", "pork", "lamb", "meat", "mutton"];

/// Diet types with an entry in the lexicon
pub const DIET_TYPES: &[&str] = &[
    "vegan",
    "vegetarian",
    "pescatarian",
    "non-vegetarian",
    "mixed",
    "indian",
    "western",
    "mediterranean",
    "keto",
];

/// Forbidden food substrings for a diet type.
///
/// Unknown diet types (and the cuisine-style entries) have no exclusions.
pub fn diet_exclusions(diet_type: &str) -> &'static [&'static str] {
    match diet_type.trim().to_lowercase().as_str() {
        "vegan" => VEGAN_EXCLUSIONS,
        "vegetarian" => VEGETARIAN_EXCLUSIONS,
        "pescatarian" => PESCATARIAN_EXCLUSIONS,
        _ => &[],
    }
}

// ============================================================================
// Allergens
// ============================================================================

/// Allergen names with a keyword group
pub const ALLERGENS: &[&str] = &[
    "egg", "peanut", "tree nuts", "dairy", "gluten", "soy", "shellfish", "fish",
];

/// Surface keywords that indicate an allergen, or None for unknown allergens
pub fn allergen_keywords(allergen: &str) -> Option<&'static [&'static str]> {
    let keywords: &'static [&'static str] = match allergen.trim().to_lowercase().as_str() {
        "egg" => &["egg", "eggs", "omelette", "scrambled"],
        "peanut" => &["peanut", "peanuts", "peanut butter"],
        "tree nuts" => &["almond", "cashew", "walnut", "pistachio", "hazelnut"],
        "dairy" => &["milk", "cheese", "paneer", "yogurt", "curd", "butter", "cream", "ghee"],
        "gluten" => &["wheat", "bread", "roti", "chapati", "pasta", "noodles", "barley"],
        "soy" => &["soy", "tofu", "tempeh", "edamame"],
        "shellfish" => &["shrimp", "prawn", "crab", "lobster", "oyster"],
        "fish" => &["fish", "salmon", "tuna", "mackerel"],
        _ => return None,
    };
    Some(keywords)
}

// ============================================================================
// Medical Conditions
// ============================================================================

/// Dietary guideline for a medical condition.
///
/// Only `avoid_foods` is enforced by the validator; the caps and preferred
/// foods feed the generator prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MedicalGuideline {
    pub condition: &'static str,
    /// Maximum daily carbohydrates in grams
    pub max_carbs_g: Option<f64>,
    /// Maximum daily sodium in milligrams
    pub max_sodium_mg: Option<f64>,
    pub avoid_foods: &'static [&'static str],
    pub prefer_foods: &'static [&'static str],
    pub notes: &'static str,
}

pub const MEDICAL_GUIDELINES: &[MedicalGuideline] = &[
    MedicalGuideline {
        condition: "diabetes",
        max_carbs_g: Some(150.0),
        max_sodium_mg: None,
        avoid_foods: &["sugar", "candy", "soda", "white bread", "white rice", "pastries", "sweetened"],
        prefer_foods: &["low-gi", "whole grain", "fiber", "lean protein"],
        notes: "Focus on low-glycemic index foods and distribute carbs evenly across meals",
    },
    MedicalGuideline {
        condition: "hypertension",
        max_carbs_g: None,
        max_sodium_mg: Some(1500.0),
        avoid_foods: &["salt", "salty", "pickles", "processed meat", "canned"],
        prefer_foods: &["low-sodium", "fresh vegetables", "fruits", "whole grains"],
        notes: "Limit sodium intake and focus on potassium-rich foods",
    },
    MedicalGuideline {
        condition: "pcos",
        max_carbs_g: Some(130.0),
        max_sodium_mg: None,
        avoid_foods: &["sugar", "refined carbs", "processed foods"],
        prefer_foods: &["low-gi", "anti-inflammatory", "omega-3", "fiber"],
        notes: "Focus on low-GI foods and anti-inflammatory diet",
    },
    MedicalGuideline {
        condition: "lactose intolerance",
        max_carbs_g: None,
        max_sodium_mg: None,
        avoid_foods: &["milk", "cheese", "yogurt", "cream", "dairy"],
        prefer_foods: &["lactose-free", "almond milk", "coconut milk"],
        notes: "Exclude all dairy products or use lactose-free alternatives",
    },
    MedicalGuideline {
        condition: "thyroid",
        max_carbs_g: None,
        max_sodium_mg: None,
        avoid_foods: &["soy", "cruciferous raw"],
        prefer_foods: &["iodine-rich", "selenium-rich", "zinc-rich"],
        notes: "Include iodine and selenium-rich foods, cook cruciferous vegetables",
    },
];

/// Guideline for a condition, or None when the condition is not in the lexicon
pub fn medical_guideline(condition: &str) -> Option<&'static MedicalGuideline> {
    let key = condition.trim().to_lowercase();
    MEDICAL_GUIDELINES.iter().find(|g| g.condition == key)
}

// ============================================================================
// Glycemic Index
// ============================================================================

pub const LOW_GI_FOODS: &[&str] = &[
    "oats", "quinoa", "brown rice", "sweet potato", "lentils", "chickpeas",
    "beans", "apples", "berries", "whole grain",
];

pub const HIGH_GI_AVOID: &[&str] = &[
    "white bread", "white rice", "potato", "cornflakes", "instant oats",
    "candy", "soda", "pastries",
];

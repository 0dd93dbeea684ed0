//! Fallback plan generator
//!
//! Deterministic 7-day plan used when the generator fails or the quality
//! gate rejects its output. Never fails and never calls out.

use crate::models::{Day, Macros, Meal, MealType, Plan, PlanSummary, UserProfile};

/// Days in a fallback plan
pub const FALLBACK_DAYS: usize = 7;

pub const FALLBACK_NOTES: &str = "Safe fallback plan: generated without the AI service";

/// Coarse diet classification driving fallback meal choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietClass {
    Vegan,
    Vegetarian,
    Pescatarian,
    Omnivore,
}

impl DietClass {
    /// Classify a free-form diet preference; "non-vegetarian" is omnivore
    pub fn classify(diet_preference: &str) -> Self {
        let diet = diet_preference.trim().to_lowercase();
        if diet.starts_with("non") {
            DietClass::Omnivore
        } else if diet.contains("vegan") {
            DietClass::Vegan
        } else if diet.contains("vegetarian") {
            DietClass::Vegetarian
        } else if diet.contains("pescatarian") {
            DietClass::Pescatarian
        } else {
            DietClass::Omnivore
        }
    }
}

/// Static description of one fallback meal
struct Template {
    name: &'static str,
    ingredients: &'static [&'static str],
    portions: &'static str,
    allergens: &'static [&'static str],
}

const OATMEAL: Template = Template {
    name: "Oatmeal with berries",
    ingredients: &["rolled oats", "blueberries", "water"],
    portions: "1 bowl (50g oats)",
    allergens: &[],
};

const VEGAN_OATMEAL: Template = Template {
    name: "Oatmeal with berries and chia seeds",
    ingredients: &["rolled oats", "blueberries", "chia seeds", "water"],
    portions: "1 bowl (50g oats)",
    allergens: &[],
};

const INDIAN_OATS: Template = Template {
    name: "Oats with nuts and fruit",
    ingredients: &["rolled oats", "walnuts", "banana", "water"],
    portions: "1 bowl (50g oats)",
    allergens: &[],
};

const DAL: Template = Template {
    name: "Lentil dal with brown rice and vegetables",
    ingredients: &["red lentils", "brown rice", "spinach", "tomato", "onion", "cumin"],
    portions: "1 plate",
    allergens: &[],
};

const CHICKEN_RICE: Template = Template {
    name: "Grilled chicken with rice",
    ingredients: &["chicken breast", "brown rice", "broccoli"],
    portions: "1 plate",
    allergens: &[],
};

const YOGURT: Template = Template {
    name: "Greek yogurt with fruits",
    ingredients: &["greek yogurt", "mixed berries"],
    portions: "1 cup",
    allergens: &["dairy"],
};

const HUMMUS: Template = Template {
    name: "Hummus with carrot sticks",
    ingredients: &["chickpeas", "tahini", "carrots", "lemon"],
    portions: "1 cup",
    allergens: &[],
};

const TOFU_QUINOA: Template = Template {
    name: "Tofu stir-fry with quinoa",
    ingredients: &["tofu", "quinoa", "broccoli", "bell pepper", "olive oil"],
    portions: "1 plate",
    allergens: &[],
};

const PANEER_QUINOA: Template = Template {
    name: "Paneer and vegetable curry with quinoa",
    ingredients: &["paneer", "spinach", "tomato", "onion", "quinoa"],
    portions: "1 plate",
    allergens: &[],
};

const FISH_QUINOA: Template = Template {
    name: "Grilled fish with quinoa",
    ingredients: &["white fish", "quinoa", "lemon", "spinach"],
    portions: "1 plate",
    allergens: &[],
};

const SALMON: Template = Template {
    name: "Salmon with vegetables",
    ingredients: &["salmon", "zucchini", "bell pepper", "olive oil"],
    portions: "1 plate",
    allergens: &[],
};

/// Generate the fallback plan.
///
/// Each main meal gets a quarter of the calories and macros; the snack gets
/// 70% of a main meal's calories and a sixth of the macros, so the day stays
/// under the daily target. A dairy allergy or lactose intolerance on the
/// profile swaps the yogurt snack for a plant-based one.
pub fn generate_fallback_plan(
    target_calories: f64,
    macros: &Macros,
    diet_preference: &str,
    profile: Option<&UserProfile>,
) -> Plan {
    let class = DietClass::classify(diet_preference);
    let indian = diet_preference.to_lowercase().contains("indian");
    let avoid_dairy = profile.map_or(false, |p| {
        p.has_allergy("dairy")
            || p.has_allergy("lactose")
            || p.conditions
                .iter()
                .any(|c| c.to_lowercase().contains("lactose"))
    });

    let (breakfast, lunch, snack, dinner) = match class {
        DietClass::Vegan => (&VEGAN_OATMEAL, &DAL, &HUMMUS, &TOFU_QUINOA),
        DietClass::Vegetarian => (&OATMEAL, &DAL, &YOGURT, &PANEER_QUINOA),
        DietClass::Pescatarian => (&OATMEAL, &DAL, &YOGURT, &FISH_QUINOA),
        DietClass::Omnivore if indian => (&INDIAN_OATS, &DAL, &YOGURT, &FISH_QUINOA),
        DietClass::Omnivore => (&OATMEAL, &CHICKEN_RICE, &YOGURT, &SALMON),
    };
    let snack = if avoid_dairy { &HUMMUS } else { snack };
    let dinner = if avoid_dairy && class == DietClass::Vegetarian {
        &TOFU_QUINOA
    } else {
        dinner
    };

    let per_meal = (target_calories / 4.0).round();
    let snack_calories = (per_meal * 0.7).round();
    let main_macros = macros.apportion(4.0);
    let snack_macros = macros.apportion(6.0);

    tracing::info!(
        "Building fallback plan ({:?}, {} kcal/day)",
        class,
        target_calories
    );

    let days = (0..FALLBACK_DAYS)
        .map(|i| Day {
            day: format!("Day {}", i + 1),
            meals: vec![
                build(MealType::Breakfast, breakfast, per_meal, main_macros),
                build(MealType::Lunch, lunch, per_meal, main_macros),
                build(MealType::Snack, snack, snack_calories, snack_macros),
                build(MealType::Dinner, dinner, per_meal, main_macros),
            ],
        })
        .collect();

    Plan {
        summary: PlanSummary {
            target_calories,
            macros: *macros,
            notes: FALLBACK_NOTES.to_string(),
        },
        days,
    }
}

fn build(meal_type: MealType, template: &Template, calories: f64, macros: Macros) -> Meal {
    Meal {
        meal_type,
        name: template.name.to_string(),
        ingredients: template.ingredients.iter().map(|s| s.to_string()).collect(),
        portions: template.portions.to_string(),
        calories,
        macros,
        allergens: template.allergens.iter().map(|s| s.to_string()).collect(),
        tags: vec!["safe".to_string()],
    }
}

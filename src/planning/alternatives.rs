//! Meal alternatives
//!
//! Static swap catalogue per meal type. Candidates are filtered through the
//! meal validator so a swap never reintroduces a violation.

use crate::models::{Constraints, Macros, Meal, MealType, Weekday};
use crate::validation::validate_meal;

struct CatalogueItem {
    name: &'static str,
    portions: &'static str,
    calories: f64,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
    ingredients: &'static [&'static str],
}

const fn item(
    name: &'static str,
    portions: &'static str,
    calories: f64,
    macros: (f64, f64, f64),
    ingredients: &'static [&'static str],
) -> CatalogueItem {
    CatalogueItem {
        name,
        portions,
        calories,
        protein_g: macros.0,
        carbs_g: macros.1,
        fat_g: macros.2,
        ingredients,
    }
}

const BREAKFAST: &[CatalogueItem] = &[
    item("Oats with Almonds", "1 bowl (50g)", 280.0, (8.0, 45.0, 7.0), &["rolled oats", "almonds", "water"]),
    item("Scrambled Eggs with Toast", "2 eggs + 2 slices", 300.0, (18.0, 30.0, 12.0), &["eggs", "whole wheat bread", "butter"]),
    item("Greek Yogurt Parfait", "200g yogurt + berries", 250.0, (20.0, 30.0, 5.0), &["greek yogurt", "berries", "granola"]),
    item("Smoothie Bowl", "1 bowl", 320.0, (12.0, 55.0, 8.0), &["banana", "berries", "oat milk", "chia seeds"]),
    item("Whole Wheat Pancakes", "3 small pancakes", 290.0, (10.0, 48.0, 6.0), &["whole wheat flour", "milk", "eggs"]),
    item("Poha with Peanuts", "1 bowl", 270.0, (6.0, 42.0, 8.0), &["flattened rice", "peanuts", "onion", "curry leaves"]),
    item("Upma", "1 bowl", 260.0, (7.0, 40.0, 7.0), &["semolina", "vegetables", "mustard seeds"]),
    item("Avocado Toast", "2 slices + half avocado", 310.0, (9.0, 35.0, 16.0), &["whole wheat bread", "avocado", "lemon"]),
];

const LUNCH: &[CatalogueItem] = &[
    item("Grilled Chicken Breast", "150g", 240.0, (45.0, 0.0, 5.0), &["chicken breast", "olive oil", "herbs"]),
    item("Paneer Tikka", "150g", 280.0, (18.0, 10.0, 18.0), &["paneer", "bell pepper", "onion", "yogurt marinade"]),
    item("Dal Tadka", "1 bowl", 180.0, (12.0, 25.0, 4.0), &["yellow lentils", "tomato", "cumin", "garlic"]),
    item("Grilled Fish", "150g", 200.0, (40.0, 0.0, 4.0), &["white fish", "lemon", "olive oil"]),
    item("Chickpea Curry", "1 bowl", 220.0, (12.0, 30.0, 6.0), &["chickpeas", "tomato", "onion", "spices"]),
    item("Tofu Stir-fry", "150g", 200.0, (18.0, 8.0, 11.0), &["tofu", "broccoli", "bell pepper", "soy sauce"]),
];

const DINNER: &[CatalogueItem] = &[
    item("Grilled Fish", "150g", 200.0, (40.0, 0.0, 4.0), &["white fish", "lemon", "olive oil"]),
    item("Chicken Soup", "1 bowl", 180.0, (25.0, 12.0, 4.0), &["chicken", "carrot", "celery", "onion"]),
    item("Baked Salmon", "150g", 280.0, (38.0, 0.0, 14.0), &["salmon", "lemon", "dill"]),
    item("Grilled Vegetables with Tofu", "200g", 200.0, (15.0, 18.0, 8.0), &["tofu", "zucchini", "bell pepper", "olive oil"]),
    item("Egg White Omelette", "4 whites", 140.0, (28.0, 2.0, 0.0), &["egg whites", "spinach", "onion"]),
    item("Palak Paneer", "1 bowl", 240.0, (14.0, 12.0, 16.0), &["spinach", "paneer", "cream", "garlic"]),
];

const SNACKS: &[CatalogueItem] = &[
    item("Greek Yogurt", "150g", 130.0, (17.0, 10.0, 3.0), &["greek yogurt"]),
    item("Apple", "1 medium", 95.0, (0.0, 25.0, 0.0), &["apple"]),
    item("Almonds", "30g (23 nuts)", 170.0, (6.0, 6.0, 15.0), &["almonds"]),
    item("Protein Shake", "1 scoop", 120.0, (24.0, 3.0, 2.0), &["whey protein", "milk"]),
    item("Hummus with Carrots", "50g + 100g carrots", 150.0, (5.0, 18.0, 7.0), &["chickpeas", "tahini", "carrots"]),
    item("Boiled Eggs", "2 eggs", 140.0, (12.0, 1.0, 10.0), &["eggs"]),
    item("Roasted Chickpeas", "50g", 140.0, (7.0, 20.0, 3.0), &["chickpeas", "spices"]),
    item("Banana with Peanut Butter", "1 banana + 1 tbsp PB", 200.0, (5.0, 30.0, 8.0), &["banana", "peanut butter"]),
];

fn catalogue(meal_type: MealType) -> &'static [CatalogueItem] {
    match meal_type {
        MealType::Breakfast => BREAKFAST,
        MealType::Lunch => LUNCH,
        MealType::Dinner => DINNER,
        MealType::Snack => SNACKS,
        MealType::Unspecified => &[],
    }
}

fn to_meal(meal_type: MealType, item: &CatalogueItem) -> Meal {
    Meal {
        meal_type,
        name: item.name.to_string(),
        ingredients: item.ingredients.iter().map(|s| s.to_string()).collect(),
        portions: item.portions.to_string(),
        calories: item.calories,
        macros: Macros::new(item.protein_g, item.carbs_g, item.fat_g),
        allergens: Vec::new(),
        tags: vec!["swap".to_string()],
    }
}

/// Catalogue meals that could replace `current` on `weekday`.
///
/// Candidates must pass every constraint and differ from the current meal by
/// name. When the current meal has calories, results are ordered by how close
/// they come to it; otherwise catalogue order is kept.
pub fn safe_alternatives(
    current: &Meal,
    weekday: Weekday,
    constraints: &Constraints,
    limit: usize,
) -> Vec<Meal> {
    let mut candidates: Vec<Meal> = catalogue(current.meal_type)
        .iter()
        .filter(|item| !item.name.eq_ignore_ascii_case(current.name.trim()))
        .map(|item| to_meal(current.meal_type, item))
        .filter(|meal| validate_meal(meal, weekday, constraints).is_valid)
        .collect();

    if current.calories > 0.0 {
        let target = current.calories;
        candidates.sort_by(|a, b| {
            (a.calories - target)
                .abs()
                .total_cmp(&(b.calories - target).abs())
        });
    }

    candidates.truncate(limit);
    tracing::debug!(
        "{} safe alternatives for {} \"{}\" on {}",
        candidates.len(),
        current.meal_type.as_str(),
        current.name,
        weekday
    );
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExclusionMap;

    fn current(meal_type: MealType, name: &str, calories: f64) -> Meal {
        Meal {
            meal_type,
            name: name.to_string(),
            calories,
            ..Default::default()
        }
    }

    #[test]
    fn test_vegan_snack_alternatives() {
        let constraints = Constraints {
            diet_type: Some("vegan".to_string()),
            ..Default::default()
        };
        let alternatives = safe_alternatives(&current(MealType::Snack, "Apple", 0.0), Weekday::Monday, &constraints, 10);
        let names: Vec<&str> = alternatives.iter().map(|m| m.name.as_str()).collect();

        // Peanut butter trips the "butter" keyword
        assert_eq!(names, vec!["Almonds", "Hummus with Carrots", "Roasted Chickpeas"]);
    }

    #[test]
    fn test_ordered_by_calorie_closeness() {
        let alternatives =
            safe_alternatives(&current(MealType::Dinner, "Baked Salmon", 185.0), Weekday::Monday, &Constraints::default(), 2);
        let names: Vec<&str> = alternatives.iter().map(|m| m.name.as_str()).collect();

        // Ties at 200 kcal keep catalogue order
        assert_eq!(names, vec!["Chicken Soup", "Grilled Fish"]);
    }

    #[test]
    fn test_day_exclusions_and_allergens_apply() {
        let mut exclusions = ExclusionMap::new();
        exclusions.insert(Weekday::Wednesday, "tofu");
        let constraints = Constraints {
            diet_type: Some("vegetarian".to_string()),
            allergens: vec!["dairy".to_string()],
            daily_exclusions: exclusions,
            ..Default::default()
        };

        let wednesday = safe_alternatives(&current(MealType::Lunch, "Dal Tadka", 0.0), Weekday::Wednesday, &constraints, 10);
        let thursday = safe_alternatives(&current(MealType::Lunch, "Dal Tadka", 0.0), Weekday::Thursday, &constraints, 10);

        assert_eq!(wednesday.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(), vec!["Chickpea Curry"]);
        assert_eq!(
            thursday.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
            vec!["Chickpea Curry", "Tofu Stir-fry"]
        );
    }

    #[test]
    fn test_unspecified_meal_type_has_no_catalogue() {
        let alternatives =
            safe_alternatives(&current(MealType::Unspecified, "Brunch", 500.0), Weekday::Sunday, &Constraints::default(), 3);
        assert!(alternatives.is_empty());
    }
}

//! Meal validator
//!
//! Checks one meal against diet type, allergens, per-day exclusions, and
//! medical conditions. Matching is plain substring search over the meal's
//! searchable text, so "eggplant" does trip an "egg" keyword.

use crate::lexicon;
use crate::models::{Constraints, ExclusionMap, Meal, ValidationResult, Weekday};

/// Check a meal against a diet type's forbidden foods.
///
/// Diet types missing from the lexicon forbid nothing.
pub fn validate_diet_type(meal: &Meal, diet_type: &str) -> ValidationResult {
    let text = meal.searchable_text();
    let violations = lexicon::diet_exclusions(diet_type)
        .iter()
        .filter(|item| text.contains(*item))
        .map(|item| format!("{} diet excludes {}, but found in \"{}\"", diet_type, item, meal.name))
        .collect();

    ValidationResult::from_violations(violations)
}

/// Check a meal against allergens, one violation per allergen at most.
///
/// An allergen missing from the lexicon is matched as its own literal keyword.
pub fn validate_allergens(meal: &Meal, allergens: &[String]) -> ValidationResult {
    let text = meal.searchable_text();
    let mut violations = Vec::new();

    for allergen in allergens {
        let literal = allergen.trim().to_lowercase();
        let found = match lexicon::allergen_keywords(&literal) {
            Some(keywords) => keywords.iter().any(|k| text.contains(k)),
            None => text.contains(&literal),
        };
        if found {
            violations.push(format!("Allergen \"{}\" found in \"{}\"", allergen, meal.name));
        }
    }

    ValidationResult::from_violations(violations)
}

/// Check a meal against the foods excluded on a given weekday
pub fn validate_daily_exclusions(
    meal: &Meal,
    weekday: Weekday,
    exclusions: &ExclusionMap,
) -> ValidationResult {
    let text = meal.searchable_text();
    let violations = exclusions
        .for_day(weekday.as_str())
        .filter(|item| text.contains(&item.to_lowercase()))
        .map(|item| {
            format!(
                "\"{}\" is excluded on {}, but found in \"{}\"",
                item, weekday, meal.name
            )
        })
        .collect();

    ValidationResult::from_violations(violations)
}

/// Check a meal against the avoid lists of known medical conditions.
///
/// Conditions missing from the lexicon are skipped.
pub fn validate_medical_conditions(meal: &Meal, conditions: &[String]) -> ValidationResult {
    let text = meal.searchable_text();
    let mut violations = Vec::new();

    for condition in conditions {
        let Some(guideline) = lexicon::medical_guideline(condition) else {
            continue;
        };
        for food in guideline.avoid_foods.iter().filter(|f| text.contains(*f)) {
            violations.push(format!(
                "{} requires avoiding {}, but found in \"{}\"",
                condition, food, meal.name
            ));
        }
    }

    ValidationResult::from_violations(violations)
}

/// Run every applicable check in fixed order: diet type, allergens, daily
/// exclusions, medical conditions. Checks whose constraint is absent or empty
/// are skipped.
pub fn validate_meal(meal: &Meal, weekday: Weekday, constraints: &Constraints) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if let Some(diet_type) = &constraints.diet_type {
        result.extend(validate_diet_type(meal, diet_type));
    }

    if !constraints.allergens.is_empty() {
        result.extend(validate_allergens(meal, &constraints.allergens));
    }

    if !constraints.daily_exclusions.is_empty() {
        result.extend(validate_daily_exclusions(meal, weekday, &constraints.daily_exclusions));
    }

    if !constraints.medical_conditions.is_empty() {
        result.extend(validate_medical_conditions(meal, &constraints.medical_conditions));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(name: &str, ingredients: &[&str]) -> Meal {
        Meal {
            name: name.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_vegan_rejects_animal_products() {
        let result = validate_diet_type(&meal("Paneer Tikka", &["paneer", "yogurt marinade"]), "vegan");

        assert!(!result.is_valid);
        assert_eq!(
            result.violations,
            vec![
                "vegan diet excludes paneer, but found in \"Paneer Tikka\"",
                "vegan diet excludes yogurt, but found in \"Paneer Tikka\"",
            ]
        );
    }

    #[test]
    fn test_unknown_diet_type_is_unconstrained() {
        let bacon = meal("Bacon and Eggs", &["pork belly", "eggs", "butter"]);
        for diet in ["keto", "paleo", "carnivore", "indian"] {
            let result = validate_diet_type(&bacon, diet);
            assert!(result.is_valid, "{} should not constrain", diet);
            assert!(result.violations.is_empty());
        }
    }

    #[test]
    fn test_allergen_reported_once_despite_multiple_keywords() {
        let result = validate_allergens(
            &meal("Cheese Omelette", &["milk", "butter", "cheddar cheese"]),
            &strings(&["dairy"]),
        );
        assert_eq!(result.violations, vec!["Allergen \"dairy\" found in \"Cheese Omelette\""]);
    }

    #[test]
    fn test_allergen_match_is_case_insensitive() {
        let result = validate_allergens(&meal("ALMOND Crusted Tofu", &[]), &strings(&["Tree Nuts"]));
        assert_eq!(result.violations, vec!["Allergen \"Tree Nuts\" found in \"ALMOND Crusted Tofu\""]);
    }

    #[test]
    fn test_unknown_allergen_matches_literally() {
        let allergens = strings(&["sesame"]);
        assert!(!validate_allergens(&meal("Tahini Toast", &["sesame paste"]), &allergens).is_valid);
        assert!(validate_allergens(&meal("Plain Toast", &["bread"]), &allergens).is_valid);
    }

    #[test]
    fn test_substring_matching_is_naive() {
        let result = validate_allergens(&meal("Roasted Eggplant", &[]), &strings(&["egg"]));
        assert!(!result.is_valid);
    }

    #[test]
    fn test_name_only_meal() {
        let allergens = strings(&["gluten"]);
        assert!(!validate_allergens(&meal("Whole Wheat Pancakes", &[]), &allergens).is_valid);
        assert!(validate_allergens(&meal("Fruit Salad", &[]), &allergens).is_valid);
    }

    #[test]
    fn test_daily_exclusions_only_apply_to_that_day() {
        let mut exclusions = ExclusionMap::new();
        exclusions.insert(Weekday::Tuesday, "egg");
        let omelette = meal("Egg White Omelette", &["egg whites", "spinach"]);

        let tuesday = validate_daily_exclusions(&omelette, Weekday::Tuesday, &exclusions);
        assert_eq!(
            tuesday.violations,
            vec!["\"egg\" is excluded on tuesday, but found in \"Egg White Omelette\""]
        );
        assert!(validate_daily_exclusions(&omelette, Weekday::Wednesday, &exclusions).is_valid);
    }

    #[test]
    fn test_medical_conditions() {
        let result = validate_medical_conditions(
            &meal("Sweetened Lassi with White Rice", &["sugar"]),
            &strings(&["diabetes", "migraine"]),
        );
        assert_eq!(
            result.violations,
            vec![
                "diabetes requires avoiding sugar, but found in \"Sweetened Lassi with White Rice\"",
                "diabetes requires avoiding white rice, but found in \"Sweetened Lassi with White Rice\"",
                "diabetes requires avoiding sweetened, but found in \"Sweetened Lassi with White Rice\"",
            ]
        );
    }

    #[test]
    fn test_validate_meal_orders_violations_by_check() {
        let mut exclusions = ExclusionMap::new();
        exclusions.insert(Weekday::Monday, "rice");
        let constraints = Constraints {
            diet_type: Some("vegetarian".to_string()),
            allergens: strings(&["fish"]),
            medical_conditions: strings(&["hypertension"]),
            daily_exclusions: exclusions,
        };
        let curry = meal("Salted Fish Curry", &["mackerel", "white rice", "salt"]);

        let result = validate_meal(&curry, Weekday::Monday, &constraints);

        assert!(!result.is_valid);
        assert_eq!(
            result.violations,
            vec![
                "vegetarian diet excludes fish, but found in \"Salted Fish Curry\"",
                "Allergen \"fish\" found in \"Salted Fish Curry\"",
                "\"rice\" is excluded on monday, but found in \"Salted Fish Curry\"",
                "hypertension requires avoiding salt, but found in \"Salted Fish Curry\"",
            ]
        );
    }

    #[test]
    fn test_validate_meal_without_constraints_is_valid() {
        let result = validate_meal(&meal("Anything", &["chicken"]), Weekday::Friday, &Constraints::default());
        assert_eq!(result, ValidationResult::valid());
    }

    #[test]
    fn test_mixed_case_exclusions_from_json_are_enforced() {
        let constraints: Constraints = serde_json::from_value(serde_json::json!({
            "daily_exclusions": { "Tuesday": ["Eggs"] }
        }))
        .unwrap();
        assert!(constraints.check().is_ok());
        let scrambled = meal("Scrambled Eggs", &[]);

        let tuesday = validate_meal(&scrambled, Weekday::Tuesday, &constraints);
        assert_eq!(
            tuesday.violations,
            vec!["\"eggs\" is excluded on tuesday, but found in \"Scrambled Eggs\""]
        );
        assert!(validate_meal(&scrambled, Weekday::Monday, &constraints).is_valid);
    }
}

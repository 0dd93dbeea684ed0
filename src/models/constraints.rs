//! Constraint set model
//!
//! Weekdays, per-day exclusion maps, and the constraint set a meal is
//! validated against.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use rmcp::schemars;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{NudgeError, NudgeResult};

/// Day of the week, derived positionally from a plan day index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in plan order, starting Monday
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Weekday for a plan day index; wraps every 7 days
    pub fn from_index(day_index: usize) -> Self {
        Self::ALL[day_index % 7]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|day| day.as_str() == lower)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase weekday name -> set of lowercase forbidden food terms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, schemars::JsonSchema)]
#[serde(transparent)]
pub struct ExclusionMap(BTreeMap<String, BTreeSet<String>>);

// Keys and terms are trimmed and lowercased on the way in; casing variants of
// one day merge. Unknown keys are kept so `Constraints::check` can reject them.
impl<'de> Deserialize<'de> for ExclusionMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Vec<String>>::deserialize(deserializer)?;
        let mut map = ExclusionMap::new();
        for (day, foods) in raw {
            let entry = map.0.entry(day.trim().to_lowercase()).or_default();
            entry.extend(
                foods
                    .iter()
                    .map(|f| f.trim().to_lowercase())
                    .filter(|f| !f.is_empty()),
            );
        }
        Ok(map)
    }
}

impl ExclusionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a food for a day. Returns false if it was already present.
    pub fn insert(&mut self, day: Weekday, food: &str) -> bool {
        self.0
            .entry(day.as_str().to_string())
            .or_default()
            .insert(food.trim().to_lowercase())
    }

    /// Excluded terms for a day; empty when nothing is registered
    pub fn for_day(&self, day: &str) -> impl Iterator<Item = &str> {
        self.0
            .get(&day.trim().to_lowercase())
            .into_iter()
            .flat_map(|foods| foods.iter().map(String::as_str))
    }

    pub fn contains(&self, day: Weekday, food: &str) -> bool {
        self.0
            .get(day.as_str())
            .map_or(false, |foods| foods.contains(&food.to_lowercase()))
    }

    pub fn days(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeSet::is_empty)
    }

    /// Total number of (day, food) pairs
    pub fn len(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }

    /// Replace whole day entries with those from `other` (other wins per day key)
    pub fn overlay(&mut self, other: ExclusionMap) {
        for (day, foods) in other.0 {
            self.0.insert(day, foods);
        }
    }

    /// Union every day's foods from `other` into this map
    pub fn union(&mut self, other: &ExclusionMap) {
        for (day, foods) in &other.0 {
            self.0.entry(day.clone()).or_default().extend(foods.iter().cloned());
        }
    }

    /// Lowercase keys and terms, dropping keys that are not weekday names and
    /// blank terms. Used on anything that did not come from the local parser.
    pub fn normalized(self) -> Self {
        let mut out = ExclusionMap::new();
        for (day, foods) in self.0 {
            let Some(weekday) = Weekday::parse(&day) else {
                tracing::debug!("Dropping non-weekday exclusion key '{}'", day);
                continue;
            };
            for food in foods.iter().filter(|f| !f.trim().is_empty()) {
                out.insert(weekday, food);
            }
        }
        out
    }
}

impl FromIterator<(Weekday, String)> for ExclusionMap {
    fn from_iter<I: IntoIterator<Item = (Weekday, String)>>(iter: I) -> Self {
        let mut map = ExclusionMap::new();
        for (day, food) in iter {
            map.insert(day, &food);
        }
        map
    }
}

/// Constraint set for a validation request
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Constraints {
    /// Diet type key (vegan, vegetarian, pescatarian, ...); None skips diet checks
    #[serde(default)]
    pub diet_type: Option<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub medical_conditions: Vec<String>,
    #[serde(default)]
    pub daily_exclusions: ExclusionMap,
}

impl Constraints {
    /// Reject malformed constraint sets before any validation runs
    pub fn check(&self) -> NudgeResult<()> {
        if let Some(diet) = &self.diet_type {
            if diet.trim().is_empty() {
                return Err(NudgeError::InvalidConstraints(
                    "diet_type must not be blank; omit it to skip diet checks".to_string(),
                ));
            }
        }
        if self.allergens.iter().any(|a| a.trim().is_empty()) {
            return Err(NudgeError::InvalidConstraints(
                "allergens must not contain blank entries".to_string(),
            ));
        }
        if self.medical_conditions.iter().any(|c| c.trim().is_empty()) {
            return Err(NudgeError::InvalidConstraints(
                "medical_conditions must not contain blank entries".to_string(),
            ));
        }
        if let Some(day) = self.daily_exclusions.days().find(|d| Weekday::parse(d).is_none()) {
            return Err(NudgeError::InvalidConstraints(format!(
                "daily_exclusions key '{}' is not a weekday name",
                day
            )));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.diet_type.is_none()
            && self.allergens.is_empty()
            && self.medical_conditions.is_empty()
            && self.daily_exclusions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_cycles_every_seven_days() {
        assert_eq!(Weekday::from_index(0), Weekday::Monday);
        assert_eq!(Weekday::from_index(6), Weekday::Sunday);
        assert_eq!(Weekday::from_index(7), Weekday::Monday);
        assert_eq!(Weekday::from_index(15), Weekday::Tuesday);
    }

    #[test]
    fn test_weekday_parse() {
        assert_eq!(Weekday::parse(" Thursday "), Some(Weekday::Thursday));
        assert_eq!(Weekday::parse("weekend"), None);
    }

    #[test]
    fn test_exclusion_insert_deduplicates() {
        let mut map = ExclusionMap::new();
        assert!(map.insert(Weekday::Monday, "Eggs"));
        assert!(!map.insert(Weekday::Monday, "eggs"));
        assert_eq!(map.for_day("monday").collect::<Vec<_>>(), vec!["eggs"]);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_for_day_unknown_is_empty() {
        let map = ExclusionMap::new();
        assert_eq!(map.for_day("friday").count(), 0);
        assert!(map.is_empty());
    }

    #[test]
    fn test_overlay_replaces_whole_day() {
        let mut base: ExclusionMap = [
            (Weekday::Monday, "nuts".to_string()),
            (Weekday::Friday, "fish".to_string()),
        ]
        .into_iter()
        .collect();
        let external: ExclusionMap = [(Weekday::Monday, "egg".to_string())].into_iter().collect();

        base.overlay(external);

        assert_eq!(base.for_day("monday").collect::<Vec<_>>(), vec!["egg"]);
        assert!(base.contains(Weekday::Friday, "fish"));
    }

    #[test]
    fn test_normalized_drops_unknown_keys() {
        let raw: ExclusionMap = serde_json::from_value(serde_json::json!({
            "Monday": ["Egg", " "],
            "weekends": ["meat"]
        }))
        .unwrap();

        let normalized = raw.normalized();

        assert!(normalized.contains(Weekday::Monday, "egg"));
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized.days().collect::<Vec<_>>(), vec!["monday"]);
    }

    #[test]
    fn test_check_rejects_bad_exclusion_key() {
        let constraints: Constraints = serde_json::from_value(serde_json::json!({
            "daily_exclusions": { "someday": ["egg"] }
        }))
        .unwrap();

        let err = constraints.check().unwrap_err();
        assert!(err.to_string().contains("someday"));
    }

    #[test]
    fn test_check_rejects_blank_allergen() {
        let constraints = Constraints {
            allergens: vec!["dairy".to_string(), "  ".to_string()],
            ..Default::default()
        };
        assert!(constraints.check().is_err());
    }

    #[test]
    fn test_check_accepts_empty_constraints() {
        let constraints = Constraints::default();
        assert!(constraints.check().is_ok());
        assert!(constraints.is_empty());
    }

    #[test]
    fn test_deserialize_normalizes_day_keys_and_terms() {
        let constraints: Constraints = serde_json::from_value(serde_json::json!({
            "daily_exclusions": { "Tuesday": ["Eggs", " "], "tuesday": ["NUTS"], " Friday ": [" Fish "] }
        }))
        .unwrap();

        assert!(constraints.check().is_ok());
        let exclusions = &constraints.daily_exclusions;
        assert_eq!(exclusions.days().collect::<Vec<_>>(), vec!["friday", "tuesday"]);
        assert_eq!(exclusions.for_day("tuesday").collect::<Vec<_>>(), vec!["eggs", "nuts"]);
        assert!(exclusions.contains(Weekday::Friday, "fish"));
    }

    #[test]
    fn test_deserialize_keeps_unknown_keys_for_check() {
        let constraints: Constraints = serde_json::from_value(serde_json::json!({
            "daily_exclusions": { "Weekend": ["meat"] }
        }))
        .unwrap();

        let err = constraints.check().unwrap_err();
        assert!(err.to_string().contains("weekend"));
    }
}

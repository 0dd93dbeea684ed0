//! Lexical routine extraction
//!
//! Turns free-text routines ("No eggs on Tuesday and Thursday") into per-day
//! exclusions and preferred foods using ordered regex patterns. Every pattern
//! is run over the whole lowercased text, so several triggers may record the
//! same food; the exclusion sets absorb duplicates.

use std::iter;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ExclusionMap, Preferences, RoutineInsights, Weekday};

/// Exclusion patterns: `<trigger> <food> on <day list>`, in evaluation order
const EXCLUSION_PATTERNS: &[&str] = &[
    r"\bno\s+(\w+)\s+on\s+([a-z\s,&]+)",
    r"\bavoid\s+(\w+)\s+on\s+([a-z\s,&]+)",
    r"\bdon['’]?t\s+eat\s+(\w+)\s+on\s+([a-z\s,&]+)",
    r"\bskip\s+(\w+)\s+on\s+([a-z\s,&]+)",
    r"\bi\s+don['’]?t\s+want\s+(\w+)\s+on\s+([a-z\s,&]+)",
    r"\bexclude\s+(\w+)\s+(?:from|on)\s+([a-z\s,&]+)",
    r"\bi\s+can['’]?t\s+eat\s+(\w+)\s+on\s+([a-z\s,&]+)",
    r"\b(\w+)\s+is\s+not\s+allowed\s+on\s+([a-z\s,&]+)",
];

/// Preference patterns capturing a single food token, in evaluation order
const PREFERENCE_PATTERNS: &[&str] = &[
    r"(?:want|prefer|like).*?(?:majorly|mostly|primarily).*?(?:consist\s+of|include)\s+(\w+)",
    r"\bmy\s+diet\s+should\s+(?:consist\s+of|include)\s+(\w+)",
    r"\binclude\s+more\s+(\w+)",
    r"\bi\s+(?:prefer|love|want)\s+(\w+)",
    r"\bmore\s+(\w+)\s+(?:in\s+my\s+diet|please)",
];

/// Words that may appear inside a day list without ending it
const DAY_LIST_CONNECTORS: &[&str] = &["and", "or", "&", "on", "every", "also"];

/// Tokens the preference patterns can capture that are never foods
const PREFERENCE_STOPWORDS: &[&str] = &[
    "my", "to", "a", "an", "the", "more", "some", "it", "that", "this", "eat", "have", "having",
];

static EXCLUSION_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(EXCLUSION_PATTERNS));

static PREFERENCE_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(PREFERENCE_PATTERNS));

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::error!("Invalid routine pattern '{}': {}", p, e);
                None
            }
        })
        .collect()
}

/// Extract per-day food exclusions from a routine text.
///
/// Example: "No eggs on Tuesday and Thursday" -> { tuesday: [eggs], thursday: [eggs] }
pub fn parse_daily_exclusions(routine: &str) -> ExclusionMap {
    let mut exclusions = ExclusionMap::new();
    if routine.trim().is_empty() {
        return exclusions;
    }

    let text = routine.to_lowercase();

    for pattern in EXCLUSION_REGEXES.iter() {
        for caps in pattern.captures_iter(&text) {
            let (Some(food), Some(days)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let food = food.as_str().trim();
            let day_list = clip_day_list(days.as_str());

            for day in Weekday::ALL.into_iter().filter(|d| day_list.contains(d.as_str())) {
                exclusions.insert(day, food);
            }
        }
    }

    exclusions
}

/// Extract positive food preferences from a routine text.
///
/// Example: "I want my diet to majorly consist of dal" -> [dal]
pub fn extract_preferences(routine: &str) -> Preferences {
    let mut preferences = Preferences::default();
    if routine.trim().is_empty() {
        return preferences;
    }

    let text = routine.to_lowercase();

    for pattern in PREFERENCE_REGEXES.iter() {
        for caps in pattern.captures_iter(&text) {
            let Some(food) = caps.get(1).map(|m| m.as_str().trim()) else {
                continue;
            };
            if PREFERENCE_STOPWORDS.contains(&food) {
                continue;
            }
            preferences.add_food(food);
        }
    }

    preferences
}

/// Rule-based pass only: exclusions plus preferences
pub fn parse_locally(routine: &str) -> RoutineInsights {
    RoutineInsights {
        exclusions: parse_daily_exclusions(routine),
        preferences: extract_preferences(routine),
    }
}

/// Cut a captured day list at the first word that is neither a weekday nor a
/// connector, so "tuesday and thursday, avoid nuts on monday" stops before
/// "avoid" and the next clause's days are not attributed to this food.
fn clip_day_list(text: &str) -> &str {
    let mut end = 0;
    let mut word_start: Option<usize> = None;

    for (i, c) in text.char_indices().chain(iter::once((text.len(), ' '))) {
        let is_separator = c.is_whitespace() || c == ',';
        match (is_separator, word_start) {
            (true, Some(start)) => {
                if !is_day_list_word(&text[start..i]) {
                    break;
                }
                end = i;
                word_start = None;
            }
            (false, None) => word_start = Some(i),
            _ => {}
        }
    }

    &text[..end]
}

fn is_day_list_word(word: &str) -> bool {
    if DAY_LIST_CONNECTORS.contains(&word) {
        return true;
    }
    let singular = word.strip_suffix('s').unwrap_or(word);
    Weekday::parse(singular).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foods(map: &ExclusionMap, day: &str) -> Vec<String> {
        map.for_day(day).map(str::to_string).collect()
    }

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(EXCLUSION_REGEXES.len(), EXCLUSION_PATTERNS.len());
        assert_eq!(PREFERENCE_REGEXES.len(), PREFERENCE_PATTERNS.len());
    }

    #[test]
    fn test_empty_text_yields_empty_result() {
        assert!(parse_daily_exclusions("").is_empty());
        assert!(parse_daily_exclusions("   ").is_empty());
        assert!(extract_preferences("").is_empty());
    }

    #[test]
    fn test_no_food_on_two_days() {
        let map = parse_daily_exclusions("no chicken on monday and friday");
        assert_eq!(foods(&map, "monday"), vec!["chicken"]);
        assert_eq!(foods(&map, "friday"), vec!["chicken"]);
        assert_eq!(map.days().count(), 2);
    }

    #[test]
    fn test_end_to_end_routine_sentence() {
        let map = parse_daily_exclusions("No eggs on Tuesday and Thursday, avoid nuts on Monday");

        assert_eq!(foods(&map, "tuesday"), vec!["eggs"]);
        assert_eq!(foods(&map, "thursday"), vec!["eggs"]);
        assert_eq!(foods(&map, "monday"), vec!["nuts"]);
        assert_eq!(map.days().count(), 3);
    }

    #[test]
    fn test_same_food_via_two_triggers_is_not_duplicated() {
        let map = parse_daily_exclusions("No meat on Friday. Also avoid meat on Friday.");
        assert_eq!(foods(&map, "friday"), vec!["meat"]);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_extended_triggers() {
        let map = parse_daily_exclusions(
            "I don't want fish on Wednesday. Exclude rice from Saturday. \
             I can't eat onion on Sunday. Pork is not allowed on Mondays.",
        );

        assert_eq!(foods(&map, "wednesday"), vec!["fish"]);
        assert_eq!(foods(&map, "saturday"), vec!["rice"]);
        assert_eq!(foods(&map, "sunday"), vec!["onion"]);
        assert_eq!(foods(&map, "monday"), vec!["pork"]);
    }

    #[test]
    fn test_skip_with_comma_separated_days() {
        let map = parse_daily_exclusions("skip bread on monday, wednesday, and friday");
        assert_eq!(map.days().collect::<Vec<_>>(), vec!["friday", "monday", "wednesday"]);
    }

    #[test]
    fn test_day_without_trigger_is_ignored() {
        let map = parse_daily_exclusions("I go to the gym on Monday and eat eggs on Tuesday");
        assert!(map.is_empty());
    }

    #[test]
    fn test_clip_day_list_stops_at_clause_boundary() {
        assert_eq!(clip_day_list("tuesday and thursday, avoid nuts"), "tuesday and thursday");
        assert_eq!(clip_day_list("mondays"), "mondays");
        assert_eq!(clip_day_list("weekends"), "");
    }

    #[test]
    fn test_extract_preferences() {
        let prefs = extract_preferences("I want my diet to majorly consist of dal. Include more spinach please");
        assert_eq!(prefs.preferred_foods, vec!["dal", "spinach"]);
        assert!(prefs.meal_frequency.is_empty());
    }

    #[test]
    fn test_extract_preferences_deduplicates() {
        let prefs = extract_preferences("I love paneer. I prefer paneer. My diet should include paneer");
        assert_eq!(prefs.preferred_foods, vec!["paneer"]);
    }

    #[test]
    fn test_parse_locally_combines_both() {
        let insights = parse_locally("I love oats. No sugar on Sunday");
        assert!(insights.exclusions.contains(Weekday::Sunday, "sugar"));
        assert_eq!(insights.preferences.preferred_foods, vec!["oats"]);
    }
}

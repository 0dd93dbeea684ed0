//! LLM-backed plan generator
//!
//! Builds the clinical-nutrition system prompt from a plan brief and parses
//! the model's JSON reply into a `Plan`. The reply is not trusted; the quality
//! gate still runs on it.

use std::fmt::Write as _;

use async_trait::async_trait;

use super::client::{strip_code_fences, ChatClient, ChatMessage};
use crate::error::NudgeResult;
use crate::lexicon;
use crate::models::Plan;
use crate::planning::{PlanBrief, PlanGenerator};

const TEMPERATURE: f32 = 0.7;

/// Chat-model plan writer
pub struct LlmPlanGenerator {
    client: ChatClient,
}

impl LlmPlanGenerator {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PlanGenerator for LlmPlanGenerator {
    async fn generate(&self, brief: &PlanBrief) -> NudgeResult<Plan> {
        let messages = [
            ChatMessage::system(system_prompt(brief)),
            ChatMessage::user(user_prompt(brief)),
        ];
        let content = self.client.complete(&messages, TEMPERATURE, None).await?;
        let plan = parse_plan(&content)?;
        tracing::debug!("Generator returned {} days, {} meals", plan.days.len(), plan.meal_count());
        Ok(plan)
    }
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

pub(crate) fn user_prompt(brief: &PlanBrief) -> String {
    let p = &brief.profile;
    format!(
        "Generate a {}-day meal plan for {}, {}yo {}.",
        brief.days,
        if p.name.trim().is_empty() { "the user" } else { p.name.trim() },
        p.age,
        p.gender
    )
}

pub(crate) fn system_prompt(brief: &PlanBrief) -> String {
    let p = &brief.profile;
    let c = &brief.constraints;
    let m = &brief.macros;
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "You are a clinical nutrition expert AI. Generate a {}-day personalized meal plan in STRICT JSON format.",
        brief.days
    );
    let _ = writeln!(prompt, "\nCONSTRAINTS:");
    let _ = writeln!(prompt, "- Target: {} kcal/day", brief.target_calories);
    let _ = writeln!(prompt, "- Protein: {}g/day", m.protein_g);
    let _ = writeln!(prompt, "- Carbs: {}g/day", m.carbs_g);
    let _ = writeln!(prompt, "- Fat: {}g/day", m.fat_g);
    let _ = writeln!(prompt, "- Goal: {}", p.goal);
    let _ = writeln!(prompt, "- Diet preference: {}", p.diet_preference);
    let _ = writeln!(prompt, "- Allergies: {}", list_or_none(&c.allergens));
    let _ = writeln!(prompt, "- Medical conditions: {}", list_or_none(&c.medical_conditions));

    let guidelines: Vec<_> = c
        .medical_conditions
        .iter()
        .filter_map(|cond| lexicon::medical_guideline(cond))
        .collect();
    if !guidelines.is_empty() {
        let _ = writeln!(prompt, "\nMEDICAL GUIDELINES:");
        for g in &guidelines {
            let _ = writeln!(prompt, "- {}: {}. Avoid: {}", g.condition, g.notes, g.avoid_foods.join(", "));
            if let Some(carbs) = g.max_carbs_g {
                let _ = writeln!(prompt, "  Max carbs: {}g/day", carbs);
            }
            if let Some(sodium) = g.max_sodium_mg {
                let _ = writeln!(prompt, "  Max sodium: {}mg/day", sodium);
            }
        }
        if guidelines.iter().any(|g| g.condition == "diabetes" || g.condition == "pcos") {
            let _ = writeln!(prompt, "- Prefer low-GI foods: {}", lexicon::LOW_GI_FOODS.join(", "));
            let _ = writeln!(prompt, "- Avoid high-GI foods: {}", lexicon::HIGH_GI_AVOID.join(", "));
        }
    }

    if !c.daily_exclusions.is_empty() {
        let _ = writeln!(prompt, "\nDAY-SPECIFIC EXCLUSIONS (plan day 1 is monday):");
        for (day, foods) in c.daily_exclusions.iter().filter(|(_, f)| !f.is_empty()) {
            let foods: Vec<&str> = foods.iter().map(String::as_str).collect();
            let _ = writeln!(prompt, "- {}: no {}", day, foods.join(", "));
        }
    }

    if !brief.preferences.preferred_foods.is_empty() {
        let _ = writeln!(
            prompt,
            "\nPREFERRED FOODS (include often): {}",
            brief.preferences.preferred_foods.join(", ")
        );
    }

    let _ = writeln!(
        prompt,
        r#"
RULES:
1. If diabetes or PCOS: prioritize low-GI carbs, distribute carbs evenly, avoid added sugars
2. Exclude ALL allergens completely
3. Match diet and cuisine preference ({})
4. Each meal MUST include: name, ingredients, portions (with units), calories, and macros (protein_g, carbs_g, fat_g)
5. Daily totals should be within ±50 kcal of target
6. Round portions to practical serving sizes

OUTPUT ONLY valid JSON (no markdown, no extra text):
{{
  "summary": {{
    "target_calories": {},
    "macros": {{ "protein_g": {}, "carbs_g": {}, "fat_g": {} }},
    "notes": "Any special dietary notes here"
  }},
  "days": [
    {{
      "day": "Day 1",
      "meals": [
        {{
          "type": "breakfast",
          "name": "Meal name",
          "ingredients": ["ingredient 1", "ingredient 2"],
          "portions": "1 cup (240ml) or 100g",
          "calories": 400,
          "macros": {{ "protein_g": 30, "carbs_g": 45, "fat_g": 10 }},
          "allergens": [],
          "tags": ["low_gi", "high_protein"]
        }}
      ]
    }}
  ]
}}"#,
        p.diet_preference, brief.target_calories, m.protein_g, m.carbs_g, m.fat_g
    );

    prompt
}

pub(crate) fn parse_plan(content: &str) -> NudgeResult<Plan> {
    Ok(serde_json::from_str(strip_code_fences(content))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Macros, Preferences, UserProfile, Weekday};

    fn brief() -> PlanBrief {
        let profile = UserProfile {
            name: "Meera".to_string(),
            age: 29,
            gender: "female".to_string(),
            height_cm: 160.0,
            weight_kg: 58.0,
            goal: "weight-loss".to_string(),
            diet_preference: "vegetarian".to_string(),
            allergies: vec!["peanut".to_string()],
            conditions: vec!["pcos".to_string()],
            ..Default::default()
        };
        let mut constraints = profile.constraints();
        constraints.daily_exclusions.insert(Weekday::Tuesday, "egg");
        let mut preferences = Preferences::default();
        preferences.add_food("dal");

        PlanBrief {
            profile,
            target_calories: 1600.0,
            macros: Macros::new(115.0, 165.0, 45.0),
            days: 7,
            constraints,
            preferences,
        }
    }

    #[test]
    fn test_system_prompt_carries_constraints() {
        let prompt = system_prompt(&brief());

        assert!(prompt.contains("Generate a 7-day personalized meal plan"));
        assert!(prompt.contains("- Target: 1600 kcal/day"));
        assert!(prompt.contains("- Allergies: peanut"));
        assert!(prompt.contains("pcos: Focus on low-GI foods"));
        assert!(prompt.contains("Prefer low-GI foods: oats"));
        assert!(prompt.contains("- tuesday: no egg"));
        assert!(prompt.contains("PREFERRED FOODS (include often): dal"));
        assert!(prompt.contains("\"target_calories\": 1600"));
    }

    #[test]
    fn test_prompt_without_conditions_skips_guidelines() {
        let mut b = brief();
        b.constraints.medical_conditions.clear();
        b.constraints.allergens.clear();
        let prompt = system_prompt(&b);

        assert!(prompt.contains("- Medical conditions: none"));
        assert!(prompt.contains("- Allergies: none"));
        assert!(!prompt.contains("MEDICAL GUIDELINES"));
    }

    #[test]
    fn test_user_prompt() {
        assert_eq!(user_prompt(&brief()), "Generate a 7-day meal plan for Meera, 29yo female.");
    }

    #[test]
    fn test_parse_plan_from_fenced_reply() {
        let reply = "```json\n{\"summary\": {\"target_calories\": 1600}, \"days\": [{\"day\": \"Day 1\", \"meals\": [{\"type\": \"Breakfast\", \"name\": \"Idli\", \"calories\": 300}]}]}\n```";
        let plan = parse_plan(reply).unwrap();

        assert_eq!(plan.meal_count(), 1);
        assert_eq!(plan.days[0].meals[0].name, "Idli");
    }
}

//! Category-dependent output schemas.
//!
//! Selection is a pure lookup: category 4 (awards) gets the 4-score variant,
//! every other category the 5-score variant.

use serde_json::{json, Map, Value};

use crate::grading::request::Category;

/// Structural contract the provider must satisfy: `{ scores: {...}, comment }`,
/// every score an integer in 1..=5, no extra properties anywhere.
#[derive(Debug, PartialEq, Eq)]
pub struct ScoreSchema {
    pub name: &'static str,
    pub score_keys: &'static [&'static str],
}

pub const AWARD_SCHEMA: ScoreSchema = ScoreSchema {
    name: "award_scores",
    score_keys: &["difficulty", "recognition", "major_fit", "other"],
};

pub const GENERAL_SCHEMA: ScoreSchema = ScoreSchema {
    name: "activity_scores",
    score_keys: &[
        "continuity",
        "humanity",
        "major_fit",
        "leadership_initiative",
        "other",
    ],
};

pub fn schema_for_category(category: Category) -> &'static ScoreSchema {
    match category {
        Category::Award => &AWARD_SCHEMA,
        Category::Club | Category::Volunteer | Category::Research | Category::Leadership => {
            &GENERAL_SCHEMA
        }
    }
}

impl ScoreSchema {
    /// JSON Schema document for the structured-output directive.
    pub fn json_schema(&self) -> Value {
        let score_props: Map<String, Value> = self
            .score_keys
            .iter()
            .map(|key| {
                (
                    key.to_string(),
                    json!({ "type": "integer", "minimum": 1, "maximum": 5 }),
                )
            })
            .collect();

        json!({
            "type": "object",
            "properties": {
                "scores": {
                    "type": "object",
                    "properties": score_props,
                    "required": self.score_keys,
                    "additionalProperties": false
                },
                "comment": { "type": "string" }
            },
            "required": ["scores", "comment"],
            "additionalProperties": false
        })
    }
}

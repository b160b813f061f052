//! Grading request model and boundary validation.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::AppError;

/// Kind of activity being graded. Wire value is the integer 1–5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum Category {
    /// 部活動・スポーツ
    Club = 1,
    /// ボランティア・地域活動
    Volunteer = 2,
    /// 探究・研究
    Research = 3,
    /// 受賞・資格
    Award = 4,
    /// 生徒会・リーダーシップ・その他
    Leadership = 5,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Club,
        Category::Volunteer,
        Category::Research,
        Category::Award,
        Category::Leadership,
    ];

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| *c as u8 == n)
    }

    /// Accepts integers, whole-valued floats and numeric strings.
    pub fn coerce(value: &Value) -> Option<Self> {
        let n = match value {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        if n.fract() != 0.0 || !(1.0..=5.0).contains(&n) {
            return None;
        }
        Self::from_number(n as u8)
    }
}

impl From<Category> for u8 {
    fn from(c: Category) -> u8 {
        c as u8
    }
}

/// A validated grading request. Serializes to the user turn sent to the model.
#[derive(Debug, Clone, Serialize)]
pub struct GradingRequest {
    pub category: Category,
    pub major: String,
    pub fields: Map<String, Value>,
}

impl GradingRequest {
    /// Validates a raw request body. Checks run in order and the first failure wins:
    /// category, then major, then fields.
    pub fn from_body(body: &Value) -> Result<Self, AppError> {
        let category = body
            .get("category")
            .and_then(Category::coerce)
            .ok_or(AppError::InvalidCategory)?;

        let major = body
            .get("major")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .ok_or(AppError::MissingMajor)?;

        let fields = body
            .get("fields")
            .and_then(Value::as_object)
            .ok_or(AppError::MissingFields)?;

        Ok(GradingRequest {
            category,
            major: major.to_string(),
            fields: fields.clone(),
        })
    }
}

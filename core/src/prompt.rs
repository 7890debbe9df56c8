use serde_json::Value;

use crate::parse::truthy;

// e.g. "drove 50 km in a sedan"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity(String);

impl Activity {
    /// Falsy values (`null`, `false`, `0`, `""`) count as absent. Truthy scalars
    /// are taken in their textual form; arrays and objects are rejected.
    pub fn from_field(field: Option<&Value>) -> Option<Self> {
        let field = field.filter(|v| truthy(v))?;
        match field {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            Value::Bool(_) => Some(Self(field.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Activity {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// The "-1" sentinel is not special-cased downstream; it reaches callers as a value.
pub fn build_prompt(activity: &Activity) -> String {
    format!(
        "You are an expert carbon footprint calculator.
Estimate the CO₂-equivalent emissions (kg CO₂e) for the following activity:
\"{}\"

Rules:
- Output ONLY a number (float or integer)
- No units, no text, no explanation.
- If activity is unclear, estimate using best guess.
- If impossible, output \"-1\".",
        activity.as_str()
    )
}

//! Client-side field validation.
//!
//! Every rule of every field is evaluated in one pass and all violations are
//! returned together, so a form can show a single combined message.

use serde::Serialize;
use serde_json::{Map, Value};

/// Which rule a violation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// The field was absent or blank.
    Required,
    /// Too few characters.
    MinLength,
    /// Too many characters.
    MaxLength,
    /// Not a number inside the bounds.
    Range,
    /// A staged relation targets the edited entity.
    SelfRelation,
}

/// A rule attached to one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRule {
    /// Present, not null, not a blank string, not an empty array.
    Required,
    /// At least this many characters.
    MinLength(usize),
    /// At most this many characters.
    MaxLength(usize),
    /// A number (or numeric string) inside the inclusive bounds.
    Range { min: f64, max: f64 },
}

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Offending field.
    pub field: String,
    /// Failed rule.
    pub rule: RuleKind,
    /// Message for display.
    pub message: String,
}

impl Violation {
    /// Create a violation.
    pub fn new(field: impl Into<String>, rule: RuleKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule,
            message: message.into(),
        }
    }
}

/// Ordered rules per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    fields: Vec<(&'static str, Vec<FieldRule>)>,
}

impl RuleSet {
    /// An empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach rules to a field.
    pub fn field(mut self, name: &'static str, rules: impl IntoIterator<Item = FieldRule>) -> Self {
        self.fields.push((name, rules.into_iter().collect()));
        self
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// Evaluate every rule and collect all violations.
    ///
    /// A field that fails `Required` is not checked further. Length and
    /// range rules ignore absent values, including null and blank strings.
    pub fn validate(&self, values: &Map<String, Value>) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (field, rules) in &self.fields {
            let value = values.get(*field).filter(|v| !v.is_null());

            if rules.contains(&FieldRule::Required) && is_blank(value) {
                violations.push(Violation::new(
                    *field,
                    RuleKind::Required,
                    format!("{} is required", field),
                ));
                continue;
            }

            let Some(value) = value.filter(|v| !is_blank(Some(v))) else {
                continue;
            };

            for rule in rules {
                if let Some(violation) = check(field, rule, value) {
                    violations.push(violation);
                }
            }
        }

        violations
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

fn check(field: &str, rule: &FieldRule, value: &Value) -> Option<Violation> {
    match *rule {
        FieldRule::Required => None,
        FieldRule::MinLength(min) => {
            let len = char_len(value)?;
            (len < min).then(|| {
                Violation::new(
                    field,
                    RuleKind::MinLength,
                    format!("{} must be at least {} characters", field, min),
                )
            })
        }
        FieldRule::MaxLength(max) => {
            let len = char_len(value)?;
            (len > max).then(|| {
                Violation::new(
                    field,
                    RuleKind::MaxLength,
                    format!("{} must be at most {} characters", field, max),
                )
            })
        }
        FieldRule::Range { min, max } => {
            let in_range = as_number(value).is_some_and(|n| n >= min && n <= max);
            (!in_range).then(|| {
                Violation::new(
                    field,
                    RuleKind::Range,
                    format!("{} must be a number between {} and {}", field, min, max),
                )
            })
        }
    }
}

fn char_len(value: &Value) -> Option<usize> {
    value.as_str().map(|s| s.chars().count())
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

//! Declarative field validation.
//!
//! Each record type declares a table of [`FieldRule`]s once; the table is
//! evaluated against the record's live attributes every time it is
//! validated. Conditional rules read sibling fields from that same snapshot,
//! so one field's validity can depend on another's current value.

use crate::domain::model::{Attributes, ValidationErrors, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub type Condition = fn(&Attributes) -> bool;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Presence,
    Absence,
    Length { max: usize },
    Numericality,
    Inclusion(&'static [&'static str]),
    Date,
    DateTime,
}

#[derive(Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub rule: Rule,
    pub allow_nil: bool,
    pub condition: Option<Condition>,
}

impl FieldRule {
    pub fn presence(field: &'static str) -> Self {
        Self::new(field, Rule::Presence)
    }

    pub fn absence(field: &'static str) -> Self {
        Self::new(field, Rule::Absence)
    }

    pub fn length(field: &'static str, max: usize) -> Self {
        Self::new(field, Rule::Length { max })
    }

    pub fn numericality(field: &'static str) -> Self {
        Self::new(field, Rule::Numericality)
    }

    pub fn inclusion(field: &'static str, allowed: &'static [&'static str]) -> Self {
        Self::new(field, Rule::Inclusion(allowed))
    }

    pub fn date(field: &'static str) -> Self {
        Self::new(field, Rule::Date)
    }

    pub fn datetime(field: &'static str) -> Self {
        Self::new(field, Rule::DateTime)
    }

    fn new(field: &'static str, rule: Rule) -> Self {
        Self {
            field,
            rule,
            allow_nil: false,
            condition: None,
        }
    }

    pub fn allow_nil(mut self) -> Self {
        self.allow_nil = true;
        self
    }

    /// Only applies when the predicate holds for the record being validated.
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn check(&self, attributes: &Attributes, errors: &mut ValidationErrors) {
        if let Some(condition) = self.condition {
            if !condition(attributes) {
                return;
            }
        }

        let value = attributes.get(self.field).filter(|v| !v.is_null());
        let value = match value {
            Some(v) => v,
            None => {
                if let Some(message) = self.nil_message() {
                    errors.add(self.field, message);
                }
                return;
            }
        };

        if let Some(message) = self.violation(value) {
            errors.add(self.field, message);
        }
    }

    fn nil_message(&self) -> Option<String> {
        if self.allow_nil {
            return None;
        }
        match self.rule {
            Rule::Presence => Some("can't be blank".to_string()),
            Rule::Absence => None,
            // A maximum-only length check has nothing to measure.
            Rule::Length { .. } => None,
            Rule::Numericality => Some("is not a number".to_string()),
            Rule::Inclusion(_) => Some("is not included in the list".to_string()),
            Rule::Date => Some("is not a valid date".to_string()),
            Rule::DateTime => Some("is not a valid datetime".to_string()),
        }
    }

    fn violation(&self, value: &Value) -> Option<String> {
        match self.rule {
            Rule::Presence => is_blank(value).then(|| "can't be blank".to_string()),
            Rule::Absence => (!is_blank(value)).then(|| "must be blank".to_string()),
            Rule::Length { max } => {
                let len = text_of(value).chars().count();
                (len > max).then(|| format!("is too long (maximum is {} characters)", max))
            }
            Rule::Numericality => (!is_numeric(value)).then(|| "is not a number".to_string()),
            Rule::Inclusion(allowed) => {
                let text = text_of(value);
                (!allowed.contains(&text.as_str()))
                    .then(|| "is not included in the list".to_string())
            }
            Rule::Date => (!is_date(value)).then(|| "is not a valid date".to_string()),
            Rule::DateTime => (!is_datetime(value)).then(|| "is not a valid datetime".to_string()),
        }
    }
}

/// Runs every rule against one attribute snapshot.
pub fn validate_attributes(rules: &[FieldRule], attributes: &Attributes) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for rule in rules {
        rule.check(attributes, &mut errors);
    }
    errors
}

/// True when the field is absent or null.
pub fn is_nil(attributes: &Attributes, field: &str) -> bool {
    attributes.get(field).map_or(true, Value::is_null)
}

/// True when the field holds exactly this string.
pub fn field_equals(attributes: &Attributes, field: &str, expected: &str) -> bool {
    attributes.get(field).and_then(Value::as_str) == Some(expected)
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => s.trim().parse::<f64>().map_or(false, f64::is_finite),
        _ => false,
    }
}

fn is_date(value: &Value) -> bool {
    value
        .as_str()
        .map_or(false, |s| NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok())
}

fn is_datetime(value: &Value) -> bool {
    value.as_str().map_or(false, |s| {
        DateTime::parse_from_rfc3339(s).is_ok()
            || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(pairs: &[(&str, Value)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_presence_rejects_blank_strings() {
        let rules = [FieldRule::presence("name")];
        let errors = validate_attributes(&rules, &attrs(&[("name", json!("  "))]));
        assert_eq!(errors.on("name"), ["can't be blank"]);

        let errors = validate_attributes(&rules, &attrs(&[]));
        assert_eq!(errors.on("name"), ["can't be blank"]);
    }

    #[test]
    fn test_absence_rejects_any_value() {
        let rules = [FieldRule::absence("legacy_code")];
        assert!(validate_attributes(&rules, &attrs(&[])).is_empty());
        assert!(validate_attributes(&rules, &attrs(&[("legacy_code", json!(""))])).is_empty());

        let errors = validate_attributes(&rules, &attrs(&[("legacy_code", json!("X1"))]));
        assert_eq!(errors.on("legacy_code"), ["must be blank"]);
    }

    #[test]
    fn test_length_passes_nil_and_counts_chars() {
        let rules = [FieldRule::length("comments", 3)];
        assert!(validate_attributes(&rules, &attrs(&[])).is_empty());
        assert!(validate_attributes(&rules, &attrs(&[("comments", json!("äöü"))])).is_empty());

        let errors = validate_attributes(&rules, &attrs(&[("comments", json!("abcd"))]));
        assert_eq!(errors.on("comments"), ["is too long (maximum is 3 characters)"]);
    }

    #[test]
    fn test_numericality_accepts_numbers_and_numeric_strings() {
        let rules = [FieldRule::numericality("amount")];
        assert!(validate_attributes(&rules, &attrs(&[("amount", json!(12.5))])).is_empty());
        assert!(validate_attributes(&rules, &attrs(&[("amount", json!("12.50"))])).is_empty());
        assert!(!validate_attributes(&rules, &attrs(&[("amount", json!("twelve"))])).is_empty());
        assert!(!validate_attributes(&rules, &attrs(&[])).is_empty());
    }

    #[test]
    fn test_inclusion_with_allow_nil() {
        let rules = [FieldRule::inclusion("type", &["Credit", "Charge"]).allow_nil()];
        assert!(validate_attributes(&rules, &attrs(&[])).is_empty());
        assert!(validate_attributes(&rules, &attrs(&[("type", json!("Credit"))])).is_empty());

        let errors = validate_attributes(&rules, &attrs(&[("type", json!("Refund"))]));
        assert_eq!(errors.on("type"), ["is not included in the list"]);
    }

    #[test]
    fn test_date_and_datetime_formats() {
        let rules = [
            FieldRule::date("adjustment_date"),
            FieldRule::datetime("created_date"),
        ];
        let good = attrs(&[
            ("adjustment_date", json!("2024-02-29")),
            ("created_date", json!("2024-02-29T10:15:00+01:00")),
        ]);
        assert!(validate_attributes(&rules, &good).is_empty());

        let naive = attrs(&[
            ("adjustment_date", json!("2024-02-29")),
            ("created_date", json!("2024-02-29T10:15:00")),
        ]);
        assert!(validate_attributes(&rules, &naive).is_empty());

        let bad = attrs(&[
            ("adjustment_date", json!("2023-02-29")),
            ("created_date", json!("yesterday")),
        ]);
        let errors = validate_attributes(&rules, &bad);
        assert_eq!(errors.on("adjustment_date"), ["is not a valid date"]);
        assert_eq!(errors.on("created_date"), ["is not a valid datetime"]);
    }

    #[test]
    fn test_condition_reads_live_sibling_value() {
        let rules = [FieldRule::presence("invoice_id").when(|a| is_nil(a, "invoice_number"))];

        let errors = validate_attributes(&rules, &attrs(&[]));
        assert_eq!(errors.on("invoice_id"), ["can't be blank"]);

        let with_number = attrs(&[("invoice_number", json!("INV-1"))]);
        assert!(validate_attributes(&rules, &with_number).is_empty());
    }
}

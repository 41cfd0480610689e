//! Declarative field validation.
//!
//! Each entity lists its fields as [`FieldSpec`]s pointing at shared rule
//! tables; one evaluator walks every rule of every field and accumulates
//! messages into a [`Violations`] map keyed by wire field name. Rules never
//! short-circuit, so one field can collect several messages and a bad field
//! never hides another.

mod rules;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Wire field name mapped to the ordered list of messages its rules
/// produced. Empty means the entity is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(BTreeMap<String, Vec<String>>);

impl Violations {
    pub fn record(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with at least one violation.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    pub fn as_value(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(field, messages)| {
                    let list = messages.iter().cloned().map(Value::String).collect();
                    (field.clone(), Value::Array(list))
                })
                .collect(),
        )
    }
}

/// The value of one field as seen by the rules.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Reference(Option<Uuid>),
}

/// A single declarative constraint.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Rejects absent references and text that is empty or whitespace.
    NotBlank,
    /// Inclusive character-count bounds. Text only.
    Length { min: usize, max: usize },
    /// Regex over the text; `must_match` picks the polarity. Text only.
    Pattern {
        regex: &'static LazyLock<Regex>,
        must_match: bool,
        message: &'static str,
    },
}

impl Rule {
    fn check(&self, value: &FieldValue<'_>) -> Option<String> {
        match (self, value) {
            (Rule::NotBlank, FieldValue::Text(text)) => {
                if text.trim().is_empty() {
                    Some("must not be blank".to_string())
                } else {
                    None
                }
            }
            (Rule::NotBlank, FieldValue::Reference(reference)) => {
                if reference.is_none() {
                    Some("must not be blank".to_string())
                } else {
                    None
                }
            }
            (Rule::Length { min, max }, FieldValue::Text(text)) => {
                let length = text.chars().count();
                if length < *min {
                    Some(format!("must be at least {min} characters"))
                } else if length > *max {
                    Some(format!("must be at most {max} characters"))
                } else {
                    None
                }
            }
            (
                Rule::Pattern {
                    regex,
                    must_match,
                    message,
                },
                FieldValue::Text(text),
            ) => {
                if regex.is_match(text) != *must_match {
                    Some((*message).to_string())
                } else {
                    None
                }
            }
            // Length and pattern rules do not constrain references.
            (_, FieldValue::Reference(_)) => None,
        }
    }
}

/// One field of an entity paired with the rule table governing it.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec<'a> {
    pub name: &'static str,
    pub value: FieldValue<'a>,
    pub rules: &'static [Rule],
}

/// Implemented by entities that expose their fields to the evaluator.
pub trait Validate {
    fn fields(&self) -> Vec<FieldSpec<'_>>;
}

/// Run every rule of every field and collect the failures. Pure over the
/// entity's current state.
pub fn validate(entity: &impl Validate) -> Violations {
    let mut violations = Violations::default();
    for field in entity.fields() {
        for rule in field.rules {
            if let Some(message) = rule.check(&field.value) {
                violations.record(field.name, message);
            }
        }
    }
    violations
}

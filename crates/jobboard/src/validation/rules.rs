//! Rule tables for the three entities.
//!
//! Descriptive text (names, titles, descriptions) must read as prose, so it
//! additionally rejects digits. Structured text (locations, contact details,
//! skills, preferences) shares the presence and length bounds but may carry
//! numbers. Every text field is bounded at 3..=255 characters.

use std::sync::LazyLock;

use regex::Regex;

use super::{FieldSpec, FieldValue, Rule, Validate};
use crate::domain::{Applicant, Company, Job};

static DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d").expect("digit pattern compiles"));

static DESCRIPTIVE_TEXT: &[Rule] = &[
    Rule::NotBlank,
    Rule::Length { min: 3, max: 255 },
    Rule::Pattern {
        regex: &DIGIT,
        must_match: false,
        message: "must not contain digits",
    },
];

static STRUCTURED_TEXT: &[Rule] = &[Rule::NotBlank, Rule::Length { min: 3, max: 255 }];

static REQUIRED_REFERENCE: &[Rule] = &[Rule::NotBlank];

impl Validate for Company {
    fn fields(&self) -> Vec<FieldSpec<'_>> {
        vec![
            FieldSpec {
                name: "name",
                value: FieldValue::Text(self.name()),
                rules: DESCRIPTIVE_TEXT,
            },
            FieldSpec {
                name: "description",
                value: FieldValue::Text(self.description()),
                rules: DESCRIPTIVE_TEXT,
            },
            FieldSpec {
                name: "location",
                value: FieldValue::Text(self.location()),
                rules: STRUCTURED_TEXT,
            },
            FieldSpec {
                name: "contactInformation",
                value: FieldValue::Text(self.contact_information()),
                rules: STRUCTURED_TEXT,
            },
        ]
    }
}

impl Validate for Job {
    fn fields(&self) -> Vec<FieldSpec<'_>> {
        vec![
            FieldSpec {
                name: "title",
                value: FieldValue::Text(self.title()),
                rules: DESCRIPTIVE_TEXT,
            },
            FieldSpec {
                name: "description",
                value: FieldValue::Text(self.description()),
                rules: DESCRIPTIVE_TEXT,
            },
            FieldSpec {
                name: "requiredSkills",
                value: FieldValue::Text(self.required_skills()),
                rules: STRUCTURED_TEXT,
            },
            FieldSpec {
                name: "experience",
                value: FieldValue::Text(self.experience()),
                rules: STRUCTURED_TEXT,
            },
            FieldSpec {
                name: "company",
                value: FieldValue::Reference(self.company().map(|company| company.0)),
                rules: REQUIRED_REFERENCE,
            },
        ]
    }
}

impl Validate for Applicant {
    fn fields(&self) -> Vec<FieldSpec<'_>> {
        vec![
            FieldSpec {
                name: "name",
                value: FieldValue::Text(self.name()),
                rules: DESCRIPTIVE_TEXT,
            },
            FieldSpec {
                name: "contactInformation",
                value: FieldValue::Text(self.contact_information()),
                rules: STRUCTURED_TEXT,
            },
            FieldSpec {
                name: "jobPreferences",
                value: FieldValue::Text(self.job_preferences()),
                rules: STRUCTURED_TEXT,
            },
        ]
    }
}

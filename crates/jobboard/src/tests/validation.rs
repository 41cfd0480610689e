use super::common::*;
use crate::domain::Job;
use crate::validation::validate;
use serde_json::json;

#[test]
fn well_formed_entities_have_no_violations() {
    let company = company();
    let job = job_for(&company);
    let applicant = applicant();

    assert!(validate(&company).is_empty());
    assert!(validate(&job).is_empty());
    assert!(validate(&applicant).is_empty());
}

#[test]
fn length_bounds_are_inclusive() {
    let mut company = company();

    company.set_name("Ace");
    assert!(validate(&company).is_empty());

    company.set_name("A".repeat(255));
    assert!(validate(&company).is_empty());

    company.set_name("Ab");
    let violations = validate(&company);
    assert_eq!(
        violations.field("name"),
        Some(&["must be at least 3 characters".to_string()][..])
    );

    company.set_name("A".repeat(256));
    let violations = validate(&company);
    assert_eq!(
        violations.field("name"),
        Some(&["must be at most 255 characters".to_string()][..])
    );
}

#[test]
fn lengths_count_characters_not_bytes() {
    let mut company = company();

    company.set_name("Äää");
    assert!(validate(&company).is_empty());

    company.set_name("Ää");
    assert_eq!(validate(&company).len(), 1);
}

#[test]
fn digits_fail_descriptive_fields_once() {
    let mut company = company();
    company.set_name("Acme Logistics Two4");

    let violations = validate(&company);
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations.field("name"),
        Some(&["must not contain digits".to_string()][..])
    );
}

#[test]
fn digits_pass_structured_fields() {
    let mut company = company();
    company.set_location("Tartu mnt 67, Tallinn");
    company.set_contact_information("+372 5555 0100");

    assert!(validate(&company).is_empty());
}

#[test]
fn empty_field_collects_every_failing_rule_in_order() {
    let mut company = company();
    company.set_name("");

    let violations = validate(&company);
    assert_eq!(
        violations.field("name"),
        Some(
            &[
                "must not be blank".to_string(),
                "must be at least 3 characters".to_string(),
            ][..]
        )
    );
}

#[test]
fn whitespace_only_counts_as_blank() {
    let mut applicant = applicant();
    applicant.set_job_preferences("   ");

    let violations = validate(&applicant);
    assert_eq!(
        violations.field("jobPreferences"),
        Some(&["must not be blank".to_string()][..])
    );
}

#[test]
fn detached_job_flags_its_company_reference() {
    let company = company();
    let job = Job::new(&job_input(company.id()));

    let violations = validate(&job);
    assert_eq!(
        violations.field("company"),
        Some(&["must not be blank".to_string()][..])
    );
}

#[test]
fn every_field_is_checked_without_short_circuiting() {
    let mut applicant = applicant();
    applicant.set_name("1");
    applicant.set_contact_information("");

    let violations = validate(&applicant);
    assert_eq!(violations.len(), 2);
    assert_eq!(
        violations.field("name"),
        Some(
            &[
                "must be at least 3 characters".to_string(),
                "must not contain digits".to_string(),
            ][..]
        )
    );
    assert!(violations.field("contactInformation").is_some());
}

#[test]
fn violations_serialize_as_a_plain_map() {
    let mut company = company();
    company.set_name("Acme 24");

    let violations = validate(&company);
    let value = serde_json::to_value(&violations).expect("violations serialize");
    assert_eq!(value, json!({ "name": ["must not contain digits"] }));
}

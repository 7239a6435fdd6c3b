use crate::domain::model::{Attributes, Value};
use crate::domain::record::{zobject, ObjectSchema};
use crate::domain::rules::{field_equals, FieldRule};
use once_cell::sync::Lazy;
use serde_json::json;

const TERM_TYPES: &[&str] = &["TERMED", "EVERGREEN"];

fn is_termed(attributes: &Attributes) -> bool {
    field_equals(attributes, "term_type", "TERMED")
}

fn default_auto_renew() -> Value {
    json!(false)
}

fn default_term_type() -> Value {
    json!("TERMED")
}

pub(crate) static SUBSCRIPTION_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| ObjectSchema {
    name: "Subscription",
    fields: &[
        "account_id",
        "auto_renew",
        "cancelled_date",
        "contract_acceptance_date",
        "contract_effective_date",
        "initial_term",
        "is_invoice_separate",
        "name",
        "notes",
        "original_created_date",
        "original_id",
        "previous_subscription_id",
        "renewal_term",
        "service_activation_date",
        "status",
        "subscription_end_date",
        "subscription_start_date",
        "term_end_date",
        "term_start_date",
        "term_type",
        "version",
        "created_by_id",
        "created_date",
        "updated_by_id",
        "updated_date",
    ],
    read_only: &[
        "cancelled_date",
        "original_created_date",
        "original_id",
        "previous_subscription_id",
        "status",
        "subscription_end_date",
        "subscription_start_date",
        "term_end_date",
        "version",
        "created_by_id",
        "created_date",
        "updated_by_id",
        "updated_date",
    ],
    defaults: vec![
        ("auto_renew", default_auto_renew as fn() -> Value),
        ("term_type", default_term_type as fn() -> Value),
    ],
    rules: vec![
        FieldRule::presence("contract_effective_date"),
        FieldRule::date("contract_effective_date"),
        FieldRule::date("contract_acceptance_date").allow_nil(),
        FieldRule::date("service_activation_date").allow_nil(),
        FieldRule::date("term_start_date").allow_nil(),
        FieldRule::inclusion("term_type", TERM_TYPES),
        FieldRule::presence("initial_term").when(is_termed),
        FieldRule::presence("renewal_term").when(is_termed),
        FieldRule::numericality("initial_term").allow_nil(),
        FieldRule::numericality("renewal_term").allow_nil(),
        FieldRule::length("name", 100),
        FieldRule::length("notes", 500),
        FieldRule::datetime("created_date").allow_nil(),
        FieldRule::datetime("updated_date").allow_nil(),
    ],
});

zobject!(
    /// A customer's subscription to one or more rate plans.
    Subscription,
    SUBSCRIPTION_SCHEMA
);

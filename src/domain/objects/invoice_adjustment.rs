use crate::domain::model::{Attributes, Value};
use crate::domain::record::{zobject, ObjectSchema};
use crate::domain::rules::{is_nil, FieldRule};
use chrono::Local;
use once_cell::sync::Lazy;

const TYPES: &[&str] = &["Credit", "Charge"];
const TRANSFERRED_TO_ACCOUNTING: &[&str] = &["Processing", "Yes", "Error", "Ignore"];

fn today() -> Value {
    Value::String(Local::now().date_naive().format("%Y-%m-%d").to_string())
}

fn missing_invoice_number(attributes: &Attributes) -> bool {
    is_nil(attributes, "invoice_number")
}

fn missing_invoice_id(attributes: &Attributes) -> bool {
    is_nil(attributes, "invoice_id")
}

fn has_invoice_id(attributes: &Attributes) -> bool {
    !missing_invoice_id(attributes)
}

pub(crate) static INVOICE_ADJUSTMENT_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| ObjectSchema {
    name: "InvoiceAdjustment",
    fields: &[
        "account_id",
        "accounting_code",
        "adjustment_date",
        "adjustment_number",
        "amount",
        "cancelled_by_id",
        "cancelled_on",
        "comments",
        "customer_name",
        "customer_number",
        "impact_amount",
        "invoice_id",
        "invoice_number",
        "reason_code",
        "reference_id",
        "status",
        "transferred_to_accounting",
        "type",
        "created_by_id",
        "created_date",
        "updated_by_id",
        "updated_date",
    ],
    read_only: &[
        "cancelled_by_id",
        "cancelled_on",
        "created_by_id",
        "created_date",
        "impact_amount",
        "updated_by_id",
        "updated_date",
        "status",
    ],
    defaults: vec![("adjustment_date", today as fn() -> Value)],
    rules: vec![
        FieldRule::presence("amount"),
        FieldRule::presence("type"),
        FieldRule::length("accounting_code", 100),
        FieldRule::date("adjustment_date").allow_nil(),
        FieldRule::length("adjustment_number", 50),
        FieldRule::numericality("amount"),
        FieldRule::length("cancelled_by_id", 32),
        FieldRule::datetime("cancelled_on").allow_nil(),
        FieldRule::length("comments", 255),
        FieldRule::length("created_by_id", 32),
        FieldRule::datetime("created_date").allow_nil(),
        FieldRule::length("customer_name", 50).allow_nil(),
        FieldRule::length("customer_number", 70).allow_nil(),
        FieldRule::presence("invoice_id").when(missing_invoice_number),
        FieldRule::presence("invoice_number").when(missing_invoice_id),
        // The invoice is named one way only.
        FieldRule::absence("invoice_number").when(has_invoice_id),
        FieldRule::length("reference_id", 60).allow_nil(),
        FieldRule::inclusion("transferred_to_accounting", TRANSFERRED_TO_ACCOUNTING).allow_nil(),
        FieldRule::inclusion("type", TYPES),
        FieldRule::length("updated_by_id", 32).allow_nil(),
        // Server-stamped; absent until the adjustment has been saved.
        FieldRule::datetime("updated_date").allow_nil(),
    ],
});

zobject!(
    /// A credit or charge applied against one invoice, identified by id or number.
    InvoiceAdjustment,
    INVOICE_ADJUSTMENT_SCHEMA
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::ZObject;
    use crate::utils::error::ZuoraError;
    use serde_json::json;

    #[test]
    fn test_amount_and_type_required() {
        let adjustment = InvoiceAdjustment::new()
            .with("invoice_id", "ff8080811a6e3d4b011a6e4b9b2a0011")
            .unwrap();
        let errors = adjustment.validate();
        assert_eq!(errors.on("amount"), ["can't be blank", "is not a number"]);
        assert_eq!(errors.on("type"), ["can't be blank", "is not included in the list"]);
    }

    #[test]
    fn test_type_must_be_credit_or_charge() {
        let adjustment = InvoiceAdjustment::new()
            .with("amount", 10.5)
            .and_then(|a| a.with("invoice_number", "INV00000001"))
            .and_then(|a| a.with("type", "Refund"))
            .unwrap();
        assert_eq!(adjustment.validate().on("type"), ["is not included in the list"]);

        let adjustment = adjustment.with("type", "Credit").unwrap();
        assert!(adjustment.is_valid());
    }

    #[test]
    fn test_needs_invoice_id_or_number() {
        let adjustment = InvoiceAdjustment::new()
            .with("amount", "25.00")
            .and_then(|a| a.with("type", "Charge"))
            .unwrap();
        let errors = adjustment.validate();
        assert_eq!(errors.on("invoice_id"), ["can't be blank"]);
        assert_eq!(errors.on("invoice_number"), ["can't be blank"]);

        let by_number = adjustment.clone().with("invoice_number", "INV00000001").unwrap();
        assert!(by_number.is_valid());

        let by_id = adjustment.with("invoice_id", "ff8080811a6e3d4b011a6e4b9b2a0011").unwrap();
        assert!(by_id.is_valid());
    }

    #[test]
    fn test_invoice_id_and_number_are_exclusive() {
        let adjustment = InvoiceAdjustment::new()
            .with("amount", 10)
            .and_then(|a| a.with("type", "Credit"))
            .and_then(|a| a.with("invoice_id", "I1"))
            .and_then(|a| a.with("invoice_number", "INV1"))
            .unwrap();
        let errors = adjustment.validate();
        assert!(!adjustment.is_valid());
        assert_eq!(errors.on("invoice_number"), ["must be blank"]);
        assert!(errors.on("invoice_id").is_empty());

        let by_number = adjustment.with("invoice_id", Value::Null).unwrap();
        assert!(by_number.is_valid());
    }

    #[test]
    fn test_adjustment_date_defaults_to_today() {
        let adjustment = InvoiceAdjustment::new();
        let expected = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(adjustment.get("adjustment_date"), Some(&json!(expected)));
    }

    #[test]
    fn test_audit_fields_are_read_only() {
        let mut adjustment = InvoiceAdjustment::new();
        assert!(matches!(
            adjustment.set("created_by_id", "someone"),
            Err(ZuoraError::ReadOnlyAttributeError { .. })
        ));
    }
}

use crate::domain::model::Value;
use crate::domain::record::{zobject, ObjectSchema};
use crate::domain::rules::FieldRule;
use once_cell::sync::Lazy;
use serde_json::json;

const STATUSES: &[&str] = &["Active", "Draft", "Canceled"];
const PAYMENT_TERMS: &[&str] = &["Due Upon Receipt", "Net 15", "Net 30", "Net 45", "Net 60", "Net 90"];
const BCD_SETTING_OPTIONS: &[&str] = &["AutoSet", "ManualSet"];
const BATCHES: &[&str] = &[
    "Batch1", "Batch2", "Batch3", "Batch4", "Batch5", "Batch6", "Batch7", "Batch8", "Batch9",
    "Batch10", "Batch11", "Batch12", "Batch13", "Batch14", "Batch15", "Batch16", "Batch17",
    "Batch18", "Batch19", "Batch20",
];
const BILL_CYCLE_DAYS: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "23", "24", "25", "26", "27", "28", "29", "30", "31",
];

fn default_auto_pay() -> Value {
    json!(false)
}

fn default_batch() -> Value {
    json!("Batch1")
}

fn default_bill_cycle_day() -> Value {
    json!(1)
}

fn default_currency() -> Value {
    json!("USD")
}

fn default_payment_term() -> Value {
    json!("Due Upon Receipt")
}

fn default_status() -> Value {
    json!("Draft")
}

pub(crate) static ACCOUNT_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| ObjectSchema {
    name: "Account",
    fields: &[
        "account_number",
        "additional_email_addresses",
        "allow_invoice_edit",
        "auto_pay",
        "balance",
        "batch",
        "bcd_setting_option",
        "bill_cycle_day",
        "bill_to_id",
        "communication_profile_id",
        "crm_id",
        "currency",
        "customer_service_rep_name",
        "default_payment_method_id",
        "invoice_delivery_prefs_email",
        "invoice_delivery_prefs_print",
        "invoice_template_id",
        "last_invoice_date",
        "name",
        "notes",
        "parent_id",
        "payment_gateway",
        "payment_term",
        "purchase_order_number",
        "sales_rep_name",
        "sold_to_id",
        "status",
        "tax_exempt_certificate_id",
        "tax_exempt_status",
        "created_by_id",
        "created_date",
        "updated_by_id",
        "updated_date",
    ],
    read_only: &[
        "balance",
        "last_invoice_date",
        "created_by_id",
        "created_date",
        "updated_by_id",
        "updated_date",
    ],
    defaults: vec![
        ("auto_pay", default_auto_pay as fn() -> Value),
        ("batch", default_batch as fn() -> Value),
        ("bill_cycle_day", default_bill_cycle_day as fn() -> Value),
        ("currency", default_currency as fn() -> Value),
        ("payment_term", default_payment_term as fn() -> Value),
        ("status", default_status as fn() -> Value),
    ],
    rules: vec![
        FieldRule::presence("name"),
        FieldRule::presence("currency"),
        FieldRule::presence("status"),
        FieldRule::presence("batch"),
        FieldRule::presence("bill_cycle_day"),
        FieldRule::presence("payment_term"),
        FieldRule::length("account_number", 70),
        FieldRule::length("additional_email_addresses", 1200),
        FieldRule::length("crm_id", 100),
        FieldRule::length("name", 255),
        FieldRule::length("notes", 65535),
        FieldRule::length("purchase_order_number", 100),
        FieldRule::length("sales_rep_name", 50),
        FieldRule::inclusion("status", STATUSES),
        FieldRule::inclusion("payment_term", PAYMENT_TERMS),
        FieldRule::inclusion("batch", BATCHES),
        FieldRule::inclusion("bill_cycle_day", BILL_CYCLE_DAYS),
        FieldRule::inclusion("bcd_setting_option", BCD_SETTING_OPTIONS).allow_nil(),
        FieldRule::date("last_invoice_date").allow_nil(),
        FieldRule::datetime("created_date").allow_nil(),
        FieldRule::datetime("updated_date").allow_nil(),
    ],
});

zobject!(
    /// A customer account: the billing owner of contacts, payment methods and subscriptions.
    Account,
    ACCOUNT_SCHEMA
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::ZObject;

    #[test]
    fn test_new_account_carries_defaults() {
        let account = Account::new();
        assert_eq!(account.get("currency"), Some(&json!("USD")));
        assert_eq!(account.get("status"), Some(&json!("Draft")));
        assert_eq!(account.validate().on("name"), ["can't be blank"]);
    }

    #[test]
    fn test_bill_cycle_day_accepts_number_or_string() {
        let account = Account::new().with("name", "Foo").unwrap();
        assert!(account.is_valid());

        let account = account.with("bill_cycle_day", "15").unwrap();
        assert!(account.is_valid());

        let account = account.with("bill_cycle_day", 32).unwrap();
        assert_eq!(
            account.validate().on("bill_cycle_day"),
            ["is not included in the list"]
        );
    }
}

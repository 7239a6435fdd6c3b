use crate::domain::model::Attributes;
use crate::domain::record::{zobject, ObjectSchema};
use crate::domain::rules::{field_equals, FieldRule};
use once_cell::sync::Lazy;

const TYPES: &[&str] = &[
    "ACH",
    "Cash",
    "Check",
    "CreditCard",
    "CreditCardReferenceTransaction",
    "DebitCard",
    "Other",
    "PayPal",
    "WireTransfer",
];
const ACH_ACCOUNT_TYPES: &[&str] = &["BusinessChecking", "Checking", "Saving"];
const CREDIT_CARD_TYPES: &[&str] = &["AmericanExpress", "Discover", "MasterCard", "Visa"];
const PAYPAL_TYPES: &[&str] = &["ExpressCheckout", "AdaptivePayments"];

fn is_ach(attributes: &Attributes) -> bool {
    field_equals(attributes, "type", "ACH")
}

fn is_credit_card(attributes: &Attributes) -> bool {
    field_equals(attributes, "type", "CreditCard")
}

fn is_paypal(attributes: &Attributes) -> bool {
    field_equals(attributes, "type", "PayPal")
}

pub(crate) static PAYMENT_METHOD_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| ObjectSchema {
    name: "PaymentMethod",
    fields: &[
        "account_id",
        "ach_aba_code",
        "ach_account_name",
        "ach_account_number",
        "ach_account_type",
        "ach_bank_name",
        "credit_card_address1",
        "credit_card_address2",
        "credit_card_city",
        "credit_card_country",
        "credit_card_expiration_month",
        "credit_card_expiration_year",
        "credit_card_holder_name",
        "credit_card_number",
        "credit_card_postal_code",
        "credit_card_security_code",
        "credit_card_state",
        "credit_card_type",
        "email",
        "paypal_baid",
        "paypal_email",
        "paypal_type",
        "type",
        "created_by_id",
        "created_date",
        "updated_by_id",
        "updated_date",
    ],
    read_only: &["created_by_id", "created_date", "updated_by_id", "updated_date"],
    defaults: Vec::new(),
    rules: vec![
        FieldRule::presence("type"),
        FieldRule::inclusion("type", TYPES),
        FieldRule::presence("ach_aba_code").when(is_ach),
        FieldRule::presence("ach_account_name").when(is_ach),
        FieldRule::presence("ach_account_number").when(is_ach),
        FieldRule::presence("ach_account_type").when(is_ach),
        FieldRule::presence("ach_bank_name").when(is_ach),
        FieldRule::length("ach_aba_code", 9),
        FieldRule::length("ach_account_name", 70),
        FieldRule::length("ach_account_number", 30),
        FieldRule::length("ach_bank_name", 70),
        FieldRule::inclusion("ach_account_type", ACH_ACCOUNT_TYPES).allow_nil(),
        FieldRule::presence("credit_card_holder_name").when(is_credit_card),
        FieldRule::presence("credit_card_number").when(is_credit_card),
        FieldRule::presence("credit_card_type").when(is_credit_card),
        FieldRule::presence("credit_card_expiration_month").when(is_credit_card),
        FieldRule::presence("credit_card_expiration_year").when(is_credit_card),
        FieldRule::length("credit_card_holder_name", 50),
        FieldRule::length("credit_card_number", 16),
        FieldRule::length("credit_card_postal_code", 20),
        FieldRule::numericality("credit_card_expiration_month").allow_nil(),
        FieldRule::numericality("credit_card_expiration_year").allow_nil(),
        FieldRule::inclusion("credit_card_type", CREDIT_CARD_TYPES).allow_nil(),
        FieldRule::presence("paypal_baid").when(is_paypal),
        FieldRule::presence("paypal_email").when(is_paypal),
        FieldRule::presence("paypal_type").when(is_paypal),
        FieldRule::length("paypal_email", 80),
        FieldRule::inclusion("paypal_type", PAYPAL_TYPES).allow_nil(),
        FieldRule::datetime("created_date").allow_nil(),
        FieldRule::datetime("updated_date").allow_nil(),
    ],
});

zobject!(
    /// How an account pays. Required detail fields depend on `type`.
    PaymentMethod,
    PAYMENT_METHOD_SCHEMA
);

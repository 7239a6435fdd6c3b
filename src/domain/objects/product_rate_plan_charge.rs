use crate::domain::record::{zobject, ObjectSchema, ZObject};
use once_cell::sync::Lazy;

const FIELDS: &[&str] = &[
    "accounting_code",
    "bill_cycle_day",
    "bill_cycle_type",
    "billing_period",
    "charge_model",
    "charge_type",
    "default_quantity",
    "description",
    "included_units",
    "max_quantity",
    "min_quantity",
    "name",
    "product_rate_plan_id",
    "trigger_event",
    "uom",
    "created_by_id",
    "created_date",
    "updated_by_id",
    "updated_date",
];

// Catalog entries are looked up, never written by this client.
pub(crate) static PRODUCT_RATE_PLAN_CHARGE_SCHEMA: Lazy<ObjectSchema> =
    Lazy::new(|| ObjectSchema {
        name: "ProductRatePlanCharge",
        fields: FIELDS,
        read_only: FIELDS,
        defaults: Vec::new(),
        rules: Vec::new(),
    });

zobject!(
    /// Catalog template for a charge within a product rate plan.
    ProductRatePlanCharge,
    PRODUCT_RATE_PLAN_CHARGE_SCHEMA
);

impl ProductRatePlanCharge {
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(|v| v.as_str())
    }

    pub fn product_rate_plan_id(&self) -> Option<&str> {
        self.get("product_rate_plan_id").and_then(|v| v.as_str())
    }
}

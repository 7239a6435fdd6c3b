use crate::domain::model::Value;
use crate::domain::objects::ProductRatePlanCharge;
use std::sync::Arc;

/// One requested charge line: a catalog charge plus the quantity to subscribe to.
#[derive(Debug, Clone, PartialEq)]
pub struct RatePlanCharge {
    pub product_rate_plan_charge: Arc<ProductRatePlanCharge>,
    pub quantity: Value,
}

impl RatePlanCharge {
    pub fn new(product_rate_plan_charge: Arc<ProductRatePlanCharge>, quantity: impl Into<Value>) -> Self {
        Self {
            product_rate_plan_charge,
            quantity: quantity.into(),
        }
    }
}

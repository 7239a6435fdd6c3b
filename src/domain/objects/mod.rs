pub mod account;
pub mod contact;
pub mod invoice_adjustment;
pub mod payment_method;
pub mod product_rate_plan_charge;
pub mod rate_plan_charge;
pub mod subscription;

pub use account::Account;
pub use contact::Contact;
pub use invoice_adjustment::InvoiceAdjustment;
pub use payment_method::PaymentMethod;
pub use product_rate_plan_charge::ProductRatePlanCharge;
pub use rate_plan_charge::RatePlanCharge;
pub use subscription::Subscription;

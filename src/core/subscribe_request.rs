//! The subscribe aggregate.
//!
//! A `SubscribeRequest` bundles an account, its contacts, an optional
//! payment method, a new subscription and the charges to subscribe to, and
//! submits them as one `subscribe` call. It is built in memory, validated,
//! submitted once and then dropped: unlike the record types it has no
//! find, update or delete.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use zuora_objects::prelude::*;
//! # async fn run(api: &Api<HttpTransport>) -> zuora_objects::Result<()> {
//! let account = Account::new().with("name", "Foo")?.with("currency", "USD")?;
//! let bill_to_contact = Contact::new()
//!     .with("first_name", "John")?
//!     .with("last_name", "Doe")?;
//! let subscription = Subscription::new()
//!     .with("contract_effective_date", "2024-03-01")?
//!     .with("initial_term", 12)?
//!     .with("renewal_term", 12)?;
//! let catalog: ProductRatePlanCharge = find(api, "RATE_PLAN_CHARGE_ID").await?;
//!
//! let mut request = SubscribeRequest::new();
//! request.account = Some(account);
//! request.bill_to_contact = Some(bill_to_contact);
//! request.subscription = Some(subscription);
//! request.set_rate_plan_charge(RatePlanCharge::new(Arc::new(catalog), 10));
//!
//! if request.validate() {
//!     let result = request.create(api).await?;
//!     println!("subscribed: {}", result.success);
//! }
//! # Ok(())
//! # }
//! ```

use crate::core::api::Api;
use crate::core::composer::compose_subscribes;
use crate::core::response::SubscribeResult;
use crate::domain::model::{Options, ValidationErrors};
use crate::domain::objects::{Account, Contact, PaymentMethod, RatePlanCharge, Subscription};
use crate::domain::ports::Transport;
use crate::domain::record::ZObject;
use crate::utils::error::Result;
use crate::utils::xml::XmlBuilder;

/// Base error recorded when a failed reply carries no messages of its own.
pub const REJECTED_WITHOUT_MESSAGE: &str = "subscribe rejected without a message";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscribeRequest {
    pub account: Option<Account>,
    pub bill_to_contact: Option<Contact>,
    pub sold_to_contact: Option<Contact>,
    pub payment_method: Option<PaymentMethod>,
    pub subscription: Option<Subscription>,
    pub rate_plan_charges: Vec<RatePlanCharge>,
    pub subscribe_options: Options,
    pub preview_options: Options,
    errors: ValidationErrors,
}

impl SubscribeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the charge list with this single charge.
    pub fn set_rate_plan_charge(&mut self, rate_plan_charge: RatePlanCharge) {
        self.rate_plan_charges = vec![rate_plan_charge];
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Re-runs the nested-validity checks. Returns true when no errors were recorded.
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        must_have_usable(&mut self.errors, "account", self.account.as_ref());
        must_have_usable(&mut self.errors, "bill_to_contact", self.bill_to_contact.as_ref());
        must_have_new(&mut self.errors, "subscription", self.subscription.as_ref());
        self.errors.is_empty()
    }

    pub fn is_valid(&mut self) -> bool {
        self.validate()
    }

    /// Writes the operation body for this aggregate.
    pub fn compose(&self, xml: &mut XmlBuilder) -> Result<()> {
        compose_subscribes(self, xml)
    }

    /// Submits the aggregate. Validation is the caller's job; a remote
    /// rejection is reported through `errors()`, not as `Err`.
    pub async fn create<T: Transport>(&mut self, api: &Api<T>) -> Result<SubscribeResult> {
        tracing::info!(
            "Submitting subscribe request with {} rate plan charge(s)",
            self.rate_plan_charges.len()
        );
        let response = api.request("subscribe", |xml| self.compose(xml)).await?;
        let result = SubscribeResult::from_response(&response)?;
        self.apply_response(&result)?;
        Ok(result)
    }

    fn apply_response(&mut self, result: &SubscribeResult) -> Result<()> {
        if result.success {
            if let Some(subscription) = self.subscription.as_mut() {
                if let Some(account_id) = &result.account_id {
                    subscription.set("account_id", account_id.as_str())?;
                }
                if let Some(subscription_id) = &result.subscription_id {
                    subscription.set_id(subscription_id.as_str());
                }
                subscription.clear_changed_attributes();
            }
            tracing::info!(
                "✅ Subscribed: account {:?}, subscription {:?}",
                result.account_id,
                result.subscription_id
            );
        } else {
            for error in &result.errors {
                tracing::warn!("Subscribe rejected: {}", error.message);
                self.errors.add_base(error.message.clone());
            }
            if result.errors.is_empty() {
                tracing::warn!("Subscribe rejected without an Errors entry");
                self.errors.add_base(REJECTED_WITHOUT_MESSAGE);
            }
        }
        Ok(())
    }
}

/// Present, and valid if it is new or has pending changes.
fn must_have_usable<O: ZObject>(errors: &mut ValidationErrors, field: &str, object: Option<&O>) {
    let object = match object {
        Some(object) => object,
        None => {
            errors.add(field, "must be provided");
            return;
        }
    };
    if (object.is_new() || object.is_changed()) && !object.is_valid() {
        errors.add(field, "is invalid");
    }
}

/// Present, never persisted, and usable.
fn must_have_new<O: ZObject>(errors: &mut ValidationErrors, field: &str, object: Option<&O>) {
    match object {
        None => errors.add(field, "must be provided"),
        Some(object) if !object.is_new() => errors.add(field, "must be new"),
        Some(_) => must_have_usable(errors, field, object),
    }
}

//! Builds the `subscribes` block of a subscribe call.
//!
//! Element order is fixed: Account, PaymentMethod, BillToContact,
//! PreviewOptions, SoldToContact, SubscribeOptions, SubscriptionData.
//! Optional blocks are left out entirely when unset or empty; the remote
//! schema validates document shape, so an empty block is not equivalent.

use crate::core::api::{ons, zns};
use crate::core::naming::zuora_camelize;
use crate::core::subscribe_request::SubscribeRequest;
use crate::domain::model::{value_text, Options, Value};
use crate::domain::objects::RatePlanCharge;
use crate::domain::record::ZObject;
use crate::utils::error::{Result, ZuoraError};
use crate::utils::xml::XmlBuilder;

/// How a nested object travels: its server id alone, or every non-null field.
#[derive(Debug, Clone, PartialEq)]
pub enum NestedPayload<'a> {
    Reference(&'a str),
    Full(Vec<(&'static str, &'a Value)>),
}

impl<'a> NestedPayload<'a> {
    /// Persisted objects go by reference even when they carry local changes.
    pub fn of<O: ZObject>(object: &'a O) -> Self {
        match object.id() {
            Some(id) => NestedPayload::Reference(id),
            None => NestedPayload::Full(object.to_fields()),
        }
    }

    pub fn full<O: ZObject>(object: &'a O) -> Self {
        NestedPayload::Full(object.to_fields())
    }

    pub fn write(&self, xml: &mut XmlBuilder) -> Result<()> {
        match self {
            NestedPayload::Reference(id) => xml.element(&ons("Id"), id),
            NestedPayload::Full(fields) => {
                for (field, value) in fields {
                    if let Some(text) = value_text(value) {
                        xml.element(&ons(&zuora_camelize(field)), &text)?;
                    }
                }
                Ok(())
            }
        }
    }
}

fn required<'a, O>(object: &'a Option<O>, field: &str) -> Result<&'a O> {
    object
        .as_ref()
        .ok_or_else(|| ZuoraError::IncompleteRequestError {
            field: field.to_string(),
        })
}

/// An options block is only written when it has something to say.
fn has_values(options: &Options) -> bool {
    options.values().any(|v| !v.is_null())
}

fn write_options(xml: &mut XmlBuilder, options: &Options) -> Result<()> {
    for (key, value) in options {
        if let Some(text) = value_text(value) {
            xml.element(&zns(&zuora_camelize(key)), &text)?;
        }
    }
    Ok(())
}

fn write_rate_plan_data(xml: &mut XmlBuilder, charge: &RatePlanCharge) -> Result<()> {
    let catalog = &charge.product_rate_plan_charge;
    let missing = || ZuoraError::IncompleteRequestError {
        field: "product_rate_plan_charge".to_string(),
    };
    let charge_id = catalog.id().ok_or_else(missing)?;
    let rate_plan_id = catalog.product_rate_plan_id().ok_or_else(missing)?;

    xml.nest(&zns("RatePlanData"), |rpd| {
        rpd.nest(&zns("RatePlan"), |rp| {
            rp.element(&ons("ProductRatePlanId"), rate_plan_id)
        })?;
        rpd.nest(&zns("RatePlanChargeData"), |rpcd| {
            rpcd.nest(&zns("RatePlanCharge"), |rpc| {
                if let Some(name) = catalog.name() {
                    rpc.element(&ons("Name"), name)?;
                }
                rpc.element(&ons("ProductRatePlanChargeId"), charge_id)?;
                if let Some(quantity) = value_text(&charge.quantity) {
                    rpc.element(&ons("Quantity"), &quantity)?;
                }
                Ok(())
            })
        })
    })
}

/// Writes `<subscribes>` for one aggregate.
pub fn compose_subscribes(request: &SubscribeRequest, xml: &mut XmlBuilder) -> Result<()> {
    let account = required(&request.account, "account")?;
    let bill_to_contact = required(&request.bill_to_contact, "bill_to_contact")?;
    let subscription = required(&request.subscription, "subscription")?;

    xml.nest(&zns("subscribes"), |s| {
        s.nest(&zns("Account"), |a| NestedPayload::of(account).write(a))?;

        if let Some(payment_method) = &request.payment_method {
            s.nest(&zns("PaymentMethod"), |pm| NestedPayload::of(payment_method).write(pm))?;
        }

        s.nest(&zns("BillToContact"), |btc| {
            NestedPayload::of(bill_to_contact).write(btc)
        })?;

        if has_values(&request.preview_options) {
            s.nest(&zns("PreviewOptions"), |po| {
                write_options(po, &request.preview_options)
            })?;
        }

        if let Some(sold_to_contact) = &request.sold_to_contact {
            s.nest(&zns("SoldToContact"), |stc| {
                NestedPayload::of(sold_to_contact).write(stc)
            })?;
        }

        if has_values(&request.subscribe_options) {
            s.nest(&zns("SubscribeOptions"), |so| {
                write_options(so, &request.subscribe_options)
            })?;
        }

        s.nest(&zns("SubscriptionData"), |sd| {
            // The validity gate only admits new subscriptions, so no reference form here.
            sd.nest(&zns("Subscription"), |sub| {
                NestedPayload::full(subscription).write(sub)
            })?;
            for charge in &request.rate_plan_charges {
                write_rate_plan_data(sd, charge)?;
            }
            Ok(())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::objects::Account;
    use serde_json::json;

    #[test]
    fn test_payload_choice_follows_identity() {
        let fresh = Account::new().with("name", "Foo").unwrap();
        match NestedPayload::of(&fresh) {
            NestedPayload::Full(fields) => {
                assert!(fields.contains(&("name", &json!("Foo"))));
            }
            other => panic!("expected full payload, got {:?}", other),
        }

        let mut persisted = Account::load("A1", Default::default());
        persisted.set("name", "Changed locally").unwrap();
        assert_eq!(NestedPayload::of(&persisted), NestedPayload::Reference("A1"));
    }

    #[test]
    fn test_full_payload_uses_element_names() {
        let account = Account::new().with("name", "Foo").unwrap();
        let mut xml = XmlBuilder::new();
        NestedPayload::of(&account).write(&mut xml).unwrap();
        let out = xml.into_string().unwrap();
        assert!(out.contains("<ns2:Name>Foo</ns2:Name>"));
        assert!(out.contains("<ns2:BillCycleDay>1</ns2:BillCycleDay>"));
        assert!(!out.contains("<ns2:Id>"));
    }

    #[test]
    fn test_incomplete_request_is_rejected() {
        let request = SubscribeRequest::new();
        let mut xml = XmlBuilder::new();
        let err = compose_subscribes(&request, &mut xml).unwrap_err();
        assert!(matches!(
            err,
            ZuoraError::IncompleteRequestError { ref field } if field == "account"
        ));
    }
}

#![allow(dead_code)]

use httpmock::MockServer;
use std::sync::Arc;
use zuora_objects::prelude::*;
use zuora_objects::ApiConfig;

pub const SOAP_PATH: &str = "/apps/services/a/38.0";
pub const SESSION: &str = "test-session";

pub fn api(server: &MockServer) -> Api<HttpTransport> {
    let config = ApiConfig {
        endpoint: server.url(SOAP_PATH),
        session_id: Some(SESSION.to_string()),
        timeout_seconds: 5,
    };
    Api::from_settings(&config).unwrap()
}

/// Wraps an operation response in a SOAP envelope.
pub fn envelope(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
  <soapenv:Body>{}</soapenv:Body>
</soapenv:Envelope>"#,
        body
    )
}

pub fn subscribe_success(account_id: &str, subscription_id: &str) -> String {
    envelope(&format!(
        r#"<ns1:subscribeResponse xmlns:ns1="http://api.zuora.com/">
      <ns1:result>
        <ns1:AccountId>{}</ns1:AccountId>
        <ns1:AccountNumber>A00000001</ns1:AccountNumber>
        <ns1:SubscriptionId>{}</ns1:SubscriptionId>
        <ns1:SubscriptionNumber>A-S00000001</ns1:SubscriptionNumber>
        <ns1:Success>true</ns1:Success>
      </ns1:result>
    </ns1:subscribeResponse>"#,
        account_id, subscription_id
    ))
}

pub fn subscribe_failure(messages: &[&str]) -> String {
    let errors: String = messages
        .iter()
        .map(|m| {
            format!(
                "<ns1:Errors><ns1:Code>INVALID_VALUE</ns1:Code><ns1:Message>{}</ns1:Message></ns1:Errors>",
                m
            )
        })
        .collect();
    envelope(&format!(
        r#"<ns1:subscribeResponse xmlns:ns1="http://api.zuora.com/">
      <ns1:result>{}<ns1:Success>false</ns1:Success></ns1:result>
    </ns1:subscribeResponse>"#,
        errors
    ))
}

pub fn fault(code: &str, message: &str) -> String {
    envelope(&format!(
        r#"<soapenv:Fault><faultcode>{}</faultcode><faultstring>{}</faultstring></soapenv:Fault>"#,
        code, message
    ))
}

pub fn new_account() -> Account {
    Account::new().with("name", "Foo").unwrap()
}

pub fn new_contact() -> Contact {
    Contact::new()
        .with("first_name", "John")
        .and_then(|c| c.with("last_name", "Doe"))
        .and_then(|c| c.with("country", "United States"))
        .unwrap()
}

pub fn new_credit_card() -> PaymentMethod {
    PaymentMethod::new()
        .with("type", "CreditCard")
        .and_then(|p| p.with("credit_card_holder_name", "John Doe"))
        .and_then(|p| p.with("credit_card_number", "4111111111111111"))
        .and_then(|p| p.with("credit_card_type", "Visa"))
        .and_then(|p| p.with("credit_card_expiration_month", 12))
        .and_then(|p| p.with("credit_card_expiration_year", 2030))
        .unwrap()
}

pub fn new_subscription() -> Subscription {
    Subscription::new()
        .with("contract_effective_date", "2024-03-01")
        .and_then(|s| s.with("initial_term", 12))
        .and_then(|s| s.with("renewal_term", 12))
        .unwrap()
}

pub fn catalog_charge() -> Arc<ProductRatePlanCharge> {
    let attributes = [
        ("name", Value::from("Seats")),
        ("product_rate_plan_id", Value::from("PRP1")),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    Arc::new(ProductRatePlanCharge::load("PRPC1", attributes))
}

/// Existing account and contact, new subscription, one charge.
pub fn request_for_existing_customer() -> SubscribeRequest {
    let mut request = SubscribeRequest::new();
    request.account = Some(Account::load("A0", Default::default()));
    request.bill_to_contact = Some(Contact::load("C0", Default::default()));
    request.subscription = Some(new_subscription());
    request.set_rate_plan_charge(RatePlanCharge::new(catalog_charge(), 10));
    request
}

/// Everything new, including the payment method.
pub fn request_for_new_customer() -> SubscribeRequest {
    let mut request = SubscribeRequest::new();
    request.account = Some(new_account());
    request.bill_to_contact = Some(new_contact());
    request.payment_method = Some(new_credit_card());
    request.subscription = Some(new_subscription());
    request.set_rate_plan_charge(RatePlanCharge::new(catalog_charge(), 10));
    request
}

mod common;

use anyhow::Result;
use httpmock::prelude::*;
use serde_json::json;
use zuora_objects::prelude::*;
use zuora_objects::utils::xml::XmlElement;
use zuora_objects::ZuoraError;

fn query_reply(records: &str, size: usize) -> String {
    common::envelope(&format!(
        r#"<ns1:queryResponse xmlns:ns1="http://api.zuora.com/" xmlns:ns2="http://object.api.zuora.com/">
      <ns1:result><ns1:done>true</ns1:done>{}<ns1:size>{}</ns1:size></ns1:result>
    </ns1:queryResponse>"#,
        records, size
    ))
}

fn save_reply(operation: &str, body: &str) -> String {
    common::envelope(&format!(
        r#"<ns1:{op}Response xmlns:ns1="http://api.zuora.com/"><ns1:result>{body}</ns1:result></ns1:{op}Response>"#,
        op = operation,
        body = body
    ))
}

fn sent_object(api: &Api<HttpTransport>, operation: &str) -> XmlElement {
    let document = XmlElement::parse(&api.last_request().unwrap()).unwrap();
    document
        .find(&["Body", operation, "zObjects"])
        .cloned()
        .unwrap()
}

#[tokio::test]
async fn test_find_hydrates_clean_record() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(common::SOAP_PATH)
                .header("soapaction", "query")
                .body_contains("from ProductRatePlanCharge where Id = ");
            then.status(200).body(query_reply(
                r#"<ns1:records>
                     <ns2:Id>PRPC1</ns2:Id>
                     <ns2:Name>Seats</ns2:Name>
                     <ns2:ProductRatePlanId>PRP1</ns2:ProductRatePlanId>
                   </ns1:records>"#,
                1,
            ));
        })
        .await;

    let api = common::api(&server);
    let charge: ProductRatePlanCharge = find(&api, "PRPC1").await?;

    mock.assert_async().await;
    assert_eq!(charge.id(), Some("PRPC1"));
    assert_eq!(charge.name(), Some("Seats"));
    assert_eq!(charge.product_rate_plan_id(), Some("PRP1"));
    assert!(!charge.is_new());
    assert!(!charge.is_changed());
    Ok(())
}

#[tokio::test]
async fn test_find_missing_record() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(common::SOAP_PATH);
            then.status(200).body(query_reply("", 0));
        })
        .await;

    let api = common::api(&server);
    let err = find::<Account, _>(&api, "nope").await.unwrap_err();
    assert!(matches!(
        err,
        ZuoraError::NotFoundError { ref object, ref id } if object == "Account" && id == "nope"
    ));
    Ok(())
}

#[tokio::test]
async fn test_create_assigns_id_and_cleans() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(common::SOAP_PATH)
                .header("soapaction", "create");
            then.status(200).body(save_reply(
                "create",
                "<ns1:Id>C9</ns1:Id><ns1:Success>true</ns1:Success>",
            ));
        })
        .await;

    let api = common::api(&server);
    let mut contact = common::new_contact();
    let result = create(&api, &mut contact).await?;

    assert!(result.success);
    assert_eq!(contact.id(), Some("C9"));
    assert!(!contact.is_new());
    assert!(!contact.is_changed());

    let sent = sent_object(&api, "create");
    assert_eq!(sent.attribute("xsi:type"), Some("ns2:Contact"));
    assert_eq!(sent.child_text("FirstName"), Some("John"));
    assert!(sent.child("Id").is_none());
    Ok(())
}

#[tokio::test]
async fn test_create_rejection_keeps_record_new() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(common::SOAP_PATH);
            then.status(200).body(save_reply(
                "create",
                "<ns1:Errors><ns1:Code>MISSING_REQUIRED_VALUE</ns1:Code>\
                 <ns1:Message>Missing AccountId</ns1:Message></ns1:Errors>\
                 <ns1:Success>false</ns1:Success>",
            ));
        })
        .await;

    let api = common::api(&server);
    let mut contact = common::new_contact();
    let result = create(&api, &mut contact).await?;

    assert!(!result.success);
    assert_eq!(result.validation_errors().base(), ["Missing AccountId"]);
    assert!(contact.is_new());
    assert!(contact.is_changed());
    Ok(())
}

#[tokio::test]
async fn test_update_sends_only_changes() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(common::SOAP_PATH)
                .header("soapaction", "update");
            then.status(200).body(save_reply(
                "update",
                "<ns1:Id>C1</ns1:Id><ns1:Success>true</ns1:Success>",
            ));
        })
        .await;

    let api = common::api(&server);
    let attributes = [
        ("first_name", json!("John")),
        ("last_name", json!("Doe")),
        ("city", json!("Berlin")),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    let mut contact = Contact::load("C1", attributes);
    contact.set("last_name", "Smith")?;
    contact.set("city", Value::Null)?;

    let result = update(&api, &mut contact).await?;
    assert!(result.success);
    assert!(!contact.is_changed());

    let sent = sent_object(&api, "update");
    assert_eq!(sent.child_text("Id"), Some("C1"));
    assert_eq!(sent.child_text("LastName"), Some("Smith"));
    assert_eq!(sent.child_text("fieldsToNull"), Some("City"));
    assert!(sent.child("FirstName").is_none());
    Ok(())
}

#[tokio::test]
async fn test_update_requires_id() -> Result<()> {
    let server = MockServer::start_async().await;
    let api = common::api(&server);
    let mut contact = common::new_contact();

    let err = update(&api, &mut contact).await.unwrap_err();
    assert!(matches!(err, ZuoraError::IncompleteRequestError { ref field } if field == "id"));
    assert!(api.last_request().is_none());
    Ok(())
}

use crate::domain::model::ValidationErrors;
use crate::utils::error::{Result, ZuoraError};
use crate::utils::xml::XmlElement;
use serde::Serialize;

/// One entry of a result's `Errors` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultError {
    pub code: Option<String>,
    pub message: String,
}

/// Reply to `subscribe`, one per submitted aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubscribeResult {
    pub success: bool,
    pub account_id: Option<String>,
    pub account_number: Option<String>,
    pub subscription_id: Option<String>,
    pub subscription_number: Option<String>,
    pub invoice_id: Option<String>,
    pub invoice_number: Option<String>,
    pub errors: Vec<ResultError>,
}

impl SubscribeResult {
    pub fn from_response(response: &XmlElement) -> Result<Self> {
        let result = first_result(response)?;
        Ok(Self {
            success: success_flag(result)?,
            account_id: text(result, "AccountId"),
            account_number: text(result, "AccountNumber"),
            subscription_id: text(result, "SubscriptionId"),
            subscription_number: text(result, "SubscriptionNumber"),
            invoice_id: text(result, "InvoiceId"),
            invoice_number: text(result, "InvoiceNumber"),
            errors: errors(result),
        })
    }

    pub fn error_messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }
}

/// Reply to `create` and `update`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SaveResult {
    pub success: bool,
    pub id: Option<String>,
    pub errors: Vec<ResultError>,
}

impl SaveResult {
    pub fn from_response(response: &XmlElement) -> Result<Self> {
        let result = first_result(response)?;
        Ok(Self {
            success: success_flag(result)?,
            id: text(result, "Id"),
            errors: errors(result),
        })
    }

    /// Remote rejections as general errors.
    pub fn validation_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for error in &self.errors {
            errors.add_base(error.message.clone());
        }
        errors
    }
}

/// Reply to `query`: each record as (element local name, text) pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub done: bool,
    pub size: usize,
    pub records: Vec<Vec<(String, String)>>,
}

impl QueryResult {
    pub fn from_response(response: &XmlElement) -> Result<Self> {
        let result = first_result(response)?;
        let size = match result.child_text("size") {
            Some(s) => s
                .parse::<usize>()
                .map_err(|_| ZuoraError::response(format!("query size '{}' is not a number", s)))?,
            None => 0,
        };
        let records: Vec<Vec<(String, String)>> = result
            .children_named("records")
            .map(|record| {
                record
                    .children
                    .iter()
                    .map(|field| (field.local_name().to_string(), field.text().to_string()))
                    .collect::<Vec<_>>()
            })
            .collect();

        Ok(Self {
            done: result.child_text("done") == Some("true"),
            size,
            records,
        })
    }
}

fn first_result(response: &XmlElement) -> Result<&XmlElement> {
    response.child("result").ok_or_else(|| {
        ZuoraError::response(format!("{} has no result element", response.local_name()))
    })
}

fn success_flag(result: &XmlElement) -> Result<bool> {
    match result.child_text("Success") {
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(ZuoraError::response(format!(
            "Success flag '{}' is not a boolean",
            other
        ))),
        None => Err(ZuoraError::response("result has no Success flag")),
    }
}

fn text(result: &XmlElement, name: &str) -> Option<String> {
    result
        .child_text(name)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn errors(result: &XmlElement) -> Vec<ResultError> {
    result
        .children_named("Errors")
        .map(|e| ResultError {
            code: text(e, "Code"),
            message: e.child_text("Message").unwrap_or_default().to_string(),
        })
        .collect()
}

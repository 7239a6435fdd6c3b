use crate::config::ApiConfig;
use crate::core::api::Api;
use crate::core::persistence::find;
use crate::core::subscribe_request::SubscribeRequest;
use crate::domain::model::{value_text, Attributes, Options, Value};
use crate::domain::objects::{ProductRatePlanCharge, RatePlanCharge};
use crate::domain::ports::Transport;
use crate::domain::record::ZObject;
use crate::utils::error::{Result, ZuoraError};
use crate::utils::validation::Validate;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// A subscribe request described in TOML.
///
/// Each record table becomes a new object, or a persisted one when it
/// carries `id`; any other keys on a persisted table are local changes.
///
/// ```toml
/// [api]
/// session_id = "${ZUORA_SESSION}"
///
/// [account]
/// id = "2c92c0f8"
///
/// [bill_to_contact]
/// first_name = "John"
/// last_name = "Doe"
///
/// [subscription]
/// contract_effective_date = 2024-03-01
/// initial_term = 12
/// renewal_term = 12
///
/// [[rate_plan_charges]]
/// quantity = 10
/// product_rate_plan_charge = { id = "2c92c0f9", product_rate_plan_id = "2c92c0f7" }
///
/// [subscribe_options]
/// generate_invoice = true
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestFile {
    #[serde(default)]
    pub api: ApiConfig,
    pub account: Option<toml::Table>,
    pub bill_to_contact: Option<toml::Table>,
    pub sold_to_contact: Option<toml::Table>,
    pub payment_method: Option<toml::Table>,
    pub subscription: Option<toml::Table>,
    #[serde(default)]
    pub rate_plan_charges: Vec<ChargeEntry>,
    #[serde(default)]
    pub subscribe_options: toml::Table,
    #[serde(default)]
    pub preview_options: toml::Table,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChargeEntry {
    /// Catalog charge: `id` alone is looked up, extra keys are taken as-is.
    pub product_rate_plan_charge: toml::Table,
    pub quantity: Option<toml::Value>,
}

impl RequestFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ZuoraError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ZuoraError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown names stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ZuoraError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Builds the aggregate from the file alone. Catalog charges keep only
    /// the keys written in the file.
    pub fn to_request(&self) -> Result<SubscribeRequest> {
        let mut request = SubscribeRequest::new();
        request.account = self.account.as_ref().map(record).transpose()?;
        request.bill_to_contact = self.bill_to_contact.as_ref().map(record).transpose()?;
        request.sold_to_contact = self.sold_to_contact.as_ref().map(record).transpose()?;
        request.payment_method = self.payment_method.as_ref().map(record).transpose()?;
        request.subscription = self.subscription.as_ref().map(record).transpose()?;
        request.subscribe_options = options(&self.subscribe_options);
        request.preview_options = options(&self.preview_options);

        for entry in &self.rate_plan_charges {
            let catalog = catalog_charge(&entry.product_rate_plan_charge)?;
            request.rate_plan_charges.push(entry.rate_plan_charge(catalog));
        }
        Ok(request)
    }

    /// Like `to_request`, but catalog charges without a rate plan id are
    /// fetched with `find`.
    pub async fn resolve_request<T: Transport>(&self, api: &Api<T>) -> Result<SubscribeRequest> {
        let mut request = self.to_request()?;
        request.rate_plan_charges.clear();

        for entry in &self.rate_plan_charges {
            let mut catalog = catalog_charge(&entry.product_rate_plan_charge)?;
            if catalog.product_rate_plan_id().is_none() {
                let id = catalog.id().unwrap_or_default().to_string();
                tracing::info!("🔍 Looking up catalog charge {}", id);
                catalog = find(api, &id).await?;
            }
            request.rate_plan_charges.push(entry.rate_plan_charge(catalog));
        }
        Ok(request)
    }
}

impl ChargeEntry {
    fn rate_plan_charge(&self, catalog: ProductRatePlanCharge) -> RatePlanCharge {
        let quantity = self.quantity.as_ref().map(to_json).unwrap_or(Value::Null);
        RatePlanCharge::new(Arc::new(catalog), quantity)
    }
}

impl Validate for RequestFile {
    fn validate(&self) -> Result<()> {
        self.api.validate()
    }
}

/// TOML scalars map onto JSON values; dates and times keep their written form.
pub fn to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::from(*i),
        toml::Value::Float(f) => Value::from(*f),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(d) => Value::String(d.to_string()),
        toml::Value::Array(items) => Value::Array(items.iter().map(to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), to_json(v)))
                .collect(),
        ),
    }
}

fn options(table: &toml::Table) -> Options {
    table.iter().map(|(k, v)| (k.clone(), to_json(v))).collect()
}

fn split_id(table: &toml::Table) -> (Option<String>, Vec<(&str, Value)>) {
    let mut id = None;
    let mut fields = Vec::new();
    for (key, value) in table {
        let value = to_json(value);
        if key == "id" {
            id = value_text(&value);
        } else {
            fields.push((key.as_str(), value));
        }
    }
    (id, fields)
}

fn record<O: ZObject>(table: &toml::Table) -> Result<O> {
    let (id, fields) = split_id(table);
    let mut object = match id {
        Some(id) => O::load(id, Attributes::new()),
        None => O::new(),
    };
    for (field, value) in fields {
        object.set(field, value)?;
    }
    Ok(object)
}

fn catalog_charge(table: &toml::Table) -> Result<ProductRatePlanCharge> {
    let (id, fields) = split_id(table);
    let id = id.ok_or_else(|| ZuoraError::MissingConfigError {
        field: "rate_plan_charges.product_rate_plan_charge.id".to_string(),
    })?;
    let attributes: Attributes = fields
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    Ok(ProductRatePlanCharge::load(id, attributes))
}

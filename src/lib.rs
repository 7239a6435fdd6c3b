pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::http::HttpTransport;
pub use config::{toml_config::RequestFile, ApiConfig};
pub use core::{Api, SubscribeRequest, SubscribeResult};
pub use domain::record::ZObject;
pub use utils::error::{ZuoraError, Result};

/// Everything needed to build and submit requests.
pub mod prelude {
    pub use crate::adapters::http::HttpTransport;
    pub use crate::core::{
        create, find, update, Api, Options, SaveResult, SubscribeRequest, SubscribeResult,
        ValidationErrors,
    };
    pub use crate::domain::model::Value;
    pub use crate::domain::objects::{
        Account, Contact, InvoiceAdjustment, PaymentMethod, ProductRatePlanCharge,
        RatePlanCharge, Subscription,
    };
    pub use crate::domain::record::ZObject;
}

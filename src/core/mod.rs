pub mod api;
pub mod composer;
pub mod naming;
pub mod persistence;
pub mod response;
pub mod subscribe_request;

pub use crate::domain::model::{Options, ValidationErrors};
pub use crate::domain::ports::{ApiSettings, Transport};
pub use crate::utils::error::Result;
pub use api::Api;
pub use persistence::{create, find, update};
pub use response::{QueryResult, ResultError, SaveResult, SubscribeResult};
pub use subscribe_request::SubscribeRequest;

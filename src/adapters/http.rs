use crate::domain::ports::{ApiSettings, Transport};
use crate::utils::error::{Result, ZuoraError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Posts envelopes to the SOAP endpoint over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(settings: &impl ApiSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds()))
            .build()?;
        Ok(Self {
            client,
            endpoint: settings.endpoint().to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, soap_action: &str, envelope: String) -> Result<String> {
        tracing::debug!("Posting {} envelope to: {}", soap_action, self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", soap_action)
            .body(envelope)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("SOAP endpoint status: {}", status);
        let body = response.text().await?;

        // Faults arrive as 500 with a parseable envelope.
        if status.is_success() || status == StatusCode::INTERNAL_SERVER_ERROR {
            Ok(body)
        } else {
            Err(ZuoraError::HttpStatusError {
                status: status.as_u16(),
                body,
            })
        }
    }
}

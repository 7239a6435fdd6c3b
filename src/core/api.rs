use crate::adapters::http::HttpTransport;
use crate::domain::ports::{ApiSettings, Transport};
use crate::utils::error::{Result, ZuoraError};
use crate::utils::xml::{XmlBuilder, XmlElement};
use std::sync::Mutex;

pub const ENVELOPE_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const API_NAMESPACE: &str = "http://api.zuora.com/";
pub const OBJECT_NAMESPACE: &str = "http://object.api.zuora.com/";
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Qualified name in the envelope namespace.
pub fn env(name: &str) -> String {
    format!("env:{}", name)
}

/// Qualified name in the API (operation) namespace.
pub fn zns(name: &str) -> String {
    format!("ns1:{}", name)
}

/// Qualified name in the object-field namespace.
pub fn ons(name: &str) -> String {
    format!("ns2:{}", name)
}

/// Masks the session token so envelopes can be printed or logged.
pub fn redact_session(envelope: &str) -> String {
    let open = "<ns1:session>";
    let close = "</ns1:session>";
    match (envelope.find(open), envelope.find(close)) {
        (Some(start), Some(end)) if start + open.len() <= end => format!(
            "{}{}[REDACTED]{}",
            &envelope[..start],
            open,
            &envelope[end..]
        ),
        _ => envelope.to_string(),
    }
}

/// SOAP client: wraps operation bodies in an envelope, sends them once, and
/// unwraps the `<operation>Response` element from the reply.
pub struct Api<T: Transport> {
    transport: T,
    session_id: Option<String>,
    last_request: Mutex<Option<String>>,
}

impl Api<HttpTransport> {
    pub fn from_settings(settings: &impl ApiSettings) -> Result<Self> {
        let transport = HttpTransport::new(settings)?;
        Ok(Self::new(transport, settings.session_id().map(str::to_string)))
    }
}

impl<T: Transport> Api<T> {
    pub fn new(transport: T, session_id: Option<String>) -> Self {
        Self {
            transport,
            session_id,
            last_request: Mutex::new(None),
        }
    }

    /// The most recent outbound envelope, for diagnostics.
    pub fn last_request(&self) -> Option<String> {
        self.last_request.lock().ok().and_then(|last| last.clone())
    }

    /// Builds the full envelope for an operation without sending it.
    pub fn envelope<F>(&self, operation: &str, body: F) -> Result<String>
    where
        F: FnOnce(&mut XmlBuilder) -> Result<()>,
    {
        let mut xml = XmlBuilder::new();
        xml.start(
            &env("Envelope"),
            &[
                ("xmlns:env", ENVELOPE_NAMESPACE),
                ("xmlns:ns1", API_NAMESPACE),
                ("xmlns:ns2", OBJECT_NAMESPACE),
                ("xmlns:xsi", XSI_NAMESPACE),
            ],
        )?;

        if let Some(session) = &self.session_id {
            xml.nest(&env("Header"), |h| {
                h.nest(&zns("SessionHeader"), |s| s.element(&zns("session"), session))
            })?;
        }

        xml.nest(&env("Body"), |b| b.nest(&zns(operation), body))?;
        xml.end(&env("Envelope"))?;
        xml.into_string()
    }

    pub async fn request<F>(&self, operation: &str, body: F) -> Result<XmlElement>
    where
        F: FnOnce(&mut XmlBuilder) -> Result<()>,
    {
        let envelope = self.envelope(operation, body)?;
        tracing::debug!("SOAP {} request: {}", operation, redact_session(&envelope));

        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(envelope.clone());
        }

        let reply = self.transport.send(operation, envelope).await?;
        tracing::debug!("SOAP {} response: {}", operation, reply);

        Self::unwrap_reply(operation, &reply)
    }

    fn unwrap_reply(operation: &str, reply: &str) -> Result<XmlElement> {
        let document = XmlElement::parse(reply)?;
        let body = document
            .child("Body")
            .ok_or_else(|| ZuoraError::response("reply has no SOAP Body"))?;

        if let Some(fault) = body.child("Fault") {
            return Err(ZuoraError::FaultError {
                code: fault.child_text("faultcode").unwrap_or_default().to_string(),
                message: fault.child_text("faultstring").unwrap_or_default().to_string(),
            });
        }

        let expected = format!("{}Response", operation);
        body.child(&expected)
            .cloned()
            .ok_or_else(|| ZuoraError::response(format!("reply has no {} element", expected)))
    }
}

//! WebhookSink - HTTP delivery

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder};
use tracing::{debug, instrument, warn};

use contracts::{FormatSpec, HttpMethod, Message, Notifier, SendError};

use crate::payload::{self, Payload};

/// Sink that POSTs formatted payloads to a webhook URL
#[derive(Debug, Clone)]
pub struct WebhookSink {
    name: String,
    url: String,
    format: FormatSpec,
    client: Client,
}

impl WebhookSink {
    /// Create a new WebhookSink.
    ///
    /// The client carries the per-request timeout and is shared by all
    /// webhook sinks.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        format: FormatSpec,
        client: Client,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            format,
            client,
        }
    }

    fn build_request(&self, payload: Payload) -> RequestBuilder {
        let (method, headers) = match &self.format {
            FormatSpec::Custom(custom) => (to_method(custom.method), Some(&custom.headers)),
            _ => (Method::POST, None),
        };

        let mut request = self.client.request(method, &self.url);
        if !payload.content_type.is_empty() {
            request = request.header(CONTENT_TYPE, payload.content_type);
        }
        for (name, value) in headers.into_iter().flatten() {
            request = request.header(name.as_str(), value.as_str());
        }
        request.body(payload.body)
    }
}

impl Notifier for WebhookSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "webhook_sink_send",
        skip(self, message),
        fields(sink = %self.name, format = self.format.name())
    )]
    async fn send(&self, message: &Message) -> Result<(), SendError> {
        let payload = payload::format(&self.format, message)?;
        let bytes = payload.body.len();

        let response = self
            .build_request(payload)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            warn!(sink = %self.name, status = status.as_u16(), "Webhook rejected message");
            return Err(SendError::HttpStatus {
                status: status.as_u16(),
            });
        }

        debug!(sink = %self.name, status = status.as_u16(), bytes, "Sent");
        Ok(())
    }
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
    }
}

/// Map a transport failure onto the delivery error kinds
fn classify(e: reqwest::Error) -> SendError {
    if e.is_timeout() {
        SendError::Timeout
    } else {
        SendError::transport(e.to_string())
    }
}

use reqwest::Client;
use tracing::{debug, error, info, warn};

use super::operation::Operation;
use crate::config::Config;
use crate::core::{Error, Result};
use crate::modules::nvp::{NvpRequest, NvpResponse};

/// HTTP transport for the NVP endpoint
///
/// Every request carries the seller credentials and API version, then the
/// operation's `METHOD`.
#[derive(Debug, Clone)]
pub struct NvpClient {
    http: Client,
    config: Config,
}

impl NvpClient {
    /// Create a client; the configuration is validated first
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Start a request for `operation` with the credential envelope filled in
    pub fn request(&self, operation: Operation) -> NvpRequest {
        let credentials = self.config.credentials();
        let mut request = NvpRequest::new();
        request
            .push("USER", credentials.username())
            .push("PWD", credentials.password())
            .push("SIGNATURE", credentials.signature())
            .push("VERSION", self.config.api_version())
            .push("METHOD", operation.method());
        request
    }

    /// POST a request and return the acknowledged response
    pub async fn call(&self, operation: Operation, request: &NvpRequest) -> Result<NvpResponse> {
        let endpoint = self.config.endpoint();

        debug!(
            operation = %operation,
            endpoint = %endpoint,
            request = %request.redacted(),
            "Sending NVP request"
        );

        let response = self
            .http
            .post(endpoint)
            .form(request.params())
            .send()
            .await
            .map_err(|e| {
                error!(
                    operation = %operation,
                    endpoint = %endpoint,
                    timeout = e.is_timeout(),
                    connect = e.is_connect(),
                    error = %e,
                    "PayPal endpoint unavailable"
                );
                Error::HttpClient(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                operation = %operation,
                status = status.as_u16(),
                "PayPal returned HTTP error"
            );
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = NvpResponse::parse(&body)?;
        let ack = parsed.ack();
        let correlation_id = parsed.correlation_id().unwrap_or_default().to_string();

        match parsed.acknowledge(operation.method(), endpoint) {
            Ok(parsed) => {
                if let Some(ack) = ack.filter(|a| a.has_warning()) {
                    for message in parsed.messages() {
                        warn!(
                            operation = %operation,
                            ack = %ack,
                            code = %message.code,
                            correlation_id = %correlation_id,
                            "{}",
                            message.long_message
                        );
                    }
                }

                info!(
                    operation = %operation,
                    correlation_id = %correlation_id,
                    "NVP call succeeded"
                );
                Ok(parsed)
            }
            Err(e) => {
                error!(
                    operation = %operation,
                    correlation_id = %correlation_id,
                    error = %e,
                    "NVP call failed"
                );
                Err(e)
            }
        }
    }
}

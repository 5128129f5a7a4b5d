//! Form POST transport on reqwest.

use std::time::Duration;

use reqwest::{Client, header::CONTENT_TYPE};
use tracing::{debug, instrument};

use super::config::HttpConfig;
use crate::{
    error::Result,
    transport::{FORM_CONTENT_TYPE, FormRequest, Transport, TransportResponse, sealed},
};

/// Pooled reqwest client posting form bodies.
///
/// Cloning is cheap and shares the connection pool. One transport serves every
/// call made by a [`GatewayClient`](crate::GatewayClient), concurrently.
///
/// # Examples
///
/// ```
/// use nvp_gateway::transport::{HttpConfig, HttpTransport, Transport};
///
/// let config = HttpConfig { timeout_secs: 20, ..Default::default() };
///
/// let transport = HttpTransport::with_config(&config).unwrap();
/// assert_eq!(transport.timeout(), std::time::Duration::from_secs(20));
/// assert_eq!(transport.protocol_name(), "http");
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl sealed::private::Sealed for HttpTransport {}

impl HttpTransport {
    /// Transport with [`HttpConfig::default`] settings.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`](crate::GatewayError::Http) if the TLS
    /// backend cannot be initialized.
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Transport built from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`](crate::GatewayError::Config) for out-of-range timeouts and
    /// [`GatewayError::Http`](crate::GatewayError::Http) if the client cannot be built.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self { client, timeout: config.timeout() })
    }

    /// Returns the client-wide request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[instrument(
        skip(self, request),
        fields(url = request.url, body_len = request.body.len(), timeout = ?request.timeout)
    )]
    async fn execute(&self, request: FormRequest<'_>) -> Result<TransportResponse> {
        let mut builder = self
            .client
            .post(request.url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(request.body);

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        debug!("sending form request");
        let response = builder.send().await?;

        // Both families report failures in the body; the status is informational.
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(status, body_len = body.len(), "received gateway response");

        Ok(TransportResponse { status, body })
    }
}

impl Transport for HttpTransport {
    async fn post_form<'a>(&'a self, request: FormRequest<'a>) -> Result<TransportResponse> {
        self.execute(request).await
    }

    fn protocol_name(&self) -> &'static str {
        "http"
    }
}

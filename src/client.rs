//! Gateway client.
//!
//! [`GatewayClient`] owns the credentials, the resolved endpoint and an HTTP
//! transport. Every call goes through the same pipeline:
//!
//! 1. credentials are written into the request fields, replacing caller values
//! 2. the fields are POSTed as a form body and the response is read in full
//! 3. the body is parsed strictly into a [`FieldMultimap`]
//! 4. the family's classifier decides between success and
//!    [`GatewayError::Protocol`]
//!
//! The client holds no mutable state and can be shared across tasks. It is
//! generic over its [`Transport`]; the default is [`HttpTransport`].

use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::{
    error::{GatewayError, Result},
    gateway::{
        ApiFamily, ConfigurableEndpointResolver, Credentials, EndpointResolver, GatewayConfig,
        GatewayResponse, Outcome,
    },
    nvp::FieldMultimap,
    operations::Operation,
    transport::{FormRequest, HttpConfig, HttpTransport, Transport},
};

/// Client for one gateway family and environment.
///
/// # Examples
///
/// ```rust,no_run
/// use nvp_gateway::{
///     GatewayClient,
///     gateway::Credentials,
///     operations::payflow::{CreditCard, Sale},
/// };
/// use rust_decimal::Decimal;
///
/// # async fn example() -> nvp_gateway::Result<()> {
/// let client = GatewayClient::builder(Credentials::payflow("user", "pwd", "PayPal", "user"))
///     .sandbox(true)
///     .build()?;
///
/// let sale = Sale::new(CreditCard::new("4111111111111111", "1230"), Decimal::new(350, 2));
/// let values = client.execute(sale).await?;
/// println!("PNREF {}", values.pnref);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GatewayClient<T = HttpTransport> {
    credentials: Credentials,
    resolver: ConfigurableEndpointResolver,
    sandbox: bool,
    nvp_version: String,
    transport: T,
}

impl GatewayClient {
    /// Starts building a client; the family follows from `credentials`.
    #[must_use]
    pub fn builder(credentials: Credentials) -> ClientBuilder {
        ClientBuilder::new(credentials)
    }

    /// Creates a client with default settings for the published endpoints.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(credentials: Credentials, sandbox: bool) -> Result<Self> {
        Self::builder(credentials).sandbox(sandbox).build()
    }
}

impl<T: Transport> GatewayClient<T> {
    /// Returns the gateway family.
    #[must_use]
    pub fn family(&self) -> ApiFamily {
        self.credentials.family()
    }

    /// Returns the URL requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.resolver.base_url(self.family(), self.sandbox)
    }

    /// Returns true if the client targets a sandbox.
    #[must_use]
    pub fn is_sandbox(&self) -> bool {
        self.sandbox
    }

    /// Sends `fields` and classifies the response.
    ///
    /// `fields` must carry the `METHOD` (NVP) or `TRXTYPE` (Payflow) field;
    /// nothing else about them is checked.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Http`] if the exchange fails or the body cannot be read
    /// - [`GatewayError::Parse`] if the body is not a valid query string
    /// - [`GatewayError::Protocol`] if the gateway reports a failure; the error
    ///   carries the parsed response
    pub async fn perform_request(&self, fields: FieldMultimap) -> Result<GatewayResponse> {
        self.send(fields, None).await
    }

    /// Like [`perform_request`](Self::perform_request) with a deadline for
    /// this call only.
    ///
    /// # Errors
    ///
    /// Same as [`perform_request`](Self::perform_request); an expired deadline
    /// is a transport error.
    pub async fn perform_request_with_timeout(
        &self,
        fields: FieldMultimap,
        timeout: Duration,
    ) -> Result<GatewayResponse> {
        self.send(fields, Some(timeout)).await
    }

    /// Builds, sends and projects a typed operation.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidInput`] if the operation belongs to the
    /// other family or rejects its arguments, otherwise the errors of
    /// [`perform_request`](Self::perform_request).
    pub async fn execute<O: Operation>(&self, operation: O) -> Result<O::Output> {
        if O::FAMILY != self.family() {
            return Err(GatewayError::InvalidInput(format!(
                "{} operation cannot be sent by a {} client",
                O::FAMILY,
                self.family()
            )));
        }

        let fields = operation.into_fields()?;
        let response = self.perform_request(fields).await?;
        Ok(response.project())
    }

    #[instrument(
        skip(self, fields),
        fields(
            family = %self.family(),
            sandbox = self.sandbox,
            transport = self.transport.protocol_name(),
            operation = fields.get_or_empty(self.family().operation_key()),
        )
    )]
    async fn send(
        &self,
        mut fields: FieldMultimap,
        timeout: Option<Duration>,
    ) -> Result<GatewayResponse> {
        self.credentials.inject(&mut fields, &self.nvp_version);

        let request = FormRequest { url: self.endpoint(), body: fields.encode(), timeout };
        let raw = self.transport.post_form(request).await?;
        let parsed = FieldMultimap::parse(&raw.body)?;

        let response = GatewayResponse::new(self.family(), parsed, raw.status, self.sandbox);

        match response.classify() {
            Outcome::Success => {
                debug!(
                    http_status = response.http_status,
                    correlation_id = %response.correlation_id,
                    "gateway call succeeded"
                );
                Ok(response)
            }
            Outcome::Failure(error) => {
                info!(
                    http_status = response.http_status,
                    code = %error.code,
                    "gateway reported failure"
                );
                Err(GatewayError::protocol(error, response))
            }
        }
    }
}

/// Builder for [`GatewayClient`].
#[derive(Debug)]
pub struct ClientBuilder {
    credentials: Credentials,
    config: GatewayConfig,
}

impl ClientBuilder {
    fn new(credentials: Credentials) -> Self {
        let config = GatewayConfig::new(credentials.family(), false);
        Self { credentials, config }
    }

    /// Replaces all settings with a loaded configuration.
    #[must_use]
    pub fn config(mut self, config: GatewayConfig) -> Self {
        self.config = config;
        self
    }

    /// Selects the sandbox or production endpoint.
    #[must_use]
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.config.sandbox = sandbox;
        self
    }

    /// Posts to `endpoint` instead of the published URL.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = Some(endpoint.into());
        self
    }

    /// Overrides the NVP API version.
    #[must_use]
    pub fn nvp_version(mut self, version: impl Into<String>) -> Self {
        self.config.nvp_version = version.into();
        self
    }

    /// Sets HTTP transport options.
    #[must_use]
    pub fn http(mut self, http: HttpConfig) -> Self {
        self.config.http = http;
        self
    }

    /// Validates the settings and creates the client.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the configuration is invalid or
    /// names a different family than the credentials.
    pub fn build(self) -> Result<GatewayClient> {
        self.check()?;
        let transport = HttpTransport::with_config(&self.config.http)?;
        Ok(self.assemble(transport))
    }

    /// Creates the client on an existing transport.
    ///
    /// Clients built from clones of one [`HttpTransport`] share its
    /// connection pool. The `[http]` settings of this builder are not applied.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Result<GatewayClient<T>> {
        self.check()?;
        Ok(self.assemble(transport))
    }

    fn check(&self) -> Result<()> {
        self.config.validate()?;

        let family = self.credentials.family();
        if self.config.family != family {
            return Err(GatewayError::Config(format!(
                "configuration is for {} but credentials are for {family}",
                self.config.family
            )));
        }
        Ok(())
    }

    fn assemble<T: Transport>(self, transport: T) -> GatewayClient<T> {
        GatewayClient {
            credentials: self.credentials,
            resolver: ConfigurableEndpointResolver::new(self.config.endpoint),
            sandbox: self.config.sandbox,
            nvp_version: self.config.nvp_version,
            transport,
        }
    }
}

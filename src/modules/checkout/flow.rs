use async_trait::async_trait;
use tracing::info;

use super::client::NvpClient;
use super::models::{CheckoutDetails, CheckoutToken};
use super::operation::Operation;
use crate::config::Config;
use crate::core::{Error, Result};
use crate::modules::nvp::NvpRequest;

/// State shared by purchase and subscription flows
///
/// Holds the transport and the checkout token once one has been issued. When
/// the buyer comes back from PayPal, [`Checkout::resume`] restores the token
/// and payer ID that PayPal appended to the return URL.
#[derive(Debug, Clone)]
pub struct Checkout {
    client: NvpClient,
    token: Option<CheckoutToken>,
    payer_id: Option<String>,
}

impl Checkout {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            client: NvpClient::new(config)?,
            token: None,
            payer_id: None,
        })
    }

    pub fn config(&self) -> &Config {
        self.client.config()
    }

    pub fn client(&self) -> &NvpClient {
        &self.client
    }

    pub fn token(&self) -> Option<&CheckoutToken> {
        self.token.as_ref()
    }

    pub fn payer_id(&self) -> Option<&str> {
        self.payer_id.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<CheckoutToken>) {
        self.token = Some(token.into());
    }

    pub fn set_payer_id(&mut self, payer_id: impl Into<String>) {
        self.payer_id = Some(payer_id.into());
    }

    /// Pick up a checkout after the buyer returns from PayPal
    pub fn resume(&mut self, token: impl Into<CheckoutToken>, payer_id: Option<String>) {
        self.token = Some(token.into());
        self.payer_id = payer_id.filter(|id| !id.is_empty());
    }

    pub fn require_token(&self) -> Result<&CheckoutToken> {
        self.token.as_ref().ok_or(Error::Missing("checkout token"))
    }

    pub fn require_payer_id(&self) -> Result<&str> {
        self.payer_id.as_deref().ok_or(Error::Missing("payer ID"))
    }

    /// In-context checkout URL the buyer approves the payment at
    pub fn checkout_url(&self) -> Result<String> {
        let token = self.require_token()?;
        Ok(self.config().checkout_url(token.as_str()))
    }

    /// Start a request; token-bound operations get `TOKEN` filled in
    pub fn request(&self, operation: Operation) -> Result<NvpRequest> {
        let mut request = self.client.request(operation);
        if operation.requires_token() {
            request.push("TOKEN", self.require_token()?.as_str());
        }
        Ok(request)
    }

    /// SetExpressCheckout fields common to purchases and subscriptions
    pub fn set_express_checkout_request(&self) -> Result<NvpRequest> {
        let config = self.config();
        let mut request = self.client.request(Operation::SetExpressCheckout);
        request
            .push("RETURNURL", config.return_url()?)
            .push("CANCELURL", config.cancel_url()?)
            .push_opt("BRANDNAME", config.business_name())
            .push("LOCALECODE", config.locale());
        Ok(request)
    }

    /// Send a SetExpressCheckout request and remember the issued token
    pub async fn request_token(&mut self, request: NvpRequest) -> Result<CheckoutToken> {
        let response = self
            .client
            .call(Operation::SetExpressCheckout, &request)
            .await?;
        let token = CheckoutToken::new(response.require("TOKEN")?);

        info!(token = %token, "Checkout token issued");

        self.token = Some(token.clone());
        self.payer_id = None;
        Ok(token)
    }

    /// Fetch buyer and checkout state for the current token
    pub async fn checkout_details(&self) -> Result<CheckoutDetails> {
        let request = self.request(Operation::GetExpressCheckoutDetails)?;
        let response = self
            .client
            .call(Operation::GetExpressCheckoutDetails, &request)
            .await?;
        CheckoutDetails::from_response(response)
    }
}

/// Operations every digital goods flow offers
///
/// Implemented by [`Purchase`](crate::modules::purchases::Purchase) and
/// [`Subscription`](crate::modules::subscriptions::Subscription).
#[async_trait]
pub trait DigitalGoods: Send + Sync {
    /// What `process` returns
    type Receipt: Send;

    /// What `get_details` returns
    type Details: Send;

    fn checkout(&self) -> &Checkout;

    fn checkout_mut(&mut self) -> &mut Checkout;

    /// Full SetExpressCheckout request for this flow
    fn set_express_checkout_request(&self) -> Result<NvpRequest>;

    /// Description shown to the buyer
    fn description(&self) -> &str;

    /// Human readable price, e.g. "$12.00"
    fn price_summary(&self) -> String;

    /// Complete the flow once the buyer has approved it
    async fn process(&self) -> Result<Self::Receipt>;

    /// Look up a completed transaction or profile by its ID
    async fn get_details(&self, id: &str) -> Result<Self::Details>;

    /// Ask PayPal for a new checkout token
    async fn request_checkout_token(&mut self) -> Result<CheckoutToken> {
        let request = self.set_express_checkout_request()?;
        self.checkout_mut().request_token(request).await
    }

    /// The current checkout token, requesting one if none was issued yet
    async fn ensure_checkout_token(&mut self) -> Result<CheckoutToken> {
        if let Some(token) = self.checkout().token() {
            return Ok(token.clone());
        }
        self.request_checkout_token().await
    }

    async fn checkout_details(&self) -> Result<CheckoutDetails> {
        self.checkout().checkout_details().await
    }

    fn checkout_url(&self) -> Result<String> {
        self.checkout().checkout_url()
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::Result;
use crate::modules::nvp::NvpResponse;

/// Token PayPal issues for one checkout attempt (`EC-...`)
///
/// Tokens expire after about three hours.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckoutToken(String);

impl CheckoutToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CheckoutToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CheckoutToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CheckoutToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Buyer and checkout state from GetExpressCheckoutDetails
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutDetails {
    pub token: CheckoutToken,
    /// Present once the buyer has approved the payment
    pub payer_id: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub payer_status: Option<String>,
    pub country_code: Option<String>,
    /// `PaymentActionNotInitiated`, `PaymentActionCompleted`, ...
    pub checkout_status: Option<String>,
    /// Whether the buyer agreed to the recurring billing agreement
    pub billing_agreement_accepted: bool,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub raw: NvpResponse,
}

impl CheckoutDetails {
    pub fn from_response(response: NvpResponse) -> Result<Self> {
        Ok(Self {
            token: CheckoutToken::new(response.require("TOKEN")?),
            payer_id: response.string("PAYERID"),
            email: response.string("EMAIL"),
            first_name: response.string("FIRSTNAME"),
            last_name: response.string("LASTNAME"),
            payer_status: response.string("PAYERSTATUS"),
            country_code: response.string("COUNTRYCODE"),
            checkout_status: response.string("CHECKOUTSTATUS"),
            billing_agreement_accepted: response.get("BILLINGAGREEMENTACCEPTEDSTATUS") == Some("1"),
            amount: response
                .decimal("PAYMENTREQUEST_0_AMT")
                .transpose()
                .or_else(|| response.decimal("AMT").transpose())
                .transpose()?,
            currency: response
                .string("PAYMENTREQUEST_0_CURRENCYCODE")
                .or_else(|| response.string("CURRENCYCODE")),
            raw: response,
        })
    }

    /// Whether the buyer has approved the checkout and can be charged
    pub fn is_approved(&self) -> bool {
        self.payer_id.is_some()
    }
}

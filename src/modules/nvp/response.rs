use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::core::{Error, Result};

/// Acknowledgement status returned in the `ACK` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Ack {
    Success,
    SuccessWithWarning,
    Failure,
    FailureWithWarning,
    Warning,
    PartialSuccess,
    Other(String),
}

impl Ack {
    /// Whether PayPal carried out the operation
    pub fn is_success(&self) -> bool {
        matches!(self, Ack::Success | Ack::SuccessWithWarning)
    }

    pub fn has_warning(&self) -> bool {
        matches!(
            self,
            Ack::SuccessWithWarning | Ack::FailureWithWarning | Ack::Warning
        )
    }
}

impl From<&str> for Ack {
    fn from(value: &str) -> Self {
        match value {
            "Success" => Ack::Success,
            "SuccessWithWarning" => Ack::SuccessWithWarning,
            "Failure" => Ack::Failure,
            "FailureWithWarning" => Ack::FailureWithWarning,
            "Warning" => Ack::Warning,
            "PartialSuccess" => Ack::PartialSuccess,
            other => Ack::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Ack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ack::Success => write!(f, "Success"),
            Ack::SuccessWithWarning => write!(f, "SuccessWithWarning"),
            Ack::Failure => write!(f, "Failure"),
            Ack::FailureWithWarning => write!(f, "FailureWithWarning"),
            Ack::Warning => write!(f, "Warning"),
            Ack::PartialSuccess => write!(f, "PartialSuccess"),
            Ack::Other(value) => f.write_str(value),
        }
    }
}

/// One entry of the `L_ERRORCODEn` / `L_SHORTMESSAGEn` / `L_LONGMESSAGEn` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiMessage {
    pub code: String,
    pub short_message: String,
    pub long_message: String,
    pub severity: Option<String>,
}

/// A decoded NVP response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NvpResponse {
    fields: BTreeMap<String, String>,
}

impl NvpResponse {
    /// Decode a response body
    ///
    /// Segments without a `=` are ignored. Keys and values are URL-decoded.
    pub fn parse(body: &str) -> Result<Self> {
        let pairs: Vec<&str> = body
            .trim()
            .split('&')
            .filter(|segment| segment.contains('='))
            .collect();

        let decoded: Vec<(String, String)> = serde_urlencoded::from_str(&pairs.join("&"))
            .map_err(|e| Error::invalid_response(format!("Undecodable NVP body: {}", e)))?;

        Ok(Self {
            fields: decoded.into_iter().collect(),
        })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// A field the operation always returns on success
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::invalid_response(format!("Response is missing {}", key)))
    }

    pub fn string(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.is_empty()).map(str::to_string)
    }

    /// Parse an amount field
    pub fn decimal(&self, key: &str) -> Result<Option<Decimal>> {
        match self.get(key).filter(|v| !v.is_empty()) {
            Some(value) => Decimal::from_str(value).map(Some).map_err(|e| {
                Error::invalid_response(format!("Invalid amount in {}: {} ({})", key, value, e))
            }),
            None => Ok(None),
        }
    }

    /// Informational counter; values that don't parse as `u64` are dropped
    pub fn counter(&self, key: &str) -> Option<u64> {
        let value = self.get(key).filter(|v| !v.is_empty())?;
        match value.parse::<u64>() {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::debug!(field = key, value, error = %e, "Ignoring unparseable counter");
                None
            }
        }
    }

    /// Parse a counter field
    pub fn number(&self, key: &str) -> Result<Option<u32>> {
        match self.get(key).filter(|v| !v.is_empty()) {
            Some(value) => value.parse::<u32>().map(Some).map_err(|e| {
                Error::invalid_response(format!("Invalid number in {}: {} ({})", key, value, e))
            }),
            None => Ok(None),
        }
    }

    pub fn ack(&self) -> Option<Ack> {
        self.get("ACK").map(Ack::from)
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.get("CORRELATIONID")
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.get("TIMESTAMP")
    }

    /// All errors and warnings PayPal attached to the response
    pub fn messages(&self) -> Vec<ApiMessage> {
        (0..)
            .map_while(|n| {
                let code = self.get(&format!("L_ERRORCODE{}", n));
                let short = self.get(&format!("L_SHORTMESSAGE{}", n));
                if code.is_none() && short.is_none() {
                    return None;
                }

                Some(ApiMessage {
                    code: code.unwrap_or_default().to_string(),
                    short_message: short.unwrap_or_default().to_string(),
                    long_message: self
                        .get(&format!("L_LONGMESSAGE{}", n))
                        .unwrap_or_default()
                        .to_string(),
                    severity: self.string(&format!("L_SEVERITYCODE{}", n)),
                })
            })
            .collect()
    }

    /// Turn an unsuccessful acknowledgement into an error
    ///
    /// `method` and `endpoint` only feed the error message.
    pub fn acknowledge(self, method: &str, endpoint: &str) -> Result<Self> {
        let ack = match self.ack() {
            Some(ack) => ack,
            None => {
                return Err(Error::invalid_response(format!(
                    "Invalid HTTP Response for {} request to {}",
                    method, endpoint
                )))
            }
        };

        if ack.is_success() {
            return Ok(self);
        }

        let first = self.messages().into_iter().next();
        let (code, short_message, message) = match first {
            Some(m) => {
                let long = if m.long_message.is_empty() {
                    m.short_message.clone()
                } else {
                    m.long_message
                };
                (m.code, m.short_message, long)
            }
            None => (
                String::new(),
                String::new(),
                format!("{} returned ACK={}", method, ack),
            ),
        };

        Err(Error::Api {
            operation: method.to_string(),
            ack: ack.to_string(),
            code,
            short_message,
            message,
            correlation_id: self.correlation_id().map(str::to_string),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The response with keys translated to readable names, e.g. `AMT` to `amount`
    pub fn humanize(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|(k, v)| (human_key(k), v.clone()))
            .collect()
    }
}

/// Map a PayPal field name to a readable one
///
/// The `PAYMENTINFO_0_` and `PAYMENTREQUEST_0_` prefixes are dropped. Names
/// without a known translation are lower-cased.
pub fn human_key(key: &str) -> String {
    let bare = key
        .strip_prefix("PAYMENTINFO_0_")
        .or_else(|| key.strip_prefix("PAYMENTREQUEST_0_"))
        .unwrap_or(key);

    let mapped = match bare {
        "AMT" => "amount",
        "ACK" => "ack",
        "TOKEN" => "token",
        "PAYERID" => "payer_id",
        "PAYERSTATUS" => "payer_status",
        "EMAIL" => "email",
        "FIRSTNAME" => "first_name",
        "LASTNAME" => "last_name",
        "COUNTRYCODE" => "country_code",
        "CURRENCYCODE" => "currency",
        "DESC" => "description",
        "CORRELATIONID" => "correlation_id",
        "TIMESTAMP" => "timestamp",
        "VERSION" => "version",
        "BUILD" => "build",
        "PROFILEID" => "profile_id",
        "PROFILESTATUS" => "profile_status",
        "PROFILEREFERENCE" => "invoice_number",
        "STATUS" => "status",
        "SUBSCRIBERNAME" => "subscriber_name",
        "PROFILESTARTDATE" => "start_date",
        "NEXTBILLINGDATE" => "next_billing_date",
        "FINALPAYMENTDUEDATE" => "final_payment_due_date",
        "BILLINGPERIOD" => "period",
        "BILLINGFREQUENCY" => "frequency",
        "TOTALBILLINGCYCLES" => "total_cycles",
        "NUMCYCLESCOMPLETED" => "cycles_completed",
        "NUMCYCLESREMAINING" => "cycles_remaining",
        "OUTSTANDINGBALANCE" => "outstanding_balance",
        "FAILEDPAYMENTCOUNT" => "failed_payment_count",
        "MAXFAILEDPAYMENTS" => "max_failed_payments",
        "LASTPAYMENTDATE" => "last_payment_date",
        "LASTPAYMENTAMT" => "last_payment_amount",
        "AUTOBILLOUTAMT" => "auto_bill_outstanding",
        "TRIALAMTPAID" => "trial_amount_paid",
        "REGULARAMTPAID" => "regular_amount_paid",
        "TRANSACTIONID" => "transaction_id",
        "TRANSACTIONTYPE" => "transaction_type",
        "PAYMENTTYPE" => "payment_type",
        "PAYMENTSTATUS" => "payment_status",
        "PENDINGREASON" => "pending_reason",
        "REASONCODE" => "reason_code",
        "ORDERTIME" => "order_time",
        "FEEAMT" => "fee_amount",
        "TAXAMT" => "tax_amount",
        "SHIPPINGAMT" => "shipping_amount",
        "HANDLINGAMT" => "handling_amount",
        "INVNUM" => "invoice_number",
        "CUSTOM" => "custom",
        "RECEIVEREMAIL" => "receiver_email",
        "RECEIVERID" => "receiver_id",
        "SUBJECT" => "subject",
        "BILLINGAGREEMENTACCEPTEDSTATUS" => "billing_agreement_accepted",
        "CHECKOUTSTATUS" => "checkout_status",
        other => return other.to_lowercase(),
    };

    mapped.to_string()
}

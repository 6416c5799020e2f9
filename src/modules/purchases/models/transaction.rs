use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::Result;
use crate::modules::checkout::CheckoutToken;
use crate::modules::nvp::NvpResponse;

/// Payment status reported for a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PaymentStatus {
    None,
    Completed,
    Denied,
    Expired,
    Failed,
    InProgress,
    PartiallyRefunded,
    Pending,
    Refunded,
    Reversed,
    Processed,
    Voided,
    CompletedFundsHeld,
    Other(String),
}

impl PaymentStatus {
    /// Money has moved to the seller
    pub fn is_completed(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Completed | PaymentStatus::Processed | PaymentStatus::CompletedFundsHeld
        )
    }
}

impl From<&str> for PaymentStatus {
    fn from(value: &str) -> Self {
        match value {
            "None" => PaymentStatus::None,
            "Completed" => PaymentStatus::Completed,
            "Denied" => PaymentStatus::Denied,
            "Expired" => PaymentStatus::Expired,
            "Failed" => PaymentStatus::Failed,
            "In-Progress" => PaymentStatus::InProgress,
            "Partially-Refunded" => PaymentStatus::PartiallyRefunded,
            "Pending" => PaymentStatus::Pending,
            "Refunded" => PaymentStatus::Refunded,
            "Reversed" => PaymentStatus::Reversed,
            "Processed" => PaymentStatus::Processed,
            "Voided" => PaymentStatus::Voided,
            "Completed-Funds-Held" => PaymentStatus::CompletedFundsHeld,
            other => PaymentStatus::Other(other.to_string()),
        }
    }
}

/// Result of DoExpressCheckoutPayment
#[derive(Debug, Clone, Serialize)]
pub struct PaymentReceipt {
    pub token: Option<CheckoutToken>,
    pub transaction_id: String,
    pub transaction_type: Option<String>,
    pub payment_type: Option<String>,
    pub payment_status: PaymentStatus,
    pub pending_reason: Option<String>,
    pub order_time: Option<String>,
    pub amount: Option<Decimal>,
    pub fee_amount: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub currency: Option<String>,
    pub raw: NvpResponse,
}

impl PaymentReceipt {
    pub fn from_response(response: NvpResponse) -> Result<Self> {
        Ok(Self {
            token: response.string("TOKEN").map(CheckoutToken::from),
            transaction_id: response.require("PAYMENTINFO_0_TRANSACTIONID")?.to_string(),
            transaction_type: response.string("PAYMENTINFO_0_TRANSACTIONTYPE"),
            payment_type: response.string("PAYMENTINFO_0_PAYMENTTYPE"),
            payment_status: response
                .get("PAYMENTINFO_0_PAYMENTSTATUS")
                .map(PaymentStatus::from)
                .unwrap_or(PaymentStatus::None),
            pending_reason: response.string("PAYMENTINFO_0_PENDINGREASON"),
            order_time: response.string("PAYMENTINFO_0_ORDERTIME"),
            amount: response.decimal("PAYMENTINFO_0_AMT")?,
            fee_amount: response.decimal("PAYMENTINFO_0_FEEAMT")?,
            tax_amount: response.decimal("PAYMENTINFO_0_TAXAMT")?,
            currency: response.string("PAYMENTINFO_0_CURRENCYCODE"),
            raw: response,
        })
    }

    pub fn is_completed(&self) -> bool {
        self.payment_status.is_completed()
    }
}

/// One `L_NAMEn` / `L_QTYn` / `L_AMTn` entry of a transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionItem {
    pub name: String,
    pub quantity: Option<u32>,
    pub amount: Option<Decimal>,
    pub number: Option<String>,
}

/// Result of GetTransactionDetails
#[derive(Debug, Clone, Serialize)]
pub struct TransactionDetails {
    pub transaction_id: String,
    pub payer_id: Option<String>,
    pub payer_email: Option<String>,
    pub payer_status: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub receiver_email: Option<String>,
    pub subject: Option<String>,
    pub transaction_type: Option<String>,
    pub payment_type: Option<String>,
    pub payment_status: PaymentStatus,
    pub pending_reason: Option<String>,
    pub order_time: Option<String>,
    pub amount: Option<Decimal>,
    pub fee_amount: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub currency: Option<String>,
    pub invoice_number: Option<String>,
    pub custom: Option<String>,
    pub items: Vec<TransactionItem>,
    pub raw: NvpResponse,
}

impl TransactionDetails {
    pub fn from_response(response: NvpResponse) -> Result<Self> {
        let mut items = Vec::new();
        for n in 0.. {
            let Some(name) = response.string(&format!("L_NAME{}", n)) else {
                break;
            };
            items.push(TransactionItem {
                name,
                quantity: response.number(&format!("L_QTY{}", n))?,
                amount: response.decimal(&format!("L_AMT{}", n))?,
                number: response.string(&format!("L_NUMBER{}", n)),
            });
        }

        Ok(Self {
            transaction_id: response.require("TRANSACTIONID")?.to_string(),
            payer_id: response.string("PAYERID"),
            payer_email: response.string("EMAIL"),
            payer_status: response.string("PAYERSTATUS"),
            first_name: response.string("FIRSTNAME"),
            last_name: response.string("LASTNAME"),
            receiver_email: response.string("RECEIVEREMAIL"),
            subject: response.string("SUBJECT"),
            transaction_type: response.string("TRANSACTIONTYPE"),
            payment_type: response.string("PAYMENTTYPE"),
            payment_status: response
                .get("PAYMENTSTATUS")
                .map(PaymentStatus::from)
                .unwrap_or(PaymentStatus::None),
            pending_reason: response.string("PENDINGREASON"),
            order_time: response.string("ORDERTIME"),
            amount: response.decimal("AMT")?,
            fee_amount: response.decimal("FEEAMT")?,
            tax_amount: response.decimal("TAXAMT")?,
            currency: response.string("CURRENCYCODE"),
            invoice_number: response.string("INVNUM"),
            custom: response.string("CUSTOM"),
            items,
            raw: response,
        })
    }
}

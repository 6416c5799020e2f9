use async_trait::async_trait;
use tracing::info;

use crate::config::Config;
use crate::core::{Error, Result};
use crate::modules::checkout::{Checkout, DigitalGoods, Operation};
use crate::modules::nvp::NvpRequest;
use crate::modules::purchases::models::{PaymentReceipt, PurchaseDetails, TransactionDetails};

/// A one-time purchase of digital goods
///
/// Flow: [`request_checkout_token`](DigitalGoods::request_checkout_token),
/// send the buyer to [`checkout_url`](DigitalGoods::checkout_url), then once
/// they return call [`Checkout::resume`] with the token and payer ID and
/// finish with [`process_payment`](Purchase::process_payment).
#[derive(Debug, Clone)]
pub struct Purchase {
    checkout: Checkout,
    details: PurchaseDetails,
}

impl Purchase {
    /// Create a purchase flow; details are validated against the configured currency
    pub fn new(config: Config, details: PurchaseDetails) -> Result<Self> {
        details.validate(config.currency())?;

        Ok(Self {
            checkout: Checkout::new(config)?,
            details,
        })
    }

    pub fn details(&self) -> &PurchaseDetails {
        &self.details
    }

    /// Payment block shared by SetExpressCheckout and DoExpressCheckoutPayment
    fn push_payment_fields(&self, request: &mut NvpRequest) {
        let config = self.checkout.config();
        let currency = config.currency();
        let details = &self.details;

        request
            .push("PAYMENTREQUEST_0_CURRENCYCODE", currency.code())
            .push("PAYMENTREQUEST_0_PAYMENTACTION", "Sale")
            .push("PAYMENTREQUEST_0_AMT", currency.nvp_amount(details.amount))
            .push("PAYMENTREQUEST_0_ITEMAMT", currency.nvp_amount(details.item_amount()))
            .push("PAYMENTREQUEST_0_TAXAMT", currency.nvp_amount(details.tax_amount))
            .push("PAYMENTREQUEST_0_DESC", details.description.as_str())
            .push_opt("PAYMENTREQUEST_0_INVNUM", details.invoice_number.as_deref())
            .push_opt("PAYMENTREQUEST_0_NOTIFYURL", config.notify_url())
            .push_opt("PAYMENTREQUEST_0_CUSTOM", details.custom.as_deref());

        for (n, item) in details.line_items().iter().enumerate() {
            request
                .push(format!("L_PAYMENTREQUEST_0_ITEMCATEGORY{}", n), "Digital")
                .push(format!("L_PAYMENTREQUEST_0_NAME{}", n), item.name.as_str())
                .push(format!("L_PAYMENTREQUEST_0_AMT{}", n), currency.nvp_amount(item.amount))
                .push(format!("L_PAYMENTREQUEST_0_QTY{}", n), item.quantity.to_string())
                .push_opt(format!("L_PAYMENTREQUEST_0_DESC{}", n), item.description.as_deref())
                .push_opt(
                    format!("L_PAYMENTREQUEST_0_TAXAMT{}", n),
                    item.tax_amount.map(|tax| currency.nvp_amount(tax)),
                )
                .push_opt(format!("L_PAYMENTREQUEST_0_NUMBER{}", n), item.number.as_deref());
        }
    }

    /// DoExpressCheckoutPayment request for the approved checkout
    pub fn payment_request(&self) -> Result<NvpRequest> {
        let mut request = self.checkout.request(Operation::DoExpressCheckoutPayment)?;
        request.push("PAYERID", self.checkout.require_payer_id()?);
        self.push_payment_fields(&mut request);
        Ok(request)
    }

    /// Take the payment by calling DoExpressCheckoutPayment
    ///
    /// Needs the checkout token and the payer ID PayPal returned with the buyer.
    pub async fn process_payment(&self) -> Result<PaymentReceipt> {
        let request = self.payment_request()?;
        let response = self
            .checkout
            .client()
            .call(Operation::DoExpressCheckoutPayment, &request)
            .await?;
        let receipt = PaymentReceipt::from_response(response)?;

        info!(
            transaction_id = %receipt.transaction_id,
            payment_status = ?receipt.payment_status,
            "Purchase payment processed"
        );

        Ok(receipt)
    }

    /// Look up a transaction by calling GetTransactionDetails
    pub async fn transaction_details(&self, transaction_id: &str) -> Result<TransactionDetails> {
        if transaction_id.trim().is_empty() {
            return Err(Error::validation("Transaction ID cannot be empty"));
        }

        let mut request = self.checkout.request(Operation::GetTransactionDetails)?;
        request.push("TRANSACTIONID", transaction_id.trim());

        let response = self
            .checkout
            .client()
            .call(Operation::GetTransactionDetails, &request)
            .await?;
        TransactionDetails::from_response(response)
    }

    /// GetTransactionDetails for the payment a DoExpressCheckoutPayment receipt describes
    pub async fn receipt_details(&self, receipt: &PaymentReceipt) -> Result<TransactionDetails> {
        self.transaction_details(&receipt.transaction_id).await
    }

    /// Price with currency symbol, e.g. "$12.00"
    pub fn price_string(&self) -> String {
        self.checkout
            .config()
            .currency()
            .format_amount(self.details.amount)
    }
}

#[async_trait]
impl DigitalGoods for Purchase {
    type Receipt = PaymentReceipt;
    type Details = TransactionDetails;

    fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    fn checkout_mut(&mut self) -> &mut Checkout {
        &mut self.checkout
    }

    fn set_express_checkout_request(&self) -> Result<NvpRequest> {
        let mut request = self.checkout.set_express_checkout_request()?;
        self.push_payment_fields(&mut request);
        Ok(request)
    }

    fn description(&self) -> &str {
        &self.details.description
    }

    fn price_summary(&self) -> String {
        self.price_string()
    }

    async fn process(&self) -> Result<PaymentReceipt> {
        self.process_payment().await
    }

    async fn get_details(&self, transaction_id: &str) -> Result<TransactionDetails> {
        self.transaction_details(transaction_id).await
    }
}

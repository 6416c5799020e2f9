use async_trait::async_trait;
use tracing::info;

use crate::config::Config;
use crate::core::{Error, Result};
use crate::modules::checkout::{Checkout, DigitalGoods, Operation};
use crate::modules::nvp::NvpRequest;
use crate::modules::subscriptions::models::{
    ProfileCreated, ProfileDetails, ProfileStatusChanged, StatusAction, SubscriptionDetails,
};

/// A recurring payments subscription
///
/// The buyer approves a billing agreement during checkout; the profile is only
/// created once [`start_subscription`](Subscription::start_subscription)
/// succeeds. Keep the returned profile ID to manage the subscription later.
#[derive(Debug, Clone)]
pub struct Subscription {
    checkout: Checkout,
    details: SubscriptionDetails,
}

impl Subscription {
    pub fn new(config: Config, details: SubscriptionDetails) -> Result<Self> {
        details.validate(config.currency())?;

        Ok(Self {
            checkout: Checkout::new(config)?,
            details,
        })
    }

    pub fn details(&self) -> &SubscriptionDetails {
        &self.details
    }

    /// CreateRecurringPaymentsProfile request for the approved billing agreement
    pub fn create_profile_request(&self) -> Result<NvpRequest> {
        let currency = self.checkout.config().currency();
        let details = &self.details;

        let mut request = self
            .checkout
            .request(Operation::CreateRecurringPaymentsProfile)?;
        request
            .push("DESC", details.description.as_str())
            .push("CURRENCYCODE", currency.code())
            .push("PROFILESTARTDATE", details.start_date_string())
            .push("AMT", currency.nvp_amount(details.amount))
            .push("INITAMT", currency.nvp_amount(details.initial_amount))
            .push("TAXAMT", currency.nvp_amount(details.tax_amount))
            .push("BILLINGPERIOD", details.period.as_str())
            .push("BILLINGFREQUENCY", details.frequency.to_string())
            .push("TOTALBILLINGCYCLES", details.total_cycles.to_string())
            .push("L_PAYMENTREQUEST_0_ITEMCATEGORY0", "Digital")
            .push("L_PAYMENTREQUEST_0_NAME0", details.description.as_str())
            .push("L_PAYMENTREQUEST_0_AMT0", currency.nvp_amount(details.amount))
            .push("L_PAYMENTREQUEST_0_QTY0", "1")
            .push_opt(
                "MAXFAILEDPAYMENTS",
                details.max_failed_payments.map(|n| n.to_string()),
            )
            .push_opt("PROFILEREFERENCE", details.invoice_number.as_deref());

        if let Some(trial) = details.active_trial() {
            request
                .push("TRIALAMT", currency.nvp_amount(trial.amount))
                .push("TRIALBILLINGPERIOD", trial.period.as_str())
                .push("TRIALBILLINGFREQUENCY", trial.frequency.to_string())
                .push("TRIALTOTALBILLINGCYCLES", trial.total_cycles.to_string());
        }

        request.push("AUTOBILLOUTAMT", details.auto_bill());
        Ok(request)
    }

    /// Create the recurring payments profile by calling CreateRecurringPaymentsProfile
    pub async fn start_subscription(&self) -> Result<ProfileCreated> {
        let request = self.create_profile_request()?;
        let response = self
            .checkout
            .client()
            .call(Operation::CreateRecurringPaymentsProfile, &request)
            .await?;
        let created = ProfileCreated::from_response(response)?;

        info!(
            profile_id = %created.profile_id,
            status = ?created.status,
            "Recurring payments profile created"
        );

        Ok(created)
    }

    /// Look up a profile by calling GetRecurringPaymentsProfileDetails
    pub async fn profile_details(&self, profile_id: &str) -> Result<ProfileDetails> {
        let profile_id = require_profile_id(profile_id)?;

        let mut request = self
            .checkout
            .request(Operation::GetRecurringPaymentsProfileDetails)?;
        request.push("PROFILEID", profile_id);

        let response = self
            .checkout
            .client()
            .call(Operation::GetRecurringPaymentsProfileDetails, &request)
            .await?;
        ProfileDetails::from_response(response)
    }

    /// Cancel, suspend or reactivate a profile
    pub async fn manage_subscription_status(
        &self,
        profile_id: &str,
        action: StatusAction,
        note: Option<&str>,
    ) -> Result<ProfileStatusChanged> {
        let profile_id = require_profile_id(profile_id)?;

        let mut request = self
            .checkout
            .request(Operation::ManageRecurringPaymentsProfileStatus)?;
        request
            .push("PROFILEID", profile_id)
            .push("ACTION", action.as_str())
            .push_opt("NOTE", note);

        let response = self
            .checkout
            .client()
            .call(Operation::ManageRecurringPaymentsProfileStatus, &request)
            .await?;
        let changed = ProfileStatusChanged::from_response(response, profile_id, action)?;

        info!(
            profile_id = %changed.profile_id,
            action = %action,
            "Recurring payments profile status changed"
        );

        Ok(changed)
    }

    /// Terms in words, e.g. "$10.00 sign-up fee then $2.00 per week for 4 weeks"
    pub fn subscription_string(&self) -> String {
        self.details.summary(self.checkout.config().currency())
    }
}

fn require_profile_id(profile_id: &str) -> Result<&str> {
    let profile_id = profile_id.trim();
    if profile_id.is_empty() {
        return Err(Error::validation("Profile ID cannot be empty"));
    }
    Ok(profile_id)
}

#[async_trait]
impl DigitalGoods for Subscription {
    type Receipt = ProfileCreated;
    type Details = ProfileDetails;

    fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    fn checkout_mut(&mut self) -> &mut Checkout {
        &mut self.checkout
    }

    fn set_express_checkout_request(&self) -> Result<NvpRequest> {
        let currency = self.checkout.config().currency();

        let mut request = self.checkout.set_express_checkout_request()?;
        request
            .push("L_BILLINGTYPE0", "RecurringPayments")
            .push("L_BILLINGAGREEMENTDESCRIPTION0", self.details.description.as_str())
            .push("CURRENCYCODE", currency.code())
            .push("MAXAMT", currency.nvp_amount(self.details.average_amount));
        Ok(request)
    }

    fn description(&self) -> &str {
        &self.details.description
    }

    fn price_summary(&self) -> String {
        self.subscription_string()
    }

    async fn process(&self) -> Result<ProfileCreated> {
        self.start_subscription().await
    }

    async fn get_details(&self, profile_id: &str) -> Result<ProfileDetails> {
        self.profile_details(profile_id).await
    }
}

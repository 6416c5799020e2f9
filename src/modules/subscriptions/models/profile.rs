use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::subscription::BillingPeriod;
use crate::core::Result;
use crate::modules::nvp::NvpResponse;

/// Recurring payments profile status
///
/// CreateRecurringPaymentsProfile reports `ActiveProfile` / `PendingProfile`,
/// GetRecurringPaymentsProfileDetails reports `Active`, `Pending`, `Cancelled`,
/// `Suspended` or `Expired`. Both spellings map to the same variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ProfileStatus {
    Active,
    Pending,
    Cancelled,
    Suspended,
    Expired,
    Other(String),
}

impl ProfileStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, ProfileStatus::Active)
    }
}

impl From<&str> for ProfileStatus {
    fn from(value: &str) -> Self {
        match value {
            "Active" | "ActiveProfile" => ProfileStatus::Active,
            "Pending" | "PendingProfile" => ProfileStatus::Pending,
            "Cancelled" | "CancelledProfile" => ProfileStatus::Cancelled,
            "Suspended" | "SuspendedProfile" => ProfileStatus::Suspended,
            "Expired" | "ExpiredProfile" => ProfileStatus::Expired,
            other => ProfileStatus::Other(other.to_string()),
        }
    }
}

/// `ACTION` of ManageRecurringPaymentsProfileStatus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusAction {
    Cancel,
    Suspend,
    Reactivate,
}

impl StatusAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusAction::Cancel => "Cancel",
            StatusAction::Suspend => "Suspend",
            StatusAction::Reactivate => "Reactivate",
        }
    }
}

impl fmt::Display for StatusAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cancel" => Ok(StatusAction::Cancel),
            "suspend" => Ok(StatusAction::Suspend),
            "reactivate" => Ok(StatusAction::Reactivate),
            _ => Err(format!("Invalid profile action: {}", s)),
        }
    }
}

/// Result of CreateRecurringPaymentsProfile
#[derive(Debug, Clone, Serialize)]
pub struct ProfileCreated {
    /// Keep this; it is needed to look up or change the profile later
    pub profile_id: String,
    pub status: ProfileStatus,
    pub raw: NvpResponse,
}

impl ProfileCreated {
    pub fn from_response(response: NvpResponse) -> Result<Self> {
        Ok(Self {
            profile_id: response.require("PROFILEID")?.to_string(),
            status: response
                .get("PROFILESTATUS")
                .map(ProfileStatus::from)
                .unwrap_or(ProfileStatus::Pending),
            raw: response,
        })
    }
}

/// Result of GetRecurringPaymentsProfileDetails
#[derive(Debug, Clone, Serialize)]
pub struct ProfileDetails {
    pub profile_id: String,
    pub status: ProfileStatus,
    pub description: Option<String>,
    pub auto_bill: Option<String>,
    pub max_failed_payments: Option<u64>,
    pub subscriber_name: Option<String>,
    pub profile_reference: Option<String>,
    pub start_date: Option<String>,
    pub next_billing_date: Option<String>,
    pub final_payment_due_date: Option<String>,
    pub cycles_completed: Option<u64>,
    pub cycles_remaining: Option<u64>,
    pub failed_payment_count: Option<u64>,
    pub outstanding_balance: Option<Decimal>,
    pub last_payment_date: Option<String>,
    pub last_payment_amount: Option<Decimal>,
    pub billing_period: Option<BillingPeriod>,
    pub billing_frequency: Option<u64>,
    pub total_billing_cycles: Option<u64>,
    pub amount: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub currency: Option<String>,
    pub trial_amount_paid: Option<Decimal>,
    pub regular_amount_paid: Option<Decimal>,
    pub aggregate_amount: Option<Decimal>,
    pub raw: NvpResponse,
}

impl ProfileDetails {
    pub fn from_response(response: NvpResponse) -> Result<Self> {
        Ok(Self {
            profile_id: response.require("PROFILEID")?.to_string(),
            status: ProfileStatus::from(response.require("STATUS")?),
            description: response.string("DESC"),
            auto_bill: response.string("AUTOBILLOUTAMT"),
            max_failed_payments: response.counter("MAXFAILEDPAYMENTS"),
            subscriber_name: response.string("SUBSCRIBERNAME"),
            profile_reference: response.string("PROFILEREFERENCE"),
            start_date: response.string("PROFILESTARTDATE"),
            next_billing_date: response.string("NEXTBILLINGDATE"),
            final_payment_due_date: response.string("FINALPAYMENTDUEDATE"),
            cycles_completed: response.counter("NUMCYCLESCOMPLETED"),
            cycles_remaining: response.counter("NUMCYCLESREMAINING"),
            failed_payment_count: response.counter("FAILEDPAYMENTCOUNT"),
            outstanding_balance: response.decimal("OUTSTANDINGBALANCE")?,
            last_payment_date: response.string("LASTPAYMENTDATE"),
            last_payment_amount: response.decimal("LASTPAYMENTAMT")?,
            billing_period: response
                .get("BILLINGPERIOD")
                .and_then(|period| period.parse().ok()),
            billing_frequency: response.counter("BILLINGFREQUENCY"),
            total_billing_cycles: response.counter("TOTALBILLINGCYCLES"),
            amount: response.decimal("AMT")?,
            tax_amount: response.decimal("TAXAMT")?,
            currency: response.string("CURRENCYCODE"),
            trial_amount_paid: response.decimal("TRIALAMTPAID")?,
            regular_amount_paid: response.decimal("REGULARAMTPAID")?,
            aggregate_amount: response.decimal("AGGREGATEAMT")?,
            raw: response,
        })
    }
}

/// Result of ManageRecurringPaymentsProfileStatus
#[derive(Debug, Clone, Serialize)]
pub struct ProfileStatusChanged {
    pub profile_id: String,
    pub action: StatusAction,
    pub raw: NvpResponse,
}

impl ProfileStatusChanged {
    /// PayPal echoes `PROFILEID`; the requested ID is used when it doesn't
    pub fn from_response(
        response: NvpResponse,
        requested_id: &str,
        action: StatusAction,
    ) -> Result<Self> {
        Ok(Self {
            profile_id: response
                .string("PROFILEID")
                .unwrap_or_else(|| requested_id.to_string()),
            action,
            raw: response,
        })
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Currency, Error, Result};

const MAX_DESCRIPTION_LENGTH: usize = 127;
const MAX_REFERENCE_LENGTH: usize = 127;

/// `PROFILESTARTDATE` layout
pub const START_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Unit of time between two billings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BillingPeriod {
    Day,
    Week,
    #[serde(alias = "Semimonth")]
    SemiMonth,
    #[default]
    Month,
    Year,
}

impl BillingPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingPeriod::Day => "Day",
            BillingPeriod::Week => "Week",
            BillingPeriod::SemiMonth => "SemiMonth",
            BillingPeriod::Month => "Month",
            BillingPeriod::Year => "Year",
        }
    }

    /// Largest frequency PayPal accepts, keeping one billing cycle within a year
    pub fn max_frequency(&self) -> u32 {
        match self {
            BillingPeriod::Day => 365,
            BillingPeriod::Week => 52,
            BillingPeriod::SemiMonth => 1,
            BillingPeriod::Month => 12,
            BillingPeriod::Year => 1,
        }
    }

    /// Lower-case noun used in summaries
    pub fn noun(&self) -> String {
        self.as_str().to_lowercase()
    }

    fn validate_frequency(&self, field: &str, frequency: u32) -> Result<()> {
        if frequency == 0 {
            return Err(Error::validation(format!("{} must be at least 1", field)));
        }

        if frequency > self.max_frequency() {
            return Err(Error::validation(format!(
                "{} cannot exceed {} when billing by {}",
                field,
                self.max_frequency(),
                self.noun()
            )));
        }

        Ok(())
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingPeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(BillingPeriod::Day),
            "week" => Ok(BillingPeriod::Week),
            "semimonth" => Ok(BillingPeriod::SemiMonth),
            "month" => Ok(BillingPeriod::Month),
            "year" => Ok(BillingPeriod::Year),
            _ => Err(format!("Invalid billing period: {}", s)),
        }
    }
}

/// Introductory billing terms that run before the regular cycles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TrialTerms {
    /// Charged per trial cycle; zero makes the trial free
    pub amount: Decimal,
    pub period: BillingPeriod,
    pub frequency: u32,
    pub total_cycles: u32,
}

impl TrialTerms {
    pub fn new(period: BillingPeriod, frequency: u32, total_cycles: u32) -> Self {
        Self {
            amount: Decimal::ZERO,
            period,
            frequency,
            total_cycles,
        }
    }

    /// Free trial of `total_cycles` single periods
    pub fn free(period: BillingPeriod, total_cycles: u32) -> Self {
        Self::new(period, 1, total_cycles)
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    /// Terms with neither frequency nor cycles are not sent
    pub fn is_active(&self) -> bool {
        self.frequency > 0 || self.total_cycles > 0
    }

    pub fn is_free(&self) -> bool {
        self.amount <= Decimal::ZERO
    }
}

/// Recurring payments profile terms
///
/// Defaults to $25.00 per month, starting 24 hours from now and running until
/// cancelled, with no sign-up fee and no trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionDetails {
    /// Shown to the subscriber in their PayPal account; also the billing agreement text
    pub description: String,

    /// Own reference for the profile (`PROFILEREFERENCE`)
    pub invoice_number: Option<String>,

    /// Failed payments allowed before the profile is suspended
    pub max_failed_payments: Option<u32>,

    /// Price per billing cycle, including tax
    pub amount: Decimal,

    /// Sign-up fee
    pub initial_amount: Decimal,

    /// Expected amount per transaction (`MAXAMT` on the billing agreement)
    pub average_amount: Decimal,

    pub tax_amount: Decimal,

    pub start_date: DateTime<Utc>,
    pub period: BillingPeriod,
    pub frequency: u32,

    /// Number of billing cycles; 0 bills until the profile is cancelled
    pub total_cycles: u32,

    pub trial: Option<TrialTerms>,

    /// Add failed payment amounts to the next billing cycle
    pub add_to_next_bill: bool,
}

impl Default for SubscriptionDetails {
    fn default() -> Self {
        Self {
            description: "Digital Goods Subscription".to_string(),
            invoice_number: None,
            max_failed_payments: None,
            amount: Decimal::new(2500, 2),
            initial_amount: Decimal::new(0, 2),
            average_amount: Decimal::from(25),
            tax_amount: Decimal::new(0, 2),
            start_date: Utc::now() + Duration::hours(24),
            period: BillingPeriod::Month,
            frequency: 1,
            total_cycles: 0,
            trial: None,
            add_to_next_bill: true,
        }
    }
}

impl SubscriptionDetails {
    pub fn new(description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            description: description.into(),
            amount,
            average_amount: amount,
            ..Self::default()
        }
    }

    pub fn with_billing(mut self, period: BillingPeriod, frequency: u32, total_cycles: u32) -> Self {
        self.period = period;
        self.frequency = frequency;
        self.total_cycles = total_cycles;
        self
    }

    pub fn with_initial_amount(mut self, amount: Decimal) -> Self {
        self.initial_amount = amount;
        self
    }

    pub fn with_average_amount(mut self, amount: Decimal) -> Self {
        self.average_amount = amount;
        self
    }

    pub fn with_tax(mut self, tax_amount: Decimal) -> Self {
        self.tax_amount = tax_amount;
        self
    }

    pub fn with_start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = start_date;
        self
    }

    pub fn with_trial(mut self, trial: TrialTerms) -> Self {
        self.trial = Some(trial);
        self
    }

    pub fn with_invoice_number(mut self, invoice_number: impl Into<String>) -> Self {
        self.invoice_number = Some(invoice_number.into());
        self
    }

    pub fn with_max_failed_payments(mut self, max_failed_payments: u32) -> Self {
        self.max_failed_payments = Some(max_failed_payments);
        self
    }

    pub fn with_add_to_next_bill(mut self, add_to_next_bill: bool) -> Self {
        self.add_to_next_bill = add_to_next_bill;
        self
    }

    /// Trial terms that will actually be sent
    pub fn active_trial(&self) -> Option<&TrialTerms> {
        self.trial.as_ref().filter(|trial| trial.is_active())
    }

    /// `PROFILESTARTDATE` value
    pub fn start_date_string(&self) -> String {
        self.start_date.format(START_DATE_FORMAT).to_string()
    }

    /// `AUTOBILLOUTAMT` value
    pub fn auto_bill(&self) -> &'static str {
        if self.add_to_next_bill {
            "AddToNextBilling"
        } else {
            "NoAutoBill"
        }
    }

    pub fn validate(&self, currency: Currency) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(Error::validation("Subscription description cannot be empty"));
        }

        if self.description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(Error::validation(format!(
                "Subscription description cannot exceed {} characters",
                MAX_DESCRIPTION_LENGTH
            )));
        }

        if let Some(reference) = &self.invoice_number {
            if reference.chars().count() > MAX_REFERENCE_LENGTH {
                return Err(Error::validation(format!(
                    "Invoice number cannot exceed {} characters",
                    MAX_REFERENCE_LENGTH
                )));
            }
        }

        if self.amount <= Decimal::ZERO {
            return Err(Error::validation(format!(
                "Subscription amount must be positive, got: {}",
                self.amount
            )));
        }

        currency.validate_amount("amount", self.amount)?;
        currency.validate_amount("initial amount", self.initial_amount)?;
        currency.validate_amount("average amount", self.average_amount)?;
        currency.validate_amount("tax amount", self.tax_amount)?;

        if self.tax_amount > self.amount {
            return Err(Error::validation(format!(
                "Tax amount {} exceeds subscription amount {}",
                self.tax_amount, self.amount
            )));
        }

        self.period.validate_frequency("Billing frequency", self.frequency)?;

        if let Some(trial) = self.active_trial() {
            currency.validate_amount("trial amount", trial.amount)?;
            trial
                .period
                .validate_frequency("Trial billing frequency", trial.frequency)?;
        }

        Ok(())
    }

    /// Human readable terms, e.g.
    /// "$10.00 sign-up fee then 1 week free trial period followed by $2.00 per week for 4 weeks"
    pub fn summary(&self, currency: Currency) -> String {
        let mut summary = String::new();

        if !self.initial_amount.is_zero() {
            summary.push_str(&format!(
                "{} sign-up fee then",
                currency.format_amount(self.initial_amount)
            ));
        }

        if let Some(trial) = self.active_trial() {
            let period = trial.period.noun();
            summary.push_str(&format!(" {} {}", trial.total_cycles, period));

            if trial.is_free() {
                summary.push_str(" free trial period followed by");
            } else if trial.frequency > 1 {
                summary.push_str(&format!(
                    " trial period charged at {} every {} {}s followed by",
                    currency.format_amount(trial.amount),
                    trial.frequency,
                    period
                ));
            } else {
                summary.push_str(&format!(
                    " trial period charged at {} per {} followed by",
                    currency.format_amount(trial.amount),
                    period
                ));
            }
        }

        let period = self.period.noun();
        if self.frequency > 1 {
            summary.push_str(&format!(
                " {} every {} {}s",
                currency.format_amount(self.amount),
                self.frequency,
                period
            ));
        } else {
            summary.push_str(&format!(" {} per {}", currency.format_amount(self.amount), period));
        }

        if self.total_cycles != 0 {
            summary.push_str(&format!(" for {} {}s", self.total_cycles, period));
        }

        summary.trim_start().to_string()
    }
}

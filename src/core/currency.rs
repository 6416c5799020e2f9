use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{Error, Result};

/// Currencies accepted by Express Checkout, with their decimal precision rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    AUD,
    BRL,
    CAD,
    CHF,
    CZK,
    DKK,
    EUR,
    GBP,
    HKD,
    /// Hungarian Forint (no decimal places)
    HUF,
    ILS,
    /// Japanese Yen (no decimal places)
    JPY,
    MXN,
    MYR,
    NOK,
    NZD,
    PHP,
    PLN,
    SEK,
    SGD,
    THB,
    /// New Taiwan Dollar (no decimal places)
    TWD,
    #[default]
    USD,
}

impl Currency {
    pub const ALL: [Currency; 23] = [
        Currency::AUD,
        Currency::BRL,
        Currency::CAD,
        Currency::CHF,
        Currency::CZK,
        Currency::DKK,
        Currency::EUR,
        Currency::GBP,
        Currency::HKD,
        Currency::HUF,
        Currency::ILS,
        Currency::JPY,
        Currency::MXN,
        Currency::MYR,
        Currency::NOK,
        Currency::NZD,
        Currency::PHP,
        Currency::PLN,
        Currency::SEK,
        Currency::SGD,
        Currency::THB,
        Currency::TWD,
        Currency::USD,
    ];

    /// ISO 4217 code as sent in `CURRENCYCODE`
    pub fn code(&self) -> &'static str {
        match self {
            Currency::AUD => "AUD",
            Currency::BRL => "BRL",
            Currency::CAD => "CAD",
            Currency::CHF => "CHF",
            Currency::CZK => "CZK",
            Currency::DKK => "DKK",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::HKD => "HKD",
            Currency::HUF => "HUF",
            Currency::ILS => "ILS",
            Currency::JPY => "JPY",
            Currency::MXN => "MXN",
            Currency::MYR => "MYR",
            Currency::NOK => "NOK",
            Currency::NZD => "NZD",
            Currency::PHP => "PHP",
            Currency::PLN => "PLN",
            Currency::SEK => "SEK",
            Currency::SGD => "SGD",
            Currency::THB => "THB",
            Currency::TWD => "TWD",
            Currency::USD => "USD",
        }
    }

    /// Returns the decimal scale PayPal accepts for this currency
    /// - HUF/JPY/TWD: 0 (no decimals)
    /// - everything else: 2
    pub fn scale(&self) -> u32 {
        match self {
            Currency::HUF | Currency::JPY | Currency::TWD => 0,
            _ => 2,
        }
    }

    /// Prefix used in human readable prices, e.g. "$" in "$10.00"
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD
            | Currency::AUD
            | Currency::CAD
            | Currency::NZD
            | Currency::HKD
            | Currency::SGD
            | Currency::MXN => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::BRL => "R$",
            Currency::ILS => "₪",
            Currency::PHP => "₱",
            Currency::THB => "฿",
            Currency::PLN => "zł ",
            Currency::CHF => "CHF ",
            Currency::CZK => "Kč ",
            Currency::DKK => "kr ",
            Currency::HUF => "Ft ",
            Currency::MYR => "RM",
            Currency::NOK => "kr ",
            Currency::SEK => "kr ",
            Currency::TWD => "NT$",
        }
    }

    /// Rounds a decimal value to the appropriate scale for this currency
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp(self.scale())
    }

    /// Validates that a decimal value has the correct scale for this currency
    pub fn validate_amount(&self, field: &str, amount: Decimal) -> Result<()> {
        let scale = amount.normalize().scale();
        let expected_scale = self.scale();

        if scale > expected_scale {
            return Err(Error::validation(format!(
                "{} amounts must have at most {} decimal places, got {} for {}",
                self, expected_scale, scale, field
            )));
        }

        if amount < Decimal::ZERO {
            return Err(Error::validation(format!("{} cannot be negative", field)));
        }

        Ok(())
    }

    /// Renders an amount the way NVP fields expect it: fixed scale, no symbol
    pub fn nvp_amount(&self, amount: Decimal) -> String {
        let scale = self.scale() as usize;
        format!("{:.width$}", self.round(amount), width = scale)
    }

    /// Formats an amount for display with the currency symbol, e.g. "$12.00"
    pub fn format_amount(&self, amount: Decimal) -> String {
        format!("{}{}", self.symbol(), self.nvp_amount(amount))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Currency::ALL
            .iter()
            .copied()
            .find(|c| c.code() == upper)
            .ok_or_else(|| format!("Invalid currency: {}", s))
    }
}

impl TryFrom<&str> for Currency {
    type Error = String;

    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

const SANDBOX_NVP_ENDPOINT: &str = "https://api-3t.sandbox.paypal.com/nvp";
const LIVE_NVP_ENDPOINT: &str = "https://api-3t.paypal.com/nvp";
const SANDBOX_CHECKOUT_URL: &str = "https://www.sandbox.paypal.com/incontext?token=";
const LIVE_CHECKOUT_URL: &str = "https://www.paypal.com/incontext?token=";

/// Which PayPal site requests go to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Live,
    /// Local development against live PayPal hosts
    Development,
    #[default]
    Sandbox,
}

impl Environment {
    pub fn is_live(&self) -> bool {
        matches!(self, Environment::Live)
    }

    /// Only `sandbox` talks to the sandbox hosts
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Environment::Sandbox)
    }

    /// NVP API endpoint for this environment
    pub fn endpoint(&self) -> &'static str {
        if self.is_sandbox() {
            SANDBOX_NVP_ENDPOINT
        } else {
            LIVE_NVP_ENDPOINT
        }
    }

    /// Base of the in-context checkout URL; the checkout token is appended
    pub fn checkout_url(&self) -> &'static str {
        if self.is_sandbox() {
            SANDBOX_CHECKOUT_URL
        } else {
            LIVE_CHECKOUT_URL
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Live => write!(f, "live"),
            Environment::Development => write!(f, "development"),
            Environment::Sandbox => write!(f, "sandbox"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "live" => Ok(Environment::Live),
            "development" => Ok(Environment::Development),
            "sandbox" => Ok(Environment::Sandbox),
            _ => Err(format!("\"{}\" is not a valid environment.", s)),
        }
    }
}

//! PayPal Digital Goods Library
//!
//! A thin client for PayPal's name-value-pair (NVP) API, covering one-time
//! purchases and recurring payments subscriptions of digital goods with
//! Express Checkout.
//!
//! Both flows follow the same steps: request a checkout token, send the buyer
//! to the in-context checkout URL, then complete the flow with
//! [`DigitalGoods::process`] once the buyer comes back.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use config::{Config, Credentials, Environment};
pub use core::{Currency, Error, Result};
pub use modules::checkout::{CheckoutDetails, CheckoutToken, DigitalGoods};
pub use modules::purchases::{self, LineItem, Purchase, PurchaseDetails};
pub use modules::subscriptions::{self, BillingPeriod, Subscription, SubscriptionDetails, TrialTerms};

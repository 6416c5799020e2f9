use crate::core::{Currency, Error, Result};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub mod credentials;
pub mod environment;

pub use credentials::Credentials;
pub use environment::Environment;

/// NVP API version sent with every request
pub const API_VERSION: &str = "76.0";

const DEFAULT_LOCALE: &str = "US";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Names of the settings held by [`Config`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Environment,
    BusinessName,
    CancelUrl,
    ReturnUrl,
    NotifyUrl,
    Currency,
    Locale,
    Username,
    Password,
    Signature,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Environment => "environment",
            ConfigKey::BusinessName => "business_name",
            ConfigKey::CancelUrl => "cancel_url",
            ConfigKey::ReturnUrl => "return_url",
            ConfigKey::NotifyUrl => "notify_url",
            ConfigKey::Currency => "currency",
            ConfigKey::Locale => "locale",
            ConfigKey::Username => "username",
            ConfigKey::Password => "password",
            ConfigKey::Signature => "signature",
        }
    }
}

impl FromStr for ConfigKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "environment" => Ok(ConfigKey::Environment),
            "business_name" => Ok(ConfigKey::BusinessName),
            "cancel_url" => Ok(ConfigKey::CancelUrl),
            "return_url" => Ok(ConfigKey::ReturnUrl),
            "notify_url" => Ok(ConfigKey::NotifyUrl),
            "currency" => Ok(ConfigKey::Currency),
            "locale" => Ok(ConfigKey::Locale),
            "username" => Ok(ConfigKey::Username),
            "password" => Ok(ConfigKey::Password),
            "signature" => Ok(ConfigKey::Signature),
            other => Err(Error::configuration(format!(
                "{} is not a valid configuration setting.",
                other
            ))),
        }
    }
}

/// Settings shared by every purchase and subscription flow
///
/// Values are validated when set. Flows take their own copy, so changes made
/// after a flow is created do not affect it.
#[derive(Debug, Clone)]
pub struct Config {
    credentials: Credentials,
    environment: Environment,
    currency: Currency,
    locale: String,
    business_name: Option<String>,
    return_url: Option<String>,
    cancel_url: Option<String>,
    notify_url: Option<String>,
    api_version: String,
    endpoint_override: Option<String>,
    timeout: Duration,
}

impl Config {
    /// Configuration with default settings: sandbox, USD, US locale
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            environment: Environment::default(),
            currency: Currency::default(),
            locale: DEFAULT_LOCALE.to_string(),
            business_name: None,
            return_url: None,
            cancel_url: None,
            notify_url: None,
            api_version: API_VERSION.to_string(),
            endpoint_override: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let credentials = Credentials::new(
            required_var("PAYPAL_USERNAME")?,
            required_var("PAYPAL_PASSWORD")?,
            required_var("PAYPAL_SIGNATURE")?,
        )?;

        let mut config = Config::new(credentials);

        if let Ok(value) = env::var("PAYPAL_ENVIRONMENT") {
            config.set(ConfigKey::Environment, &value)?;
        }
        if let Ok(value) = env::var("PAYPAL_CURRENCY") {
            config.set(ConfigKey::Currency, &value)?;
        }
        if let Ok(value) = env::var("PAYPAL_LOCALE") {
            config.set(ConfigKey::Locale, &value)?;
        }
        if let Ok(value) = env::var("PAYPAL_BUSINESS_NAME") {
            config.set(ConfigKey::BusinessName, &value)?;
        }
        if let Ok(value) = env::var("PAYPAL_RETURN_URL") {
            config.set(ConfigKey::ReturnUrl, &value)?;
        }
        if let Ok(value) = env::var("PAYPAL_CANCEL_URL") {
            config.set(ConfigKey::CancelUrl, &value)?;
        }
        if let Ok(value) = env::var("PAYPAL_NOTIFY_URL") {
            config.set(ConfigKey::NotifyUrl, &value)?;
        }
        if let Ok(value) = env::var("PAYPAL_API_VERSION") {
            config.set_api_version(value)?;
        }
        if let Ok(value) = env::var("PAYPAL_NVP_ENDPOINT") {
            config.set_endpoint(value)?;
        }

        let timeout_secs = env::var("PAYPAL_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| Error::configuration("Invalid PAYPAL_TIMEOUT_SECS"))?;
        config.timeout = Duration::from_secs(timeout_secs);

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::configuration("Timeout must be greater than 0"));
        }

        let version = Decimal::from_str(&self.api_version).map_err(|_| {
            Error::configuration(format!("Invalid API version: {}", self.api_version))
        })?;
        // digital goods need 65.1 or newer
        let minimum = Decimal::new(651, 1);
        if version < minimum {
            return Err(Error::configuration(format!(
                "Digital goods require API version {} or newer, got {}",
                minimum, self.api_version
            )));
        }

        Ok(())
    }

    /// Set a setting by key after validating the value
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(Error::configuration(format!("{} cannot be empty.", key.as_str())));
        }

        match key {
            ConfigKey::Environment => {
                self.environment = value.parse().map_err(Error::Configuration)?;
            }
            ConfigKey::Currency => {
                self.currency = value.parse().map_err(Error::Configuration)?;
            }
            ConfigKey::Locale => self.locale = value.to_string(),
            ConfigKey::BusinessName => self.business_name = Some(value.to_string()),
            ConfigKey::ReturnUrl => self.return_url = Some(checked_url(key, value)?),
            ConfigKey::CancelUrl => self.cancel_url = Some(checked_url(key, value)?),
            ConfigKey::NotifyUrl => self.notify_url = Some(checked_url(key, value)?),
            ConfigKey::Username => self.credentials.set_username(value.to_string())?,
            ConfigKey::Password => self.credentials.set_password(value.to_string())?,
            ConfigKey::Signature => self.credentials.set_signature(value.to_string())?,
        }

        Ok(())
    }

    /// Read a setting by key, failing when it has not been set
    pub fn get(&self, key: ConfigKey) -> Result<String> {
        let value = match key {
            ConfigKey::Environment => Some(self.environment.to_string()),
            ConfigKey::Currency => Some(self.currency.to_string()),
            ConfigKey::Locale => Some(self.locale.clone()),
            ConfigKey::BusinessName => self.business_name.clone(),
            ConfigKey::ReturnUrl => self.return_url.clone(),
            ConfigKey::CancelUrl => self.cancel_url.clone(),
            ConfigKey::NotifyUrl => self.notify_url.clone(),
            ConfigKey::Username => Some(self.credentials.username().to_string()),
            ConfigKey::Password => Some(self.credentials.password().to_string()),
            ConfigKey::Signature => Some(self.credentials.signature().to_string()),
        };

        value.ok_or_else(|| Error::configuration(format!("{} needs to be set", key.as_str())))
    }

    /// Restore every setting except the credentials to its default
    pub fn reset(&mut self) {
        *self = Config::new(self.credentials.clone());
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_locale(mut self, locale: &str) -> Result<Self> {
        self.set(ConfigKey::Locale, locale)?;
        Ok(self)
    }

    pub fn with_business_name(mut self, name: &str) -> Result<Self> {
        self.set(ConfigKey::BusinessName, name)?;
        Ok(self)
    }

    pub fn with_return_url(mut self, url: &str) -> Result<Self> {
        self.set(ConfigKey::ReturnUrl, url)?;
        Ok(self)
    }

    pub fn with_cancel_url(mut self, url: &str) -> Result<Self> {
        self.set(ConfigKey::CancelUrl, url)?;
        Ok(self)
    }

    pub fn with_notify_url(mut self, url: &str) -> Result<Self> {
        self.set(ConfigKey::NotifyUrl, url)?;
        Ok(self)
    }

    /// Send requests somewhere other than the environment's endpoint
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Result<Self> {
        self.set_endpoint(url.into())?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn set_api_version(&mut self, version: impl Into<String>) -> Result<()> {
        let version = version.into();
        if version.trim().is_empty() {
            return Err(Error::configuration("api_version cannot be empty."));
        }
        self.api_version = version.trim().to_string();
        Ok(())
    }

    fn set_endpoint(&mut self, url: String) -> Result<()> {
        self.endpoint_override = Some(checked_url_named("endpoint", url.trim())?);
        Ok(())
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn business_name(&self) -> Option<&str> {
        self.business_name.as_deref()
    }

    pub fn notify_url(&self) -> Option<&str> {
        self.notify_url.as_deref()
    }

    /// Where PayPal sends the buyer after approving; required for checkout
    pub fn return_url(&self) -> Result<&str> {
        self.return_url
            .as_deref()
            .ok_or_else(|| Error::configuration("return_url needs to be set"))
    }

    /// Where PayPal sends the buyer after cancelling; required for checkout
    pub fn cancel_url(&self) -> Result<&str> {
        self.cancel_url
            .as_deref()
            .ok_or_else(|| Error::configuration("cancel_url needs to be set"))
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full NVP endpoint URL for the configured environment
    pub fn endpoint(&self) -> &str {
        self.endpoint_override
            .as_deref()
            .unwrap_or_else(|| self.environment.endpoint())
    }

    /// URL the buyer is sent to for approving the checkout identified by `token`
    pub fn checkout_url(&self, token: &str) -> String {
        format!("{}{}", self.environment.checkout_url(), token)
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::configuration(format!("{} not set", name)))
}

fn checked_url(key: ConfigKey, value: &str) -> Result<String> {
    checked_url_named(key.as_str(), value)
}

fn checked_url_named(name: &str, value: &str) -> Result<String> {
    let url = reqwest::Url::parse(value)
        .map_err(|e| Error::configuration(format!("{} is not a valid URL: {}", name, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::configuration(format!(
            "{} must be an http(s) URL, got {}",
            name,
            url.scheme()
        )));
    }

    Ok(value.to_string())
}

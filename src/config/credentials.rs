use std::fmt;

use crate::core::{Error, Result};

/// API signature credentials issued by PayPal for a seller account
///
/// `Debug` never prints the password or signature.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
    signature: String,
}

impl Credentials {
    /// Create credentials, rejecting empty values
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        signature: impl Into<String>,
    ) -> Result<Self> {
        let credentials = Self {
            username: required("username", username.into())?,
            password: required("password", password.into())?,
            signature: required("signature", signature.into())?,
        };

        Ok(credentials)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub(crate) fn set_username(&mut self, value: String) -> Result<()> {
        self.username = required("username", value)?;
        Ok(())
    }

    pub(crate) fn set_password(&mut self, value: String) -> Result<()> {
        self.password = required("password", value)?;
        Ok(())
    }

    pub(crate) fn set_signature(&mut self, value: String) -> Result<()> {
        self.signature = required("signature", value)?;
        Ok(())
    }
}

fn required(key: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::configuration(format!("{} cannot be empty.", key)));
    }
    Ok(value)
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("signature", &"<redacted>")
            .finish()
    }
}

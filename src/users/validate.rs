use std::{fmt, str::FromStr};

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{UserError, UserResult};
use crate::users::repo_types::User;

/// Rule set applied by [`User::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    Update,
    Login,
}

impl FromStr for ValidationMode {
    type Err = UserError;

    /// Case-insensitive. An empty mode means `Create`; any other unknown
    /// mode is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "create" => Ok(ValidationMode::Create),
            "update" => Ok(ValidationMode::Update),
            "login" => Ok(ValidationMode::Login),
            _ => Err(UserError::UnknownValidationMode(s.to_string())),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValidationMode::Create => "create",
            ValidationMode::Update => "update",
            ValidationMode::Login => "login",
        })
    }
}

/// Format-only address check, no MX or deliverability lookup.
pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
        )
        .unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn require(value: &str, msg: &str) -> UserResult<()> {
    if value.is_empty() {
        return Err(UserError::validation(msg));
    }
    Ok(())
}

fn check_email(email: &str) -> UserResult<()> {
    require(email, "Required Email")?;
    if !is_valid_email(email) {
        return Err(UserError::validation("Invalid Email"));
    }
    Ok(())
}

impl User {
    /// Checks the fields `mode` requires and returns the first failure.
    ///
    /// Latitude and longitude are not checked in any mode.
    pub fn validate(&self, mode: ValidationMode) -> UserResult<()> {
        match mode {
            ValidationMode::Login => {
                require(&self.password, "Required Password")?;
                check_email(&self.email)
            }
            ValidationMode::Create | ValidationMode::Update => {
                require(&self.username, "Required Username")?;
                require(&self.password, "Required Password")?;
                require(&self.phone, "Required Phone Number")?;
                check_email(&self.email)?;
                require(&self.specialisation, "Required Specialisation")
            }
        }
    }
}

//! Cached identity records and account roles
//!
//! This module defines the record protected views consult to decide what
//! to render. The record mirrors whatever the external sign-in flow last
//! cached and may be stale; it is a UI convenience, never an
//! authorization decision. The core record is defined as follows:
//!
//! | Field         | Type                       | Description                                        |
//! | ------------- | -------------------------- | -------------------------------------------------- |
//! | `email`       | `String`                   | The email the user signed in with.                 |
//! | `signup_date` | `Option<DateTime>`         | When the account was created, if known.            |
//! | `role`        | `Option<UserRole>`         | The account role (stored under the `type` key).    |
//! | `is_demo`     | `bool`                     | True only for identities fabricated by demo mode.  |
//! | `extra`       | `Map<String, Value>`       | Additional fields the sign-in flow stored.         |
use crate::{Error, error::ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Reserved, non-routable domain used for fabricated demo identities.
pub const DEMO_EMAIL_DOMAIN: &str = "demo.invalid";

/// The account roles the application recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Athlete,
    Brand,
    Director,
}

impl UserRole {
    /// Every role, in a stable order.
    pub const ALL: [UserRole; 3] = [UserRole::Athlete, UserRole::Brand, UserRole::Director];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Athlete => "athlete",
            UserRole::Brand => "brand",
            UserRole::Director => "director",
        }
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "athlete" => Ok(UserRole::Athlete),
            "brand" => Ok(UserRole::Brand),
            "director" => Ok(UserRole::Director),
            other => Err(ValidationError::InvalidField(format!(
                "Unknown role: {other}"
            ))),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Last-known authenticated identity, cached for rendering decisions.
///
/// Serialized field names keep the camelCase wire shape the sign-in flow
/// writes, with the role stored under its historical `type` key. Fields
/// beyond the known set round-trip through `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedUser {
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signup_date: Option<DateTime<Utc>>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,

    #[serde(default)]
    pub is_demo: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CachedUser {
    pub fn builder() -> CachedUserBuilder {
        CachedUserBuilder::default()
    }

    /// Fabricate the synthetic identity handed out while demo mode is on.
    ///
    /// The address lives under [`DEMO_EMAIL_DOMAIN`], which is reserved and
    /// non-routable, so it can never collide with a deliverable account.
    pub fn demo(role: UserRole, now: DateTime<Utc>) -> Self {
        CachedUser {
            email: format!("{role}@{DEMO_EMAIL_DOMAIN}"),
            signup_date: Some(now),
            role: Some(role),
            is_demo: true,
            extra: Map::new(),
        }
    }
}

#[derive(Default)]
pub struct CachedUserBuilder {
    email: Option<String>,
    signup_date: Option<DateTime<Utc>>,
    role: Option<UserRole>,
    is_demo: bool,
    extra: Map<String, Value>,
}

impl CachedUserBuilder {
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn signup_date(mut self, signup_date: DateTime<Utc>) -> Self {
        self.signup_date = Some(signup_date);
        self
    }

    pub fn role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn is_demo(mut self, is_demo: bool) -> Self {
        self.is_demo = is_demo;
        self
    }

    pub fn extra_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn build(self) -> Result<CachedUser, Error> {
        Ok(CachedUser {
            email: self.email.ok_or(ValidationError::MissingField(
                "Email is required".to_string(),
            ))?,
            signup_date: self.signup_date,
            role: self.role,
            is_demo: self.is_demo,
            extra: self.extra,
        })
    }
}

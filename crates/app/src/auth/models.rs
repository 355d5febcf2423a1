//! Auth Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::auth::AuthError;

/// Identifier the auth provider assigns to a user.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Who is making a call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Identity {
    #[default]
    Anonymous,
    User(UserId),
}

impl Identity {
    /// The signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthenticated`] for anonymous callers.
    pub fn require_user(&self) -> Result<&UserId, AuthError> {
        match self {
            Self::User(user) => Ok(user),
            Self::Anonymous => Err(AuthError::Unauthenticated),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

impl From<UserId> for Identity {
    fn from(value: UserId) -> Self {
        Self::User(value)
    }
}

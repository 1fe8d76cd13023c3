//! Datasource credentials
//!
//! A request authenticates with exactly one credential form. The XOR
//! constraint is structural: [`Credential`] is a sum type, not a pair of
//! optional fields.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Credential attached to a page request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credential {
    /// Pre-built authorization token, used verbatim as the `Authorization`
    /// header value (the caller supplies any scheme prefix it needs)
    Token(String),

    /// HTTP Basic authentication
    Basic { username: String, password: String },
}

impl Credential {
    /// Create a token credential
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }

    /// Create a basic-auth credential
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Render the single `Authorization` header value for this credential
    pub fn header_value(&self) -> String {
        match self {
            Credential::Token(token) => token.clone(),
            Credential::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                format!("Basic {encoded}")
            }
        }
    }
}

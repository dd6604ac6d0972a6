//! Wire model of a user directory record.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Server-assigned identifier. The directory may hand out numbers or strings,
/// so the value is kept in whatever JSON shape it arrived in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    /// Non-negative integer, the common case.
    Number(u64),
    /// Any other JSON number (negative or fractional).
    OtherNumber(serde_json::Number),
    Text(String),
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{n}"),
            UserId::OtherNumber(n) => write!(f, "{n}"),
            UserId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<u64> for UserId {
    fn from(n: u64) -> Self {
        UserId::Number(n)
    }
}

impl From<&str> for UserId {
    /// Route parameters arrive as text; numeric ones map back to `Number` so
    /// they compare equal to ids decoded from JSON.
    fn from(s: &str) -> Self {
        match s.parse::<u64>() {
            Ok(n) => UserId::Number(n),
            Err(_) => UserId::Text(s.to_string()),
        }
    }
}

/// Postal address embedded in a record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
}

/// Employer embedded in a record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub name: String,
}

/// A single directory entry. Address and company are embedded, not related records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(default)]
    pub website: String,
}

impl User {
    /// Street, or `""` when the record has no address.
    pub fn street(&self) -> &str {
        self.address.as_ref().map(|a| a.street.as_str()).unwrap_or("")
    }

    pub fn city(&self) -> &str {
        self.address.as_ref().map(|a| a.city.as_str()).unwrap_or("")
    }

    /// Company name, or `""` when absent.
    pub fn company_name(&self) -> &str {
        self.company.as_ref().map(|c| c.name.as_str()).unwrap_or("")
    }

    /// True when both records carry the same identifier. Records without one never match.
    pub fn same_id(&self, other: &UserId) -> bool {
        self.id.as_ref() == Some(other)
    }
}

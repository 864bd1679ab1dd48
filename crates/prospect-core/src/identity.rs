//! Layer 1: Identity atoms
//!
//! OrgId, UserId, AgentId, LeadId, CategoryId: UUID-backed record identifiers
//! EmailAddress: validated delivery address

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{CoreError, InvalidEmail, InvalidId};

fn parse_uuid_id(
    raw: &str,
    make_err: impl FnOnce(String, String) -> InvalidId,
) -> Result<Uuid, CoreError> {
    Uuid::parse_str(raw.trim()).map_err(|e| make_err(raw.to_string(), e.to_string()).into())
}

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident, $invalid:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new(id: Uuid) -> Self {
                Self(id)
            }

            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn parse_str(s: &str) -> Result<Self, CoreError> {
                parse_uuid_id(s, |raw, reason| InvalidId::$invalid { raw, reason }).map(Self)
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;
            fn try_from(s: String) -> Result<Self, Self::Error> {
                $name::parse_str(&s)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

uuid_id! {
    /// Owning tenant identifier. Root of data isolation.
    OrgId, Organisation
}

uuid_id! {
    /// Underlying user identity, as resolved by the identity collaborator.
    UserId, User
}

uuid_id! {
    /// Agent record identifier (role record, not the user itself).
    AgentId, Agent
}

uuid_id! {
    /// Lead record identifier.
    LeadId, Lead
}

uuid_id! {
    /// Pipeline category identifier.
    CategoryId, Category
}

/// Delivery address - trimmed, non-empty, exactly one `@` with non-empty
/// local and domain parts.
///
/// This is boundary validation, not RFC 5321 conformance; the notification
/// collaborator owns actual deliverability.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(s: impl Into<String>) -> Result<Self, CoreError> {
        let raw = s.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(invalid_email(raw, "empty"));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(invalid_email(raw, "contains whitespace"));
        }
        let mut parts = trimmed.splitn(2, '@');
        let local = parts.next().unwrap_or_default();
        let domain = match parts.next() {
            Some(domain) => domain,
            None => return Err(invalid_email(raw, "missing `@`")),
        };
        if local.is_empty() {
            return Err(invalid_email(raw, "empty local part"));
        }
        if domain.is_empty() {
            return Err(invalid_email(raw, "empty domain"));
        }
        if domain.contains('@') {
            return Err(invalid_email(raw, "multiple `@`"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn invalid_email(raw: String, reason: &str) -> CoreError {
    InvalidEmail {
        raw,
        reason: reason.to_string(),
    }
    .into()
}

impl fmt::Debug for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EmailAddress({:?})", self.0)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = CoreError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        EmailAddress::new(s)
    }
}

impl From<EmailAddress> for String {
    fn from(addr: EmailAddress) -> String {
        addr.0
    }
}

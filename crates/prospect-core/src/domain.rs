//! Layer 2: Domain values
//!
//! Age: bounded lead age
//! CategoryName: pipeline stage name

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{CoreError, RangeError, ValidationError};

/// Lead age: 0-130 inclusive.
///
/// Validated at construction - negative and absurd values are unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Age(u8);

impl Age {
    pub const MAX: i64 = 130;

    pub fn new(n: i64) -> Result<Self, CoreError> {
        if !(0..=Self::MAX).contains(&n) {
            Err(RangeError {
                field: "age",
                value: n,
                min: 0,
                max: Self::MAX,
            }
            .into())
        } else {
            Ok(Self(n as u8))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Age {
    type Error = CoreError;
    fn try_from(n: i64) -> Result<Self, Self::Error> {
        Age::new(n)
    }
}

impl From<Age> for i64 {
    fn from(age: Age) -> i64 {
        i64::from(age.0)
    }
}

/// Pipeline category name - non-empty after trimming, at most 100 chars.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

impl CategoryName {
    pub const MAX_LEN: usize = 100;

    pub fn new(s: impl Into<String>) -> Result<Self, CoreError> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new("name", "must not be empty").into());
        }
        if trimmed.chars().count() > Self::MAX_LEN {
            return Err(ValidationError::new(
                "name",
                format!("must be at most {} characters", Self::MAX_LEN),
            )
            .into());
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryName({:?})", self.0)
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CategoryName {
    type Error = CoreError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        CategoryName::new(s)
    }
}

impl From<CategoryName> for String {
    fn from(name: CategoryName) -> String {
        name.0
    }
}

use thiserror::Error;

use prospect_core::CoreError;

use crate::notify::NotifyError;
use crate::store::IntegrityError;

/// Crate-level error.
///
/// Not a "god error": a thin taxonomy over the refusal states the workflow
/// operations can produce. Authorization failures on a specific record are
/// always `NotFound` so existence never leaks across tenants.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Record absent or outside the principal's scoped view. The two cases
    /// are deliberately indistinguishable.
    #[error("not found")]
    NotFound,

    /// Role gate on an operation that has no record to hide behind
    /// (creation, provisioning, roster listing). The caller already knows
    /// their own role, so nothing leaks.
    #[error("operation requires the organisor role")]
    Forbidden,

    /// Malformed input: missing/empty fields, out-of-range age, bad email,
    /// unresolvable agent/category reference. Field-level detail inside.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// Referential-integrity refusal, e.g. assigning a lead to an agent of
    /// a different organisation. Rejected before any mutation.
    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    /// Notification delivery failure. Never returned by the mutation paths
    /// themselves (delivery is fire-and-forget); only surfaced by direct
    /// notifier use.
    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error("config error: {0}")]
    Config(String),
}

impl From<prospect_core::ValidationError> for Error {
    fn from(err: prospect_core::ValidationError) -> Self {
        Error::Invalid(err.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! prospect: a multi-tenant CRM core.
//!
//! Organisations own leads, agents, and pipeline categories. One rule -
//! the access scoping rule in [`core::scope`] - decides what any principal
//! may see or touch; [`workflow::Crm`] carries every operation through it.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod notify;
pub mod store;
pub mod telemetry;
pub mod workflow;

pub use error::{Error, Result};

/// Domain types, re-exported from `prospect-core`.
pub mod core {
    pub use prospect_core::*;
}

// Re-export the working set at the crate root for convenience.
pub use crate::core::{
    scope, visible_to, Age, Agent, AgentDraft, AgentId, AgentLink, Assignee, Assignment, Category,
    CategoryId, CategoryName, CoreError, EmailAddress, InvalidEmail, InvalidId, Lead, LeadDraft,
    LeadId, OrgId, Organisation, Principal, Provenance, RangeError, ScopedRecord, UserId,
    ValidationError,
};
pub use config::{Config, LogFormat, LoggingConfig, NotifyConfig};
pub use notify::{notify_best_effort, LogNotifier, Message, Notifier, NotifyError};
pub use store::{IntegrityError, Store};
pub use workflow::{Crm, Invitation, InvitationToken, LeadListing};

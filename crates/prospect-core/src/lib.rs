//! Core domain types for prospect (Layers 1-5)
//!
//! Module hierarchy follows type dependency order:
//! - identity: OrgId, UserId, AgentId, LeadId, CategoryId, EmailAddress (Layer 1)
//! - domain: Age, CategoryName (Layer 2)
//! - record: Organisation, Agent, Lead, Category + drafts (Layer 3)
//! - principal: Principal, AgentLink (Layer 4)
//! - scope: the Access Scoping Rule (Layer 5)

#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod identity;
pub mod principal;
pub mod record;
pub mod scope;

pub use domain::{Age, CategoryName};
pub use error::{CoreError, InvalidEmail, InvalidId, RangeError, ValidationError};
pub use identity::{AgentId, CategoryId, EmailAddress, LeadId, OrgId, UserId};
pub use principal::{AgentLink, Principal};
pub use record::{
    Agent, AgentDraft, Assignment, Category, Lead, LeadDraft, Organisation, Provenance,
};
pub use scope::{scope, visible_to, Assignee, ScopedRecord};

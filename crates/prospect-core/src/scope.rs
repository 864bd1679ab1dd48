//! Layer 5: Access Scoping Rule
//!
//! The single rule enforcing tenant and role isolation everywhere records
//! are listed, read, updated, or deleted. Pure and deterministic: callers
//! must route every read/update/delete through it and never fetch records
//! through an unfiltered path.
//!
//! Fail-closed: an agent principal with no resolved link sees nothing.

use crate::identity::{OrgId, UserId};
use crate::principal::Principal;
use crate::record::{Agent, Category, Lead, Organisation};

/// Who a record is pinned to, for agent-principal visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assignee {
    /// Pinned to one user: visible to an agent principal only if it is them.
    User(UserId),
    /// Assignable but currently unassigned: invisible to agent principals.
    Unassigned,
    /// Not an assignable record kind: visible organisation-wide.
    OrganisationWide,
}

/// A record the scoping rule can evaluate.
pub trait ScopedRecord {
    fn organisation(&self) -> OrgId;
    fn assignee(&self) -> Assignee;
}

impl ScopedRecord for Lead {
    fn organisation(&self) -> OrgId {
        Lead::organisation(self)
    }

    fn assignee(&self) -> Assignee {
        match &self.assignment {
            Some(assignment) => Assignee::User(assignment.user),
            None => Assignee::Unassigned,
        }
    }
}

impl ScopedRecord for Agent {
    fn organisation(&self) -> OrgId {
        Agent::organisation(self)
    }

    fn assignee(&self) -> Assignee {
        Assignee::User(*self.user())
    }
}

impl ScopedRecord for Category {
    fn organisation(&self) -> OrgId {
        Category::organisation(self)
    }

    fn assignee(&self) -> Assignee {
        Assignee::OrganisationWide
    }
}

impl ScopedRecord for Organisation {
    fn organisation(&self) -> OrgId {
        self.id()
    }

    fn assignee(&self) -> Assignee {
        Assignee::OrganisationWide
    }
}

/// Whether `record` is in `principal`'s authorized view.
pub fn visible_to<R: ScopedRecord>(principal: &Principal, record: &R) -> bool {
    match principal {
        Principal::Organisor { organisation, .. } => record.organisation() == *organisation,
        Principal::Agent {
            user,
            link: Some(link),
        } => {
            if record.organisation() != link.organisation {
                return false;
            }
            match record.assignee() {
                Assignee::User(assignee) => assignee == *user,
                Assignee::OrganisationWide => true,
                Assignee::Unassigned => false,
            }
        }
        // No resolved agent link: fail closed, never open.
        Principal::Agent { link: None, .. } => false,
    }
}

/// The authorized subsequence of `records` for `principal`.
/// Order-preserving, no side effects.
pub fn scope<'a, R, I>(principal: &'a Principal, records: I) -> impl Iterator<Item = &'a R>
where
    R: ScopedRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records
        .into_iter()
        .filter(move |record| visible_to(principal, *record))
}

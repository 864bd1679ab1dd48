//! Layer 4: Principals
//!
//! The resolved output of the identity collaborator, passed explicitly to
//! every operation. Role is a tagged variant, not boolean flags, so the
//! scoping rule is an exhaustive match.

use serde::{Deserialize, Serialize};

use super::identity::{AgentId, OrgId, UserId};

/// A resolved Agent-to-Organisation link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentLink {
    pub agent: AgentId,
    pub organisation: OrgId,
}

/// A requesting principal with its resolved role.
///
/// For an agent principal the link may be absent (data inconsistency at the
/// identity layer); scoping then fails closed - empty view, never an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "role")]
pub enum Principal {
    /// Tenant admin: owns an Organisation and everything in it.
    Organisor { user: UserId, organisation: OrgId },
    /// Sales representative: restricted to leads assigned to them.
    Agent {
        user: UserId,
        link: Option<AgentLink>,
    },
}

impl Principal {
    pub fn organisor(user: UserId, organisation: OrgId) -> Self {
        Principal::Organisor { user, organisation }
    }

    pub fn agent(user: UserId, link: Option<AgentLink>) -> Self {
        Principal::Agent { user, link }
    }

    pub fn user(&self) -> &UserId {
        match self {
            Principal::Organisor { user, .. } | Principal::Agent { user, .. } => user,
        }
    }

    pub fn is_organisor(&self) -> bool {
        matches!(self, Principal::Organisor { .. })
    }

    /// The organisation this principal acts within, if resolvable.
    pub fn organisation(&self) -> Option<OrgId> {
        match self {
            Principal::Organisor { organisation, .. } => Some(*organisation),
            Principal::Agent { link, .. } => link.map(|l| l.organisation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn organisation_resolution_per_role() {
        let user = UserId::new(Uuid::from_bytes([1; 16]));
        let org = OrgId::new(Uuid::from_bytes([2; 16]));
        let agent = AgentId::new(Uuid::from_bytes([3; 16]));

        let organisor = Principal::organisor(user, org);
        assert_eq!(organisor.organisation(), Some(org));
        assert!(organisor.is_organisor());

        let linked = Principal::agent(user, Some(AgentLink { agent, organisation: org }));
        assert_eq!(linked.organisation(), Some(org));
        assert!(!linked.is_organisor());

        let unlinked = Principal::agent(user, None);
        assert_eq!(unlinked.organisation(), None);
    }
}

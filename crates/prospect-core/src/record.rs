//! Layer 3: Records
//!
//! Organisation, Agent, Lead, Category: the four tenant-owned record kinds.
//!
//! INVARIANT: a record's organisation is set at creation and never changes;
//! the field is private and no mutator exists. Mutable fields are public and
//! edited through `apply`, which validates the whole draft before touching
//! anything (no partial updates).

use serde::{Deserialize, Serialize};

use super::domain::{Age, CategoryName};
use super::error::{CoreError, ValidationError};
use super::identity::{AgentId, CategoryId, EmailAddress, LeadId, OrgId, UserId};

/// Immutable creation provenance: when (wall-clock ms) and by whom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    at_ms: u64,
    by: UserId,
}

impl Provenance {
    pub fn new(at_ms: u64, by: UserId) -> Self {
        Self { at_ms, by }
    }

    pub fn at_ms(&self) -> u64 {
        self.at_ms
    }

    pub fn by(&self) -> &UserId {
        &self.by
    }
}

fn validated_name(field: &'static str, raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "must not be empty").into());
    }
    if trimmed.chars().count() > 100 {
        return Err(ValidationError::new(field, "must be at most 100 characters").into());
    }
    Ok(trimmed.to_string())
}

/// Owning tenant. Root of data isolation: every Agent, Lead, and Category
/// references exactly one Organisation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organisation {
    id: OrgId,
    pub name: String,
    owner: UserId,
    created: Provenance,
}

impl Organisation {
    pub fn create(
        id: OrgId,
        name: &str,
        owner: UserId,
        created: Provenance,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            id,
            name: validated_name("name", name)?,
            owner,
            created,
        })
    }

    pub fn id(&self) -> OrgId {
        self.id
    }

    /// The organisor user that administers this tenant.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn created(&self) -> &Provenance {
        &self.created
    }
}

/// Unvalidated agent input, as received from the boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDraft {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// A user-role record binding one user identity to one Organisation.
///
/// The organisation and user bindings are immutable; contact fields are not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    id: AgentId,
    organisation: OrgId,
    user: UserId,
    pub email: EmailAddress,
    pub first_name: String,
    pub last_name: String,
    created: Provenance,
}

impl Agent {
    pub fn create(
        id: AgentId,
        organisation: OrgId,
        user: UserId,
        draft: AgentDraft,
        created: Provenance,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            id,
            organisation,
            user,
            email: EmailAddress::new(draft.email)?,
            first_name: validated_name("first_name", &draft.first_name)?,
            last_name: validated_name("last_name", &draft.last_name)?,
            created,
        })
    }

    /// Validate the whole draft, then overwrite contact fields.
    pub fn apply(&mut self, draft: AgentDraft) -> Result<(), CoreError> {
        let email = EmailAddress::new(draft.email)?;
        let first_name = validated_name("first_name", &draft.first_name)?;
        let last_name = validated_name("last_name", &draft.last_name)?;
        self.email = email;
        self.first_name = first_name;
        self.last_name = last_name;
        Ok(())
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn organisation(&self) -> OrgId {
        self.organisation
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn created(&self) -> &Provenance {
        &self.created
    }
}

/// A lead's agent assignment.
///
/// Carries the assigned agent's user identity alongside the agent id so the
/// scoping rule stays a pure per-record predicate. Written only from a
/// resolved Agent record of the same organisation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub agent: AgentId,
    pub user: UserId,
}

impl Assignment {
    pub fn of(agent: &Agent) -> Self {
        Self {
            agent: agent.id(),
            user: *agent.user(),
        }
    }
}

/// Unvalidated lead input, as received from the boundary.
///
/// Deliberately cannot express an initial assignment or category: both axes
/// of the lead lifecycle start null regardless of input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadDraft {
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
}

/// A prospective customer - the primary unit of work.
///
/// Lifecycle axes (orthogonal, both start null):
/// - assignment: Unassigned -> Assigned (re-assignment allowed, no reverse)
/// - category: Uncategorized -> Categorized (settable back to null)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    id: LeadId,
    organisation: OrgId,
    pub first_name: String,
    pub last_name: String,
    pub age: Age,
    pub assignment: Option<Assignment>,
    pub category: Option<CategoryId>,
    created: Provenance,
}

impl Lead {
    pub fn create(
        id: LeadId,
        organisation: OrgId,
        draft: LeadDraft,
        created: Provenance,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            id,
            organisation,
            first_name: validated_name("first_name", &draft.first_name)?,
            last_name: validated_name("last_name", &draft.last_name)?,
            age: Age::new(draft.age)?,
            assignment: None,
            category: None,
            created,
        })
    }

    /// Validate the whole draft, then overwrite the editable fields.
    /// Organisation, assignment, and category are untouched.
    pub fn apply(&mut self, draft: LeadDraft) -> Result<(), CoreError> {
        let first_name = validated_name("first_name", &draft.first_name)?;
        let last_name = validated_name("last_name", &draft.last_name)?;
        let age = Age::new(draft.age)?;
        self.first_name = first_name;
        self.last_name = last_name;
        self.age = age;
        Ok(())
    }

    pub fn id(&self) -> LeadId {
        self.id
    }

    pub fn organisation(&self) -> OrgId {
        self.organisation
    }

    pub fn is_assigned(&self) -> bool {
        self.assignment.is_some()
    }

    pub fn created(&self) -> &Provenance {
        &self.created
    }
}

/// A named pipeline stage grouping leads within one Organisation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    organisation: OrgId,
    pub name: CategoryName,
    created: Provenance,
}

impl Category {
    pub fn create(
        id: CategoryId,
        organisation: OrgId,
        name: CategoryName,
        created: Provenance,
    ) -> Self {
        Self {
            id,
            organisation,
            name,
            created,
        }
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn organisation(&self) -> OrgId {
        self.organisation
    }

    pub fn created(&self) -> &Provenance {
        &self.created
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn org() -> OrgId {
        OrgId::new(Uuid::from_bytes([1; 16]))
    }

    fn user() -> UserId {
        UserId::new(Uuid::from_bytes([2; 16]))
    }

    fn provenance() -> Provenance {
        Provenance::new(1_726_000_000_000, user())
    }

    fn draft(first: &str, last: &str, age: i64) -> LeadDraft {
        LeadDraft {
            first_name: first.into(),
            last_name: last.into(),
            age,
        }
    }

    #[test]
    fn lead_create_starts_unassigned_and_uncategorized() {
        let lead = Lead::create(LeadId::generate(), org(), draft("Ada", "Lovelace", 36), provenance())
            .unwrap();
        assert!(lead.assignment.is_none());
        assert!(lead.category.is_none());
        assert_eq!(lead.first_name, "Ada");
    }

    #[test]
    fn lead_create_rejects_bad_fields_with_field_detail() {
        let err = Lead::create(LeadId::generate(), org(), draft("", "Lovelace", 36), provenance())
            .unwrap_err();
        assert_eq!(err.field(), Some("first_name"));

        let err = Lead::create(LeadId::generate(), org(), draft("Ada", "Lovelace", -1), provenance())
            .unwrap_err();
        assert_eq!(err.field(), Some("age"));
    }

    #[test]
    fn lead_apply_is_all_or_nothing() {
        let mut lead =
            Lead::create(LeadId::generate(), org(), draft("Ada", "Lovelace", 36), provenance())
                .unwrap();
        let err = lead.apply(draft("Grace", "Hopper", 999)).unwrap_err();
        assert_eq!(err.field(), Some("age"));
        // Nothing changed: the bad age aborted the whole draft.
        assert_eq!(lead.first_name, "Ada");
        assert_eq!(lead.age.value(), 36);
    }

    #[test]
    fn agent_create_validates_email() {
        let draft = AgentDraft {
            email: "not-an-email".into(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
        };
        assert!(Agent::create(AgentId::generate(), org(), user(), draft, provenance()).is_err());
    }

    #[test]
    fn assignment_of_copies_agent_user_binding() {
        let draft = AgentDraft {
            email: "grace@example.org".into(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
        };
        let agent = Agent::create(AgentId::generate(), org(), user(), draft, provenance()).unwrap();
        let assignment = Assignment::of(&agent);
        assert_eq!(assignment.agent, agent.id());
        assert_eq!(&assignment.user, agent.user());
    }
}

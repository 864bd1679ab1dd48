//! Lead lifecycle and agent provisioning workflows.
//!
//! Every operation takes the requesting principal explicitly and runs
//! synchronously to completion: authorize, validate, write, then (where a
//! side effect is specified) fire a best-effort notification. A failed
//! operation mutates nothing.
//!
//! Authorization outcomes: role gates return `Forbidden`; record-level
//! denials return `NotFound`, indistinguishable from true absence.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

use prospect_core::{
    scope, visible_to, Agent, AgentDraft, AgentId, AgentLink, Assignment, Category, CategoryId,
    CategoryName, Lead, LeadDraft, LeadId, OrgId, Organisation, Principal, Provenance, UserId,
    ValidationError,
};

use crate::config::NotifyConfig;
use crate::notify::{notify_best_effort, Message, Notifier};
use crate::store::Store;
use crate::{Error, Result};

/// One-time credential-reset token handed to a newly invited agent's
/// out-of-band flow. OS-random alphanumeric; never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct InvitationToken(String);

impl InvitationToken {
    pub const LEN: usize = 32;

    fn generate() -> Self {
        let token: String = OsRng
            .sample_iter(&Alphanumeric)
            .take(Self::LEN)
            .map(char::from)
            .collect();
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for InvitationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never log the token value.
        write!(f, "InvitationToken(..)")
    }
}

/// Result of provisioning a new agent.
#[derive(Debug)]
pub struct Invitation {
    pub agent: AgentId,
    pub user: UserId,
    pub token: InvitationToken,
}

/// A scoped lead list split the way the list view consumes it.
#[derive(Debug, Default)]
pub struct LeadListing<'a> {
    pub assigned: Vec<&'a Lead>,
    pub unassigned: Vec<&'a Lead>,
}

/// The CRM service: owns the store and the notification backend; exposes
/// every operation of the lead lifecycle, category pipeline, and agent
/// roster. Stateless across calls beyond the store itself.
pub struct Crm<N: Notifier> {
    store: Store,
    notifier: N,
    notify: NotifyConfig,
}

impl<N: Notifier> Crm<N> {
    pub fn new(notifier: N, notify: NotifyConfig) -> Self {
        Self::with_store(Store::new(), notifier, notify)
    }

    pub fn with_store(store: Store, notifier: N, notify: NotifyConfig) -> Self {
        Self {
            store,
            notifier,
            notify,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    fn now_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    fn require_organisor(principal: &Principal) -> Result<OrgId> {
        match principal {
            Principal::Organisor { organisation, .. } => Ok(*organisation),
            Principal::Agent { .. } => Err(Error::Forbidden),
        }
    }

    // ---- organisations ----

    /// Tenant bootstrap: create an Organisation and hand back the organisor
    /// principal that administers it.
    pub fn register_organisation(&mut self, name: &str, owner: UserId) -> Result<Principal> {
        let id = OrgId::generate();
        let organisation =
            Organisation::create(id, name, owner, Provenance::new(Self::now_ms(), owner))?;
        self.store.insert_organisation(organisation);
        tracing::debug!(organisation = %id, "organisation registered");
        Ok(Principal::organisor(owner, id))
    }

    /// Resolve a user's Agent-to-Organisation link, if any. This is what
    /// the identity collaborator consults when building agent principals.
    pub fn agent_link_for(&self, user: &UserId) -> Option<AgentLink> {
        self.store.agents().find(|a| a.user() == user).map(|a| AgentLink {
            agent: a.id(),
            organisation: a.organisation(),
        })
    }

    // ---- leads ----

    /// The principal's authorized leads.
    pub fn leads<'a>(&'a self, principal: &'a Principal) -> impl Iterator<Item = &'a Lead> {
        scope(principal, self.store.leads())
    }

    /// Authorized leads split into assigned/unassigned subsets.
    pub fn list_leads<'a>(&'a self, principal: &'a Principal) -> LeadListing<'a> {
        let mut listing = LeadListing::default();
        for lead in self.leads(principal) {
            if lead.is_assigned() {
                listing.assigned.push(lead);
            } else {
                listing.unassigned.push(lead);
            }
        }
        listing
    }

    pub fn get_lead(&self, principal: &Principal, id: LeadId) -> Result<&Lead> {
        self.store
            .lead(id)
            .filter(|lead| visible_to(principal, *lead))
            .ok_or(Error::NotFound)
    }

    /// Create a lead in the organisor's organisation. Assignment and
    /// category always start null. Fires an ops notification after the
    /// write; delivery failure does not fail the creation.
    pub fn create_lead(&mut self, principal: &Principal, draft: LeadDraft) -> Result<LeadId> {
        let organisation = Self::require_organisor(principal)?;
        let id = LeadId::generate();
        let lead = Lead::create(
            id,
            organisation,
            draft,
            Provenance::new(Self::now_ms(), *principal.user()),
        )?;
        self.store.insert_lead(lead)?;
        tracing::debug!(lead = %id, organisation = %organisation, "lead created");
        notify_best_effort(
            &self.notifier,
            Message {
                subject: "A new lead has been created".to_string(),
                body: format!("Lead {id} was created; log in to view it."),
                from: self.notify.from_address.clone(),
                recipients: self.notify.ops_recipients.clone(),
            },
        );
        Ok(id)
    }

    /// Overwrite a lead's editable fields. Organisation, assignment, and
    /// category are untouched.
    pub fn update_lead(&mut self, principal: &Principal, id: LeadId, draft: LeadDraft) -> Result<()> {
        Self::require_organisor(principal)?;
        self.get_lead(principal, id)?;
        let lead = self.store.lead_mut(id).ok_or(Error::NotFound)?;
        lead.apply(draft)?;
        Ok(())
    }

    pub fn delete_lead(&mut self, principal: &Principal, id: LeadId) -> Result<()> {
        Self::require_organisor(principal)?;
        self.get_lead(principal, id)?;
        self.store.remove_lead(id);
        tracing::debug!(lead = %id, "lead deleted");
        Ok(())
    }

    /// The agent selection set for assignment: the organisor's own
    /// organisation, nothing else.
    pub fn assignable_agents<'a>(&'a self, principal: &'a Principal) -> Result<Vec<&'a Agent>> {
        Self::require_organisor(principal)?;
        Ok(scope(principal, self.store.agents()).collect())
    }

    /// Assign (or re-assign) a lead to an agent of the same organisation.
    /// Re-assignment overwrites silently; there is no un-assign.
    pub fn assign_agent(
        &mut self,
        principal: &Principal,
        lead: LeadId,
        agent: AgentId,
    ) -> Result<()> {
        Self::require_organisor(principal)?;
        self.get_lead(principal, lead)?;
        let assignment = Assignment::of(
            self.store
                .agent(agent)
                .ok_or_else(|| Error::from(ValidationError::new("agent", "unknown agent")))?,
        );
        self.store.assign_lead(lead, assignment)?;
        tracing::debug!(lead = %lead, agent = %agent, "lead assigned");
        Ok(())
    }

    /// Set or clear a lead's category. The only mutation path open to an
    /// agent principal, and only on leads in their scoped view.
    pub fn update_category(
        &mut self,
        principal: &Principal,
        lead: LeadId,
        category: Option<CategoryId>,
    ) -> Result<()> {
        self.get_lead(principal, lead)?;
        if let Some(category_id) = category {
            if self.store.category(category_id).is_none() {
                return Err(ValidationError::new("category", "unknown category").into());
            }
        }
        self.store.set_lead_category(lead, category)?;
        tracing::debug!(lead = %lead, category = ?category, "lead category updated");
        Ok(())
    }

    // ---- categories ----

    pub fn list_categories<'a>(&'a self, principal: &'a Principal) -> Vec<&'a Category> {
        scope(principal, self.store.categories()).collect()
    }

    pub fn get_category(&self, principal: &Principal, id: CategoryId) -> Result<&Category> {
        self.store
            .category(id)
            .filter(|category| visible_to(principal, *category))
            .ok_or(Error::NotFound)
    }

    /// The category's leads, scoped to the principal.
    pub fn category_leads<'a>(
        &'a self,
        principal: &'a Principal,
        id: CategoryId,
    ) -> Result<Vec<&'a Lead>> {
        self.get_category(principal, id)?;
        Ok(scope(principal, self.store.leads())
            .filter(|lead| lead.category == Some(id))
            .collect())
    }

    /// How many of the principal's leads are still uncategorized.
    pub fn uncategorized_count(&self, principal: &Principal) -> usize {
        self.leads(principal)
            .filter(|lead| lead.category.is_none())
            .count()
    }

    pub fn create_category(&mut self, principal: &Principal, name: &str) -> Result<CategoryId> {
        let organisation = Self::require_organisor(principal)?;
        let name = CategoryName::new(name)?;
        let id = CategoryId::generate();
        let category = Category::create(
            id,
            organisation,
            name,
            Provenance::new(Self::now_ms(), *principal.user()),
        );
        self.store.insert_category(category)?;
        tracing::debug!(category = %id, "category created");
        Ok(id)
    }

    /// Delete a category; its leads revert to uncategorized.
    pub fn delete_category(&mut self, principal: &Principal, id: CategoryId) -> Result<()> {
        Self::require_organisor(principal)?;
        self.get_category(principal, id)?;
        self.store.remove_category(id);
        tracing::debug!(category = %id, "category deleted");
        Ok(())
    }

    // ---- agents ----

    /// Provision a new user identity and Agent record bound to the
    /// organisor's organisation. Returns the invitation token for the
    /// out-of-band credential-reset flow; the invitee is notified
    /// best-effort.
    pub fn invite_agent(&mut self, principal: &Principal, draft: AgentDraft) -> Result<Invitation> {
        let organisation = Self::require_organisor(principal)?;
        let user = UserId::generate();
        let id = AgentId::generate();
        let agent = Agent::create(
            id,
            organisation,
            user,
            draft,
            Provenance::new(Self::now_ms(), *principal.user()),
        )?;
        let invitee = agent.email.as_str().to_string();
        self.store.insert_agent(agent)?;
        let token = InvitationToken::generate();
        tracing::debug!(agent = %id, organisation = %organisation, "agent invited");
        notify_best_effort(
            &self.notifier,
            Message {
                subject: "You are invited to be an agent".to_string(),
                body: "You were added as an agent. Complete the credential reset to start working."
                    .to_string(),
                from: self.notify.from_address.clone(),
                recipients: vec![invitee],
            },
        );
        Ok(Invitation {
            agent: id,
            user,
            token,
        })
    }

    pub fn list_agents<'a>(&'a self, principal: &'a Principal) -> Result<Vec<&'a Agent>> {
        Self::require_organisor(principal)?;
        Ok(scope(principal, self.store.agents()).collect())
    }

    pub fn get_agent(&self, principal: &Principal, id: AgentId) -> Result<&Agent> {
        Self::require_organisor(principal)?;
        self.store
            .agent(id)
            .filter(|agent| visible_to(principal, *agent))
            .ok_or(Error::NotFound)
    }

    pub fn update_agent(
        &mut self,
        principal: &Principal,
        id: AgentId,
        draft: AgentDraft,
    ) -> Result<()> {
        self.get_agent(principal, id)?;
        let agent = self.store.agent_mut(id).ok_or(Error::NotFound)?;
        agent.apply(draft)?;
        Ok(())
    }

    /// Remove an agent; leads assigned to it revert to unassigned.
    pub fn remove_agent(&mut self, principal: &Principal, id: AgentId) -> Result<()> {
        self.get_agent(principal, id)?;
        self.store.remove_agent(id);
        tracing::debug!(agent = %id, "agent removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invitation_token_is_long_random_alphanumeric() {
        let a = InvitationToken::generate();
        let b = InvitationToken::generate();
        assert_eq!(a.as_str().len(), InvitationToken::LEN);
        assert!(a.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn invitation_token_debug_is_redacted() {
        let token = InvitationToken::generate();
        let rendered = format!("{token:?}");
        assert_eq!(rendered, "InvitationToken(..)");
        assert!(!rendered.contains(token.as_str()));
    }
}

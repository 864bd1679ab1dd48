//! In-memory persistence collaborator.
//!
//! The single source of truth for organisations, agents, leads, and
//! categories, with referential integrity enforced at this boundary.
//!
//! INVARIANT: every stored Agent, Lead, and Category references a stored
//! Organisation; every lead assignment references a stored Agent of the
//! lead's own organisation; every lead category references a stored
//! Category of the lead's own organisation. Violations are rejected before
//! any mutation (operations either fully apply or apply nothing).
//!
//! Authorization is not this layer's job: callers route reads and writes
//! through the scoping rule first.

use std::collections::BTreeMap;

use thiserror::Error;

use prospect_core::{
    Agent, AgentId, Assignment, Category, CategoryId, Lead, LeadId, OrgId, Organisation,
};

/// Referential-integrity refusal. Fatal to the operation, not the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IntegrityError {
    #[error("unknown organisation {0}")]
    UnknownOrganisation(OrgId),
    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),
    #[error("unknown lead {0}")]
    UnknownLead(LeadId),
    #[error("unknown category {0}")]
    UnknownCategory(CategoryId),
    #[error("{relation} crosses organisations: record in {record_org}, referenced in {referenced_org}")]
    CrossOrganisation {
        relation: &'static str,
        record_org: OrgId,
        referenced_org: OrgId,
    },
}

fn same_org(
    relation: &'static str,
    record_org: OrgId,
    referenced_org: OrgId,
) -> Result<(), IntegrityError> {
    if record_org == referenced_org {
        Ok(())
    } else {
        Err(IntegrityError::CrossOrganisation {
            relation,
            record_org,
            referenced_org,
        })
    }
}

/// Typed record collections with create/read/update/delete and predicate
/// iteration.
#[derive(Debug, Default, Clone)]
pub struct Store {
    organisations: BTreeMap<OrgId, Organisation>,
    agents: BTreeMap<AgentId, Agent>,
    leads: BTreeMap<LeadId, Lead>,
    categories: BTreeMap<CategoryId, Category>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- organisations ----

    pub fn insert_organisation(&mut self, organisation: Organisation) {
        self.organisations.insert(organisation.id(), organisation);
    }

    pub fn organisation(&self, id: OrgId) -> Option<&Organisation> {
        self.organisations.get(&id)
    }

    fn require_organisation(&self, id: OrgId) -> Result<(), IntegrityError> {
        if self.organisations.contains_key(&id) {
            Ok(())
        } else {
            Err(IntegrityError::UnknownOrganisation(id))
        }
    }

    // ---- agents ----

    pub fn insert_agent(&mut self, agent: Agent) -> Result<(), IntegrityError> {
        self.require_organisation(agent.organisation())?;
        self.agents.insert(agent.id(), agent);
        Ok(())
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    /// Remove an agent. Leads assigned to it revert to unassigned so no
    /// assignment can dangle.
    pub fn remove_agent(&mut self, id: AgentId) -> Option<Agent> {
        let agent = self.agents.remove(&id)?;
        for lead in self.leads.values_mut() {
            if lead.assignment.map(|a| a.agent) == Some(id) {
                lead.assignment = None;
            }
        }
        Some(agent)
    }

    // ---- leads ----

    pub fn insert_lead(&mut self, lead: Lead) -> Result<(), IntegrityError> {
        self.require_organisation(lead.organisation())?;
        if let Some(assignment) = &lead.assignment {
            let agent = self
                .agents
                .get(&assignment.agent)
                .ok_or(IntegrityError::UnknownAgent(assignment.agent))?;
            same_org("lead.agent", lead.organisation(), agent.organisation())?;
        }
        if let Some(category) = lead.category {
            let category = self
                .categories
                .get(&category)
                .ok_or(IntegrityError::UnknownCategory(category))?;
            same_org("lead.category", lead.organisation(), category.organisation())?;
        }
        self.leads.insert(lead.id(), lead);
        Ok(())
    }

    pub fn lead(&self, id: LeadId) -> Option<&Lead> {
        self.leads.get(&id)
    }

    pub fn lead_mut(&mut self, id: LeadId) -> Option<&mut Lead> {
        self.leads.get_mut(&id)
    }

    pub fn leads(&self) -> impl Iterator<Item = &Lead> {
        self.leads.values()
    }

    pub fn remove_lead(&mut self, id: LeadId) -> Option<Lead> {
        self.leads.remove(&id)
    }

    /// Point a lead at an agent. The agent must exist and belong to the
    /// lead's organisation; overwrites any prior assignment.
    pub fn assign_lead(&mut self, id: LeadId, assignment: Assignment) -> Result<(), IntegrityError> {
        let lead_org = self
            .leads
            .get(&id)
            .ok_or(IntegrityError::UnknownLead(id))?
            .organisation();
        let agent = self
            .agents
            .get(&assignment.agent)
            .ok_or(IntegrityError::UnknownAgent(assignment.agent))?;
        same_org("lead.agent", lead_org, agent.organisation())?;
        // Checks passed; the write below cannot fail.
        if let Some(lead) = self.leads.get_mut(&id) {
            lead.assignment = Some(assignment);
        }
        Ok(())
    }

    /// Set or clear a lead's category. A set category must exist and belong
    /// to the lead's organisation.
    pub fn set_lead_category(
        &mut self,
        id: LeadId,
        category: Option<CategoryId>,
    ) -> Result<(), IntegrityError> {
        let lead_org = self
            .leads
            .get(&id)
            .ok_or(IntegrityError::UnknownLead(id))?
            .organisation();
        if let Some(category_id) = category {
            let record = self
                .categories
                .get(&category_id)
                .ok_or(IntegrityError::UnknownCategory(category_id))?;
            same_org("lead.category", lead_org, record.organisation())?;
        }
        if let Some(lead) = self.leads.get_mut(&id) {
            lead.category = category;
        }
        Ok(())
    }

    // ---- categories ----

    pub fn insert_category(&mut self, category: Category) -> Result<(), IntegrityError> {
        self.require_organisation(category.organisation())?;
        self.categories.insert(category.id(), category);
        Ok(())
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id)
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    /// Remove a category. Its leads revert to uncategorized so no category
    /// reference can dangle.
    pub fn remove_category(&mut self, id: CategoryId) -> Option<Category> {
        let category = self.categories.remove(&id)?;
        for lead in self.leads.values_mut() {
            if lead.category == Some(id) {
                lead.category = None;
            }
        }
        Some(category)
    }
}

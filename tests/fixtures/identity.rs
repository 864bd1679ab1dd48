#![allow(dead_code)]

use prospect_rs::{AgentDraft, AgentId, CategoryId, LeadDraft, LeadId, OrgId, UserId};
use uuid::Uuid;

pub fn org_id(seed: u8) -> OrgId {
    OrgId::new(Uuid::from_bytes([seed; 16]))
}

pub fn user_id(seed: u8) -> UserId {
    UserId::new(Uuid::from_bytes([seed; 16]))
}

pub fn agent_id(seed: u8) -> AgentId {
    AgentId::new(Uuid::from_bytes([seed; 16]))
}

pub fn lead_id(seed: u8) -> LeadId {
    LeadId::new(Uuid::from_bytes([seed; 16]))
}

pub fn category_id(seed: u8) -> CategoryId {
    CategoryId::new(Uuid::from_bytes([seed; 16]))
}

pub fn lead_draft(first: &str, last: &str, age: i64) -> LeadDraft {
    LeadDraft {
        first_name: first.to_string(),
        last_name: last.to_string(),
        age,
    }
}

pub fn agent_draft(seed: u8) -> AgentDraft {
    AgentDraft {
        email: format!("agent{seed}@example.org"),
        first_name: format!("Agent{seed}"),
        last_name: "Example".to_string(),
    }
}

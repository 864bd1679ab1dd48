#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use prospect_rs::{Crm, Message, Notifier, NotifyConfig, NotifyError, Principal};

use super::identity::user_id;

/// Notifier that records what would have been delivered; can be flipped
/// into a failing mode to exercise the fire-and-forget path.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Message>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Message> {
        self.sent.lock().expect("notifier lock").clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, message: &Message) -> Result<(), NotifyError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::new("transport down"));
        }
        self.sent.lock().expect("notifier lock").push(message.clone());
        Ok(())
    }
}

pub fn crm() -> (Crm<RecordingNotifier>, RecordingNotifier) {
    let notifier = RecordingNotifier::default();
    let crm = Crm::new(notifier.clone(), NotifyConfig::default());
    (crm, notifier)
}

/// Register an organisation owned by `user_id(owner_seed)` and return its
/// organisor principal.
pub fn organisor(crm: &mut Crm<RecordingNotifier>, owner_seed: u8) -> Principal {
    crm.register_organisation(&format!("Org {owner_seed}"), user_id(owner_seed))
        .expect("register organisation")
}

/// Invite an agent into the organisor's organisation and return the agent
/// principal the identity layer would resolve for that user.
pub fn invited_agent(
    crm: &mut Crm<RecordingNotifier>,
    organisor: &Principal,
    seed: u8,
) -> Principal {
    let invitation = crm
        .invite_agent(organisor, super::identity::agent_draft(seed))
        .expect("invite agent");
    let link = crm.agent_link_for(&invitation.user);
    Principal::agent(invitation.user, link)
}

//! Notification collaborator.
//!
//! Best-effort delivery of (subject, body, from, recipients). No delivery
//! guarantee, no retry: the workflow fires after its write and moves on, so
//! a failing notifier can never roll back or fail the primary mutation.

use thiserror::Error;

/// One outbound notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub recipients: Vec<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("notification delivery failed: {reason}")]
pub struct NotifyError {
    pub reason: String,
}

impl NotifyError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Delivery backend. Implementations own transport concerns entirely.
pub trait Notifier {
    fn send(&self, message: &Message) -> Result<(), NotifyError>;
}

/// Sink that writes notifications to the log instead of delivering them.
/// The default backend where no real transport is wired up.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, message: &Message) -> Result<(), NotifyError> {
        tracing::info!(
            subject = %message.subject,
            from = %message.from,
            recipients = ?message.recipients,
            "notification (log sink)"
        );
        Ok(())
    }
}

/// Fire-and-forget delivery: failures are logged and swallowed.
pub fn notify_best_effort<N: Notifier>(notifier: &N, message: Message) {
    if let Err(err) = notifier.send(&message) {
        tracing::warn!(subject = %message.subject, "notification dropped: {err}");
    }
}

//! Form draft store
//!
//! Holds the in-progress transfer input prior to submission. Pure local
//! state; validation is deferred to the submission orchestrator.

use std::sync::RwLock;

/// The in-progress user input for a transfer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferDraft {
    pub recipient: String,
    pub amount: String,
    pub keyword: String,
    pub message: String,
}

/// Named draft fields, updated one at a time by user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftField {
    Recipient,
    Amount,
    Keyword,
    Message,
}

/// Owner of the current draft. Submissions read through [`snapshot`],
/// so a draft mutated mid-flight never tears an in-progress submission.
///
/// [`snapshot`]: DraftStore::snapshot
#[derive(Default)]
pub struct DraftStore {
    inner: RwLock<TransferDraft>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a single named field, preserving all others.
    pub fn update(&self, field: DraftField, value: &str) {
        let mut draft = self.inner.write().expect("draft lock poisoned");
        match field {
            DraftField::Recipient => draft.recipient = value.to_string(),
            DraftField::Amount => draft.amount = value.to_string(),
            DraftField::Keyword => draft.keyword = value.to_string(),
            DraftField::Message => draft.message = value.to_string(),
        }
    }

    /// A consistent copy of the current draft.
    pub fn snapshot(&self) -> TransferDraft {
        self.inner.read().expect("draft lock poisoned").clone()
    }
}

use std::collections::HashSet;

use crate::collector::Comment;

/// Grow-only set of comment fingerprints seen during one run.
///
/// The feed virtualizes its DOM, so the same comment is re-observed on
/// every cycle and may drift to a nearby index between cycles. Admission is
/// keyed on the content fingerprint so a shifted re-render of the same
/// comment is still a duplicate. No eviction; the ledger lives for one run.
#[derive(Debug, Default)]
pub struct DedupLedger {
    seen: HashSet<String>,
}

impl DedupLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the comment is novel and is now recorded, false if
    /// its fingerprint was already seen.
    pub fn admit(&mut self, comment: &Comment) -> bool {
        self.seen.insert(comment.fingerprint.clone())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

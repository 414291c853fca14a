//! The ordered, append-only list of chat entries.

use quikr_core::{ChatEntry, Sender};

/// Transcript of one widget instance.
///
/// Entries are never removed or reordered. The only mutation allowed on an
/// appended entry is expiring its quick-reply chips.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<ChatEntry>,
}

impl Transcript {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: ChatEntry) {
        self.entries.push(entry);
    }

    /// Expire the chips of every entry appended so far.
    pub fn mark_all_done(&mut self) {
        for entry in &mut self.entries {
            entry.mark_done();
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    #[must_use]
    pub fn last(&self) -> Option<&ChatEntry> {
        self.entries.last()
    }

    /// Live chips of the most recent bot entry.
    #[must_use]
    pub fn live_options(&self) -> &[String] {
        latest_live_options(&self.entries)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Live chips of the most recent bot entry in `entries`.
#[must_use]
pub fn latest_live_options(entries: &[ChatEntry]) -> &[String] {
    entries
        .iter()
        .rev()
        .find(|e| e.sender == Sender::Bot)
        .map(ChatEntry::live_options)
        .unwrap_or_default()
}

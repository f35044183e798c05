//! Change deduplication between the host and the embedded engine.
//!
//! The host pushes values in (`setValue`) and the engine pushes edits out
//! (`onChange`). Without a shared cursor the two directions echo each other
//! forever: an edit notifies the host, the host sets the same value back,
//! the engine's document is replaced, selection is lost, and another
//! notification fires. [`ChangeGate`] records the most recent content string
//! communicated across the boundary in either direction and suppresses
//! anything that would repeat it.

/// The Last-Known-Content cursor for one mounted adapter instance.
///
/// Engine-originated updates go through [`ChangeGate::admit`]; host-originated
/// writes go through [`ChangeGate::record`]. The two are mutually exclusive
/// triggers on the same cursor and never both fire for one logical edit.
#[derive(Debug, Clone, Default)]
pub struct ChangeGate {
    last: Option<String>,
}

impl ChangeGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gate whose cursor already matches `content`.
    ///
    /// Used at mount time so an engine that replays its initial state as a
    /// transaction does not count it as an edit.
    pub fn seeded(content: impl Into<String>) -> Self {
        Self {
            last: Some(content.into()),
        }
    }

    /// Engine-originated update.
    ///
    /// Returns `false` and does nothing when `content` matches the cursor.
    /// Otherwise the cursor is updated *before* returning `true`, so a host
    /// that re-enters the adapter from inside its change callback already
    /// observes the new cursor.
    pub fn admit(&mut self, content: &str) -> bool {
        if self.last.as_deref() == Some(content) {
            tracing::trace!("duplicate content update suppressed");
            return false;
        }
        self.last = Some(content.to_owned());
        true
    }

    /// Host-originated update. Moves the cursor without a notification.
    pub fn record(&mut self, content: &str) {
        self.last = Some(content.to_owned());
    }

    /// The most recent content communicated across the boundary, if any.
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_gate_admits_first_content() {
        let mut gate = ChangeGate::new();
        assert!(gate.admit("hello"));
        assert_eq!(gate.last(), Some("hello"));
    }

    #[test]
    fn identical_content_admitted_once() {
        let mut gate = ChangeGate::new();
        assert!(gate.admit("hello"));
        assert!(!gate.admit("hello"));
        assert!(!gate.admit("hello"));
    }

    #[test]
    fn cursor_moves_before_admit_returns() {
        let mut gate = ChangeGate::new();
        gate.admit("a");
        assert!(gate.admit("b"));
        // The cursor already reflects "b" for any re-entrant observer.
        assert_eq!(gate.last(), Some("b"));
    }

    #[test]
    fn seeded_gate_suppresses_initial_replay() {
        let mut gate = ChangeGate::seeded("hello");
        assert!(!gate.admit("hello"));
        assert!(gate.admit("hello world"));
    }

    #[test]
    fn record_suppresses_matching_admit() {
        let mut gate = ChangeGate::new();
        gate.record("from host");
        assert!(!gate.admit("from host"));
    }

    #[test]
    fn host_echo_does_not_renotify() {
        // The scenario from the adapter contract: an internal edit is
        // admitted once, the host echoes the same value back, and nothing
        // further is admitted for it.
        let mut gate = ChangeGate::seeded("hello");
        assert!(gate.admit("hello world"));
        gate.record("hello world");
        assert!(!gate.admit("hello world"));
    }

    #[test]
    fn alternating_contents_each_admit() {
        let mut gate = ChangeGate::new();
        assert!(gate.admit("a"));
        assert!(gate.admit("b"));
        assert!(gate.admit("a"));
    }
}

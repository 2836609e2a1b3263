// Synchronized expand/collapse state for lists of collapsible rows
// (claims, highlights).
//
// Two halves: DisclosureSync broadcasts, RowDisclosure observes. The
// broadcast carries a generation counter alongside the flag so a row
// can tell "Expand All was just clicked" apart from "I was individually
// closed after Expand All" — with a bare shared boolean, the row's own
// state would be silently overwritten on its next unrelated read.

/// Broadcast half, one per list. `toggle_all` flips the shared flag and
/// bumps the generation; every row resynchronizes exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisclosureSync {
    all_open: bool,
    generation: u64,
}

impl DisclosureSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_all(&mut self) {
        self.all_open = !self.all_open;
        self.generation += 1;
    }

    pub fn all_open(&self) -> bool {
        self.all_open
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Per-row half. A row follows the broadcast flag whenever the
/// generation changes and is free to diverge in between via its own
/// toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowDisclosure {
    open: bool,
    synced_at: u64,
}

impl RowDisclosure {
    /// A new row adopts the broadcast state current at creation time.
    pub fn new(sync: &DisclosureSync) -> Self {
        Self {
            open: sync.all_open(),
            synced_at: sync.generation(),
        }
    }

    /// Current open state. Resynchronizes to the broadcast flag exactly
    /// when the generation moved since this row last looked; otherwise
    /// the row's own state stands, however often this is called.
    pub fn observe(&mut self, sync: &DisclosureSync) -> bool {
        if self.synced_at != sync.generation() {
            self.synced_at = sync.generation();
            self.open = sync.all_open();
        }
        self.open
    }

    /// Flip only this row.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_start_from_the_broadcast_state() {
        let mut sync = DisclosureSync::new();
        assert!(!RowDisclosure::new(&sync).is_open());

        sync.toggle_all();
        assert!(RowDisclosure::new(&sync).is_open());
    }

    #[test]
    fn toggle_all_is_an_involution() {
        let mut sync = DisclosureSync::new();
        let mut rows = [RowDisclosure::new(&sync); 3];

        sync.toggle_all();
        // A row diverges individually after Expand All.
        rows[1].observe(&sync);
        rows[1].toggle();
        assert!(!rows[1].is_open());

        sync.toggle_all();
        // Two toggles return every row to the original synchronized
        // state; the individual override died with its generation.
        for row in rows.iter_mut() {
            assert!(!row.observe(&sync));
        }
    }

    #[test]
    fn individual_override_survives_unrelated_rereads() {
        let mut sync = DisclosureSync::new();
        sync.toggle_all();

        let mut row = RowDisclosure::new(&sync);
        row.toggle();
        assert!(!row.is_open());

        // Re-render without a generation change must not clobber the
        // row's own choice.
        assert!(!row.observe(&sync));
        assert!(!row.observe(&sync));
    }

    #[test]
    fn generation_change_resets_even_when_flags_agree() {
        let mut sync = DisclosureSync::new();
        let mut row = RowDisclosure::new(&sync);

        // Row opens itself, then Collapse All (flag false -> true ->
        // false over two broadcasts) must still close it.
        row.toggle();
        assert!(row.is_open());
        sync.toggle_all();
        sync.toggle_all();
        assert!(!row.observe(&sync));
    }

    #[test]
    fn rows_created_mid_generation_adopt_current_broadcast() {
        let mut sync = DisclosureSync::new();
        sync.toggle_all();

        let mut late = RowDisclosure::new(&sync);
        assert!(late.observe(&sync));
    }
}

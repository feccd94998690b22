use engine::HistoryFilter;

use super::Session;

/// Filter controls plus the rows currently shown.
///
/// `pending` is what the selectors display; `applied` is what produced
/// `rows`. Cycling a selector never touches the table until it is applied.
#[derive(Debug, Default)]
pub struct HistoryState {
    pub pending: HistoryFilter,
    pub applied: HistoryFilter,
    /// Positions into the session's records.
    pub rows: Vec<usize>,
    pub selected: usize,
}

impl HistoryState {
    /// Recomputes the rows from the session under the applied filter.
    pub fn refresh(&mut self, session: &Session) {
        self.rows = self.applied.positions(session.records());
        self.clamp_selection();
    }

    pub fn apply(&mut self, session: &Session) {
        self.applied = self.pending.clone();
        self.selected = 0;
        self.refresh(session);
    }

    pub fn reset(&mut self, session: &Session) {
        self.pending = HistoryFilter::default();
        self.apply(session);
    }

    pub fn cycle_kind(&mut self) {
        self.pending.kind = self.pending.kind.next();
    }

    pub fn cycle_category(&mut self) {
        self.pending.category = self.pending.category.next();
    }

    pub fn is_dirty(&self) -> bool {
        self.pending != self.applied
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }
}

//! Suggestion panel keyboard navigation
//!
//! A small state machine: the panel is either closed or open with an
//! optional highlighted row (`None` means the input line itself is
//! active, nothing highlighted). Highlighting is purely a rendering
//! concern driven by `selected`; at most one row is ever highlighted.

use serde::Serialize;

/// Keys the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Suggestion panel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PanelState {
    Closed,
    Open {
        /// Highlighted row, if any; always < the suggestion count
        selected: Option<usize>,
    },
}

/// What an Enter press should do, decided by the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterOutcome {
    /// Commit the highlighted suggestion and close the panel
    CommitSelected(usize),
    /// No highlight: run the filter on the raw query, panel unchanged
    SearchRawQuery,
}

impl Default for PanelState {
    fn default() -> Self {
        PanelState::Closed
    }
}

impl PanelState {
    /// Input focus or a non-empty keystroke opens the panel with no
    /// highlight.
    pub fn open(&mut self) {
        *self = PanelState::Open { selected: None };
    }

    /// Blur or Escape closes the panel.
    pub fn close(&mut self) {
        *self = PanelState::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, PanelState::Open { .. })
    }

    pub fn selected(&self) -> Option<usize> {
        match self {
            PanelState::Open { selected } => *selected,
            PanelState::Closed => None,
        }
    }

    /// Move the highlight down, saturating at `len - 1`. No-op when the
    /// panel is closed or empty.
    pub fn arrow_down(&mut self, len: usize) {
        if let PanelState::Open { selected } = self {
            if len == 0 {
                return;
            }
            *selected = match *selected {
                None => Some(0),
                Some(i) => Some((i + 1).min(len - 1)),
            };
        }
    }

    /// Move the highlight up, saturating at "no highlight". No-op when
    /// the panel is closed.
    pub fn arrow_up(&mut self) {
        if let PanelState::Open { selected } = self {
            *selected = match *selected {
                Some(0) | None => None,
                Some(i) => Some(i - 1),
            };
        }
    }

    /// Decide what Enter does given the current highlight.
    pub fn enter(&self) -> EnterOutcome {
        match self.selected() {
            Some(i) => EnterOutcome::CommitSelected(i),
            None => EnterOutcome::SearchRawQuery,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_starts_without_highlight() {
        let mut panel = PanelState::default();
        assert!(!panel.is_open());
        panel.open();
        assert!(panel.is_open());
        assert_eq!(panel.selected(), None);
    }

    #[test]
    fn test_arrow_down_walks_and_saturates() {
        let mut panel = PanelState::default();
        panel.open();

        // n presses with n < len lands on index n - 1
        for _ in 0..3 {
            panel.arrow_down(5);
        }
        assert_eq!(panel.selected(), Some(2));

        // Never exceeds len - 1
        for _ in 0..10 {
            panel.arrow_down(5);
        }
        assert_eq!(panel.selected(), Some(4));
    }

    #[test]
    fn test_arrow_up_saturates_at_no_highlight() {
        let mut panel = PanelState::default();
        panel.open();
        panel.arrow_down(3);
        panel.arrow_down(3);
        panel.arrow_up();
        assert_eq!(panel.selected(), Some(0));
        panel.arrow_up();
        assert_eq!(panel.selected(), None);
        // Never goes below "no highlight"
        panel.arrow_up();
        assert_eq!(panel.selected(), None);
    }

    #[test]
    fn test_arrows_are_noops_when_closed_or_empty() {
        let mut panel = PanelState::default();
        panel.arrow_down(5);
        assert_eq!(panel.selected(), None);
        assert!(!panel.is_open());

        panel.open();
        panel.arrow_down(0);
        assert_eq!(panel.selected(), None);
    }

    #[test]
    fn test_enter_outcome_follows_highlight() {
        let mut panel = PanelState::default();
        panel.open();
        assert_eq!(panel.enter(), EnterOutcome::SearchRawQuery);
        panel.arrow_down(2);
        assert_eq!(panel.enter(), EnterOutcome::CommitSelected(0));
    }

    #[test]
    fn test_close_clears_state() {
        let mut panel = PanelState::default();
        panel.open();
        panel.arrow_down(4);
        panel.close();
        assert!(!panel.is_open());
        assert_eq!(panel.selected(), None);
    }
}

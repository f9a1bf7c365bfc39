//! Analysis status console progression.

/// Reveals a fixed list of status lines one tick at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusConsoleState {
    total: usize,
    visible: usize,
}

impl StatusConsoleState {
    /// Console with `total` lines; the first line is visible immediately.
    #[must_use]
    pub const fn new(total: usize) -> Self {
        Self {
            total,
            visible: if total == 0 { 0 } else { 1 },
        }
    }

    /// Reveal the next line. Returns `false` once every line is visible.
    pub const fn tick(&mut self) -> bool {
        if self.visible < self.total {
            self.visible += 1;
        }
        self.visible < self.total
    }

    /// Number of visible lines.
    #[must_use]
    pub const fn visible(&self) -> usize {
        self.visible
    }

    /// Whether all lines are visible.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.visible >= self.total
    }

    /// Index of the line currently in progress.
    #[must_use]
    pub const fn active_line(&self) -> Option<usize> {
        if self.visible == 0 {
            None
        } else {
            Some(self.visible - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_one_line_per_tick_then_stops() {
        let mut console = StatusConsoleState::new(3);
        assert_eq!(console.visible(), 1);
        assert!(console.tick());
        assert!(!console.tick());
        assert!(console.is_done());
        assert!(!console.tick());
        assert_eq!(console.visible(), 3);
        assert_eq!(console.active_line(), Some(2));
    }

    #[test]
    fn empty_console_is_done() {
        let console = StatusConsoleState::new(0);
        assert!(console.is_done());
        assert_eq!(console.active_line(), None);
    }
}

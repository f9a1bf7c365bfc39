//! Typewriter headline state machine.
//!
//! Types a phrase one character per step, pauses, deletes it, then moves to
//! the next phrase. Each step returns the delay before the next one.

/// Delay between typed characters.
pub const TYPING_DELAY_MS: u32 = 100;
/// Delay between deleted characters.
pub const DELETING_DELAY_MS: u32 = 50;
/// Pause after a phrase is fully typed.
pub const PAUSE_DELAY_MS: u32 = 2000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Typing,
    Paused,
    Deleting,
}

/// Cycling typewriter over a list of phrases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    index: usize,
    shown: usize,
    phase: Phase,
}

impl Typewriter {
    /// Start typing the first phrase.
    #[must_use]
    pub fn new<S: AsRef<str>>(phrases: &[S]) -> Self {
        Self {
            phrases: phrases
                .iter()
                .map(|phrase| phrase.as_ref().chars().collect())
                .collect(),
            index: 0,
            shown: 0,
            phase: Phase::Typing,
        }
    }

    fn current(&self) -> &[char] {
        self.phrases.get(self.index).map_or(&[], Vec::as_slice)
    }

    /// Advance one step and return the delay before the next.
    pub fn step(&mut self) -> u32 {
        if self.phrases.is_empty() {
            return PAUSE_DELAY_MS;
        }
        match self.phase {
            Phase::Typing if self.shown < self.current().len() => {
                self.shown += 1;
                if self.shown == self.current().len() {
                    self.phase = Phase::Paused;
                    PAUSE_DELAY_MS
                } else {
                    TYPING_DELAY_MS
                }
            }
            Phase::Typing | Phase::Paused => {
                self.phase = Phase::Deleting;
                DELETING_DELAY_MS
            }
            Phase::Deleting if self.shown > 0 => {
                self.shown -= 1;
                DELETING_DELAY_MS
            }
            Phase::Deleting => {
                self.phase = Phase::Typing;
                self.index = (self.index + 1) % self.phrases.len();
                TYPING_DELAY_MS
            }
        }
    }

    /// Text currently displayed.
    #[must_use]
    pub fn text(&self) -> String {
        self.current().iter().take(self.shown).collect()
    }
}

use serde::{Deserialize, Serialize};

use crate::deck::LocatorTemplate;
use crate::gesture::DEFAULT_SWIPE_THRESHOLD;
use crate::view::ViewTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
pub enum Direction {
    Like,
    Dislike,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub swipe_threshold: f64,
    pub locator: LocatorTemplate,
    pub tuning: ViewTuning,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            locator: LocatorTemplate::default(),
            tuning: ViewTuning::default(),
        }
    }
}

/// Progress through one deck.
///
/// `liked` holds deck indices in decision order; `ended` is true exactly when
/// every candidate has been decided.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub position: usize,
    pub liked: Vec<usize>,
    pub ended: bool,
}

impl SessionState {
    /// Record a decision on the candidate at `position` and advance.
    /// Returns false (and changes nothing) once the deck is exhausted.
    pub fn record(&mut self, direction: Direction, deck_len: usize) -> bool {
        if self.ended || self.position >= deck_len {
            return false;
        }
        if direction == Direction::Like {
            self.liked.push(self.position);
        }
        self.position += 1;
        self.ended = self.position == deck_len;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_advances_and_collects_likes() {
        let mut state = SessionState::default();
        assert!(state.record(Direction::Like, 3));
        assert!(state.record(Direction::Dislike, 3));
        assert_eq!(state.position, 2);
        assert_eq!(state.liked, vec![0]);
        assert!(!state.ended);

        assert!(state.record(Direction::Like, 3));
        assert_eq!(state.liked, vec![0, 2]);
        assert!(state.ended);
    }

    #[test]
    fn test_record_after_end_is_noop() {
        let mut state = SessionState::default();
        state.record(Direction::Dislike, 1);
        let before = state.clone();

        assert!(!state.record(Direction::Like, 1));
        assert_eq!(state, before);
    }

    #[test]
    fn test_reset() {
        let mut state = SessionState {
            position: 4,
            liked: vec![1, 3],
            ended: false,
        };
        state.reset();
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Like.to_string(), "Like");
        assert_eq!(Direction::Dislike.to_string(), "Dislike");
    }

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.swipe_threshold, 100.0);
        assert_eq!(config.locator, LocatorTemplate::default());
    }
}

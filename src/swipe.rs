use crate::deck::{Candidate, Deck};
use crate::gesture::{GestureOutcome, GestureTracker, Offset, Point};
use crate::image_loader::{ImageKey, ImageLoader, ImageRequest};
use crate::session::{Direction, SessionConfig, SessionState};
use crate::view::{self, IntentPreview};

/// Background cards drawn behind the current one, at most
const MAX_STACKED_CARDS: usize = 2;

/// Owns the deck, decision progress, the in-flight drag and the current
/// card's image readiness. Every input is a synchronous method call; nothing
/// here ever fails.
pub struct SwipeSession {
    config: SessionConfig,
    deck: Deck,
    state: SessionState,
    gesture: GestureTracker,
    image_ready: bool,
    loader: Box<dyn ImageLoader>,
}

impl SwipeSession {
    pub fn new(config: SessionConfig, loader: Box<dyn ImageLoader>) -> Self {
        let deck = Deck::generate(&config.locator);
        Self::with_deck(config, deck, loader)
    }

    pub fn with_deck(config: SessionConfig, deck: Deck, loader: Box<dyn ImageLoader>) -> Self {
        let gesture = GestureTracker::new(config.swipe_threshold);
        let session = Self {
            config,
            deck,
            state: SessionState::default(),
            gesture,
            image_ready: false,
            loader,
        };
        session.request_current_image();
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn gesture(&self) -> &GestureTracker {
        &self.gesture
    }

    pub fn position(&self) -> usize {
        self.state.position
    }

    pub fn has_ended(&self) -> bool {
        self.state.ended
    }

    pub fn is_image_ready(&self) -> bool {
        self.image_ready
    }

    pub fn current(&self) -> Option<&Candidate> {
        if self.state.ended {
            None
        } else {
            self.deck.get(self.state.position)
        }
    }

    /// Liked candidates in the order they were liked
    pub fn liked(&self) -> Vec<&Candidate> {
        self.state
            .liked
            .iter()
            .filter_map(|&idx| self.deck.get(idx))
            .collect()
    }

    /// Decide on the current card and move to the next one. Returns false
    /// once the deck is exhausted; nothing changes in that case.
    pub fn evaluate_decision(&mut self, direction: Direction) -> bool {
        let position = self.state.position;
        if !self.state.record(direction, self.deck.len()) {
            tracing::debug!(%direction, "decision ignored, deck exhausted");
            return false;
        }
        tracing::debug!(%direction, position, "decision committed");

        // A drag still held on the decided card must not carry over to the next one.
        self.gesture.cancel();
        self.image_ready = false;
        if self.state.ended {
            tracing::info!(
                liked = self.state.liked.len(),
                total = self.deck.len(),
                "session ended"
            );
        } else {
            self.request_current_image();
        }
        true
    }

    pub fn like(&mut self) -> bool {
        self.evaluate_decision(Direction::Like)
    }

    pub fn dislike(&mut self) -> bool {
        self.evaluate_decision(Direction::Dislike)
    }

    /// Press on the card. Ignored when there is no card left to drag.
    pub fn begin_gesture(&mut self, point: Point) -> bool {
        if self.state.ended {
            tracing::trace!("gesture begin ignored, session ended");
            return false;
        }
        self.gesture.begin(point)
    }

    pub fn update_gesture(&mut self, point: Point) -> bool {
        self.gesture.update(point)
    }

    /// Release the card. A drag past the threshold commits a decision; the
    /// outcome is `Commit` only if the decision actually went through.
    pub fn end_gesture(&mut self) -> GestureOutcome {
        match self.gesture.end() {
            GestureOutcome::Commit(direction) => {
                if self.evaluate_decision(direction) {
                    GestureOutcome::Commit(direction)
                } else {
                    GestureOutcome::Ignored
                }
            }
            other => {
                tracing::trace!(?other, "gesture released without decision");
                other
            }
        }
    }

    /// Fresh deck, empty likes, no drag in progress
    pub fn restart(&mut self) {
        self.deck = Deck::generate_after(&self.config.locator, self.deck.token());
        self.state.reset();
        self.gesture.cancel();
        self.image_ready = false;
        tracing::info!(token = self.deck.token(), "session restarted");
        self.request_current_image();
    }

    /// Returns true if the notification was for the card on screen
    pub fn on_image_ready(&mut self, key: ImageKey) -> bool {
        match self.current_key() {
            Some(current) if current == key => {
                self.image_ready = true;
                true
            }
            _ => {
                tracing::trace!(?key, "stale image notification dropped");
                false
            }
        }
    }

    pub fn snapshot(&self) -> SwipeSnapshot<'_> {
        let dragging = self.gesture.is_active();
        let offset = self.gesture.offset();
        let tuning = &self.config.tuning;
        SwipeSnapshot {
            deck: &self.deck,
            position: self.state.position,
            current: self.current(),
            liked: self.liked(),
            ended: self.state.ended,
            dragging,
            offset,
            rotation: view::rotation_degrees(offset, tuning),
            scale: view::card_scale(offset, tuning),
            preview: view::intent_preview(offset, dragging, tuning),
            image_ready: self.image_ready,
        }
    }

    fn current_key(&self) -> Option<ImageKey> {
        self.current().map(|c| ImageKey {
            token: self.deck.token(),
            id: c.id,
        })
    }

    fn request_current_image(&self) {
        if let (Some(key), Some(candidate)) = (self.current_key(), self.current()) {
            self.loader.request(ImageRequest {
                key,
                locator: candidate.locator.clone(),
            });
        }
    }
}

/// Read-only view of everything the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct SwipeSnapshot<'a> {
    pub deck: &'a Deck,
    pub position: usize,
    pub current: Option<&'a Candidate>,
    pub liked: Vec<&'a Candidate>,
    pub ended: bool,
    pub dragging: bool,
    pub offset: Offset,
    pub rotation: f64,
    pub scale: f64,
    pub preview: Option<IntentPreview>,
    pub image_ready: bool,
}

impl SwipeSnapshot<'_> {
    /// 1-based card number and deck size, for the "3 / 15" indicator
    pub fn progress(&self) -> (usize, usize) {
        let total = self.deck.len();
        ((self.position + 1).min(total), total)
    }

    /// How many shadow cards to draw behind the current one
    pub fn remaining_behind(&self) -> usize {
        self.deck
            .len()
            .saturating_sub(self.position + 1)
            .min(MAX_STACKED_CARDS)
    }

    pub fn summary_line(&self) -> String {
        format!(
            "You liked {} out of {} kitties",
            self.liked.len(),
            self.deck.len()
        )
    }
}

use chrono::Utc;

/// Number of candidates in every deck
pub const DECK_SIZE: usize = 15;

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://cataas.com/cat";
pub const DEFAULT_IMAGE_WIDTH: u32 = 500;
pub const DEFAULT_IMAGE_HEIGHT: u32 = 600;

/// One swipeable item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: usize,
    pub locator: String,
}

/// Shape of the image locators handed to the image service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorTemplate {
    pub base_url: String,
    pub width: u32,
    pub height: u32,
}

impl Default for LocatorTemplate {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            width: DEFAULT_IMAGE_WIDTH,
            height: DEFAULT_IMAGE_HEIGHT,
        }
    }
}

impl LocatorTemplate {
    /// Build the locator for candidate `id`. The freshness token keeps the
    /// image service (and any cache in between) from serving a stale picture.
    pub fn locator(&self, token: i64, id: usize) -> String {
        format!(
            "{}?width={}&height={}&{}_{}",
            self.base_url, self.width, self.height, token, id
        )
    }
}

/// Ordered, fixed set of candidates for one session. Immutable once built.
#[derive(Debug, Clone)]
pub struct Deck {
    token: i64,
    candidates: Vec<Candidate>,
}

impl Deck {
    /// Generate a fresh deck using the current time as freshness token
    pub fn generate(template: &LocatorTemplate) -> Self {
        Self::with_token(template, Utc::now().timestamp_millis())
    }

    /// Generate a deck whose token is strictly newer than `previous`, so two
    /// decks built within the same millisecond still differ.
    pub fn generate_after(template: &LocatorTemplate, previous: i64) -> Self {
        let token = Utc::now().timestamp_millis().max(previous + 1);
        Self::with_token(template, token)
    }

    pub fn with_token(template: &LocatorTemplate, token: i64) -> Self {
        let candidates = (0..DECK_SIZE)
            .map(|id| Candidate {
                id,
                locator: template.locator(token, id),
            })
            .collect();
        Self { token, candidates }
    }

    pub fn token(&self) -> i64 {
        self.token
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Candidate> {
        self.candidates.get(idx)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }
}

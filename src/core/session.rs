//! Reading session: one question, one drawn card, one reading.
//!
//! The session moves `Idle -> Loading -> Result -> Idle`. A failed reading
//! goes from `Loading` back to `Idle` with an error message. Every draw is
//! stamped with a [`DrawTicket`]; a response carrying an old ticket (because
//! the session was reset while it was in flight) is discarded.

use crate::core::draw::draw_card;
use crate::core::sections::split_sections;
use crate::domain::model::{DrawnCard, ReadingRequest, ReadingSection};
use crate::utils::error::TarotError;
use rand::Rng;

pub const CONNECTION_LOST: &str = "The ethereal connection was lost. Please try again.";

/// Generation stamp of a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle { error: Option<String> },
    Loading { ticket: DrawTicket, card: DrawnCard },
    Result { card: DrawnCard, reading: String },
}

/// A draw that has been made and now needs its reading fetched.
#[derive(Debug, Clone)]
pub struct PendingReading {
    pub ticket: DrawTicket,
    pub request: ReadingRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Revealed,
    Failed(String),
    Stale,
}

#[derive(Debug, Clone)]
pub struct Session {
    question: String,
    state: SessionState,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            question: String::new(),
            state: SessionState::Idle { error: None },
            generation: 0,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading { .. })
    }

    pub fn drawn_card(&self) -> Option<&DrawnCard> {
        match &self.state {
            SessionState::Idle { .. } => None,
            SessionState::Loading { card, .. } | SessionState::Result { card, .. } => Some(card),
        }
    }

    pub fn reading_text(&self) -> Option<&str> {
        match &self.state {
            SessionState::Result { reading, .. } => Some(reading),
            _ => None,
        }
    }

    pub fn sections(&self) -> Vec<ReadingSection> {
        self.reading_text().map(split_sections).unwrap_or_default()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SessionState::Idle { error } => error.as_deref(),
            _ => None,
        }
    }

    /// The question input is locked while a reading is in flight.
    pub fn set_question(&mut self, question: impl Into<String>) -> bool {
        if self.is_loading() {
            return false;
        }
        self.question = question.into();
        true
    }

    /// Draw a card and enter `Loading`. Returns `None` unless the session is
    /// `Idle`, so a second draw while one is pending starts nothing.
    pub fn begin_draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<PendingReading> {
        if !matches!(self.state, SessionState::Idle { .. }) {
            return None;
        }

        let card = draw_card(rng);
        self.generation += 1;
        let ticket = DrawTicket(self.generation);
        let request = ReadingRequest::for_card(&card, self.question.clone());

        tracing::debug!(
            "Drew {} ({}), ticket {}",
            card.card.name,
            card.orientation_label(),
            self.generation
        );
        self.state = SessionState::Loading { ticket, card };

        Some(PendingReading { ticket, request })
    }

    /// Apply the outcome of the reading request issued under `ticket`.
    pub fn complete(
        &mut self,
        ticket: DrawTicket,
        outcome: std::result::Result<String, TarotError>,
    ) -> Completion {
        let card = match &self.state {
            SessionState::Loading {
                ticket: current,
                card,
            } if *current == ticket => card.clone(),
            _ => {
                tracing::debug!("Discarding stale reading for ticket {}", ticket.0);
                return Completion::Stale;
            }
        };

        match outcome {
            Ok(reading) => {
                self.state = SessionState::Result { card, reading };
                Completion::Revealed
            }
            Err(e) => {
                tracing::warn!(
                    "Reading failed: {} (Category: {:?})",
                    e,
                    e.category()
                );
                self.state = SessionState::Idle {
                    error: Some(CONNECTION_LOST.to_string()),
                };
                Completion::Failed(CONNECTION_LOST.to_string())
            }
        }
    }

    /// Back to the initial `Idle` shape. Any reading still in flight becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.question.clear();
        self.state = SessionState::Idle { error: None };
    }
}

use crate::core::session::{Completion, Session};
use crate::domain::ports::ReadingService;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    /// A draw was already pending, or the session is showing a result.
    Ignored,
    Revealed,
    Failed(String),
    /// The session was reset before the reading arrived.
    Stale,
}

impl From<Completion> for DrawOutcome {
    fn from(completion: Completion) -> Self {
        match completion {
            Completion::Revealed => Self::Revealed,
            Completion::Failed(message) => Self::Failed(message),
            Completion::Stale => Self::Stale,
        }
    }
}

/// Drives one [`Session`] against a [`ReadingService`].
pub struct TarotReader<S: ReadingService> {
    service: S,
    session: Mutex<Session>,
    rng: Mutex<StdRng>,
}

impl<S: ReadingService> TarotReader<S> {
    pub fn new(service: S) -> Self {
        Self::with_rng(service, StdRng::from_os_rng())
    }

    pub fn with_seed(service: S, seed: u64) -> Self {
        Self::with_rng(service, StdRng::seed_from_u64(seed))
    }

    fn with_rng(service: S, rng: StdRng) -> Self {
        Self {
            service,
            session: Mutex::new(Session::new()),
            rng: Mutex::new(rng),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub async fn snapshot(&self) -> Session {
        self.session.lock().await.clone()
    }

    pub async fn set_question(&self, question: impl Into<String>) -> bool {
        self.session.lock().await.set_question(question)
    }

    pub async fn reset(&self) {
        self.session.lock().await.reset();
    }

    /// Draw a card and fetch its reading. The session lock is released while
    /// the request is in flight so a reset can still get through.
    pub async fn draw(&self) -> DrawOutcome {
        let pending = {
            let mut rng = self.rng.lock().await;
            let mut session = self.session.lock().await;
            match session.begin_draw(&mut *rng) {
                Some(pending) => pending,
                None => {
                    tracing::debug!("Draw ignored, session is not idle");
                    return DrawOutcome::Ignored;
                }
            }
        };

        tracing::info!(
            "Requesting reading for {} (reversed: {})",
            pending.request.card_name,
            pending.request.is_reversed
        );
        let outcome = self.service.request_reading(&pending.request).await;

        let mut session = self.session.lock().await;
        session.complete(pending.ticket, outcome).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::{SessionState, CONNECTION_LOST};
    use crate::domain::model::ReadingRequest;
    use crate::utils::error::{Result, TarotError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Notify;

    /// Answers after `gate` is notified, counting every call.
    struct GatedService {
        calls: AtomicUsize,
        gate: Arc<Notify>,
        reply: Option<String>,
    }

    impl GatedService {
        fn new(gate: Arc<Notify>, reply: Option<&str>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                gate,
                reply: reply.map(str::to_string),
            }
        }
    }

    #[async_trait]
    impl ReadingService for GatedService {
        async fn request_reading(&self, _request: &ReadingRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            self.reply.clone().ok_or(TarotError::EmptyResponse)
        }
    }

    #[tokio::test]
    async fn test_draw_reveals_reading() {
        let gate = Arc::new(Notify::new());
        gate.notify_one();
        let reader = TarotReader::with_seed(GatedService::new(gate, Some("A reading")), 1);

        assert_eq!(reader.draw().await, DrawOutcome::Revealed);
        let session = reader.snapshot().await;
        assert_eq!(session.reading_text(), Some("A reading"));
        assert!(session.drawn_card().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_draw_does_not_call_service_twice() {
        let gate = Arc::new(Notify::new());
        let reader = TarotReader::with_seed(GatedService::new(gate.clone(), Some("text")), 2);

        let (first, second) = tokio::join!(reader.draw(), async {
            let outcome = reader.draw().await;
            gate.notify_one();
            outcome
        });

        assert_eq!(first, DrawOutcome::Revealed);
        assert_eq!(second, DrawOutcome::Ignored);
        assert_eq!(reader.service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reset_during_request_makes_response_stale() {
        let gate = Arc::new(Notify::new());
        let reader = TarotReader::with_seed(GatedService::new(gate.clone(), Some("late")), 3);
        reader.set_question("first question").await;

        let (outcome, _) = tokio::join!(reader.draw(), async {
            reader.reset().await;
            gate.notify_one();
        });

        assert_eq!(outcome, DrawOutcome::Stale);
        let session = reader.snapshot().await;
        assert_eq!(session.state(), &SessionState::Idle { error: None });
        assert_eq!(session.question(), "");
    }

    #[tokio::test]
    async fn test_failure_collapses_to_single_message() {
        let gate = Arc::new(Notify::new());
        gate.notify_one();
        let reader = TarotReader::with_seed(GatedService::new(gate, None), 4);

        assert_eq!(
            reader.draw().await,
            DrawOutcome::Failed(CONNECTION_LOST.to_string())
        );
        let session = reader.snapshot().await;
        assert_eq!(session.error(), Some(CONNECTION_LOST));
    }
}

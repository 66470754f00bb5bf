use quiz_core::{AnswerFeedback, Clock, QuizSession};

use crate::config::SessionConfig;
use crate::error::StartError;
use crate::prefetch::ImagePrefetcher;
use crate::source::QuestionSource;

/// Orchestrates session start and the prefetch that follows navigation.
///
/// The runner owns the question source and the image prefetcher; the session
/// itself stays a plain value the presenter holds on to. Navigation never
/// waits on prefetch.
pub struct SessionRunner {
    source: QuestionSource,
    prefetcher: ImagePrefetcher,
    clock: Clock,
}

impl SessionRunner {
    #[must_use]
    pub fn new(source: QuestionSource, prefetcher: ImagePrefetcher) -> Self {
        Self {
            source,
            prefetcher,
            clock: Clock::default(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn prefetcher(&self) -> &ImagePrefetcher {
        &self.prefetcher
    }

    /// Resolve the configuration, load the question set, and open a session,
    /// kicking off the initial image prefetch.
    ///
    /// # Errors
    ///
    /// Fatal to session start, with no automatic retry: configuration
    /// errors, load failures, or an empty question set.
    pub async fn start(&self, config: &SessionConfig) -> Result<QuizSession, StartError> {
        let mode = config.resolve()?;
        let questions = self.source.load(&mode).await?;
        let session = QuizSession::new(&mode, questions, self.clock.now())?;
        log::info!(
            "started {} session with {} questions",
            session.scope(),
            session.total()
        );
        self.prefetch_around(&session);
        Ok(session)
    }

    /// Advance to the next question; re-centers the prefetch window on a
    /// successful move.
    pub fn next(&self, session: &mut QuizSession) -> bool {
        let moved = session.next();
        if moved {
            self.prefetch_around(session);
        }
        moved
    }

    /// Step back to the previous question; re-centers the prefetch window on
    /// a successful move.
    pub fn previous(&self, session: &mut QuizSession) -> bool {
        let moved = session.previous();
        if moved {
            self.prefetch_around(session);
        }
        moved
    }

    /// Jump to `index`; out-of-range jumps are silent no-ops.
    pub fn go_to(&self, session: &mut QuizSession, index: usize) -> bool {
        let moved = session.go_to(index);
        if moved {
            self.prefetch_around(session);
        }
        moved
    }

    /// Submit an answer for the current question. Duplicate submissions are
    /// idempotent no-ops returning `None`.
    pub fn submit(&self, session: &mut QuizSession, selected: &str) -> Option<AnswerFeedback> {
        session.submit_answer(selected)
    }

    fn prefetch_around(&self, session: &QuizSession) {
        self.prefetcher
            .prefetch(session.questions(), session.current_index());
    }
}

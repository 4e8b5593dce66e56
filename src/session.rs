//! Pure game-session state machine.
//!
//! One session is countdown -> typing -> finish for a single attempt. This
//! module holds no DOM or storage references: the adapter in `app` feeds it
//! events (start clicks, countdown ticks, submissions) and applies the side
//! effects it reports back. That keeps every rule here testable under native
//! `cargo test`.

/// Countdown length in whole seconds (the page shows 3, 2, 1, go).
pub const COUNTDOWN_TICKS: u32 = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    CountingDown {
        remaining: u32,
    },
    Typing,
    Finished,
}

/// Per-character verdict of the typed text against the quote.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharMark {
    Correct,
    Incorrect,
    Pending,
}

/// Result of one countdown timer tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Countdown {
    Tick(u32),
    Go,
}

/// Why a start action was refused. Both are user-correctable; neither
/// mutates session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartRejection {
    EmptyName,
    NoAttemptsLeft,
}

/// Side effects the adapter must apply after a completed session.
#[derive(Clone, Debug, PartialEq)]
pub struct FinishSummary {
    pub final_time: f64,
    pub tries_used: u32,
    /// True when this finish beat (or established) the session best for the
    /// current player, i.e. the time should go to the score board.
    pub is_personal_best: bool,
}

#[derive(Clone, Debug, Default)]
pub struct SessionState {
    phase: Phase,
    player: String,
    tries_used: u32,
    best_time: Option<f64>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Trimmed name of the player the current/last session belongs to.
    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn tries_used(&self) -> u32 {
        self.tries_used
    }

    /// Guarded `Idle -> CountingDown` transition. `tries_used` is the count
    /// the caller loaded from the attempt log for the trimmed name.
    pub fn try_start(
        &mut self,
        raw_name: &str,
        tries_used: u32,
        max_tries: u32,
    ) -> Result<(), StartRejection> {
        let name = raw_name.trim();
        if name.is_empty() {
            return Err(StartRejection::EmptyName);
        }
        if tries_used >= max_tries {
            return Err(StartRejection::NoAttemptsLeft);
        }
        // Switching players invalidates the in-memory session best; the same
        // player keeps theirs across attempts so a slower repeat run is not
        // re-reported to the score board.
        if self.player != name {
            self.best_time = None;
        }
        self.player = name.to_string();
        self.tries_used = tries_used;
        self.phase = Phase::CountingDown {
            remaining: COUNTDOWN_TICKS,
        };
        Ok(())
    }

    /// Advances the countdown by one second. Returns `None` outside the
    /// `CountingDown` phase (a stale timer that was not cancelled in time).
    pub fn countdown_tick(&mut self) -> Option<Countdown> {
        match self.phase {
            Phase::CountingDown { remaining } if remaining > 1 => {
                self.phase = Phase::CountingDown {
                    remaining: remaining - 1,
                };
                Some(Countdown::Tick(remaining - 1))
            }
            Phase::CountingDown { .. } => {
                self.phase = Phase::Typing;
                Some(Countdown::Go)
            }
            _ => None,
        }
    }

    /// `Typing -> Finished`. Returns `None` when no session is in the typing
    /// phase, which is what makes the submit button and the Enter key
    /// mutually exclusive: whichever fires second sees `Finished` and does
    /// nothing.
    pub fn finish(&mut self, final_time: f64) -> Option<FinishSummary> {
        if self.phase != Phase::Typing {
            return None;
        }
        self.phase = Phase::Finished;
        self.tries_used += 1;
        let is_personal_best = self.best_time.is_none_or(|best| final_time < best);
        if is_personal_best {
            self.best_time = Some(final_time);
        }
        Some(FinishSummary {
            final_time,
            tries_used: self.tries_used,
            is_personal_best,
        })
    }
}

/// Classifies the typed text against the quote, one mark per quote
/// character: exact match, mismatch, or not yet typed. Extra typed
/// characters beyond the quote produce no marks (they only block
/// submission via the length check).
pub fn classify(quote: &str, typed: &str) -> Vec<CharMark> {
    let mut typed_chars = typed.chars();
    quote
        .chars()
        .map(|q| match typed_chars.next() {
            None => CharMark::Pending,
            Some(t) if t == q => CharMark::Correct,
            Some(_) => CharMark::Incorrect,
        })
        .collect()
}

/// Submission is permitted only for an exact full-length match: every
/// character correct and nothing trailing.
pub fn submission_allowed(quote: &str, typed: &str) -> bool {
    typed.chars().count() == quote.chars().count()
        && classify(quote, typed)
            .iter()
            .all(|m| matches!(m, CharMark::Correct))
}

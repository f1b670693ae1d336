//! Per-agent session: rate limiting and reported mode.
//!
//! A session wraps the decision engine for one agent identity across
//! repeated invocations. It is a pure rate limiter, not a scheduler:
//! decisions requested inside the cooldown window are dropped (answered
//! with [`Action::Wait`]), never queued or deferred.
//!
//! Each session is exclusively owned by its orchestrating loop; there is
//! no shared registry and no locking.

use std::time::{Duration, Instant};

use crate::action::Action;
use crate::arena::{Arena, CombatantId};
use crate::decision::{self, ExploreRng, Mode};

/// Minimum interval between two computed decisions.
pub const DECISION_COOLDOWN: Duration = Duration::from_millis(500);

/// Rate-limited decision state for one agent in one arena.
#[derive(Debug)]
pub struct Session {
    id: CombatantId,
    cooldown: Duration,
    last_decision: Option<Instant>,
    mode: Mode,
    rng: ExploreRng,
}

impl Session {
    /// Create a session for `id` with the default cooldown. `seed` drives
    /// the exploration shuffle.
    #[must_use]
    pub fn new(id: CombatantId, seed: u64) -> Self {
        Self {
            id,
            cooldown: DECISION_COOLDOWN,
            last_decision: None,
            mode: Mode::Idle,
            rng: ExploreRng::new(seed),
        }
    }

    /// Override the decision cooldown.
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// The agent identity this session decides for.
    #[must_use]
    pub fn id(&self) -> &CombatantId {
        &self.id
    }

    /// Mode reported by the most recent computed decision.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Compute the next action against `arena`, rate-limited by the
    /// monotonic clock.
    pub fn decide(&mut self, arena: &Arena) -> Action {
        self.decide_at(arena, Instant::now())
    }

    /// Clock-injected variant of [`Session::decide`].
    ///
    /// Inside the cooldown window this returns [`Action::Wait`] without
    /// evaluating anything or touching the reported mode. A missing or
    /// eliminated agent also yields [`Action::Wait`], leaving the mode
    /// untouched, since one bad snapshot must never crash a long-running
    /// loop.
    pub fn decide_at(&mut self, arena: &Arena, now: Instant) -> Action {
        if let Some(last) = self.last_decision {
            if now.duration_since(last) < self.cooldown {
                return Action::Wait;
            }
        }
        self.last_decision = Some(now);

        match decision::decide(arena, &self.id, &mut self.rng) {
            Some(decision) => {
                tracing::trace!(
                    agent = %self.id,
                    mode = ?decision.mode,
                    action = ?decision.action,
                    "decision"
                );
                self.mode = decision.mode;
                decision.action
            }
            None => Action::Wait,
        }
    }
}

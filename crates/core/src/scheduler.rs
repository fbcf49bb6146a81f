//! Scheduler module - gravity cadence and input dispatch
//!
//! The host loop calls [`GameLoop::frame`] roughly every `TICK_MS` and forwards player input
//! through [`GameLoop::dispatch`] as it arrives. Gravity fires at most once per frame, once
//! the session's drop interval has elapsed since the previous gravity step.
//!
//! Time comes from a [`Clock`], so tests can drive the loop with a [`ManualClock`].

use std::cell::Cell;
use std::time::Instant;

use crate::session::Session;
use crate::snapshot::GameSnapshot;
use crate::types::GameAction;

/// Monotonic millisecond time source
pub trait Clock {
    fn now_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Wall clock, milliseconds since construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock for tests and replays
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Gravity timer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scheduler {
    running: bool,
    last_drop_ms: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start the timer; the next gravity step is one full interval after `now_ms`.
    pub fn start(&mut self, now_ms: u64) {
        self.running = true;
        self.last_drop_ms = now_ms;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn last_drop_ms(&self) -> u64 {
        self.last_drop_ms
    }

    /// Run one frame. Returns true if a gravity step was applied.
    pub fn frame(&mut self, session: &mut Session, now_ms: u64) -> bool {
        if !self.running {
            return false;
        }
        if !session.is_active() {
            self.stop();
            return false;
        }

        let elapsed = now_ms.saturating_sub(self.last_drop_ms);
        if elapsed < session.drop_interval_ms() as u64 {
            return false;
        }

        session.gravity_tick();
        self.last_drop_ms = now_ms;

        if !session.is_active() {
            self.stop();
        }
        true
    }
}

/// A session driven by a scheduler and a clock
#[derive(Debug)]
pub struct GameLoop<C: Clock> {
    session: Session,
    scheduler: Scheduler,
    clock: C,
    disposed: bool,
}

impl<C: Clock> GameLoop<C> {
    pub fn new(session: Session, clock: C) -> Self {
        let mut game_loop = Self {
            session,
            scheduler: Scheduler::new(),
            clock,
            disposed: false,
        };
        if game_loop.session.is_active() {
            let now = game_loop.clock.now_ms();
            game_loop.scheduler.start(now);
        }
        game_loop
    }

    /// Apply a player action right away and keep the timer in step with the phase.
    ///
    /// Start and resume restart the gravity interval from now; pause and game over stop it.
    pub fn dispatch(&mut self, action: GameAction) -> bool {
        let was_active = self.session.is_active();
        let changed = self.session.apply_action(action);
        if !changed {
            return false;
        }

        if action == GameAction::Start {
            self.disposed = false;
        }

        let now = self.clock.now_ms();
        let active = self.session.is_active();
        if active && (action == GameAction::Start || !was_active) {
            if !self.disposed {
                self.scheduler.start(now);
            }
        } else if !active {
            self.scheduler.stop();
        }
        true
    }

    /// Run one scheduler frame at the clock's current time.
    pub fn frame(&mut self) -> bool {
        let now = self.clock.now_ms();
        self.scheduler.frame(&mut self.session, now)
    }

    /// Stop gravity until the next `Start`.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.scheduler.stop();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.session.snapshot()
    }
}

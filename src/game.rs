//! Frame driver glue: a [`Session`] plus the two interval clocks and the random
//! source. Whoever owns the animation loop calls [`Game::frame`] with the frame
//! timestamp; the game never schedules anything itself.

use rand::RngCore;

use crate::clock::IntervalClock;
use crate::config::RoundConfig;
use crate::session::{Catch, Session};
use crate::storage::HighScoreStore;

/// What happened during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub spawned: u32,
    pub dropped: usize,
    pub round_ended: bool,
}

pub struct Game<S: HighScoreStore, R: RngCore> {
    session: Session<S>,
    spawn_clock: IntervalClock,
    round_clock: IntervalClock,
    rng: R,
}

impl<S: HighScoreStore, R: RngCore> Game<S, R> {
    pub fn new(cfg: RoundConfig, store: S, rng: R, now: f64) -> Self {
        let session = Session::new(cfg, store);
        let spawn_clock = IntervalClock::new(session.config().spawn_interval_ms, now);
        let round_clock = IntervalClock::new(session.config().countdown_interval_ms, now);
        Self {
            session,
            spawn_clock,
            round_clock,
            rng,
        }
    }

    /// Start command: reset the round and re-arm both clocks at `now`.
    pub fn start(&mut self, now: f64) {
        self.session.start();
        self.spawn_clock.reset(now);
        self.round_clock.reset(now);
        log::info!(
            "round started ({}s, high score {})",
            self.session.time_left(),
            self.session.high_score()
        );
    }

    /// Run everything due at `now`: countdown first, then spawns, then one fall
    /// step. Does nothing while idle.
    pub fn frame(&mut self, now: f64) -> FrameReport {
        let mut report = FrameReport::default();
        if !self.session.is_running() {
            return report;
        }
        for _ in 0..self.round_clock.due(now) {
            if self.session.count_down() {
                report.round_ended = true;
                log::info!(
                    "time's up: score {} (high {})",
                    self.session.score(),
                    self.session.high_score()
                );
                return report;
            }
        }
        for _ in 0..self.spawn_clock.due(now) {
            if self.session.spawn(&mut self.rng).is_some() {
                report.spawned += 1;
            }
        }
        report.dropped = self.session.fall();
        report
    }

    pub fn tap(&mut self, px: f64, py: f64, area_w: f64, area_h: f64) -> Option<Catch> {
        let caught = self.session.tap(px, py, area_w, area_h);
        if let Some(c) = &caught {
            if c.new_high {
                log::info!("new high score {}", self.session.high_score());
            }
        }
        caught
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }
}

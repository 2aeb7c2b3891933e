//! Round state and the rules that mutate it: spawning, falling, countdown and
//! catching. Nothing in here touches the DOM; the browser driver (and the
//! tests) call these step functions directly.

use rand::Rng;

use crate::config::RoundConfig;
use crate::fruit::{Fruit, FruitId, FruitKind};
use crate::storage::{HighScoreStore, load_or_zero};

/// Idle covers both "never started" and "time expired".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Phase {
    Idle,
    Active,
}

/// Result of a successful tap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Catch {
    pub id: FruitId,
    pub kind: &'static FruitKind,
    pub new_high: bool,
}

/// Read-only view handed to the presentation layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot {
    pub fruits: Vec<Fruit>,
    pub score: u32,
    pub time_left: u32,
    pub high_score: u32,
    pub running: bool,
    pub over: bool,
}

pub struct Session<S: HighScoreStore> {
    cfg: RoundConfig,
    store: S,
    fruits: Vec<Fruit>,
    score: u32,
    time_left: u32,
    high_score: u32,
    phase: Phase,
    next_id: u64,
}

impl<S: HighScoreStore> Session<S> {
    pub fn new(cfg: RoundConfig, store: S) -> Self {
        let cfg = cfg.validate();
        let high_score = load_or_zero(&store);
        Self {
            time_left: cfg.round_secs,
            cfg,
            store,
            fruits: Vec::new(),
            score: 0,
            high_score,
            phase: Phase::Idle,
            next_id: 0,
        }
    }

    /// Begin (or restart) a round.
    pub fn start(&mut self) {
        self.score = 0;
        self.time_left = self.cfg.round_secs;
        self.fruits.clear();
        self.phase = Phase::Active;
    }

    /// Append one random fruit, evicting the oldest past the cap.
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<FruitId> {
        if !self.is_running() {
            return None;
        }
        let id = FruitId(self.next_id);
        self.next_id += 1;
        self.fruits.push(Fruit::spawn(id, &self.cfg, rng));
        self.evict_oldest();
        Some(id)
    }

    /// Insert a specific fruit (scripted spawns). Ignores the id on `fruit` and
    /// assigns a fresh one.
    pub fn push_fruit(&mut self, mut fruit: Fruit) -> Option<FruitId> {
        if !self.is_running() {
            return None;
        }
        fruit.id = FruitId(self.next_id);
        self.next_id += 1;
        let id = fruit.id;
        self.fruits.push(fruit);
        self.evict_oldest();
        Some(id)
    }

    fn evict_oldest(&mut self) {
        let excess = self.fruits.len().saturating_sub(self.cfg.max_fruits);
        if excess > 0 {
            self.fruits.drain(..excess);
        }
    }

    /// One animation frame of falling. Returns how many fruits dropped out.
    pub fn fall(&mut self) -> usize {
        if !self.is_running() {
            return 0;
        }
        let before = self.fruits.len();
        self.fruits = fall_step(&self.fruits, self.cfg.fall_rate, self.cfg.offscreen_y);
        before - self.fruits.len()
    }

    /// One second of the round clock. Returns true when this tick ended the round.
    pub fn count_down(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        if self.time_left <= 1 {
            self.time_left = 0;
            self.phase = Phase::Idle;
            return true;
        }
        self.time_left -= 1;
        false
    }

    /// Tap at pixel coordinates relative to a play area of `area_w` x `area_h`.
    pub fn tap(&mut self, px: f64, py: f64, area_w: f64, area_h: f64) -> Option<Catch> {
        if !(area_w > 0.0 && area_h > 0.0) {
            return None;
        }
        self.tap_percent(px / area_w * 100.0, py / area_h * 100.0, area_w, area_h)
    }

    /// Tap already expressed in percent space. The area size is still needed to
    /// turn each fruit's pixel size into a hit box.
    pub fn tap_percent(&mut self, x: f64, y: f64, area_w: f64, area_h: f64) -> Option<Catch> {
        if !self.is_running() {
            return None;
        }
        let tol = self.cfg.hit_tolerance;
        let idx = self
            .fruits
            .iter()
            .position(|f| f.contains(x, y, area_w, area_h, tol))?;
        let fruit = self.fruits.remove(idx);
        let new_high = self.credit(fruit.kind.points);
        Some(Catch {
            id: fruit.id,
            kind: fruit.kind,
            new_high,
        })
    }

    fn credit(&mut self, points: u32) -> bool {
        self.score = self.score.saturating_add(points);
        if self.score <= self.high_score {
            return false;
        }
        self.high_score = self.score;
        if let Err(e) = self.store.save(self.high_score) {
            log::warn!("{e}; keeping high score {} in memory", self.high_score);
        }
        true
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Active
    }

    /// True once a round has run out of time (and until the next start).
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Idle && self.time_left == 0
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn fruits(&self) -> &[Fruit] {
        &self.fruits
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn config(&self) -> &RoundConfig {
        &self.cfg
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            fruits: self.fruits.clone(),
            score: self.score,
            time_left: self.time_left,
            high_score: self.high_score,
            running: self.is_running(),
            over: self.is_over(),
        }
    }
}

/// Advance every fruit by one frame and drop the ones that left the screen.
pub fn fall_step(fruits: &[Fruit], fall_rate: f64, offscreen_y: f64) -> Vec<Fruit> {
    fruits
        .iter()
        .map(|f| Fruit {
            y: f.y + f.speed * fall_rate,
            ..f.clone()
        })
        .filter(|f| f.y < offscreen_y)
        .collect()
}

use crate::config::GameConfig;
use crate::dice::DiceRoller;
use crate::engine::GameEngine;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Scriptable dice for deterministic rolls.
pub struct FakeDice {
    queue: VecDeque<(u8, u8)>,
    fallback: (u8, u8),
}

impl FakeDice {
    /// Every draw lands on the same pair.
    pub fn always(die1: u8, die2: u8) -> Self {
        Self {
            queue: VecDeque::new(),
            fallback: (die1, die2),
        }
    }

    /// Draws consume the script in order, then fall back to snake eyes.
    pub fn scripted(pairs: impl IntoIterator<Item = (u8, u8)>) -> Self {
        Self {
            queue: pairs.into_iter().collect(),
            fallback: (1, 1),
        }
    }
}

impl DiceRoller for FakeDice {
    fn roll_pair(&mut self) -> (u8, u8) {
        self.queue.pop_front().unwrap_or(self.fallback)
    }
}

/// Hands out instants relative to a fixed origin, so tests can jump straight
/// to "2000ms in" without sleeping.
pub struct TestClock {
    origin: Instant,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn at(&self, millis: u64) -> Instant {
        self.origin + Duration::from_millis(millis)
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Engine over the default table rules whose dice always land the same way.
pub fn fixed_engine(die1: u8, die2: u8) -> GameEngine<FakeDice> {
    GameEngine::new(GameConfig::default(), FakeDice::always(die1, die2))
}

/// Engine over the default table rules with a dice script.
pub fn scripted_engine(pairs: impl IntoIterator<Item = (u8, u8)>) -> GameEngine<FakeDice> {
    GameEngine::new(GameConfig::default(), FakeDice::scripted(pairs))
}

//! Drives a roll from the button press to the result banner.
//!
//! The engine is clocked externally: callers hand it the current instant and
//! it catches up on everything that fell due, so the same code runs under the
//! real timer loop and under tests that jump time forward.

use crate::config::GameConfig;
use crate::dice::DiceRoller;
use crate::game::{BetOption, GameState, RollGate, RoundResult};
use std::time::Instant;
use tracing::{debug, info, trace};

#[derive(Copy, Clone, Debug)]
enum Phase {
    Idle,
    Rolling {
        bet: BetOption,
        wager: u64,
        next_spin: Instant,
        settle_at: Instant,
    },
    Settling {
        reveal_at: Instant,
    },
}

/// Plain-data view of the table for rendering.
#[derive(Clone, Debug)]
pub struct GameSnapshot {
    pub balance: u64,
    pub stake: u64,
    pub stake_min: u64,
    pub stake_max: u64,
    pub selected_bet: Option<BetOption>,
    pub die1: u8,
    pub die2: u8,
    pub rolling: bool,
    pub gate: RollGate,
    pub result: Option<RoundResult>,
    pub result_visible: bool,
}

pub struct GameEngine<D> {
    config: GameConfig,
    state: GameState,
    dice: D,
    phase: Phase,
}

impl<D: DiceRoller> GameEngine<D> {
    pub fn new(config: GameConfig, dice: D) -> Self {
        let state = GameState::new(&config);
        Self {
            config,
            state,
            dice,
            phase: Phase::Idle,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            balance: self.state.balance,
            stake: self.state.stake,
            stake_min: self.config.stake_min,
            stake_max: self.config.stake_max,
            selected_bet: self.state.selected_bet,
            die1: self.state.die1,
            die2: self.state.die2,
            rolling: self.state.rolling,
            gate: self.state.roll_gate(),
            result: self.state.last_result,
            result_visible: self.state.result_visible,
        }
    }

    pub fn select_bet(&mut self, bet: BetOption) {
        if self.state.rolling {
            return;
        }
        self.state.selected_bet = Some(bet);
        debug!(bet = bet.label(), "bet selected");
    }

    /// Clamps into the table bounds, then snaps down onto the step grid.
    pub fn set_stake(&mut self, value: u64) {
        if self.state.rolling {
            return;
        }
        let clamped = value.clamp(self.config.stake_min, self.config.stake_max);
        let step = self.config.stake_step.max(1);
        let snapped = clamped - (clamped - self.config.stake_min) % step;
        self.state.stake = snapped;
        debug!(stake = snapped, "stake set");
    }

    pub fn raise_stake(&mut self) {
        let target = self.state.stake.saturating_add(self.config.stake_step);
        self.set_stake(target);
    }

    pub fn lower_stake(&mut self) {
        let target = self.state.stake.saturating_sub(self.config.stake_step);
        self.set_stake(target);
    }

    /// Debits the stake and starts the animation timers. Refused unless the
    /// gate is open; callers do not need to pre-check.
    pub fn start_roll(&mut self, now: Instant) {
        let gate = self.state.roll_gate();
        if gate != RollGate::Ready {
            debug!(?gate, "roll refused");
            return;
        }
        let Some(bet) = self.state.selected_bet else {
            return;
        };
        let wager = self.state.stake;
        self.state.balance -= wager;
        self.state.rolling = true;
        self.state.last_result = None;
        self.state.result_visible = false;
        self.phase = Phase::Rolling {
            bet,
            wager,
            next_spin: now + self.config.spin_interval,
            settle_at: now + self.config.roll_duration,
        };
        info!(bet = bet.label(), wager, balance = self.state.balance, "roll started");
    }

    /// Replays every deadline that has passed, in order. Settling is checked
    /// before the spin tick so a late wakeup cannot shuffle the faces after
    /// the outcome has landed.
    pub fn advance(&mut self, now: Instant) {
        loop {
            match self.phase {
                Phase::Idle => break,
                Phase::Rolling {
                    bet,
                    wager,
                    next_spin,
                    settle_at,
                } => {
                    if settle_at <= now {
                        self.settle(bet, wager, settle_at);
                        continue;
                    }
                    if next_spin <= now {
                        let (die1, die2) = self.dice.roll_pair();
                        self.state.die1 = die1;
                        self.state.die2 = die2;
                        trace!(die1, die2, "spin tick");
                        self.phase = Phase::Rolling {
                            bet,
                            wager,
                            next_spin: next_spin + self.config.spin_interval,
                            settle_at,
                        };
                        continue;
                    }
                    break;
                }
                Phase::Settling { reveal_at } => {
                    if reveal_at <= now {
                        self.state.result_visible = true;
                        self.phase = Phase::Idle;
                        debug!("result revealed");
                        continue;
                    }
                    break;
                }
            }
        }
    }

    /// Next instant `advance` has work to do, if any timer is armed.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Idle => None,
            Phase::Rolling {
                next_spin,
                settle_at,
                ..
            } => Some(next_spin.min(settle_at)),
            Phase::Settling { reveal_at } => Some(reveal_at),
        }
    }

    /// Back to a clean slate for the next round. Balance and dice faces stay.
    pub fn reset(&mut self) {
        self.state.selected_bet = None;
        self.state.last_result = None;
        self.state.result_visible = false;
        if let Phase::Settling { .. } = self.phase {
            self.phase = Phase::Idle;
        }
        debug!("table reset");
    }

    /// The outcome comes from a fresh draw, not from the last spin faces.
    fn settle(&mut self, bet: BetOption, wager: u64, settled_at: Instant) {
        let (die1, die2) = self.dice.roll_pair();
        self.state.die1 = die1;
        self.state.die2 = die2;
        let sum = die1 + die2;
        let won = bet.wins(sum);
        let payout = if won { wager * bet.payout_multiplier() } else { 0 };
        self.state.balance += payout;
        self.state.last_result = Some(RoundResult {
            bet,
            sum,
            won,
            payout,
        });
        self.state.rolling = false;
        self.phase = Phase::Settling {
            reveal_at: settled_at + self.config.reveal_delay,
        };
        info!(
            die1,
            die2,
            sum,
            won,
            payout,
            balance = self.state.balance,
            "roll settled"
        );
    }
}

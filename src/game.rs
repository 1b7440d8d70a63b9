//! Core table state for the two-dice betting game.

use crate::config::GameConfig;

/// The three ways to bet against a two-dice sum.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BetOption {
    Below,
    Equal,
    Above,
}

impl BetOption {
    pub const ALL: [BetOption; 3] = [BetOption::Below, BetOption::Equal, BetOption::Above];

    pub fn label(self) -> &'static str {
        match self {
            BetOption::Below => "Below 7",
            BetOption::Equal => "Equal to 7",
            BetOption::Above => "Above 7",
        }
    }

    /// Stake multiplier credited on a win. The losing stake is already gone.
    pub fn payout_multiplier(self) -> u64 {
        match self {
            BetOption::Below => 2,
            BetOption::Equal => 5,
            BetOption::Above => 2,
        }
    }

    pub fn wins(self, sum: u8) -> bool {
        match self {
            BetOption::Below => sum < 7,
            BetOption::Equal => sum == 7,
            BetOption::Above => sum > 7,
        }
    }
}

/// Outcome of a settled roll, kept around until the next roll or reset.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RoundResult {
    pub bet: BetOption,
    pub sum: u8,
    pub won: bool,
    /// Amount credited back to the balance. Zero on a loss.
    pub payout: u64,
}

/// What stands between the player and the roll action right now.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RollGate {
    Ready,
    RollInProgress,
    InsufficientBalance,
    NoBetSelected,
}

/// Everything the table remembers between key presses.
#[derive(Clone, Debug)]
pub struct GameState {
    pub balance: u64,
    pub stake: u64,
    pub selected_bet: Option<BetOption>,
    pub die1: u8,
    pub die2: u8,
    pub rolling: bool,
    pub last_result: Option<RoundResult>,
    pub result_visible: bool,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            balance: config.starting_balance,
            stake: config.starting_stake,
            selected_bet: None,
            die1: 1,
            die2: 1,
            rolling: false,
            last_result: None,
            result_visible: false,
        }
    }

    pub fn sum(&self) -> u8 {
        self.die1 + self.die2
    }

    /// Checks are ordered so an in-flight roll wins over a thin balance,
    /// and a thin balance wins over a missing selection.
    pub fn roll_gate(&self) -> RollGate {
        if self.rolling {
            RollGate::RollInProgress
        } else if self.balance < self.stake {
            RollGate::InsufficientBalance
        } else if self.selected_bet.is_none() {
            RollGate::NoBetSelected
        } else {
            RollGate::Ready
        }
    }
}

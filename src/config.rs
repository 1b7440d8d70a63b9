//! Table rules and timing knobs.

use std::time::Duration;

/// Rules of the table: bankroll, stake bounds, and roll timing.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Bankroll a fresh session starts with.
    pub starting_balance: u64,

    /// Stake preselected before the player touches anything.
    pub starting_stake: u64,

    /// Smallest stake the table accepts.
    pub stake_min: u64,

    /// Largest stake the table accepts.
    pub stake_max: u64,

    /// Step the stake moves by. Must be non-zero.
    pub stake_step: u64,

    /// How often the dice faces shuffle while a roll is in flight.
    pub spin_interval: Duration,

    /// How long a roll animates before the outcome is drawn.
    pub roll_duration: Duration,

    /// Pause between the outcome landing and the result banner showing.
    pub reveal_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_balance: 100_000,
            starting_stake: 5_000,
            stake_min: 1_000,
            stake_max: 20_000,
            stake_step: 1_000,
            spin_interval: Duration::from_millis(100),
            roll_duration: Duration::from_millis(2_000),
            reveal_delay: Duration::from_millis(500),
        }
    }
}

impl GameConfig {
    /// Config with a custom starting bankroll.
    pub fn with_starting_balance(mut self, balance: u64) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Config with a custom preselected stake.
    pub fn with_starting_stake(mut self, stake: u64) -> Self {
        self.starting_stake = stake;
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn default__matches_the_table_rules() {
        let config = GameConfig::default();

        assert_eq!(100_000, config.starting_balance);
        assert_eq!(5_000, config.starting_stake);
        assert_eq!(1_000, config.stake_min);
        assert_eq!(20_000, config.stake_max);
        assert_eq!(1_000, config.stake_step);
        assert_eq!(Duration::from_millis(100), config.spin_interval);
        assert_eq!(Duration::from_millis(2_000), config.roll_duration);
        assert_eq!(Duration::from_millis(500), config.reveal_delay);
    }

    #[test]
    fn builders__override_single_fields() {
        let config = GameConfig::default()
            .with_starting_balance(10_000)
            .with_starting_stake(2_000);

        assert_eq!(10_000, config.starting_balance);
        assert_eq!(2_000, config.starting_stake);
        assert_eq!(1_000, config.stake_min);
    }
}

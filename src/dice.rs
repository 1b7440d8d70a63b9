//! Dice randomness behind a trait so tests can script the outcome.

use rand::Rng;

pub trait DiceRoller {
    /// Two independent uniform draws from 1 to 6.
    fn roll_pair(&mut self) -> (u8, u8);
}

/// Draws from the thread-local generator.
#[derive(Copy, Clone, Debug, Default)]
pub struct RandomDice;

impl DiceRoller for RandomDice {
    fn roll_pair(&mut self) -> (u8, u8) {
        let mut rng = rand::rng();
        (rng.random_range(1..=6), rng.random_range(1..=6))
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn roll_pair__stays_on_the_faces() {
        let mut dice = RandomDice;
        for _ in 0..1_000 {
            let (die1, die2) = dice.roll_pair();
            assert!((1..=6).contains(&die1));
            assert!((1..=6).contains(&die2));
        }
    }
}

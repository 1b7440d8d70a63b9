pub mod config;

pub mod dice;

pub mod engine;

pub mod game;

pub mod test_helpers;

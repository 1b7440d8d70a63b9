#![allow(non_snake_case)]
use lucky_seven::config::GameConfig;
use lucky_seven::engine::GameEngine;
use lucky_seven::game::{BetOption, RollGate};
use lucky_seven::test_helpers::{FakeDice, TestClock, fixed_engine, scripted_engine};

#[test]
fn roll_dice__is_refused_without_a_bet() {
    // given
    let clock = TestClock::new();
    let mut engine = fixed_engine(3, 4);

    // when
    engine.start_roll(clock.at(0));
    engine.advance(clock.at(5_000));

    // then: nothing moved and no timers were armed
    assert_eq!(100_000, engine.state().balance);
    assert!(!engine.state().rolling);
    assert_eq!((1, 1), (engine.state().die1, engine.state().die2));
    assert_eq!(None, engine.state().last_result);
    assert_eq!(None, engine.next_deadline());
}

#[test]
fn roll_dice__is_refused_when_the_stake_outruns_the_balance() {
    // given
    let config = GameConfig::default().with_starting_balance(10_000);
    let clock = TestClock::new();
    let mut engine = GameEngine::new(config, FakeDice::always(3, 4));
    engine.select_bet(BetOption::Equal);
    engine.set_stake(20_000);
    assert_eq!(RollGate::InsufficientBalance, engine.state().roll_gate());

    // when
    engine.start_roll(clock.at(0));

    // then
    assert_eq!(10_000, engine.state().balance);
    assert!(!engine.state().rolling);
    assert_eq!(None, engine.next_deadline());
}

#[test]
fn roll_dice__animates_then_settles_on_a_fresh_draw() {
    // given: cosmetic pairs first, the deciding pair last
    let clock = TestClock::new();
    let mut engine = scripted_engine([(6, 6), (5, 1), (3, 4)]);
    engine.select_bet(BetOption::Equal);
    engine.start_roll(clock.at(0));

    // when: two animation ticks
    engine.advance(clock.at(100));
    assert_eq!((6, 6), (engine.state().die1, engine.state().die2));
    engine.advance(clock.at(200));
    assert_eq!((5, 1), (engine.state().die1, engine.state().die2));
    assert!(engine.state().rolling);

    // and the roll runs out
    engine.advance(clock.at(2_000));

    // then: the outcome is the final draw, not the last cosmetic pair
    assert_eq!((3, 4), (engine.state().die1, engine.state().die2));
    assert!(!engine.state().rolling);
    let result = engine.state().last_result.unwrap();
    assert_eq!(7, result.sum);
    assert!(result.won);
}

#[test]
fn roll_dice__equal_bet_on_a_seven_pays_five_to_one() {
    // given
    let clock = TestClock::new();
    let mut engine = fixed_engine(3, 4);
    engine.select_bet(BetOption::Equal);
    engine.set_stake(5_000);

    // when
    engine.start_roll(clock.at(0));
    assert_eq!(95_000, engine.state().balance);
    engine.advance(clock.at(2_000));

    // then
    assert_eq!(120_000, engine.state().balance);
    let result = engine.state().last_result.unwrap();
    assert_eq!(BetOption::Equal, result.bet);
    assert_eq!(7, result.sum);
    assert!(result.won);
    assert_eq!(25_000, result.payout);
}

#[test]
fn roll_dice__below_bet_on_a_ten_loses_the_stake() {
    // given
    let clock = TestClock::new();
    let mut engine = fixed_engine(5, 5);
    engine.select_bet(BetOption::Below);
    engine.set_stake(2_000);

    // when
    engine.start_roll(clock.at(0));
    engine.advance(clock.at(2_000));

    // then
    assert_eq!(98_000, engine.state().balance);
    let result = engine.state().last_result.unwrap();
    assert_eq!(10, result.sum);
    assert!(!result.won);
    assert_eq!(0, result.payout);
}

#[test]
fn roll_dice__above_bet_on_an_eleven_pays_two_to_one() {
    // given
    let clock = TestClock::new();
    let mut engine = fixed_engine(5, 6);
    engine.select_bet(BetOption::Above);
    engine.set_stake(10_000);

    // when
    engine.start_roll(clock.at(0));
    engine.advance(clock.at(2_000));

    // then: 10_000 went in, 20_000 came back
    assert_eq!(110_000, engine.state().balance);
    let result = engine.state().last_result.unwrap();
    assert_eq!(11, result.sum);
    assert!(result.won);
    assert_eq!(20_000, result.payout);
}

#[test]
fn roll_dice__shows_the_result_after_the_reveal_delay() {
    // given
    let clock = TestClock::new();
    let mut engine = fixed_engine(3, 4);
    engine.select_bet(BetOption::Equal);
    engine.start_roll(clock.at(0));

    // when / then: hidden all through the animation and the pause
    engine.advance(clock.at(1_000));
    assert!(!engine.state().result_visible);

    engine.advance(clock.at(2_000));
    assert!(engine.state().last_result.is_some());
    assert!(!engine.state().result_visible);

    engine.advance(clock.at(2_500));
    assert!(engine.state().result_visible);
}

#[test]
fn roll_dice__can_stake_the_entire_balance() {
    // given
    let config = GameConfig::default().with_starting_balance(20_000);
    let clock = TestClock::new();
    let mut engine = GameEngine::new(config, FakeDice::always(3, 3));
    engine.select_bet(BetOption::Above);
    engine.set_stake(20_000);
    assert_eq!(RollGate::Ready, engine.state().roll_gate());

    // when: the whole bankroll rides and loses
    engine.start_roll(clock.at(0));
    engine.advance(clock.at(2_000));

    // then
    assert_eq!(0, engine.state().balance);
    assert!(!engine.state().last_result.unwrap().won);
}

#[test]
fn roll_dice__keeps_the_selection_for_the_next_roll() {
    // given: a finished round
    let clock = TestClock::new();
    let mut engine = fixed_engine(3, 4);
    engine.select_bet(BetOption::Equal);
    engine.start_roll(clock.at(0));
    engine.advance(clock.at(2_500));
    assert!(engine.state().result_visible);

    // when: rolling again without touching the selection
    engine.start_roll(clock.at(3_000));

    // then: the same bet rides again
    assert!(engine.state().rolling);
    assert_eq!(None, engine.state().last_result);
    assert!(!engine.state().result_visible);
    engine.advance(clock.at(5_000));
    assert_eq!(BetOption::Equal, engine.state().last_result.unwrap().bet);
}

use crate::ui;
use color_eyre::eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use lucky_seven::config::GameConfig;
use lucky_seven::dice::{DiceRoller, RandomDice};
use lucky_seven::engine::GameEngine;
use std::time::Instant;
use tokio::time;

pub async fn run() -> Result<()> {
    let mut engine = GameEngine::new(GameConfig::default(), RandomDice);
    let mut ui_state = ui::UiState::default();

    // UI bootstrap
    ui::terminal_enter(&mut ui_state)?;
    let res = run_loop(&mut engine, &mut ui_state).await;
    ui::terminal_exit()?;
    res
}

async fn run_loop<D: DiceRoller>(
    engine: &mut GameEngine<D>,
    ui_state: &mut ui::UiState,
) -> Result<()> {
    let mut events = EventStream::new();
    ui::draw(ui_state, &engine.snapshot())?;
    loop {
        // Sleep only as long as the engine has work scheduled
        let deadline = engine.next_deadline();
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            // Fell due; the advance below the select picks it up
            _ = wait_until(deadline) => {}
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        match ui::handle_key(ui_state, key) {
                            Some(ui::UserEvent::Quit) => break,
                            Some(ui::UserEvent::SelectBet(bet)) => engine.select_bet(bet),
                            Some(ui::UserEvent::StakeUp) => engine.raise_stake(),
                            Some(ui::UserEvent::StakeDown) => engine.lower_stake(),
                            Some(ui::UserEvent::Roll) => engine.start_roll(Instant::now()),
                            Some(ui::UserEvent::Reset) => engine.reset(),
                            Some(ui::UserEvent::Redraw) | None => {}
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }
        }
        engine.advance(Instant::now());
        ui::draw(ui_state, &engine.snapshot())?;
    }
    Ok(())
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => time::sleep_until(time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use itertools::Itertools;
use lucky_seven::engine::GameSnapshot;
use lucky_seven::game::{BetOption, RollGate};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::io::stdout;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum UserEvent {
    Quit,
    SelectBet(BetOption),
    StakeUp,
    StakeDown,
    Roll,
    Reset,
    Redraw,
}

#[derive(Debug)]
pub struct UiState {
    mode: Mode,
    terminal: Option<Terminal<CrosstermBackend<std::io::Stdout>>>,
}

impl Default for UiState {
    fn default() -> Self {
        UiState {
            mode: Mode::Normal,
            terminal: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
enum Mode {
    #[default]
    Normal,
    QuitModal,
}

pub fn terminal_enter(state: &mut UiState) -> Result<()> {
    enable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    // One persistent Terminal so buffers survive across draws
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    state.terminal = Some(terminal);
    Ok(())
}

pub fn terminal_exit() -> Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub fn draw(state: &mut UiState, snap: &GameSnapshot) -> Result<()> {
    if let Some(mut term) = state.terminal.take() {
        term.draw(|f| ui(f, state, snap))?;
        state.terminal = Some(term);
    }
    Ok(())
}

/// Turns a key press into a game intent, or swallows it for UI-only state.
pub fn handle_key(state: &mut UiState, key: KeyEvent) -> Option<UserEvent> {
    match state.mode {
        Mode::QuitModal => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(UserEvent::Quit),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                state.mode = Mode::Normal;
                Some(UserEvent::Redraw)
            }
            _ => None,
        },
        Mode::Normal => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                state.mode = Mode::QuitModal;
                Some(UserEvent::Redraw)
            }
            KeyCode::Char('1') => Some(UserEvent::SelectBet(BetOption::Below)),
            KeyCode::Char('2') => Some(UserEvent::SelectBet(BetOption::Equal)),
            KeyCode::Char('3') => Some(UserEvent::SelectBet(BetOption::Above)),
            KeyCode::Left | KeyCode::Char('-') => Some(UserEvent::StakeDown),
            KeyCode::Right | KeyCode::Char('+') => Some(UserEvent::StakeUp),
            KeyCode::Char('r') | KeyCode::Enter => Some(UserEvent::Roll),
            KeyCode::Char('n') => Some(UserEvent::Reset),
            _ => None,
        },
    }
}

fn ui(f: &mut Frame, state: &UiState, snap: &GameSnapshot) {
    // Clear the whole frame to avoid leftover fragments
    f.render_widget(Clear, f.area());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // balance
            Constraint::Length(7), // dice + sum
            Constraint::Length(3), // stake gauge
            Constraint::Length(4), // bet options
            Constraint::Length(3), // roll button
            Constraint::Length(6), // result banner
            Constraint::Length(4), // rules + help
        ])
        .split(f.area());

    draw_balance(f, chunks[0], snap);
    draw_dice(f, chunks[1], snap);
    draw_stake(f, chunks[2], snap);
    draw_bets(f, chunks[3], snap);
    draw_roll_button(f, chunks[4], snap);
    draw_result(f, chunks[5], snap);
    draw_help(f, chunks[6]);
    draw_modals(f, state);
}

fn draw_balance(f: &mut Frame, area: Rect, snap: &GameSnapshot) {
    let balance = Paragraph::new(format!("Balance: Rp {}", thousands(snap.balance)))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("🎲 Lucky Seven"));
    f.render_widget(balance, area);
}

fn draw_dice(f: &mut Frame, area: Rect, snap: &GameSnapshot) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Length(1), Constraint::Min(0)])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(11),
            Constraint::Length(3),
            Constraint::Length(11),
            Constraint::Min(0),
        ])
        .split(rows[0]);

    draw_die(f, cols[1], snap.die1, snap.rolling);
    if cols[2].height > 2 {
        let plus = Paragraph::new("+").alignment(Alignment::Center);
        f.render_widget(plus, Rect::new(cols[2].x, cols[2].y + 2, cols[2].width, 1));
    }
    draw_die(f, cols[3], snap.die2, snap.rolling);

    let sum = Paragraph::new(format!("Sum: {}", snap.die1 + snap.die2))
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(sum, rows[1]);
}

fn draw_die(f: &mut Frame, area: Rect, value: u8, rolling: bool) {
    let style = if rolling {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .padding(Padding::horizontal(1));
    let face = Paragraph::new(pip_lines(value)).style(style);
    f.render_widget(&block, area);
    f.render_widget(face, block.inner(area));
}

fn draw_stake(f: &mut Frame, area: Rect, snap: &GameSnapshot) {
    let span = snap.stake_max.saturating_sub(snap.stake_min).max(1);
    let ratio = (snap.stake.saturating_sub(snap.stake_min)) as f64 / span as f64;
    let color = if snap.rolling { Color::DarkGray } else { Color::Cyan };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Bet Amount"))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("Rp {}", thousands(snap.stake)));
    f.render_widget(gauge, area);
}

fn draw_bets(f: &mut Frame, area: Rect, snap: &GameSnapshot) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    for (i, option) in BetOption::ALL.iter().enumerate() {
        let selected = snap.selected_bet == Some(*option);
        let style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if snap.rolling {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let title = format!("[{}] {}", i + 1, option.label());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(Span::styled(title, style));
        let caption = Paragraph::new(format!("{}x payout", option.payout_multiplier()))
            .alignment(Alignment::Center)
            .style(style);
        f.render_widget(&block, cols[i]);
        f.render_widget(caption, block.inner(cols[i]));
    }
}

fn draw_roll_button(f: &mut Frame, area: Rect, snap: &GameSnapshot) {
    let (label, style) = match snap.gate {
        RollGate::Ready => (
            format!("Roll Dice - Bet Rp {}", thousands(snap.stake)),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        RollGate::RollInProgress => (
            String::from("Rolling..."),
            Style::default().fg(Color::Yellow),
        ),
        RollGate::InsufficientBalance => (
            String::from("Insufficient Balance"),
            Style::default().fg(Color::DarkGray),
        ),
        RollGate::NoBetSelected => (
            String::from("Select a Bet First"),
            Style::default().fg(Color::DarkGray),
        ),
    };
    let button = Paragraph::new(label)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("[r]"));
    f.render_widget(button, area);
}

fn draw_result(f: &mut Frame, area: Rect, snap: &GameSnapshot) {
    if !snap.result_visible {
        return;
    }
    let Some(result) = snap.result else {
        return;
    };
    let (headline, color) = if result.won {
        ("🎉 You Win!", Color::Green)
    } else {
        ("You Lose", Color::Red)
    };
    let mut lines = vec![
        Line::styled(
            headline,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Line::from(format!("Dice Sum: {} ({})", result.sum, result.bet.label())),
    ];
    if result.won {
        lines.push(Line::styled(
            format!("You won Rp {}", thousands(result.payout)),
            Style::default().fg(Color::Yellow),
        ));
    }
    lines.push(Line::from("[n] new round"));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title("Result");
    let p = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(&block, area);
    f.render_widget(p, block.inner(area));
}

fn draw_help(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("Below 7 or Above 7 win 2x the stake, Equal to 7 wins 5x"),
        Line::from("1/2/3 bet | left/right stake | r roll | n new round | q quit"),
    ];
    let help = Paragraph::new(lines)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title("Rules"));
    f.render_widget(help, area);
}

fn draw_modals(f: &mut Frame, state: &UiState) {
    if let Mode::QuitModal = state.mode {
        let area = centered_rect(40, 20, f.area());
        let block = Block::default().borders(Borders::ALL).title("Confirm Quit");
        let p = Paragraph::new("Quit the game? (Y/N)").alignment(Alignment::Center);
        f.render_widget(Clear, area);
        f.render_widget(&block, area);
        f.render_widget(p, block.inner(area));
    }
}

fn centered_rect(w_percent: u16, h_percent: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - h_percent) / 2),
            Constraint::Percentage(h_percent),
            Constraint::Percentage((100 - h_percent) / 2),
        ])
        .split(r);

    let vertical = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - w_percent) / 2),
            Constraint::Percentage(w_percent),
            Constraint::Percentage((100 - w_percent) / 2),
        ])
        .split(popup_layout[1]);

    vertical[1]
}

/// "Rp" formatting with dot separators, e.g. 100000 -> "100.000".
fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let reversed = digits.chars().rev();
    let chunks = reversed.chunks(3);
    let grouped = chunks
        .into_iter()
        .map(|chunk| chunk.collect::<String>())
        .join(".");
    grouped.chars().rev().collect()
}

fn pip_grid(value: u8) -> [[bool; 3]; 3] {
    let mut grid = [[false; 3]; 3];
    let pips: &[(usize, usize)] = match value {
        1 => &[(1, 1)],
        2 => &[(0, 0), (2, 2)],
        3 => &[(0, 0), (1, 1), (2, 2)],
        4 => &[(0, 0), (0, 2), (2, 0), (2, 2)],
        5 => &[(0, 0), (0, 2), (1, 1), (2, 0), (2, 2)],
        _ => &[(0, 0), (0, 2), (1, 0), (1, 2), (2, 0), (2, 2)],
    };
    for &(row, col) in pips {
        grid[row][col] = true;
    }
    grid
}

fn pip_lines(value: u8) -> Vec<Line<'static>> {
    pip_grid(value)
        .iter()
        .map(|row| {
            let cells: Vec<&str> = row.iter().map(|on| if *on { "●" } else { " " }).collect();
            Line::from(cells.join("  "))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn thousands__groups_digits_with_dots() {
        assert_eq!("0", thousands(0));
        assert_eq!("100", thousands(100));
        assert_eq!("1.000", thousands(1_000));
        assert_eq!("20.000", thousands(20_000));
        assert_eq!("100.000", thousands(100_000));
        assert_eq!("1.234.567", thousands(1_234_567));
    }

    #[test]
    fn pip_grid__places_as_many_pips_as_the_face_value() {
        for value in 1..=6u8 {
            let pips = pip_grid(value)
                .iter()
                .flatten()
                .filter(|on| **on)
                .count();
            assert_eq!(value as usize, pips);
        }
    }

    #[test]
    fn pip_grid__centers_the_single_pip() {
        let expected = [[false, false, false], [false, true, false], [false, false, false]];
        assert_eq!(expected, pip_grid(1));
    }

    #[test]
    fn handle_key__maps_the_bet_and_stake_keys() {
        let mut state = UiState::default();

        let cases = [
            (KeyCode::Char('1'), UserEvent::SelectBet(BetOption::Below)),
            (KeyCode::Char('2'), UserEvent::SelectBet(BetOption::Equal)),
            (KeyCode::Char('3'), UserEvent::SelectBet(BetOption::Above)),
            (KeyCode::Left, UserEvent::StakeDown),
            (KeyCode::Right, UserEvent::StakeUp),
            (KeyCode::Char('r'), UserEvent::Roll),
            (KeyCode::Enter, UserEvent::Roll),
            (KeyCode::Char('n'), UserEvent::Reset),
        ];
        for (code, expected) in cases {
            assert_eq!(Some(expected), handle_key(&mut state, press(code)));
        }

        assert_eq!(None, handle_key(&mut state, press(KeyCode::Char('x'))));
    }

    #[test]
    fn handle_key__quit_needs_a_confirmation() {
        let mut state = UiState::default();

        // 'q' only opens the modal
        assert_eq!(
            Some(UserEvent::Redraw),
            handle_key(&mut state, press(KeyCode::Char('q')))
        );

        // 'n' backs out, game keys work again
        assert_eq!(
            Some(UserEvent::Redraw),
            handle_key(&mut state, press(KeyCode::Char('n')))
        );
        assert_eq!(
            Some(UserEvent::Roll),
            handle_key(&mut state, press(KeyCode::Char('r')))
        );

        // 'y' inside the modal quits
        handle_key(&mut state, press(KeyCode::Esc));
        assert_eq!(
            Some(UserEvent::Quit),
            handle_key(&mut state, press(KeyCode::Char('y')))
        );
    }
}

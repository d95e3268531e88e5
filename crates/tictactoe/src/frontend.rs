//! Line-oriented terminal front end.
//!
//! Reads commands from stdin, forwards them to a [`GameSession`] and prints
//! the board after every change. Fired computer tickets arrive on their own
//! channel and are handled in the same loop, so the session is only ever
//! touched from one task.

use crate::scheduler::TokioScheduler;
use anyhow::Result;
use tictactoe_core::{
    GameEvent, GameSession, Outcome, Player, PlayerMode, Position, Scheduler, SessionConfig,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

const HELP: &str = "\
Commands:
  mode 1|2      1 = against the computer, 2 = two players
  symbol x|o    mark that moves first (yours, against the computer)
  play N        mark square N (0-8, or a name like 'center'); a bare digit works too
  jump K        go back to movement #K (0 = game start)
  history       list the recorded moves
  board         show the board again
  new           start a new game
  help          show this text
  quit          leave";

/// A parsed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Choose single- or two-player.
    Mode(PlayerMode),
    /// Choose the starting mark.
    Symbol(Player),
    /// Mark a square by raw index.
    Play(usize),
    /// Move the history cursor.
    Jump(usize),
    /// List history entries.
    History,
    /// Redraw the board.
    Board,
    /// Start over.
    New,
    /// Show commands.
    Help,
    /// Exit.
    Quit,
}

impl Input {
    /// Parses one line. `None` for anything unrecognised.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let command = words.next()?.to_lowercase();
        let arg = words.next();
        if words.next().is_some() {
            return None;
        }

        match (command.as_str(), arg) {
            ("mode", Some("1")) => Some(Input::Mode(PlayerMode::SinglePlayer)),
            ("mode", Some("2")) => Some(Input::Mode(PlayerMode::TwoPlayer)),
            ("symbol", Some(mark)) => mark.parse().ok().map(Input::Symbol),
            ("play", Some(cell)) => parse_cell(cell).map(Input::Play),
            ("jump", Some(k)) => k.parse().ok().map(Input::Jump),
            ("history", None) => Some(Input::History),
            ("board", None) => Some(Input::Board),
            ("new", None) => Some(Input::New),
            ("help" | "?", None) => Some(Input::Help),
            ("quit" | "exit" | "q", None) => Some(Input::Quit),
            (digits, None) if digits.chars().all(|c| c.is_ascii_digit()) => {
                digits.parse().ok().map(Input::Play)
            }
            _ => None,
        }
    }
}

/// Raw numbers pass through so the controller can reject them; names map to
/// their index.
fn parse_cell(cell: &str) -> Option<usize> {
    cell.parse::<usize>()
        .ok()
        .or_else(|| Position::from_label_or_number(cell).map(Position::to_index))
}

/// Terminal application state.
pub struct App<S: Scheduler> {
    session: GameSession<S>,
    events: mpsc::UnboundedReceiver<GameEvent>,
}

impl<S: Scheduler> App<S> {
    /// Wraps `session`, routing its events into the printed log.
    pub fn new(mut session: GameSession<S>) -> Self {
        let (event_tx, events) = mpsc::unbounded_channel();
        session.subscribe(move |event| {
            // The app owns the receiver; a send can only fail during drop.
            let _ = event_tx.send(*event);
        });
        Self { session, events }
    }

    /// The wrapped session.
    pub fn session(&self) -> &GameSession<S> {
        &self.session
    }

    /// Applies one input and returns the lines to print, or `None` to quit.
    #[instrument(skip(self))]
    pub fn handle_input(&mut self, input: Input) -> Option<Vec<String>> {
        let result = match input {
            Input::Mode(mode) => self.session.set_player_mode(mode),
            Input::Symbol(mark) => self.session.select_symbol(mark),
            Input::Play(cell) => self.session.apply_move(cell).map(|_| ()),
            Input::Jump(k) => self.session.jump_to(k),
            Input::New => {
                self.session.reset_game();
                Ok(())
            }
            Input::History => return Some(self.history_lines()),
            Input::Board => return Some(self.render()),
            Input::Help => return Some(vec![HELP.to_string()]),
            Input::Quit => return None,
        };

        let mut lines = Vec::new();
        if let Err(e) = result {
            debug!(error = %e, "Command rejected");
            lines.push(format!("Rejected: {}", e));
        }
        lines.extend(self.drain_events());
        lines.extend(self.render());
        Some(lines)
    }

    /// Handles a fired computer ticket.
    pub fn handle_ticket(&mut self, ticket: tictactoe_core::TurnTicket) -> Vec<String> {
        if self.session.fire(ticket).is_none() {
            return Vec::new();
        }
        let mut lines = self.drain_events();
        lines.extend(self.render());
        lines
    }

    fn drain_events(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            if let Some(line) = self.handle_event(event) {
                lines.push(line);
            }
        }
        lines
    }

    /// Log line for a game event.
    pub fn handle_event(&self, event: GameEvent) -> Option<String> {
        debug!(?event, "Handling game event");
        match event {
            GameEvent::ModeSelected(mode) => Some(format!("Mode: {}", mode)),
            GameEvent::SymbolSelected {
                first,
                computer: Some(computer),
            } => Some(format!("You are {}, the computer is {}", first, computer)),
            GameEvent::SymbolSelected {
                first,
                computer: None,
            } => Some(format!("{} starts", first)),
            GameEvent::MovePlayed { action, move_index } => {
                let who = if Some(action.player) == self.session.computer_mark() {
                    "Computer"
                } else {
                    "Player"
                };
                Some(format!(
                    "#{} {} {} takes {}",
                    move_index,
                    who,
                    action.player,
                    action.position.label()
                ))
            }
            GameEvent::Jumped { move_index, .. } => Some(format!("Back to movement #{}", move_index)),
            GameEvent::GameOver(_) => None,
            GameEvent::Reset => Some("New game".to_string()),
        }
    }

    /// Board grid followed by the status line.
    pub fn render(&self) -> Vec<String> {
        vec![
            String::new(),
            self.session.current_board().display(),
            String::new(),
            self.status_line(),
        ]
    }

    /// One-line summary of whose turn it is or how the game ended.
    pub fn status_line(&self) -> String {
        match self.session.current_outcome() {
            Outcome::Winner { player, line } => {
                format!("Winner: {} ({:?} {})", player, line.kind(), line.id())
            }
            Outcome::Draw => "Draw".to_string(),
            Outcome::InProgress => match (self.session.player_mode(), self.session.to_move()) {
                (PlayerMode::Unset, _) => {
                    "Choose a mode: 'mode 1' against the computer, 'mode 2' for two players"
                        .to_string()
                }
                (_, None) => "Choose who starts: 'symbol x' or 'symbol o'".to_string(),
                (_, Some(mark)) if Some(mark) == self.session.computer_mark() => {
                    format!("Next player: {} (computer is thinking...)", mark)
                }
                (_, Some(mark)) => format!("Next player: {}", mark),
            },
        }
    }

    /// One entry per snapshot, the current one marked.
    pub fn history_lines(&self) -> Vec<String> {
        let current = self.session.current_move_index();
        (0..self.session.history_len())
            .map(|k| {
                let label = if k == 0 {
                    "Go to game start".to_string()
                } else {
                    format!("Go to movement #{}", k)
                };
                let marker = if k == current { ">" } else { " " };
                format!("{} {}: {}", marker, k, label)
            })
            .collect()
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Runs the interactive game until `quit` or end of input.
#[instrument(skip_all)]
pub async fn run(config: SessionConfig) -> Result<()> {
    let (ticket_tx, mut tickets) = mpsc::unbounded_channel();
    let session = GameSession::new(&config, TokioScheduler::new(ticket_tx));
    let mut app = App::new(session);

    info!("Starting interactive game");
    println!("Tic-tac-toe. Type 'help' for commands.");
    print_lines(&app.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("End of input");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match Input::parse(&line) {
                    Some(input) => match app.handle_input(input) {
                        Some(out) => print_lines(&out),
                        None => break,
                    },
                    None => {
                        warn!(line = %line.trim(), "Unrecognised command");
                        println!("Unknown command '{}'. Type 'help'.", line.trim());
                    }
                }
            }
            Some(ticket) = tickets.recv() => {
                print_lines(&app.handle_ticket(ticket));
            }
        }
    }

    info!("Leaving game");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tictactoe_core::ComputerPlayer;

    fn app() -> (App<TokioScheduler>, mpsc::UnboundedReceiver<tictactoe_core::TurnTicket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = GameSession::with_computer(
            ComputerPlayer::new(5),
            Duration::from_millis(1),
            TokioScheduler::new(tx),
        );
        (App::new(session), rx)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Input::parse("mode 1"), Some(Input::Mode(PlayerMode::SinglePlayer)));
        assert_eq!(Input::parse("MODE 2"), Some(Input::Mode(PlayerMode::TwoPlayer)));
        assert_eq!(Input::parse("symbol o"), Some(Input::Symbol(Player::O)));
        assert_eq!(Input::parse("play 4"), Some(Input::Play(4)));
        assert_eq!(Input::parse("play center"), Some(Input::Play(4)));
        assert_eq!(Input::parse("7"), Some(Input::Play(7)));
        assert_eq!(Input::parse("jump 0"), Some(Input::Jump(0)));
        assert_eq!(Input::parse("  quit "), Some(Input::Quit));
    }

    #[test]
    fn test_parse_keeps_out_of_range_cells() {
        assert_eq!(Input::parse("play 12"), Some(Input::Play(12)));
        assert_eq!(Input::parse("12"), Some(Input::Play(12)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Input::parse("mode 3"), None);
        assert_eq!(Input::parse("symbol z"), None);
        assert_eq!(Input::parse("play"), None);
        assert_eq!(Input::parse("jump back"), None);
        assert_eq!(Input::parse("board now"), None);
        assert_eq!(Input::parse(""), None);
    }

    #[tokio::test]
    async fn test_two_player_flow() {
        let (mut app, _tickets) = app();
        assert!(app.status_line().starts_with("Choose a mode"));

        app.handle_input(Input::Mode(PlayerMode::TwoPlayer)).unwrap();
        assert!(app.status_line().starts_with("Choose who starts"));

        app.handle_input(Input::Symbol(Player::X)).unwrap();
        assert_eq!(app.status_line(), "Next player: X");

        let out = app.handle_input(Input::Play(4)).unwrap();
        assert!(out.iter().any(|l| l == "#1 Player X takes Center"));
        assert_eq!(app.status_line(), "Next player: O");
    }

    #[tokio::test]
    async fn test_rejection_is_reported() {
        let (mut app, _tickets) = app();
        let out = app.handle_input(Input::Play(0)).unwrap();
        assert!(out[0].starts_with("Rejected:"));
        assert_eq!(app.session().history_len(), 1);
    }

    #[tokio::test]
    async fn test_history_lines_mark_cursor() {
        let (mut app, _tickets) = app();
        app.handle_input(Input::Mode(PlayerMode::TwoPlayer));
        app.handle_input(Input::Symbol(Player::X));
        app.handle_input(Input::Play(0));
        app.handle_input(Input::Play(1));
        app.handle_input(Input::Jump(1));

        assert_eq!(
            app.history_lines(),
            vec![
                "  0: Go to game start".to_string(),
                "> 1: Go to movement #1".to_string(),
                "  2: Go to movement #2".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_computer_answers_through_ticket() {
        let (mut app, mut tickets) = app();
        app.handle_input(Input::Mode(PlayerMode::SinglePlayer));
        app.handle_input(Input::Symbol(Player::X));
        app.handle_input(Input::Play(0));
        assert!(app.status_line().contains("computer is thinking"));

        let ticket = tickets.recv().await.unwrap();
        let out = app.handle_ticket(ticket);
        assert!(out.iter().any(|l| l.contains("Computer O takes")));
        assert_eq!(app.session().history_len(), 3);
        assert_eq!(app.status_line(), "Next player: X");
    }

    #[test]
    fn test_quit_ends_loop() {
        let (mut app, _tickets) = app();
        assert!(app.handle_input(Input::Quit).is_none());
    }
}

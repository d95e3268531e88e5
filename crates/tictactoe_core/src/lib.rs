//! Tic-tac-toe rules engine and turn state machine.
//!
//! # Architecture
//!
//! - **Rules**: pure board evaluation ([`rules::evaluate`])
//! - **History**: immutable board snapshots with a cursor ([`MoveHistory`])
//! - **Controller**: turn enforcement and commands ([`TurnController`])
//! - **Computer**: win/block/random opponent ([`ComputerPlayer`])
//! - **Session**: controller plus a cancelable deferred computer move
//!   ([`GameSession`], [`Scheduler`])
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{Outcome, Player, PlayerMode, TurnController};
//!
//! let mut game = TurnController::new();
//! game.set_player_mode(PlayerMode::TwoPlayer).unwrap();
//! game.select_symbol(Player::X).unwrap();
//! for cell in [0, 3, 1, 4, 2] {
//!     game.apply_move(cell).unwrap();
//! }
//! assert_eq!(game.current_outcome().winner(), Some(Player::X));
//! assert!(game.apply_move(8).is_err());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod computer;
mod config;
mod controller;
mod history;
mod outcome;
mod position;
mod scheduler;
mod session;
mod types;

pub mod contracts;
pub mod invariants;
pub mod rules;

pub use action::{Move, MoveError};
pub use computer::{ComputerPlayer, choose_move, completing_cell};
pub use config::{ConfigError, SessionConfig};
pub use controller::{GameEvent, Listener, TurnController};
pub use history::MoveHistory;
pub use outcome::{LineKind, Outcome, WinningLine};
pub use position::Position;
pub use rules::evaluate;
pub use scheduler::{Cancel, Scheduler, TurnTicket};
pub use session::GameSession;
pub use types::{Board, BoardParseError, Player, PlayerMode, Square};

//! Tests for turn control and move history.

use tictactoe_core::{
    GameEvent, MoveError, Outcome, Player, PlayerMode, Position, Square, TurnController,
    WinningLine,
};

fn two_player(first: Player) -> TurnController {
    let mut game = TurnController::new();
    game.set_player_mode(PlayerMode::TwoPlayer).unwrap();
    game.select_symbol(first).unwrap();
    game
}

#[test]
fn test_history_grows_by_one_per_move() {
    let mut game = two_player(Player::X);
    for (n, cell) in [4, 0, 8, 2, 6].into_iter().enumerate() {
        assert_eq!(game.history_len(), n + 1);
        game.apply_move(cell).unwrap();
    }
    assert_eq!(game.history_len(), 6);
    assert_eq!(game.current_move_index(), 5);
}

#[test]
fn test_rejected_moves_change_nothing() {
    let mut game = two_player(Player::X);
    game.apply_move(4).unwrap();
    let board = *game.current_board();
    let version = game.version();

    assert_eq!(game.apply_move(4), Err(MoveError::SquareOccupied(Position::Center)));
    assert_eq!(game.apply_move(9), Err(MoveError::OutOfRange(9)));
    assert_eq!(game.apply_move(usize::MAX), Err(MoveError::OutOfRange(usize::MAX)));

    assert_eq!(*game.current_board(), board);
    assert_eq!(game.history_len(), 2);
    assert_eq!(game.to_move(), Some(Player::O));
    assert_eq!(game.version(), version);
}

#[test]
fn test_jump_then_move_discards_redo() {
    let mut game = two_player(Player::X);
    for cell in [0, 1, 2, 3] {
        game.apply_move(cell).unwrap();
    }
    game.jump_to(2).unwrap();
    assert_eq!(game.history_len(), 5);
    assert_eq!(game.to_move(), Some(Player::X));

    game.apply_move(8).unwrap();
    assert_eq!(game.history_len(), 4);
    assert_eq!(game.current_move_index(), 3);
    assert_eq!(game.current_board().get(Position::TopRight), Square::Empty);
    assert_eq!(game.current_board().get(Position::BottomRight), Square::Occupied(Player::X));
}

#[test]
fn test_turn_follows_cursor_parity() {
    for first in [Player::X, Player::O] {
        let mut game = two_player(first);
        for cell in [0, 1, 2, 4, 3] {
            game.apply_move(cell).unwrap();
        }
        for k in 0..game.history_len() {
            game.jump_to(k).unwrap();
            let expected = if k % 2 == 0 { first } else { first.opponent() };
            assert_eq!(game.to_move(), Some(expected), "first {} at {}", first, k);
        }
    }
}

#[test]
fn test_jump_out_of_range() {
    let mut game = two_player(Player::X);
    game.apply_move(0).unwrap();
    let version = game.version();

    assert_eq!(game.jump_to(2), Err(MoveError::NoSuchMove(2)));
    assert_eq!(game.current_move_index(), 1);
    assert_eq!(game.version(), version);
}

#[test]
fn test_winner_and_line() {
    let mut game = two_player(Player::O);
    // O: 2, 4, 6  X: 0, 1
    for cell in [2, 0, 4, 1, 6] {
        game.apply_move(cell).unwrap();
    }
    assert_eq!(
        game.current_outcome(),
        Outcome::Winner {
            player: Player::O,
            line: WinningLine::AntiDiagonal
        }
    );
    assert_eq!(game.apply_move(8), Err(MoveError::GameOver));
}

#[test]
fn test_draw_game() {
    let mut game = two_player(Player::X);
    // X O X / X O O / O X X
    for cell in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
        game.apply_move(cell).unwrap();
    }
    assert_eq!(game.current_outcome(), Outcome::Draw);
    assert_eq!(game.current_board().to_string(), "XOXXOOOXX");
}

#[test]
fn test_moves_need_a_symbol() {
    let mut game = TurnController::new();
    assert_eq!(game.to_move(), None);
    assert_eq!(game.apply_move(0), Err(MoveError::SymbolNotSelected));
    assert_eq!(game.history_len(), 1);
}

#[test]
fn test_mode_locked_until_reset() {
    let mut game = TurnController::new();
    assert_eq!(
        game.set_player_mode(PlayerMode::Unset),
        Err(MoveError::ModeLocked(PlayerMode::Unset))
    );
    game.set_player_mode(PlayerMode::SinglePlayer).unwrap();
    assert_eq!(
        game.set_player_mode(PlayerMode::TwoPlayer),
        Err(MoveError::ModeLocked(PlayerMode::TwoPlayer))
    );

    game.reset_game();
    game.set_player_mode(PlayerMode::TwoPlayer).unwrap();
    assert_eq!(game.player_mode(), PlayerMode::TwoPlayer);
}

#[test]
fn test_events_in_order() {
    use std::sync::{Arc, Mutex};

    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut game = TurnController::new();
    let sink = seen.clone();
    game.subscribe(move |event| sink.lock().unwrap().push(*event));

    game.set_player_mode(PlayerMode::TwoPlayer).unwrap();
    game.select_symbol(Player::X).unwrap();
    for cell in [0, 3, 1, 4, 2] {
        game.apply_move(cell).unwrap();
    }
    game.jump_to(0).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0], GameEvent::ModeSelected(PlayerMode::TwoPlayer));
    assert!(matches!(seen[1], GameEvent::SymbolSelected { first: Player::X, computer: None }));
    assert!(matches!(seen[6], GameEvent::MovePlayed { move_index: 5, .. }));
    assert!(matches!(seen[7], GameEvent::GameOver(Outcome::Winner { player: Player::X, .. })));
    assert_eq!(
        seen[8],
        GameEvent::Jumped {
            move_index: 0,
            to_move: Some(Player::X)
        }
    );
    assert_eq!(seen.len(), 9);
}

//! Turn-cycle integration tests driven through the public API.
//!
//! Board scenarios are staged by editing a saved-game record and restoring
//! it with a scanned seed, so every path exercised here is one an embedder
//! could reach.

use ludo_engine::{
    EngineError, GameEvent, GameRng, GameSetup, PlayerId, SavedGame, TokenId, TurnEngine,
    TurnPhase, FINISH,
};

/// A seed whose first die roll is `value`.
fn seed_for_first_roll(value: u8) -> u64 {
    for seed in 0..10_000 {
        let mut rng = GameRng::new(seed);
        if rng.roll_die() == value {
            return seed;
        }
    }
    panic!("no seed produced a first roll of {value}");
}

/// A fresh-game record to stage scenarios on.
fn fresh_record(player_count: usize) -> SavedGame {
    TurnEngine::seeded(GameSetup::new(player_count), 0)
        .unwrap()
        .snapshot()
}

fn place(record: &mut SavedGame, seat: usize, token: usize, cell: i8) {
    record.players[seat].tokens[token].position = cell;
    record.players[seat].tokens[token].is_finished = cell == FINISH;
}

fn staged(record: SavedGame, first_roll: u8) -> TurnEngine {
    TurnEngine::from_saved_seeded(record, seed_for_first_roll(first_roll)).unwrap()
}

#[test]
fn yard_exit_on_a_six() {
    let mut engine = staged(fresh_record(2), 6);
    engine.roll_dice().unwrap();

    assert_eq!(engine.phase(), TurnPhase::MovesComputed);
    let moves = engine.legal_moves();
    assert_eq!(moves.len(), 4);
    for mv in moves {
        // One step from the yard straight onto red's start cell.
        assert_eq!(mv.target, 0);
        assert_eq!(mv.steps.as_slice(), &[0]);
    }
}

#[test]
fn yard_tokens_cannot_move_without_a_six() {
    let mut engine = staged(fresh_record(2), 3);
    engine.roll_dice().unwrap();

    // Nothing could move: the turn ended with no bonus.
    assert_eq!(engine.state().current_index(), 1);
    assert_eq!(engine.phase(), TurnPhase::AwaitingRoll);
    assert_eq!(engine.state().dice_value(), 0);
}

#[test]
fn home_entry_turns_into_the_stretch() {
    let mut record = fresh_record(2);
    place(&mut record, 0, 0, 50);
    place(&mut record, 0, 1, 10);
    let mut engine = staged(record, 3);

    engine.roll_dice().unwrap();
    assert_eq!(engine.phase(), TurnPhase::MovesComputed);

    let entry_move = engine
        .legal_moves()
        .iter()
        .find(|m| m.token == TokenId::new(0))
        .unwrap()
        .clone();
    assert_eq!(entry_move.steps.as_slice(), &[52, 53, 54]);

    engine.choose_move(TokenId::new(0)).unwrap();
    assert_eq!(
        engine
            .state()
            .player(PlayerId::new(0))
            .token(TokenId::new(0))
            .position(),
        54
    );

    let steps: Vec<_> = engine
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::TokenStepped { from, to, .. } => Some((from, to)),
            _ => None,
        })
        .collect();
    assert_eq!(steps, vec![(50, 52), (52, 53), (53, 54)]);
}

#[test]
fn exact_roll_finishes_a_token() {
    let mut record = fresh_record(2);
    place(&mut record, 0, 0, 56);
    place(&mut record, 0, 1, 10);
    let mut engine = staged(record, 1);

    engine.roll_dice().unwrap();
    let applied = engine.choose_move(TokenId::new(0)).unwrap();

    assert_eq!(applied.steps.as_slice(), &[FINISH]);
    assert!(applied.finished);
    assert!(applied.bonus, "finishing grants a bonus turn");
    assert!(engine
        .state()
        .player(PlayerId::new(0))
        .token(TokenId::new(0))
        .is_finished());

    // Same player, fresh roll.
    assert_eq!(engine.state().current_index(), 0);
    assert_eq!(engine.phase(), TurnPhase::AwaitingRoll);
}

#[test]
fn overshooting_the_center_is_illegal() {
    let mut record = fresh_record(2);
    place(&mut record, 0, 0, 56);
    place(&mut record, 0, 1, 10);
    let mut engine = staged(record, 2);

    engine.roll_dice().unwrap();

    // Only the mid-loop token may move; the stretch-end token is stuck.
    let ids: Vec<_> = engine.legal_moves().iter().map(|m| m.token).collect();
    assert_eq!(ids, vec![TokenId::new(1)]);

    let err = engine.choose_move(TokenId::new(0)).unwrap_err();
    assert!(matches!(err, EngineError::InvalidMove(_)));
}

#[test]
fn landing_on_an_opponent_captures_it() {
    let mut record = fresh_record(2);
    place(&mut record, 0, 0, 19);
    place(&mut record, 0, 1, 45);
    place(&mut record, 0, 2, 20);
    place(&mut record, 1, 0, 20);
    let mut engine = staged(record, 1);

    engine.roll_dice().unwrap();
    let applied = engine.choose_move(TokenId::new(0)).unwrap();

    // The green token went home; the red one already on the cell did not.
    assert_eq!(
        applied
            .captured
            .iter()
            .map(|(color, token)| (*color, *token))
            .collect::<Vec<_>>(),
        vec![(ludo_engine::Color::Green, TokenId::new(0))]
    );
    assert!(engine
        .state()
        .player(PlayerId::new(1))
        .token(TokenId::new(0))
        .in_yard());
    assert_eq!(
        engine
            .state()
            .player(PlayerId::new(0))
            .token(TokenId::new(2))
            .position(),
        20
    );

    // Capture keeps the turn.
    assert!(applied.bonus);
    assert_eq!(engine.state().current_index(), 0);

    assert!(engine.drain_events().iter().any(|e| matches!(
        e,
        GameEvent::TokenCaptured { cell: 20, .. }
    )));
}

#[test]
fn safe_cells_protect_from_capture() {
    let mut record = fresh_record(2);
    place(&mut record, 0, 0, 7);
    place(&mut record, 0, 1, 45);
    place(&mut record, 1, 0, 8);
    let mut engine = staged(record, 1);

    engine.roll_dice().unwrap();
    let applied = engine.choose_move(TokenId::new(0)).unwrap();

    assert!(applied.captured.is_empty());
    assert_eq!(
        engine
            .state()
            .player(PlayerId::new(1))
            .token(TokenId::new(0))
            .position(),
        8
    );
    // No capture, no six, no finish: the turn rotates.
    assert!(!applied.bonus);
    assert_eq!(engine.state().current_index(), 1);
}

#[test]
fn restored_game_accepts_a_fresh_roll() {
    let mut record = fresh_record(2);
    record.dice_value = 4;
    let mut engine = TurnEngine::from_saved(record).unwrap();

    assert_eq!(engine.state().dice_value(), 0);
    assert_eq!(engine.phase(), TurnPhase::AwaitingRoll);
    assert!(engine.roll_dice().is_ok());
}

#[test]
fn triple_six_chains_across_bonus_rolls() {
    // Two sixes already banked in the record; the restored player's next
    // six forfeits the turn because the counter only resets at turn end.
    let mut record = fresh_record(2);
    record.consecutive_sixes = 2;
    place(&mut record, 0, 0, 1);
    place(&mut record, 0, 1, 10);
    let mut engine = staged(record, 6);

    engine.roll_dice().unwrap();

    assert_eq!(engine.state().current_index(), 1);
    assert_eq!(engine.state().consecutive_sixes(), 0);
    let events = engine.drain_events();
    assert!(events.iter().any(|e| matches!(e, GameEvent::TripleSix { .. })));
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::TokenStepped { .. })));
}

#[test]
fn six_grants_a_bonus_turn() {
    let mut engine = staged(fresh_record(2), 6);
    engine.roll_dice().unwrap();
    let applied = engine.choose_move(TokenId::new(0)).unwrap();

    assert!(applied.bonus);
    assert_eq!(engine.state().current_index(), 0);
    assert_eq!(engine.state().dice_value(), 0);
    assert!(engine
        .drain_events()
        .iter()
        .any(|e| matches!(e, GameEvent::BonusTurn { .. })));
}

#[test]
fn requests_are_rejected_in_the_wrong_phase() {
    let mut engine = staged(fresh_record(2), 6);

    // Before any roll.
    assert!(matches!(
        engine.choose_move(TokenId::new(0)),
        Err(EngineError::NoRollPending)
    ));

    engine.roll_dice().unwrap();

    // While a choice is pending.
    assert!(matches!(
        engine.roll_dice(),
        Err(EngineError::RollPending(6))
    ));
    // Humans don't get heuristic moves.
    assert!(matches!(
        engine.request_ai_move(),
        Err(EngineError::NotAiTurn)
    ));
    // A token outside the legal set changes nothing.
    assert!(matches!(
        engine.choose_move(TokenId::new(7)),
        Err(EngineError::InvalidMove(_))
    ));
    assert_eq!(engine.phase(), TurnPhase::MovesComputed);
    assert_eq!(engine.legal_moves().len(), 4);
}

#[test]
fn setup_validation() {
    assert!(matches!(
        TurnEngine::new(GameSetup::new(5)),
        Err(EngineError::PlayerCount(5))
    ));
    assert!(matches!(
        TurnEngine::new(GameSetup::new(2).ai_count(3)),
        Err(EngineError::AiCount { .. })
    ));
    assert!(TurnEngine::new(GameSetup::new(2)).is_ok());
}

#[test]
fn resumed_ai_seat_can_be_driven() {
    let mut record = fresh_record(2);
    record.players[0].is_ai = true;
    let mut engine = TurnEngine::from_saved_seeded(record, 5).unwrap();

    assert!(engine.state().current_player().is_ai());
    let rolls = engine.play_ai_turns().unwrap();
    assert!(rolls > 0);
    assert!(!engine.state().current_player().is_ai());
}

#[test]
fn winning_move_ends_the_game_before_anything_else() {
    let mut record = fresh_record(2);
    for t in 0..3 {
        place(&mut record, 0, t, FINISH);
    }
    place(&mut record, 0, 3, 56);
    // An opposing token sits where no capture can follow a win anyway;
    // staging it proves the early return.
    place(&mut record, 1, 0, 30);
    let mut engine = staged(record, 1);

    let moves_before = engine.state().total_moves();
    engine.roll_dice().unwrap();

    assert!(engine.is_over());
    assert_eq!(engine.state().total_moves(), moves_before);
    assert!(engine
        .drain_events()
        .iter()
        .any(|e| matches!(e, GameEvent::GameWon { player } if player.index() == 0)));

    assert!(matches!(engine.roll_dice(), Err(EngineError::GameOver)));
    assert!(matches!(
        engine.choose_move(TokenId::new(0)),
        Err(EngineError::GameOver)
    ));
    assert!(matches!(
        engine.play_ai_turns(),
        Ok(0)
    ));
}

#[test]
fn default_player_names_follow_colors() {
    let engine = TurnEngine::seeded(
        GameSetup::new(4).ai_count(2).names(["Ada", "Grace"]),
        0,
    )
    .unwrap();

    let names: Vec<_> = engine
        .state()
        .players()
        .iter()
        .map(|p| p.name().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "Red Player (CPU)",
            "Green Player (CPU)",
            "Ada",
            "Grace"
        ]
    );
}

use super::*;

#[test]
fn decodes_already_solved_payload() {
    let puzzle: ExternalPuzzle = serde_json::from_str(r#"{"alreadySolved": true, "message": "done"}"#).unwrap();
    assert!(puzzle.already_solved);
    assert_eq!(puzzle.solved_message(), "done");
}

#[test]
fn blank_message_falls_back() {
    let puzzle: ExternalPuzzle = serde_json::from_str(r#"{"alreadySolved": true, "message": "  "}"#).unwrap();
    assert_eq!(puzzle.solved_message(), ALREADY_SOLVED_FALLBACK);
}

#[test]
fn decodes_upstream_field_names() {
    let puzzle: ExternalPuzzle = serde_json::from_str(
        r#"{"PuzzleId": "00sHx", "FEN": "8/8/8/8/8/8/8/8 w - - 0 1", "Moves": "e2e4 e7e5"}"#,
    )
    .unwrap();
    assert!(!puzzle.already_solved);
    assert_eq!(puzzle.puzzle_id_param(), "00sHx");
    assert_eq!(puzzle.fen_param(), "8/8/8/8/8/8/8/8 w - - 0 1");
    assert_eq!(puzzle.moves_param(), "e2e4 e7e5");
}

#[test]
fn array_moves_are_comma_joined() {
    let puzzle: ExternalPuzzle =
        serde_json::from_str(r#"{"puzzleId": 42, "fen": "x", "moves": ["e2e4", "e7e5"]}"#).unwrap();
    assert_eq!(puzzle.puzzle_id_param(), "42");
    assert_eq!(puzzle.moves_param(), "e2e4,e7e5");
}

#[test]
fn missing_fields_become_empty_params() {
    let puzzle = ExternalPuzzle::default();
    assert_eq!(puzzle.puzzle_id_param(), "");
    assert_eq!(puzzle.moves_param(), "");
    assert_eq!(puzzle.fen_param(), "");
}

use super::*;

fn board() -> BoardId {
    BoardId::main()
}

#[test]
fn empty_cell_while_idle_is_ignored() {
    let mut sel = Selections::default();
    assert_eq!(sel.click(&board(), Coord::new(3, 4), false), ClickOutcome::Ignored);
    assert_eq!(sel.state(&board()), Selection::Idle);
}

#[test]
fn piece_then_empty_cell_yields_move() {
    let mut sel = Selections::default();
    assert_eq!(sel.click(&board(), Coord::new(1, 2), true), ClickOutcome::Selected(Coord::new(1, 2)));
    assert_eq!(sel.state(&board()), Selection::OriginSelected(Coord::new(1, 2)));
    assert_eq!(
        sel.click(&board(), Coord::new(3, 4), false),
        ClickOutcome::Move { from: Coord::new(1, 2), to: Coord::new(3, 4) }
    );
    assert_eq!(sel.state(&board()), Selection::Idle);
}

#[test]
fn same_cell_twice_cancels() {
    let mut sel = Selections::default();
    sel.click(&board(), Coord::new(1, 2), true);
    assert_eq!(sel.click(&board(), Coord::new(1, 2), true), ClickOutcome::Cancelled(Coord::new(1, 2)));
    assert_eq!(sel.state(&board()), Selection::Idle);
}

#[test]
fn second_click_on_other_piece_is_a_move_not_reselect() {
    let mut sel = Selections::default();
    sel.click(&board(), Coord::new(0, 0), true);
    assert_eq!(
        sel.click(&board(), Coord::new(0, 1), true),
        ClickOutcome::Move { from: Coord::new(0, 0), to: Coord::new(0, 1) }
    );
    assert_eq!(sel.state(&board()), Selection::Idle);
}

#[test]
fn boards_are_independent() {
    let mut sel = Selections::default();
    let left = BoardId("left".into());
    let right = BoardId("right".into());
    sel.click(&left, Coord::new(1, 1), true);
    assert_eq!(sel.state(&right), Selection::Idle);
    assert_eq!(sel.click(&right, Coord::new(1, 1), true), ClickOutcome::Selected(Coord::new(1, 1)));
    assert_eq!(sel.state(&left), Selection::OriginSelected(Coord::new(1, 1)));
}

#[test]
fn every_click_sequence_returns_to_idle_within_two_clicks() {
    let cells = [(Coord::new(0, 0), true), (Coord::new(0, 1), false), (Coord::new(2, 2), true)];
    for first in cells {
        for second in cells {
            let mut sel = Selections::default();
            let outcome = sel.click(&board(), first.0, first.1);
            if outcome == ClickOutcome::Ignored {
                assert_eq!(sel.state(&board()), Selection::Idle);
                continue;
            }
            sel.click(&board(), second.0, second.1);
            assert_eq!(sel.state(&board()), Selection::Idle);
        }
    }
}

#[test]
fn cancel_and_clear_all() {
    let mut sel = Selections::default();
    sel.click(&board(), Coord::new(1, 1), true);
    assert_eq!(sel.cancel(&board()), Some(Coord::new(1, 1)));
    assert_eq!(sel.cancel(&board()), None);

    sel.click(&BoardId("b".into()), Coord::new(2, 2), true);
    sel.click(&BoardId("a".into()), Coord::new(3, 3), true);
    assert_eq!(
        sel.clear_all(),
        vec![(BoardId("a".into()), Coord::new(3, 3)), (BoardId("b".into()), Coord::new(2, 2))]
    );
    assert_eq!(sel.state(&BoardId("a".into())), Selection::Idle);
}

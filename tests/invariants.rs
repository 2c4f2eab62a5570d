//! Random gesture streams against small boards, checking the board invariants after every single call.

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use chromate::builder::PuzzleBuilder;
use chromate::shape::{BoardShape, SquareStep, Step};
use chromate::{Board, Location, Probe};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Gesture {
    Down(Location),
    // move to the neighbor of the last position in this direction
    Step(SquareStep),
    Move(Location),
    Up,
    Off,
    Undo,
}

fn arb_location() -> impl Strategy<Value = Location> {
    // one row and column past the edge
    (0usize..6, 0usize..6).prop_map(|(row, col)| Location(row, col))
}

fn arb_gesture() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        3 => arb_location().prop_map(Gesture::Down),
        8 => prop::sample::select(vec![SquareStep::Up, SquareStep::Down, SquareStep::Left, SquareStep::Right])
            .prop_map(Gesture::Step),
        1 => arb_location().prop_map(Gesture::Move),
        2 => Just(Gesture::Up),
        1 => Just(Gesture::Off),
        1 => Just(Gesture::Undo),
    ]
}

fn puzzle(which: usize) -> Board {
    let mut builder = PuzzleBuilder::with_size("generated", 5);
    match which {
        // two pairs a single step apart, solved often
        0 => builder
            .add_pair('A', (Location(0, 0), Location(0, 1)))
            .add_pair('B', (Location(4, 4), Location(3, 4))),
        1 => builder
            .add_pair('A', (Location(0, 0), Location(4, 4)))
            .add_pair('B', (Location(0, 4), Location(4, 0)))
            .add_pair('C', (Location(2, 1), Location(2, 3))),
        _ => builder
            .add_pair('A', (Location(0, 0), Location(0, 2)))
            .add_pair('B', (Location(1, 0), Location(1, 2)))
            .add_pair('C', (Location(2, 0), Location(2, 2))),
    };
    Board::new(builder.build()).unwrap()
}

fn apply(board: &mut Board, cursor: &mut Location, gesture: &Gesture) {
    match gesture {
        Gesture::Down(location) => {
            *cursor = *location;
            board.begin_stroke(*location);
        }
        Gesture::Step(direction) => {
            *cursor = direction.attempt_from(*cursor);
            board.extend_stroke(*cursor);
        }
        Gesture::Move(location) => {
            *cursor = *location;
            board.extend_stroke(*location);
        }
        Gesture::Up => board.end_stroke(),
        Gesture::Off => board.extend_stroke(Probe::OutOfBounds),
        Gesture::Undo => {
            board.undo();
        }
    }
}

fn check_invariants(board: &Board, notified: usize) -> Result<(), TestCaseError> {
    let puzzle = board.puzzle();

    for pair in puzzle.pairs() {
        let (a, b) = pair.endpoints();
        prop_assert_eq!(board.occupant(a), Some(pair.id()));
        prop_assert_eq!(board.occupant(b), Some(pair.id()));

        let path = board.path(pair.id());
        if let Some(first) = path.first() {
            prop_assert!(pair.is_endpoint(*first), "path of {} starts at {:?}", pair.id(), first);
        }
        for step in path.windows(2) {
            prop_assert!(SquareStep::adjacent(step[0], step[1]), "path of {} jumps: {:?}", pair.id(), path);
        }
        let distinct: HashSet<_> = path.iter().collect();
        prop_assert_eq!(distinct.len(), path.len(), "path of {} revisits a cell", pair.id());
        for location in path {
            prop_assert_eq!(board.occupant(*location), Some(pair.id()));
        }
    }

    for ((row, col), occupant) in board.grid().indexed_iter() {
        let location = Location(row, col);
        if let Some(owner) = occupant {
            let pair = &puzzle.pairs()[*owner];
            prop_assert!(
                pair.is_endpoint(location) || board.path(*owner).contains(&location),
                "{:?} is claimed by {} outside its path",
                location,
                owner
            );
        }
    }

    if let Some(active) = board.active_pair() {
        prop_assert!(!board.path(active).is_empty());
    }
    prop_assert_eq!(board.is_finished(), board.is_solved());
    prop_assert_eq!(notified, usize::from(board.is_finished()));

    Ok(())
}

proptest! {
    #[test]
    fn invariants_hold_after_every_gesture(
        which in 0usize..3,
        gestures in prop::collection::vec(arb_gesture(), 0..300),
    ) {
        let mut board = puzzle(which);
        let notified = Rc::new(Cell::new(0));
        let seen = Rc::clone(&notified);
        board.set_completion_observer(move || seen.set(seen.get() + 1));

        let mut cursor = Location(0, 0);
        for gesture in &gestures {
            let before = board.is_finished().then(|| board.snapshot());
            apply(&mut board, &mut cursor, gesture);
            check_invariants(&board, notified.get())?;

            // a finished board does not change any more
            if let Some(before) = before {
                prop_assert_eq!(board.snapshot(), before);
                prop_assert_eq!(board.active_pair(), None);
            }
        }
    }

    #[test]
    fn end_stroke_is_idempotent(
        which in 0usize..3,
        gestures in prop::collection::vec(arb_gesture(), 0..100),
    ) {
        let mut board = puzzle(which);
        let mut cursor = Location(0, 0);
        for gesture in &gestures {
            apply(&mut board, &mut cursor, gesture);
        }

        board.end_stroke();
        let once = board.snapshot();
        let recorded = board.history().len();
        board.end_stroke();

        prop_assert_eq!(board.snapshot(), once);
        prop_assert_eq!(board.history().len(), recorded);
        prop_assert_eq!(board.active_pair(), None);
    }

    #[test]
    fn snapshots_restore(
        which in 0usize..3,
        gestures in prop::collection::vec(arb_gesture(), 0..100),
    ) {
        let mut board = puzzle(which);
        let mut cursor = Location(0, 0);
        for gesture in &gestures {
            apply(&mut board, &mut cursor, gesture);
        }

        let restored = Board::restore(board.snapshot()).unwrap();
        prop_assert_eq!(restored.grid(), board.grid());
        prop_assert_eq!(restored.paths(), board.paths());
        prop_assert_eq!(restored.is_finished(), board.is_finished());
        prop_assert_eq!(restored.active_pair(), None);
    }

    #[test]
    fn undo_unwinds_history(
        which in 0usize..3,
        gestures in prop::collection::vec(arb_gesture(), 0..100),
    ) {
        let mut board = puzzle(which);
        let notified = Rc::new(Cell::new(0));
        let seen = Rc::clone(&notified);
        board.set_completion_observer(move || seen.set(seen.get() + 1));

        let mut cursor = Location(0, 0);
        for gesture in &gestures {
            apply(&mut board, &mut cursor, gesture);
        }
        board.end_stroke();
        prop_assume!(!board.is_finished());

        while board.undo().is_some() {
            check_invariants(&board, notified.get())?;
        }

        // undo only stops early on a finished board
        prop_assert!(board.history().is_empty() || board.is_finished());
    }
}

//! Determinism across partitioning
//!
//! The headline engine guarantee: for a fixed layout, rules and
//! generation count, every worker count produces the same final board.

use proptest::prelude::*;

use wolfgrid::core::config::RuleConfig;
use wolfgrid::engine::{run_simulation, PartitionPlan, HALO_DEPTH};
use wolfgrid::grid::board::BoardLayout;
use wolfgrid::grid::cell::Occupant;

fn occupant() -> impl Strategy<Value = Occupant> {
    prop_oneof![
        Just(Occupant::Wolf),
        Just(Occupant::Squirrel),
        Just(Occupant::Tree),
        Just(Occupant::Ice),
        Just(Occupant::SquirrelOnTree),
    ]
}

fn layout() -> impl Strategy<Value = BoardLayout> {
    (4usize..=14).prop_flat_map(|size| {
        prop::collection::vec((0..size, 0..size, occupant()), 0..64)
            .prop_map(move |cells| BoardLayout { size, cells })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // Worker counts well past size/2, so the runs where a naive split
    // would hand out single rows are drawn too.
    #[test]
    fn parallel_matches_serial(
        board in layout(),
        generations in 1u32..5,
        workers in 2usize..=8,
    ) {
        let rules = RuleConfig::new(4, 3, 6);
        let serial = run_simulation(&board, rules, generations, 1).unwrap();
        let parallel = run_simulation(&board, rules, generations, workers).unwrap();
        prop_assert_eq!(serial, parallel);
    }

    #[test]
    fn partition_plan_covers_grid(grid in 1usize..=64, workers in 1usize..=16) {
        let plan = PartitionPlan::compute(grid, workers).unwrap();
        let mut next_start = 0;
        let mut total = 0;
        for id in 0..plan.worker_count() {
            let p = plan.partition(id);
            prop_assert_eq!(p.start_row, next_start);
            prop_assert!(p.prev_halo <= HALO_DEPTH);
            prop_assert!(p.next_halo <= HALO_DEPTH);
            if id > 0 {
                prop_assert!(p.prev_halo <= plan.partition(id - 1).owned);
            }
            if id + 1 < plan.worker_count() {
                prop_assert!(p.next_halo <= plan.partition(id + 1).owned);
            }
            next_start += p.owned;
            total += p.owned;
        }
        prop_assert_eq!(total, grid);

        // Whenever the plan splits at all, every row-owning worker has
        // full halo depth to stand on.
        let active: Vec<usize> = (0..plan.worker_count())
            .map(|id| plan.partition(id).owned)
            .filter(|&owned| owned > 0)
            .collect();
        if active.len() > 1 {
            for owned in active {
                prop_assert!(owned >= HALO_DEPTH);
            }
        }
    }
}

#[test]
fn test_one_row_splits_are_avoided_and_match_serial() {
    // Four workers on a 4-row grid would naively own one row each, too
    // little context for halo sources; the squirrel at (2,0) must step
    // down to (3,0) no matter how many workers are requested.
    let board = BoardLayout {
        size: 4,
        cells: vec![(2, 0, Occupant::Squirrel)],
    };
    let rules = RuleConfig::new(5, 5, 5);
    let serial = run_simulation(&board, rules, 1, 1).unwrap();
    assert_eq!(serial.len(), 1);
    assert_eq!((serial[0].row, serial[0].col), (3, 0));
    for workers in [2, 3, 4, 6] {
        let parallel = run_simulation(&board, rules, 1, workers).unwrap();
        assert_eq!(serial, parallel, "{} workers diverged", workers);
    }
}

#[test]
fn test_dense_board_three_workers() {
    // A hand-built dense board exercising predation, breeding and
    // starvation across both partition boundaries of a 3-worker run.
    let board = BoardLayout {
        size: 9,
        cells: vec![
            (0, 0, Occupant::Wolf),
            (1, 1, Occupant::Squirrel),
            (2, 4, Occupant::Wolf),
            (3, 4, Occupant::Squirrel),
            (3, 8, Occupant::Tree),
            (4, 2, Occupant::SquirrelOnTree),
            (4, 6, Occupant::Ice),
            (5, 5, Occupant::Wolf),
            (6, 0, Occupant::Squirrel),
            (6, 5, Occupant::Squirrel),
            (7, 7, Occupant::Wolf),
            (8, 3, Occupant::Tree),
        ],
    };
    let rules = RuleConfig::new(3, 2, 4);
    let serial = run_simulation(&board, rules, 8, 1).unwrap();
    for workers in [2, 3] {
        let parallel = run_simulation(&board, rules, 8, workers).unwrap();
        assert_eq!(serial, parallel, "{} workers diverged", workers);
    }
}

#[test]
fn test_zero_generations_reports_initial_board() {
    let board = BoardLayout {
        size: 6,
        cells: vec![(1, 1, Occupant::Wolf), (4, 4, Occupant::Tree)],
    };
    let rules = RuleConfig::default();
    let result = run_simulation(&board, rules, 0, 2).unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!((result[0].row, result[0].col), (1, 1));
    assert_eq!((result[1].row, result[1].col), (4, 4));
}

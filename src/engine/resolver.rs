//! Per-cell move rules and conflict resolution
//!
//! Moves are computed against the read buffer and applied to the write
//! buffer. Within one sub-phase every source has the same checkerboard
//! parity, so a destination is never also a source; the only hazard left
//! is two sources targeting the same destination, which is resolved here
//! against whatever the write buffer already holds.

use crate::core::config::RuleConfig;
use crate::grid::board::Board;
use crate::grid::cell::{Cell, Occupant};

/// Breeding-counter sentinel for a cell that just bred or was just born.
/// The aging pass brings it to 0, so the first generation does not count.
pub const JUST_BRED: i32 = -1;

/// Candidate neighbors in fixed Up, Right, Down, Left order, bounded by
/// the local partition extent.
#[inline]
fn orthogonal(row: usize, col: usize, rows: usize, width: usize) -> [Option<(usize, usize)>; 4] {
    [
        (row > 0).then(|| (row - 1, col)),
        (col + 1 < width).then(|| (row, col + 1)),
        (row + 1 < rows).then(|| (row + 1, col)),
        (col > 0).then(|| (row, col - 1)),
    ]
}

fn squirrel_candidates(read: &Board, row: usize, col: usize) -> Vec<(usize, usize)> {
    let mut candidates = Vec::with_capacity(4);
    for (r, c) in orthogonal(row, col, read.rows(), read.width())
        .into_iter()
        .flatten()
    {
        if matches!(read.cell(r, c).occupant, Occupant::Tree | Occupant::Empty) {
            candidates.push((r, c));
        }
    }
    candidates
}

/// A wolf prefers to eat: the first Squirrel discovered discards any
/// accumulated Empty candidates, and from then on only Squirrel neighbors
/// are eligible.
fn wolf_candidates(read: &Board, row: usize, col: usize) -> Vec<(usize, usize)> {
    let mut candidates = Vec::with_capacity(4);
    let mut squirrel_found = false;
    for (r, c) in orthogonal(row, col, read.rows(), read.width())
        .into_iter()
        .flatten()
    {
        match read.cell(r, c).occupant {
            Occupant::Squirrel => {
                if !squirrel_found {
                    squirrel_found = true;
                    candidates.clear();
                }
                candidates.push((r, c));
            }
            Occupant::Empty if !squirrel_found => candidates.push((r, c)),
            _ => {}
        }
    }
    candidates
}

/// Same-species collision: the contributor with the lower starvation
/// counter wins and copies both its counters; a tie keeps the higher
/// breeding counter.
fn resolve_same_species(mover: &Cell, dest: &mut Cell) {
    if mover.starvation < dest.starvation {
        dest.starvation = mover.starvation;
        dest.breeding = mover.breeding;
    } else if mover.starvation == dest.starvation {
        dest.breeding = dest.breeding.max(mover.breeding);
    }
}

/// Predation collision: the wolf wins, eats, and keeps its own breeding
/// counter regardless of which side arrived first.
fn resolve_predation(mover: &Cell, dest: &mut Cell) {
    dest.occupant = Occupant::Wolf;
    dest.starvation = 0;
    if mover.occupant == Occupant::Wolf {
        dest.breeding = mover.breeding;
    }
}

fn apply_squirrel_move(
    mover: Cell,
    write: &mut Board,
    src: (usize, usize),
    dest: (usize, usize),
    rules: &RuleConfig,
) {
    let dest_cell = write.cell_mut(dest.0, dest.1);
    match dest_cell.occupant {
        Occupant::Squirrel | Occupant::SquirrelOnTree => resolve_same_species(&mover, dest_cell),
        Occupant::Wolf => resolve_predation(&mover, dest_cell),
        Occupant::Tree => {
            dest_cell.occupant = Occupant::SquirrelOnTree;
            dest_cell.starvation = mover.starvation;
            dest_cell.breeding = mover.breeding;
        }
        _ => {
            dest_cell.occupant = Occupant::Squirrel;
            dest_cell.starvation = mover.starvation;
            dest_cell.breeding = mover.breeding;
        }
    }
    dest_cell.arrived = true;

    let bred = mover.breeding >= rules.squirrel_breeding_period;
    if bred {
        // The sentinel lands even when this mover lost the destination
        // conflict.
        dest_cell.breeding = JUST_BRED;
    }

    let src_cell = write.cell_mut(src.0, src.1);
    if bred {
        src_cell.occupant = mover.occupant;
        src_cell.breeding = JUST_BRED;
    } else {
        src_cell.occupant = if mover.occupant == Occupant::SquirrelOnTree {
            Occupant::Tree
        } else {
            Occupant::Empty
        };
        src_cell.breeding = 0;
    }
    src_cell.starvation = 0;
}

fn apply_wolf_move(
    mover: Cell,
    write: &mut Board,
    src: (usize, usize),
    dest: (usize, usize),
    rules: &RuleConfig,
) {
    let dest_cell = write.cell_mut(dest.0, dest.1);
    match dest_cell.occupant {
        Occupant::Wolf => resolve_same_species(&mover, dest_cell),
        Occupant::Squirrel => resolve_predation(&mover, dest_cell),
        _ => {
            dest_cell.occupant = Occupant::Wolf;
            dest_cell.starvation = mover.starvation;
            dest_cell.breeding = mover.breeding;
        }
    }
    dest_cell.arrived = true;

    let bred = mover.breeding >= rules.wolf_breeding_period;
    if bred {
        dest_cell.breeding = JUST_BRED;
    }

    let src_cell = write.cell_mut(src.0, src.1);
    if bred {
        src_cell.occupant = Occupant::Wolf;
        src_cell.breeding = JUST_BRED;
    } else {
        src_cell.occupant = Occupant::Empty;
        src_cell.breeding = 0;
    }
    src_cell.starvation = 0;
}

/// Process one source cell of the current sub-phase.
///
/// `global_row` is the cell's absolute grid row; the tie-break between
/// several candidates is `candidates[(global_row * N + col) % len]`, a
/// pure function of global coordinates so every worker picks the same
/// destination regardless of how the grid is partitioned.
pub fn process_cell(
    read: &Board,
    write: &mut Board,
    row: usize,
    col: usize,
    global_row: usize,
    rules: &RuleConfig,
) {
    let mover = *read.cell(row, col);
    let candidates = match mover.occupant {
        Occupant::Squirrel | Occupant::SquirrelOnTree => squirrel_candidates(read, row, col),
        Occupant::Wolf => wolf_candidates(read, row, col),
        Occupant::Empty | Occupant::Tree | Occupant::Ice => return,
    };
    if candidates.is_empty() {
        return;
    }

    let dest = candidates[(global_row * read.width() + col) % candidates.len()];
    match mover.occupant {
        Occupant::Wolf => apply_wolf_move(mover, write, (row, col), dest, rules),
        _ => apply_squirrel_move(mover, write, (row, col), dest, rules),
    }
}

/// Age one cell at the end of a generation. A wolf already at the
/// starvation threshold dies before its counters would advance.
pub fn age_cell(cell: &mut Cell, rules: &RuleConfig) {
    match cell.occupant {
        Occupant::Squirrel | Occupant::SquirrelOnTree => cell.breeding += 1,
        Occupant::Wolf => {
            if cell.starvation >= rules.wolf_starvation_period {
                cell.occupant = Occupant::Empty;
                cell.breeding = 0;
                cell.starvation = 0;
            } else {
                cell.breeding += 1;
                cell.starvation += 1;
            }
        }
        Occupant::Empty | Occupant::Tree | Occupant::Ice => {}
    }
}

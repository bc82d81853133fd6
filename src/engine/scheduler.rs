//! Generation scheduling
//!
//! One generation runs as: sub-phase A (even cells) -> halo sync ->
//! sub-phase B (odd cells) -> aging pass -> halo sync. A move always lands
//! on the opposite checkerboard parity, so within one sub-phase no
//! destination is also a source; residual destination conflicts are the
//! resolver's job.

use rayon::prelude::*;

use crate::core::config::RuleConfig;
use crate::core::error::Result;
use crate::engine::partition::Partition;
use crate::engine::resolver::{age_cell, process_cell};
use crate::grid::board::GridStore;

/// The two checkerboard sub-phases of a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubPhase {
    /// Cells with even `(global_row + col)`.
    Even,
    /// Cells with odd `(global_row + col)`.
    Odd,
}

impl SubPhase {
    fn parity(self) -> usize {
        match self {
            SubPhase::Even => 0,
            SubPhase::Odd => 1,
        }
    }
}

/// Boundary-row synchronization point between sub-phases. The multi-worker
/// exchanger implements this over channels; a single worker syncs nothing.
pub trait HaloSync {
    fn sync(&mut self, store: &mut GridStore) -> Result<()>;
}

/// Visit every local source cell of the given parity, halo rows included.
///
/// Halo sources matter: each worker recomputes its neighbors' boundary
/// moves on its own halo copy, which is how an occupant crossing the
/// partition boundary appears in the receiving worker's owned rows.
/// Destination selection is a pure function of global coordinates, so both
/// sides compute the identical move.
pub fn run_sub_phase(
    store: &mut GridStore,
    partition: &Partition,
    rules: &RuleConfig,
    phase: SubPhase,
) {
    let (read, write) = store.buffers_mut();
    let width = read.width();
    for local_row in 0..partition.local_rows() {
        let global_row = partition.global_row(local_row);
        let mut col = (global_row + phase.parity()) % 2;
        while col < width {
            // An occupant that already moved this generation sits a move
            // out; its cell was flagged when it arrived.
            if !read.cell(local_row, col).arrived {
                process_cell(read, write, local_row, col, global_row, rules);
            }
            col += 2;
        }
    }
}

/// Post-phase aging over owned rows. Every cell ages independently, so
/// this runs through rayon.
pub fn run_aging(store: &mut GridStore, partition: &Partition, rules: &RuleConfig) {
    let owned = partition.owned_local_range();
    let row_count = owned.len();
    if row_count == 0 {
        return;
    }
    let rules = *rules;
    store
        .write_mut()
        .rows_slice_mut(owned.start, row_count)
        .par_iter_mut()
        .for_each(|cell| age_cell(cell, &rules));
}

/// Advance the local grid by one full generation.
pub fn run_generation(
    store: &mut GridStore,
    partition: &Partition,
    rules: &RuleConfig,
    halo: &mut impl HaloSync,
) -> Result<()> {
    store.clear_arrived();

    run_sub_phase(store, partition, rules, SubPhase::Even);
    store.commit();
    halo.sync(store)?;

    run_sub_phase(store, partition, rules, SubPhase::Odd);
    run_aging(store, partition, rules);
    store.commit();
    halo.sync(store)?;

    Ok(())
}

//! One worker: a partition's grid plus its generation loop

use serde::Serialize;

use crate::core::config::RuleConfig;
use crate::core::error::Result;
use crate::engine::halo::{HaloExchanger, NeighborLink};
use crate::engine::partition::Partition;
use crate::engine::scheduler::run_generation;
use crate::grid::board::{BoardLayout, GridStore};
use crate::grid::cell::Occupant;

/// Everything a worker needs to know about itself. Threaded explicitly
/// through the engine instead of living in process-wide state.
#[derive(Debug, Clone, Copy)]
pub struct WorkerCtx {
    pub id: usize,
    pub workers: usize,
    pub partition: Partition,
    pub rules: RuleConfig,
}

/// A non-empty cell in the final report, in global coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OccupiedCell {
    pub row: usize,
    pub col: usize,
    pub occupant: Occupant,
}

pub struct Worker {
    ctx: WorkerCtx,
    store: GridStore,
    halo: HaloExchanger,
}

impl Worker {
    pub fn new(
        ctx: WorkerCtx,
        layout: &BoardLayout,
        prev: Option<NeighborLink>,
        next: Option<NeighborLink>,
    ) -> Self {
        let store = GridStore::from_layout(layout, &ctx.partition);
        let halo = HaloExchanger::new(ctx.partition, prev, next);
        Self { ctx, store, halo }
    }

    /// Run the configured number of generations and report this worker's
    /// owned occupied cells. A degenerate worker with no owned rows does
    /// no work and reports nothing.
    pub fn run(mut self, generations: u32) -> Result<Vec<OccupiedCell>> {
        if self.ctx.partition.owned == 0 {
            tracing::debug!(id = self.ctx.id, "worker owns no rows, idling");
            return Ok(Vec::new());
        }

        tracing::debug!(
            id = self.ctx.id,
            workers = self.ctx.workers,
            start_row = self.ctx.partition.start_row,
            owned = self.ctx.partition.owned,
            "worker starting"
        );
        for generation in 0..generations {
            run_generation(
                &mut self.store,
                &self.ctx.partition,
                &self.ctx.rules,
                &mut self.halo,
            )?;
            tracing::trace!(id = self.ctx.id, generation, "generation complete");
        }
        Ok(self.report())
    }

    fn report(&self) -> Vec<OccupiedCell> {
        let partition = &self.ctx.partition;
        let mut cells = Vec::new();
        for local_row in partition.owned_local_range() {
            let global_row = partition.global_row(local_row);
            for (col, cell) in self.store.read().row(local_row).iter().enumerate() {
                if cell.occupant != Occupant::Empty {
                    cells.push(OccupiedCell {
                        row: global_row,
                        col,
                        occupant: cell.occupant,
                    });
                }
            }
        }
        cells
    }
}

//! Row-range partitioning
//!
//! The grid is split into contiguous row ranges, one per worker, each
//! padded with up to two halo rows mirroring the neighbor's boundary. The
//! plan is a pure function of `(grid_size, workers)` so every worker
//! derives the same table without talking to anyone.

use crate::core::error::{Result, SimError};

/// Depth of the halo overlap. A move travels at most one row, and a halo
/// source needs one further row of context to compute its candidates,
/// hence two.
pub const HALO_DEPTH: usize = 2;

/// One worker's assigned row range plus halo depth on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    /// First owned global row.
    pub start_row: usize,
    /// Number of owned rows; zero for surplus workers beyond the cap.
    pub owned: usize,
    /// Halo rows mirrored from the previous worker (0 for the first).
    pub prev_halo: usize,
    /// Halo rows mirrored from the next worker (0 for the last).
    pub next_halo: usize,
}

impl Partition {
    /// Total local rows including halos.
    pub fn local_rows(&self) -> usize {
        self.prev_halo + self.owned + self.next_halo
    }

    /// Global row of local row 0.
    pub fn first_local_global_row(&self) -> usize {
        self.start_row - self.prev_halo
    }

    /// Global row for a local row index.
    pub fn global_row(&self, local_row: usize) -> usize {
        self.first_local_global_row() + local_row
    }

    /// Local range of owned rows.
    pub fn owned_local_range(&self) -> std::ops::Range<usize> {
        self.prev_halo..self.prev_halo + self.owned
    }

    /// Boundary rows sent to each existing neighbor per exchange.
    pub fn boundary_rows(&self) -> usize {
        self.owned.min(HALO_DEPTH)
    }
}

/// The full partition table for a run.
#[derive(Debug, Clone)]
pub struct PartitionPlan {
    grid_size: usize,
    workers: Vec<Partition>,
}

impl PartitionPlan {
    /// Divide `grid_size` rows as evenly as possible across `workers`,
    /// remainder absorbed by the last active worker, then derive halo
    /// depths bounded by each neighbor's owned rows.
    ///
    /// A worker owning a single row cannot give its halo sources full
    /// candidate context, so the active set is capped at `grid_size /
    /// HALO_DEPTH`: every row-owning worker gets at least two rows and
    /// surplus workers own nothing.
    pub fn compute(grid_size: usize, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(SimError::Partition("worker count must be > 0".into()));
        }

        let active = workers.min((grid_size / HALO_DEPTH).max(1));
        let base = grid_size / active;
        let mut owned: Vec<usize> = vec![0; workers];
        for rows in owned.iter_mut().take(active) {
            *rows = base;
        }
        owned[active - 1] = grid_size - base * (active - 1);

        let mut partitions = Vec::with_capacity(workers);
        let mut start_row = 0;
        for id in 0..workers {
            let prev_halo = if id > 0 && owned[id] > 0 {
                owned[id - 1].min(HALO_DEPTH)
            } else {
                0
            };
            let next_halo = if id + 1 < workers && owned[id] > 0 {
                owned[id + 1].min(HALO_DEPTH)
            } else {
                0
            };
            partitions.push(Partition {
                start_row,
                owned: owned[id],
                prev_halo,
                next_halo,
            });
            start_row += owned[id];
        }

        let plan = Self {
            grid_size,
            workers: partitions,
        };
        plan.validate()?;
        Ok(plan)
    }

    /// A worker that detects an inconsistent plan must abort before
    /// entering the scheduler loop.
    fn validate(&self) -> Result<()> {
        let total: usize = self.workers.iter().map(|p| p.owned).sum();
        if total != self.grid_size {
            return Err(SimError::Partition(format!(
                "owned rows sum to {} but grid has {}",
                total, self.grid_size
            )));
        }
        let mut expected_start = 0;
        for (id, partition) in self.workers.iter().enumerate() {
            if partition.start_row != expected_start {
                return Err(SimError::Partition(format!(
                    "worker {} starts at row {} but previous ranges end at {}",
                    id, partition.start_row, expected_start
                )));
            }
            if partition.prev_halo > partition.start_row {
                return Err(SimError::Partition(format!(
                    "worker {} halo extends above the grid",
                    id
                )));
            }
            expected_start += partition.owned;
        }
        Ok(())
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub fn partition(&self, id: usize) -> &Partition {
        &self.workers[id]
    }
}

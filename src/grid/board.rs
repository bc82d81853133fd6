//! Worker-local grid storage
//!
//! Each worker holds two row-major boards (read/write) covering its owned
//! rows plus up to two halo rows on each side. The write buffer takes all
//! sub-phase mutations and is committed back onto the read buffer before a
//! halo exchange, so both buffers are identical between sub-phases.

use crate::engine::partition::Partition;
use crate::grid::cell::{Cell, Occupant};

/// Parsed initial layout: grid size plus the listed non-empty cells.
/// Cells absent from the list are Empty.
#[derive(Debug, Clone)]
pub struct BoardLayout {
    pub size: usize,
    pub cells: Vec<(usize, usize, Occupant)>,
}

/// Row-major board of cells with bounds-checked access.
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(rows: usize, width: usize) -> Self {
        Self {
            rows,
            width,
            cells: vec![Cell::empty(); rows * width],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.width {
            Some(&self.cells[row * self.width + col])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        if row < self.rows && col < self.width {
            Some(&mut self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Direct access for coordinates already validated against the local
    /// extent (candidate positions always are).
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * self.width + col]
    }

    #[inline]
    pub fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        &mut self.cells[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if row < self.rows && col < self.width {
            self.cells[row * self.width + col] = cell;
        }
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn rows_slice_mut(&mut self, start_row: usize, row_count: usize) -> &mut [Cell] {
        let start = start_row * self.width;
        &mut self.cells[start..start + row_count * self.width]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

/// Double-buffered local grid for one worker.
pub struct GridStore {
    read: Board,
    write: Board,
}

impl GridStore {
    /// Allocate both buffers for a partition and overlay the initial
    /// layout entries that fall inside the partition's local extent
    /// (halo rows included).
    pub fn from_layout(layout: &BoardLayout, partition: &Partition) -> Self {
        let mut read = Board::new(partition.local_rows(), layout.size);

        let base = partition.first_local_global_row();
        for &(row, col, occupant) in &layout.cells {
            if row >= base && row < base + partition.local_rows() {
                read.set(row - base, col, Cell::with_occupant(occupant));
            }
        }

        let write = read.clone();
        Self { read, write }
    }

    pub fn read(&self) -> &Board {
        &self.read
    }

    pub fn write_mut(&mut self) -> &mut Board {
        &mut self.write
    }

    /// Split borrow for a sub-phase: immutable read state, mutable write
    /// buffer.
    pub fn buffers_mut(&mut self) -> (&Board, &mut Board) {
        (&self.read, &mut self.write)
    }

    /// Publish the write buffer as the new read state.
    pub fn commit(&mut self) {
        self.read.cells_mut().copy_from_slice(self.write.cells());
    }

    /// Drop last generation's arrival marks from both buffers.
    pub fn clear_arrived(&mut self) {
        for cell in self.write.cells_mut() {
            cell.arrived = false;
        }
        for cell in self.read.cells_mut() {
            cell.arrived = false;
        }
    }

    /// Copy of `row_count` rows starting at `start_row`, flattened
    /// row-major. Used as the outbound halo payload.
    pub fn copy_rows(&self, start_row: usize, row_count: usize) -> Vec<Cell> {
        let width = self.read.width();
        let start = start_row * width;
        self.read.cells()[start..start + row_count * width].to_vec()
    }

    /// Straight overwrite of halo rows in both buffers with a received
    /// payload. No merging happens here.
    pub fn overwrite_rows(&mut self, start_row: usize, row_count: usize, payload: &[Cell]) {
        let width = self.read.width();
        debug_assert_eq!(payload.len(), row_count * width);
        let start = start_row * width;
        self.read.cells_mut()[start..start + row_count * width].copy_from_slice(payload);
        self.write.cells_mut()[start..start + row_count * width].copy_from_slice(payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::partition::PartitionPlan;

    #[test]
    fn test_board_bounds_checked_access() {
        let mut board = Board::new(3, 4);
        assert!(board.get(2, 3).is_some());
        assert!(board.get(3, 0).is_none());
        assert!(board.get(0, 4).is_none());

        board.set(1, 1, Cell::with_occupant(Occupant::Tree));
        assert_eq!(board.get(1, 1).unwrap().occupant, Occupant::Tree);
        // Out-of-range set is a no-op, mirroring bounds-checked get.
        board.set(9, 9, Cell::with_occupant(Occupant::Wolf));
    }

    #[test]
    fn test_layout_overlay_converts_global_rows() {
        // 6 rows over 2 workers: worker 1 owns rows 3..6, halo rows 1..3.
        let plan = PartitionPlan::compute(6, 2).unwrap();
        let partition = plan.partition(1);
        let layout = BoardLayout {
            size: 6,
            cells: vec![
                (0, 0, Occupant::Wolf),     // outside local extent
                (1, 2, Occupant::Tree),     // outer halo row
                (3, 4, Occupant::Squirrel), // first owned row
                (5, 5, Occupant::Ice),      // last owned row
            ],
        };

        let store = GridStore::from_layout(&layout, partition);
        // Local row 0 is global row 1.
        assert_eq!(store.read().get(0, 2).unwrap().occupant, Occupant::Tree);
        assert_eq!(
            store.read().get(2, 4).unwrap().occupant,
            Occupant::Squirrel
        );
        assert_eq!(store.read().get(4, 5).unwrap().occupant, Occupant::Ice);
        // The wolf at global row 0 is not visible to this worker.
        let wolves = store
            .read()
            .cells()
            .iter()
            .filter(|c| c.occupant == Occupant::Wolf)
            .count();
        assert_eq!(wolves, 0);
    }

    #[test]
    fn test_commit_publishes_write_buffer() {
        let plan = PartitionPlan::compute(4, 1).unwrap();
        let layout = BoardLayout {
            size: 4,
            cells: vec![],
        };
        let mut store = GridStore::from_layout(&layout, plan.partition(0));

        store
            .write_mut()
            .set(2, 2, Cell::with_occupant(Occupant::Squirrel));
        assert_eq!(store.read().get(2, 2).unwrap().occupant, Occupant::Empty);
        store.commit();
        assert_eq!(
            store.read().get(2, 2).unwrap().occupant,
            Occupant::Squirrel
        );
    }

    #[test]
    fn test_overwrite_rows_hits_both_buffers() {
        let plan = PartitionPlan::compute(4, 1).unwrap();
        let layout = BoardLayout {
            size: 4,
            cells: vec![],
        };
        let mut store = GridStore::from_layout(&layout, plan.partition(0));

        let payload = vec![Cell::with_occupant(Occupant::Ice); 4];
        store.overwrite_rows(1, 1, &payload);
        assert_eq!(store.read().get(1, 0).unwrap().occupant, Occupant::Ice);
        store.commit();
        // Commit must not resurrect the pre-overwrite row.
        assert_eq!(store.read().get(1, 3).unwrap().occupant, Occupant::Ice);
    }
}

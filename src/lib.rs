//! Wolfgrid - distributed predator/prey cellular automaton
//!
//! Wolves, squirrels, trees and ice on an N x N grid, advanced generation
//! by generation. The grid is partitioned into row ranges across
//! share-nothing worker threads that keep their boundary rows consistent
//! through halo exchange; checkerboard sub-phases and coordinate-pure
//! tie-breaks make the parallel result identical to a sequential run.

pub mod core;
pub mod engine;
pub mod grid;
pub mod io;

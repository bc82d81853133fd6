pub mod board;
pub mod cell;

pub use board::{Board, BoardLayout, GridStore};
pub use cell::{Cell, Occupant};

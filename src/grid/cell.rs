//! Per-location cell state

use serde::{Deserialize, Serialize};

/// What currently occupies a grid cell.
///
/// The variant set is closed on purpose: the move resolver and the aging
/// pass match exhaustively so a new occupant kind cannot be added without
/// deciding its rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    Empty,
    Wolf,
    Squirrel,
    Tree,
    Ice,
    SquirrelOnTree,
}

impl Occupant {
    /// Board file symbol. Empty cells are never listed, so they have none.
    pub fn symbol(self) -> Option<char> {
        match self {
            Occupant::Empty => None,
            Occupant::Wolf => Some('w'),
            Occupant::Squirrel => Some('s'),
            Occupant::Tree => Some('t'),
            Occupant::Ice => Some('i'),
            Occupant::SquirrelOnTree => Some('$'),
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'w' => Some(Occupant::Wolf),
            's' => Some(Occupant::Squirrel),
            't' => Some(Occupant::Tree),
            'i' => Some(Occupant::Ice),
            '$' => Some(Occupant::SquirrelOnTree),
            _ => None,
        }
    }

    /// Squirrel on the ground or up a tree.
    pub fn is_squirrel(self) -> bool {
        matches!(self, Occupant::Squirrel | Occupant::SquirrelOnTree)
    }
}

/// One grid location.
///
/// `breeding` counts generations survived without reproducing and
/// `starvation` counts generations since a wolf last ate; both use the
/// `-1` "just bred / just born" sentinel. `arrived` marks a cell written
/// as a move destination this generation so the second sub-phase does not
/// move the same occupant twice; it is exchanged with halo rows so both
/// sides of a partition boundary agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub occupant: Occupant,
    pub breeding: i32,
    pub starvation: i32,
    pub arrived: bool,
}

impl Cell {
    pub fn empty() -> Self {
        Self {
            occupant: Occupant::Empty,
            breeding: 0,
            starvation: 0,
            arrived: false,
        }
    }

    pub fn with_occupant(occupant: Occupant) -> Self {
        Self {
            occupant,
            ..Self::empty()
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

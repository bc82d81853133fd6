//! Board file parsing and result listing
//!
//! Format: first line is the grid size N, each following line is
//! `row col symbol` with symbols `w s t i $`. Cells not listed are Empty.
//! Malformed or out-of-range lines are skipped, not rejected.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::error::{Result, SimError};
use crate::engine::worker::OccupiedCell;
use crate::grid::board::BoardLayout;
use crate::grid::cell::Occupant;

pub fn read_board(path: &Path) -> Result<BoardLayout> {
    let file = File::open(path)?;
    parse_board(BufReader::new(file))
}

pub fn parse_board<R: BufRead>(reader: R) -> Result<BoardLayout> {
    let mut lines = reader.lines();
    let size: usize = lines
        .next()
        .ok_or_else(|| SimError::Board("empty board file".into()))??
        .trim()
        .parse()
        .map_err(|_| SimError::Board("first line must be the grid size".into()))?;

    let mut cells = Vec::new();
    for line in lines {
        let line = line?;
        match parse_entry(&line, size) {
            Some(entry) => cells.push(entry),
            None => {
                if !line.trim().is_empty() {
                    tracing::debug!(%line, "skipping malformed board line");
                }
            }
        }
    }
    Ok(BoardLayout { size, cells })
}

fn parse_entry(line: &str, size: usize) -> Option<(usize, usize, Occupant)> {
    let mut parts = line.split_whitespace();
    let row: usize = parts.next()?.parse().ok()?;
    let col: usize = parts.next()?.parse().ok()?;
    let occupant = Occupant::from_symbol(parts.next()?.chars().next()?)?;
    (row < size && col < size).then_some((row, col, occupant))
}

/// `row col symbol` per occupied cell, the original listing format.
pub fn format_text(cells: &[OccupiedCell]) -> String {
    let mut out = String::new();
    for cell in cells {
        if let Some(symbol) = cell.occupant.symbol() {
            out.push_str(&format!("{} {} {}\n", cell.row, cell.col, symbol));
        }
    }
    out
}

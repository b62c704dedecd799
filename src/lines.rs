//! Precomputed winning-line table for the 4D lattice.
//!
//! A winning line is three collinear, in-bounds coordinates. Every line
//! is generated once by walking each of the 80 non-zero direction
//! vectors from each start cell, then deduplicated so a direction and
//! its negation count as one line. The 3-per-axis, 4-dimensional lattice
//! has exactly 272 such lines.

use crate::board::{Board, CELL_COUNT, Coord, Symbol};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use tracing::debug;

/// Number of winning lines in the 3×3×3×3 lattice.
pub const LINE_COUNT: usize = 272;

static GLOBAL: Lazy<LineIndex> = Lazy::new(LineIndex::build);

/// Immutable table of all winning lines, with a reverse index from each
/// cell to the lines passing through it.
///
/// Built once per process via [`LineIndex::global`] and shared by every
/// game and strategy; there is no per-game rebuild.
#[derive(Debug)]
pub struct LineIndex {
    lines: Vec<[Coord; 3]>,
    through: Vec<Vec<u16>>,
}

impl LineIndex {
    /// The shared process-wide instance.
    pub fn global() -> &'static LineIndex {
        &GLOBAL
    }

    /// Enumerates and indexes every winning line.
    ///
    /// Prefer [`LineIndex::global`]; this exists so tests can verify the
    /// construction is deterministic.
    pub fn build() -> Self {
        let mut lines: Vec<[Coord; 3]> = Vec::with_capacity(LINE_COUNT);
        let mut seen: HashSet<[usize; 3]> = HashSet::with_capacity(2 * LINE_COUNT);

        for start in Coord::all() {
            for dir in Self::directions() {
                let Some(line) = Self::walk(start, dir) else {
                    continue;
                };
                let mut key = [line[0].index(), line[1].index(), line[2].index()];
                key.sort_unstable();
                if seen.insert(key) {
                    // Canonical form: cells in ascending lattice order.
                    let mut canonical = line;
                    canonical.sort_unstable_by_key(Coord::index);
                    lines.push(canonical);
                }
            }
        }

        let mut through: Vec<Vec<u16>> = vec![Vec::new(); CELL_COUNT];
        for (idx, line) in lines.iter().enumerate() {
            for cell in line {
                through[cell.index()].push(idx as u16);
            }
        }

        debug!(lines = lines.len(), "Built winning-line index");
        Self { lines, through }
    }

    /// All 80 non-zero direction vectors with components in {-1, 0, 1}.
    fn directions() -> impl Iterator<Item = [i8; 4]> {
        const STEPS: [i8; 3] = [-1, 0, 1];
        STEPS.into_iter().flat_map(|dw| {
            STEPS.into_iter().flat_map(move |dx| {
                STEPS.into_iter().flat_map(move |dy| {
                    STEPS
                        .into_iter()
                        .map(move |dz| [dw, dx, dy, dz])
                        .filter(|d| *d != [0, 0, 0, 0])
                })
            })
        })
    }

    /// Walks three steps from `start` along `dir`, keeping the path only
    /// if all three cells stay in bounds.
    fn walk(start: Coord, dir: [i8; 4]) -> Option<[Coord; 3]> {
        Some([start, start.offset(dir, 1)?, start.offset(dir, 2)?])
    }

    /// All winning lines.
    pub fn lines(&self) -> &[[Coord; 3]] {
        &self.lines
    }

    /// Number of winning lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when the table holds no lines (never the case after build).
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The winning lines passing through `cell`.
    pub fn lines_through(&self, cell: Coord) -> impl Iterator<Item = &[Coord; 3]> {
        self.through[cell.index()]
            .iter()
            .map(|&idx| &self.lines[idx as usize])
    }

    /// The occupant owning every cell of `line`, if the line is complete.
    pub fn line_owner(&self, board: &Board, line: &[Coord; 3]) -> Option<Symbol> {
        let first = board.get(line[0])?;
        (board.get(line[1]) == Some(first) && board.get(line[2]) == Some(first)).then_some(first)
    }
}

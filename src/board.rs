//! Core board types for 4D tic-tac-toe.
//!
//! The board is a 3×3×3×3 hypercube: 81 cells addressed by a 4-axis
//! [`Coord`]. Each cell holds an optional [`Symbol`] — the mark of the
//! player occupying it.

use serde::{Deserialize, Serialize};

/// Number of positions per axis.
pub const SIZE: u8 = 3;

/// Total number of cells on the board (3^4).
pub const CELL_COUNT: usize = 81;

/// A coordinate in the 3×3×3×3 lattice.
///
/// A `Coord` is in-bounds by construction: [`Coord::new`] rejects any
/// axis outside `0..3`, so board access never needs a range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 4]", into = "[u8; 4]")]
pub struct Coord {
    axes: [u8; 4],
}

/// Error constructing a [`Coord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("coordinate ({}, {}, {}, {}) out of range (each axis must be 0-2)", w, x, y, z)]
pub struct CoordError {
    /// Offending w axis value.
    pub w: u8,
    /// Offending x axis value.
    pub x: u8,
    /// Offending y axis value.
    pub y: u8,
    /// Offending z axis value.
    pub z: u8,
}

impl Coord {
    /// Creates a coordinate from four axis values.
    ///
    /// # Errors
    ///
    /// Returns [`CoordError`] if any axis is outside `0..3`.
    pub fn new(w: u8, x: u8, y: u8, z: u8) -> Result<Self, CoordError> {
        if w < SIZE && x < SIZE && y < SIZE && z < SIZE {
            Ok(Self { axes: [w, x, y, z] })
        } else {
            Err(CoordError { w, x, y, z })
        }
    }

    /// The w axis value.
    pub fn w(&self) -> u8 {
        self.axes[0]
    }

    /// The x axis value.
    pub fn x(&self) -> u8 {
        self.axes[1]
    }

    /// The y axis value.
    pub fn y(&self) -> u8 {
        self.axes[2]
    }

    /// The z axis value.
    pub fn z(&self) -> u8 {
        self.axes[3]
    }

    /// Flat index into the 81-cell lattice (w outermost, z innermost).
    pub fn index(&self) -> usize {
        self.axes
            .iter()
            .fold(0usize, |acc, &a| acc * SIZE as usize + a as usize)
    }

    /// Recovers a coordinate from its flat index.
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= CELL_COUNT {
            return None;
        }
        let mut rem = index;
        let mut axes = [0u8; 4];
        for a in axes.iter_mut().rev() {
            *a = (rem % SIZE as usize) as u8;
            rem /= SIZE as usize;
        }
        Some(Self { axes })
    }

    /// Iterates all 81 coordinates in lattice order.
    ///
    /// This ordering (w outermost, z innermost, each ascending) is the
    /// tie-break order for strategies that take the first matching cell,
    /// so it must stay stable.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELL_COUNT).filter_map(Coord::from_index)
    }

    /// Steps `steps` times along a direction vector, if the result stays
    /// in bounds.
    pub fn offset(&self, dir: [i8; 4], steps: i8) -> Option<Coord> {
        let mut axes = [0u8; 4];
        for (k, a) in axes.iter_mut().enumerate() {
            let v = self.axes[k] as i8 + dir[k] * steps;
            if !(0..SIZE as i8).contains(&v) {
                return None;
            }
            *a = v as u8;
        }
        Some(Self { axes })
    }
}

impl TryFrom<[u8; 4]> for Coord {
    type Error = CoordError;

    fn try_from(axes: [u8; 4]) -> Result<Self, Self::Error> {
        Coord::new(axes[0], axes[1], axes[2], axes[3])
    }
}

impl From<Coord> for [u8; 4] {
    fn from(coord: Coord) -> Self {
        coord.axes
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.axes[0], self.axes[1], self.axes[2], self.axes[3]
        )
    }
}

/// A player's mark: one or two characters.
///
/// Stored inline so boards stay cheap to clone — search strategies clone
/// the board once per candidate move. Two-character and non-ASCII symbols
/// (the bot roster uses emoji) are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    chars: [char; 2],
    len: u8,
}

/// Error constructing a [`Symbol`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SymbolError {
    /// The symbol string was empty.
    #[display("symbol must not be empty")]
    Empty,
    /// The symbol string was longer than two characters.
    #[display("symbol {_0:?} is too long (max 2 characters)")]
    TooLong(#[error(not(source))] String),
}

impl Symbol {
    /// Creates a symbol from a 1-2 character string.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError`] if the string is empty or longer than two
    /// characters.
    pub fn new(s: &str) -> Result<Self, SymbolError> {
        let mut chars = s.chars();
        let first = chars.next().ok_or(SymbolError::Empty)?;
        let second = chars.next();
        if chars.next().is_some() {
            return Err(SymbolError::TooLong(s.to_owned()));
        }
        Ok(Self {
            chars: [first, second.unwrap_or('\0')],
            len: if second.is_some() { 2 } else { 1 },
        })
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.chars[0])?;
        if self.len == 2 {
            write!(f, "{}", self.chars[1])?;
        }
        Ok(())
    }
}

impl Serialize for Symbol {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Symbol::new(&s).map_err(serde::de::Error::custom)
    }
}

/// The 3×3×3×3 board.
///
/// `clone()` yields a fully independent board; strategies always work on
/// such a copy, never on the live game board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Symbol>; CELL_COUNT],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    /// The occupant at `coord`, or `None` if the cell is empty.
    pub fn get(&self, coord: Coord) -> Option<Symbol> {
        self.cells[coord.index()]
    }

    /// Overwrites the cell at `coord`.
    pub fn set(&mut self, coord: Coord, occupant: Option<Symbol>) {
        self.cells[coord.index()] = occupant;
    }

    /// Checks whether the cell at `coord` is empty.
    pub fn is_empty_cell(&self, coord: Coord) -> bool {
        self.cells[coord.index()].is_none()
    }

    /// Places `symbol` at `coord` if the cell is empty.
    ///
    /// Returns `false` without modifying the board when the cell is
    /// occupied. Turn and identity validation belong to
    /// [`Game`](crate::Game), not here.
    pub fn try_place(&mut self, symbol: Symbol, coord: Coord) -> bool {
        let cell = &mut self.cells[coord.index()];
        if cell.is_some() {
            return false;
        }
        *cell = Some(symbol);
        true
    }

    /// All unoccupied coordinates, in lattice order.
    pub fn empty_cells(&self) -> Vec<Coord> {
        Coord::all().filter(|c| self.is_empty_cell(*c)).collect()
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Checks whether every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Cell contents in lattice order, for snapshots.
    pub fn cells(&self) -> &[Option<Symbol>; CELL_COUNT] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(w: u8, x: u8, y: u8, z: u8) -> Coord {
        Coord::new(w, x, y, z).expect("valid coord")
    }

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).expect("valid symbol")
    }

    #[test]
    fn test_coord_rejects_out_of_range() {
        assert!(Coord::new(0, 1, 2, 3).is_err());
        assert!(Coord::new(3, 0, 0, 0).is_err());
        assert!(Coord::new(2, 2, 2, 2).is_ok());
    }

    #[test]
    fn test_coord_index_round_trip() {
        for (i, c) in Coord::all().enumerate() {
            assert_eq!(c.index(), i);
            assert_eq!(Coord::from_index(i), Some(c));
        }
        assert_eq!(Coord::all().count(), CELL_COUNT);
    }

    #[test]
    fn test_coord_lattice_order() {
        let all: Vec<_> = Coord::all().collect();
        assert_eq!(all[0], coord(0, 0, 0, 0));
        assert_eq!(all[1], coord(0, 0, 0, 1));
        assert_eq!(all[3], coord(0, 0, 1, 0));
        assert_eq!(all[80], coord(2, 2, 2, 2));
    }

    #[test]
    fn test_coord_offset_stays_in_bounds() {
        let c = coord(1, 1, 1, 1);
        assert_eq!(c.offset([1, 0, -1, 0], 1), Some(coord(2, 1, 0, 1)));
        assert_eq!(c.offset([1, 0, 0, 0], 2), None);
        assert_eq!(c.offset([0, -1, 0, 0], 2), None);
    }

    #[test]
    fn test_symbol_validation() {
        assert!(Symbol::new("X").is_ok());
        assert!(Symbol::new("P2").is_ok());
        assert!(Symbol::new("🤖").is_ok());
        assert!(Symbol::new("").is_err());
        assert!(Symbol::new("ABC").is_err());
    }

    #[test]
    fn test_symbol_display() {
        assert_eq!(sym("X").to_string(), "X");
        assert_eq!(sym("P2").to_string(), "P2");
    }

    #[test]
    fn test_set_does_not_alias_other_cells() {
        let mut board = Board::new();
        let target = coord(1, 2, 0, 1);
        board.set(target, Some(sym("X")));
        for c in Coord::all() {
            if c == target {
                assert_eq!(board.get(c), Some(sym("X")));
            } else {
                assert_eq!(board.get(c), None);
            }
        }
    }

    #[test]
    fn test_try_place_rejects_occupied() {
        let mut board = Board::new();
        let c = coord(0, 0, 0, 0);
        assert!(board.try_place(sym("X"), c));
        assert!(!board.try_place(sym("O"), c));
        assert_eq!(board.get(c), Some(sym("X")));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = Board::new();
        original.try_place(sym("X"), coord(1, 1, 1, 1));
        let mut copy = original.clone();
        copy.try_place(sym("O"), coord(0, 0, 0, 0));
        copy.set(coord(1, 1, 1, 1), None);
        assert_eq!(original.get(coord(0, 0, 0, 0)), None);
        assert_eq!(original.get(coord(1, 1, 1, 1)), Some(sym("X")));
    }

    #[test]
    fn test_empty_cells_and_counts() {
        let mut board = Board::new();
        assert_eq!(board.empty_cells().len(), CELL_COUNT);
        assert_eq!(board.occupied_count(), 0);
        board.try_place(sym("X"), coord(0, 0, 0, 0));
        board.try_place(sym("O"), coord(2, 2, 2, 2));
        assert_eq!(board.empty_cells().len(), CELL_COUNT - 2);
        assert_eq!(board.occupied_count(), 2);
        assert!(!board.is_full());
    }

    #[test]
    fn test_coord_serde_round_trip() {
        let c = coord(0, 1, 2, 1);
        let json = serde_json::to_string(&c).expect("serialize");
        assert_eq!(json, "[0,1,2,1]");
        let back: Coord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, c);
        assert!(serde_json::from_str::<Coord>("[0,1,2,3]").is_err());
    }
}

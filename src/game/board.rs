//! Square-centric board storage.
//!
//! Unlike engines for games with homogeneous piece sets, the board here is a
//! plain `dim × dim` grid of optional units: with at most 12 units on a tiny
//! board there is nothing for set-based representations to win, and a flat
//! grid keeps cloning (the hot operation of the search) a single memcpy-like
//! `Vec` copy.

use crate::game::core::{Coord, Player};
use crate::game::unit::{Unit, UnitKind};

/// Boards smaller than this cannot fit the initial deployment without the two
/// camps overlapping.
pub const MIN_DIM: u8 = 4;

/// Row labels are single letters and column labels single hex digits, which
/// caps the printable board size.
pub const MAX_DIM: u8 = 16;

/// A `dim × dim` grid of optional units, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    dim: u8,
    cells: Vec<Option<Unit>>,
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Panics
    ///
    /// Panics if `dim` is outside `MIN_DIM..=MAX_DIM`.
    #[must_use]
    pub fn empty(dim: u8) -> Self {
        assert!(
            (MIN_DIM..=MAX_DIM).contains(&dim),
            "board dimension should be within {MIN_DIM}..={MAX_DIM}, got {dim}"
        );
        Self {
            dim,
            cells: vec![None; usize::from(dim) * usize::from(dim)],
        }
    }

    /// Creates a board with the standard initial deployment: the defender
    /// holds the top-left corner, the attacker the bottom-right one.
    #[must_use]
    pub fn starting(dim: u8) -> Self {
        use Player::{Attacker, Defender};
        use UnitKind::{Ai, Firewall, Program, Tech, Virus};

        let mut board = Self::empty(dim);
        let md = (dim - 1) as i8;

        board.place(Coord::new(0, 0), Unit::new(Defender, Ai));
        board.place(Coord::new(1, 0), Unit::new(Defender, Tech));
        board.place(Coord::new(0, 1), Unit::new(Defender, Tech));
        board.place(Coord::new(2, 0), Unit::new(Defender, Firewall));
        board.place(Coord::new(0, 2), Unit::new(Defender, Firewall));
        board.place(Coord::new(1, 1), Unit::new(Defender, Program));

        board.place(Coord::new(md, md), Unit::new(Attacker, Ai));
        board.place(Coord::new(md - 1, md), Unit::new(Attacker, Virus));
        board.place(Coord::new(md, md - 1), Unit::new(Attacker, Virus));
        board.place(Coord::new(md - 2, md), Unit::new(Attacker, Program));
        board.place(Coord::new(md, md - 2), Unit::new(Attacker, Program));
        board.place(Coord::new(md - 1, md - 1), Unit::new(Attacker, Firewall));

        board
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn dim(&self) -> u8 {
        self.dim
    }

    /// Whether the coordinate lies on the board.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        (0..self.dim as i8).contains(&coord.row) && (0..self.dim as i8).contains(&coord.col)
    }

    fn index(&self, coord: Coord) -> usize {
        debug_assert!(self.contains(coord));
        coord.row as usize * usize::from(self.dim) + coord.col as usize
    }

    /// The unit at the coordinate, if any. Off-board coordinates are empty.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&Unit> {
        if self.contains(coord) {
            self.cells[self.index(coord)].as_ref()
        } else {
            None
        }
    }

    /// Mutable access to the unit at the coordinate, if any.
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Unit> {
        if self.contains(coord) {
            let index = self.index(coord);
            self.cells[index].as_mut()
        } else {
            None
        }
    }

    /// Puts a unit on the cell, replacing whatever was there.
    pub fn place(&mut self, coord: Coord, unit: Unit) {
        let index = self.index(coord);
        self.cells[index] = Some(unit);
    }

    /// Removes and returns the unit at the coordinate.
    pub fn take(&mut self, coord: Coord) -> Option<Unit> {
        if self.contains(coord) {
            let index = self.index(coord);
            self.cells[index].take()
        } else {
            None
        }
    }

    /// Iterates over all occupied cells in row-major order.
    pub fn units(&self) -> impl Iterator<Item = (Coord, &Unit)> {
        self.cells.iter().enumerate().filter_map(|(index, cell)| {
            cell.as_ref().map(|unit| {
                let row = (index / usize::from(self.dim)) as i8;
                let col = (index % usize::from(self.dim)) as i8;
                (Coord::new(row, col), unit)
            })
        })
    }

    /// Iterates over all cells occupied by the given player, row-major.
    pub fn player_units(&self, player: Player) -> impl Iterator<Item = (Coord, &Unit)> {
        self.units().filter(move |(_, unit)| unit.player == player)
    }
}

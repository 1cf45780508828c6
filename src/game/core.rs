//! Game primitives commonly used within [`crate::game`].

use std::fmt;

use anyhow::bail;
use arrayvec::ArrayVec;

/// Row labels accepted in the text representation of a [`Coord`].
const ROW_LABELS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Column labels accepted in the text representation of a [`Coord`].
const COL_LABELS: &str = "0123456789abcdef";

/// Characters that are ignored when parsing coordinates, so that `"C4 C3"`,
/// `"c4,c3"` and `"C4-C3"` all describe the same move.
const SEPARATORS: &str = " ,.:;-_";

/// Upper bound on the number of legal moves in any position: each side fields
/// at most 12 units and every unit has at most 5 candidate actions (4 cardinal
/// steps plus self-destruct).
pub const MAX_MOVES: usize = 64;

/// A list of move candidates together with their classified [`Action`]s. The
/// bound makes it possible to keep candidate generation allocation-free.
pub type MoveList = ArrayVec<(CoordPair, Action), MAX_MOVES>;

/// The two adversaries. The attacker always plays the first turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Player {
    Attacker,
    Defender,
}

impl Player {
    /// The player who moves after this one.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Attacker => Self::Defender,
            Self::Defender => Self::Attacker,
        }
    }

    /// Lowercase initial used in the board rendering (`a` or `d`).
    #[must_use]
    pub const fn initial(self) -> char {
        match self {
            Self::Attacker => 'a',
            Self::Defender => 'd',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attacker => write!(f, "Attacker"),
            Self::Defender => write!(f, "Defender"),
        }
    }
}

/// A board cell coordinate (row, col).
///
/// The type intentionally allows out-of-board values: adjacency iteration
/// probes cells beyond the edge and the board lookup is the single place that
/// decides validity. Coordinates render as a row letter followed by a column
/// hex digit (`A0` is the top-left corner):
///
/// ```
/// use ai_wargame::game::core::Coord;
///
/// assert_eq!(Coord::new(2, 4).to_string(), "C4");
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// The 4 cross-adjacent coordinates, in up/left/down/right order. The
    /// results may lie outside the board.
    #[must_use]
    pub const fn adjacent(self) -> [Self; 4] {
        [
            Self::new(self.row - 1, self.col),
            Self::new(self.row, self.col - 1),
            Self::new(self.row + 1, self.col),
            Self::new(self.row, self.col + 1),
        ]
    }

    /// Iterates over the 3×3 neighborhood centered on this coordinate,
    /// including the center itself. Used for the self-destruct blast area.
    pub fn neighborhood(self) -> impl Iterator<Item = Self> {
        (self.row - 1..=self.row + 1)
            .flat_map(move |row| (self.col - 1..=self.col + 1).map(move |col| Self::new(row, col)))
    }

    /// Row letter used in the text representation, `?` when out of range.
    #[must_use]
    pub fn row_label(self) -> char {
        match usize::try_from(self.row) {
            Ok(row) if row < ROW_LABELS.len() => ROW_LABELS.as_bytes()[row] as char,
            _ => '?',
        }
    }

    /// Column hex digit used in the text representation, `?` when out of
    /// range.
    #[must_use]
    pub fn col_label(self) -> char {
        match usize::try_from(self.col) {
            Ok(col) if col < COL_LABELS.len() => COL_LABELS.as_bytes()[col] as char,
            _ => '?',
        }
    }

    fn from_labels(row: char, col: char) -> anyhow::Result<Self> {
        let Some(row) = ROW_LABELS.find(row.to_ascii_uppercase()) else {
            bail!("row should be a letter within 'A'..='Z', got '{row}'");
        };
        let Some(col) = COL_LABELS.find(col.to_ascii_lowercase()) else {
            bail!("column should be a hex digit, got '{col}'");
        };
        Ok(Self::new(row as i8, col as i8))
    }
}

impl TryFrom<&str> for Coord {
    type Error = anyhow::Error;

    /// Parses a coordinate from its text form, e.g. `D2`. Separator characters
    /// are ignored.
    fn try_from(coord: &str) -> anyhow::Result<Self> {
        let significant: Vec<char> = coord.chars()
            .filter(|c| !c.is_whitespace() && !SEPARATORS.contains(*c))
            .collect();
        match significant[..] {
            [row, col] => Self::from_labels(row, col),
            _ => bail!(
                "coordinate should be two-char (row letter + column digit), got '{coord}'"
            ),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_label(), self.col_label())
    }
}

/// A pair of coordinates describing a move (source and destination). The pair
/// with equal coordinates describes self-destruction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct CoordPair {
    pub src: Coord,
    pub dst: Coord,
}

impl CoordPair {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(src: Coord, dst: Coord) -> Self {
        Self { src, dst }
    }

    /// Creates a pair from 4 integers, mostly convenient in tests.
    #[must_use]
    pub const fn from_quad(row0: i8, col0: i8, row1: i8, col1: i8) -> Self {
        Self::new(Coord::new(row0, col0), Coord::new(row1, col1))
    }

    /// The (row, col) difference between destination and source.
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        (self.dst.row - self.src.row, self.dst.col - self.src.col)
    }

    /// Whether source and destination are the same cell.
    #[must_use]
    pub const fn is_self(self) -> bool {
        self.src.row == self.dst.row && self.src.col == self.dst.col
    }

    /// Whether the destination is exactly one cardinal step away from the
    /// source (diagonals do not count).
    #[must_use]
    pub const fn is_cardinal_step(self) -> bool {
        let (dr, dc) = self.delta();
        dr.abs() + dc.abs() == 1
    }
}

impl TryFrom<&str> for CoordPair {
    type Error = anyhow::Error;

    /// Parses a move from its text form, e.g. `A3 B2`. Separator characters
    /// are ignored.
    fn try_from(pair: &str) -> anyhow::Result<Self> {
        let significant: Vec<char> = pair.chars()
            .filter(|c| !c.is_whitespace() && !SEPARATORS.contains(*c))
            .collect();
        match significant[..] {
            [src_row, src_col, dst_row, dst_col] => Ok(Self::new(
                Coord::from_labels(src_row, src_col)?,
                Coord::from_labels(dst_row, dst_col)?,
            )),
            _ => bail!("move should be two coordinates (e.g. 'A3 B2'), got '{pair}'"),
        }
    }
}

impl fmt::Display for CoordPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.src, self.dst)
    }
}

/// Legal actions a move can express, produced by
/// [`crate::game::state::Game::classify`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Step onto an adjacent empty cell.
    Move,
    /// Strike an adjacent enemy unit (the target retaliates).
    Attack,
    /// Restore health of an adjacent ally.
    Repair,
    /// Blow up in place, damaging the whole 3×3 neighborhood.
    SelfDestruct,
}

/// Reasons a move is rejected. Classification is pure: the engine layer
/// decides how (and whether) to present these to a player.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[allow(missing_docs)]
pub enum IllegalMove {
    #[error("Specified coordinate does not exist!")]
    OffBoard,
    #[error("Coordinate does not contain a unit!")]
    EmptySource,
    #[error("Unit does not belong to this player!")]
    NotYourUnit,
    #[error("Units can only move in cardinal directions!")]
    NotCardinal,
    #[error("Non-tech defender unit cannot move towards its base.")]
    DefenderRetreat,
    #[error("Non-virus attacker unit cannot move towards its base.")]
    AttackerRetreat,
    #[error("Unit cannot move; it is engaged with another unit.")]
    Engaged,
    #[error("Action was not recognized.")]
    Unrecognized,
}

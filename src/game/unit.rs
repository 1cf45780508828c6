//! Units that populate the board: their kinds, combat tables and health
//! arithmetic.

use std::fmt;

use crate::game::core::Player;

/// Units never exceed this health; they also start with it.
pub const MAX_HEALTH: u8 = 9;

/// Every unit kind fielded by either side. The discriminants index the combat
/// tables below.
///
/// Kind is a compact representation using only one byte.
///
/// ```
/// use ai_wargame::game::unit::UnitKind;
///
/// assert_eq!(std::mem::size_of::<UnitKind>(), 1);
/// ```
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::EnumIter)]
#[allow(missing_docs)]
pub enum UnitKind {
    Ai = 0,
    Tech = 1,
    Virus = 2,
    Program = 3,
    Firewall = 4,
}

/// Damage dealt by a unit kind (row) to a target kind (column), before the
/// no-overkill cap. Indexed by [`UnitKind`] discriminants.
const DAMAGE: [[u8; 5]; 5] = [
    [3, 3, 3, 3, 1], // Ai
    [1, 1, 6, 1, 1], // Tech
    [9, 6, 1, 6, 1], // Virus
    [3, 3, 3, 3, 1], // Program
    [1, 1, 1, 1, 1], // Firewall
];

/// Health restored by a unit kind (row) to an allied target kind (column),
/// before the full-health cap. Only the AI and the Tech can repair anything.
const REPAIR: [[u8; 5]; 5] = [
    [0, 1, 1, 0, 0], // Ai
    [3, 0, 0, 3, 3], // Tech
    [0, 0, 0, 0, 0], // Virus
    [0, 0, 0, 0, 0], // Program
    [0, 0, 0, 0, 0], // Firewall
];

impl UnitKind {
    /// Human-readable kind name, as used in the move narration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ai => "AI",
            Self::Tech => "Tech",
            Self::Virus => "Virus",
            Self::Program => "Program",
            Self::Firewall => "Firewall",
        }
    }

    /// Uppercase initial used in the board rendering.
    #[must_use]
    pub const fn initial(self) -> char {
        match self {
            Self::Ai => 'A',
            Self::Tech => 'T',
            Self::Virus => 'V',
            Self::Program => 'P',
            Self::Firewall => 'F',
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single unit on the board. Renders as owner initial + kind initial +
/// health digit, e.g. `dA9` for the defender's AI at full health.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Unit {
    #[allow(missing_docs)]
    pub player: Player,
    #[allow(missing_docs)]
    pub kind: UnitKind,
    /// Always within `0..=MAX_HEALTH`; a unit at 0 is dead and must be
    /// removed from the board.
    pub health: u8,
}

impl Unit {
    /// Creates a unit at full health.
    #[must_use]
    pub const fn new(player: Player, kind: UnitKind) -> Self {
        Self {
            player,
            kind,
            health: MAX_HEALTH,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_alive(self) -> bool {
        self.health > 0
    }

    /// Whether this unit may retreat and disengage at will. Only the Tech and
    /// the Virus move freely; the AI, the Program and the Firewall can only
    /// advance and are pinned while engaged.
    #[must_use]
    pub const fn moves_freely(self) -> bool {
        matches!(self.kind, UnitKind::Tech | UnitKind::Virus)
    }

    /// Damage this unit deals to the target, capped so the target's health
    /// never drops below zero.
    #[must_use]
    pub fn damage_to(self, target: Self) -> u8 {
        DAMAGE[self.kind as usize][target.kind as usize].min(target.health)
    }

    /// Health this unit restores to an allied target, capped so the target's
    /// health never exceeds [`MAX_HEALTH`]. Zero means the repair is not a
    /// legal action.
    #[must_use]
    pub fn repair_for(self, target: Self) -> u8 {
        REPAIR[self.kind as usize][target.kind as usize].min(MAX_HEALTH - target.health)
    }

    /// Reduces health, saturating at zero. The caller removes dead units.
    pub fn apply_damage(&mut self, amount: u8) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Restores health, saturating at [`MAX_HEALTH`].
    pub fn restore(&mut self, amount: u8) {
        self.health = self.health.saturating_add(amount).min(MAX_HEALTH);
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.player.initial(),
            self.kind.initial(),
            self.health
        )
    }
}

//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental tags used throughout the engine. They are
//! plain data with no behaviour beyond small conversions, so the playfield,
//! the search and any external driver can all agree on them.
//!
//! # Playfield Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - Rows above the field are negative; pieces spawn partly up there.
//!
//! # Examples
//!
//! ```
//! use bitris_types::{Intent, Orientation, ShapeKind, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
//!
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//! assert_eq!(Orientation::North.rotate_cw(), Orientation::East);
//! assert_eq!(Intent::from_str("hardDrop"), Some(Intent::HardDrop));
//!
//! assert_eq!(PLAYFIELD_WIDTH, 10);
//! assert_eq!(PLAYFIELD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Playfield width in cells (10 columns)
pub const PLAYFIELD_WIDTH: u8 = 10;

/// Playfield height in cells (20 rows)
pub const PLAYFIELD_HEIGHT: u8 = 20;

/// Bit pattern of a completely filled row (10 low bits set, 1023)
pub const FULL_ROW_MASK: u16 = (1 << PLAYFIELD_WIDTH) - 1;

/// Default number of upcoming pieces kept in the queue
pub const DEFAULT_QUEUE_LEN: usize = 3;

/// Line clear scoring table, indexed by the number of rows cleared at once.
///
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Weight of one cleared line in the placement heuristic (20 rows x 10 columns)
pub const SEARCH_LINE_WEIGHT: i32 = (PLAYFIELD_HEIGHT as i32) * (PLAYFIELD_WIDTH as i32);

/// A cell position in playfield coordinates: `(column, row)`.
pub type CellPos = (i8, i8);

/// The seven tetromino shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    O,
    I,
    S,
    Z,
    J,
    T,
    L,
}

impl ShapeKind {
    /// Every shape, in table order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::O,
        ShapeKind::I,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::T,
        ShapeKind::L,
    ];

    /// Parse shape from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use bitris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(ShapeKind::O),
            "i" => Some(ShapeKind::I),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "j" => Some(ShapeKind::J),
            "t" => Some(ShapeKind::T),
            "l" => Some(ShapeKind::L),
            _ => None,
        }
    }

    /// Single uppercase letter, as drawn in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::O => "O",
            ShapeKind::I => "I",
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
            ShapeKind::J => "J",
            ShapeKind::T => "T",
            ShapeKind::L => "L",
        }
    }

    /// Position in [`ShapeKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Orientation states, cycling North → East → South → West → North under
/// one clockwise step. Every piece spawns facing North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    North,
    East,
    South,
    West,
}

impl Orientation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use bitris_types::Orientation;
    ///
    /// assert_eq!(Orientation::North.rotate_cw(), Orientation::East);
    /// assert_eq!(Orientation::East.rotate_cw(), Orientation::South);
    /// assert_eq!(Orientation::South.rotate_cw(), Orientation::West);
    /// assert_eq!(Orientation::West.rotate_cw(), Orientation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Orientation::North => Orientation::East,
            Orientation::East => Orientation::South,
            Orientation::South => Orientation::West,
            Orientation::West => Orientation::North,
        }
    }

    /// 0 for North up to 3 for West.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Accepts full names or single letters (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" | "n" => Some(Orientation::North),
            "east" | "e" => Some(Orientation::East),
            "south" | "s" => Some(Orientation::South),
            "west" | "w" => Some(Orientation::West),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::North => "N",
            Orientation::East => "E",
            Orientation::South => "S",
            Orientation::West => "W",
        }
    }
}

/// One-step translation directions. There is no "up".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// Unit `(dcol, drow)` offset.
    pub fn delta(self) -> CellPos {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// Rotation request. Counter-clockwise is accepted but performs nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

/// Discrete player (or autoplayer) intents
///
/// These are the only way an external driver changes the session besides the
/// gravity tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (never locks)
    SoftDown,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Drop piece to its resting row; the next gravity tick locks it
    HardDrop,
    /// Set the active piece aside
    Hold,
}

impl Intent {
    /// Parse intent from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use bitris_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("ROTATE"), Some(Intent::Rotate));
    /// assert_eq!(Intent::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "softdown" => Some(Intent::SoftDown),
            "rotate" => Some(Intent::Rotate),
            "harddrop" => Some(Intent::HardDrop),
            "hold" => Some(Intent::Hold),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDown => "softDown",
            Intent::Rotate => "rotate",
            Intent::HardDrop => "hardDrop",
            Intent::Hold => "hold",
        }
    }
}

/// Session lifecycle. `Ended` is terminal (top-out).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    Running,
    Ended,
}

impl SessionState {
    pub fn is_running(self) -> bool {
        matches!(self, SessionState::Running)
    }
}

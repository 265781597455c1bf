use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Side length of every floor grid. Coordinates run 0..GRID_SIZE on both axes,
/// with y increasing northward.
pub const GRID_SIZE: i32 = 20;

pub const FLOOR_MIN: u8 = 1;
pub const FLOOR_MAX: u8 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < GRID_SIZE && self.y >= 0 && self.y < GRID_SIZE
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four cardinal sides of a cell, shared with at most one neighbor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    N,
    E,
    S,
    W,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::N, Edge::E, Edge::S, Edge::W];

    pub fn opposite(self) -> Edge {
        match self {
            Edge::N => Edge::S,
            Edge::E => Edge::W,
            Edge::S => Edge::N,
            Edge::W => Edge::E,
        }
    }

    /// The coordinate one step across this edge. May leave the grid.
    pub fn step(self, pos: Pos) -> Pos {
        match self {
            Edge::N => Pos { x: pos.x, y: pos.y + 1 },
            Edge::E => Pos { x: pos.x + 1, y: pos.y },
            Edge::S => Pos { x: pos.x, y: pos.y - 1 },
            Edge::W => Pos { x: pos.x - 1, y: pos.y },
        }
    }

    /// Edge relabeling under a 90° clockwise rotation: n→e→s→w→n.
    pub fn rotated_cw(self) -> Edge {
        match self {
            Edge::N => Edge::E,
            Edge::E => Edge::S,
            Edge::S => Edge::W,
            Edge::W => Edge::N,
        }
    }
}

impl FromStr for Edge {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" => Ok(Edge::N),
            "e" => Ok(Edge::E),
            "s" => Ok(Edge::S),
            "w" => Ok(Edge::W),
            _ => Err(ParseTagError { kind: "edge", value: s.to_string() }),
        }
    }
}

/// Compass direction the player faces; independent of position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Facing {
    N,
    E,
    S,
    W,
}

impl Facing {
    pub fn rotated_cw(self) -> Facing {
        match self {
            Facing::N => Facing::E,
            Facing::E => Facing::S,
            Facing::S => Facing::W,
            Facing::W => Facing::N,
        }
    }

    /// The cell edge crossed when moving one step in this direction.
    pub fn as_edge(self) -> Edge {
        match self {
            Facing::N => Edge::N,
            Facing::E => Edge::E,
            Facing::S => Edge::S,
            Facing::W => Edge::W,
        }
    }

    /// Direction of travel between two grid-adjacent coordinates, if any.
    pub fn from_delta(from: Pos, to: Pos) -> Option<Facing> {
        match (to.x - from.x, to.y - from.y) {
            (0, 1) => Some(Facing::N),
            (1, 0) => Some(Facing::E),
            (0, -1) => Some(Facing::S),
            (-1, 0) => Some(Facing::W),
            _ => None,
        }
    }

    /// Clockwise quarter-turns needed to face `to` from `self`, in 0..=3.
    pub fn quarter_turns_cw(self, to: Facing) -> u8 {
        (to as u8).wrapping_sub(self as u8) % 4
    }
}

impl FromStr for Facing {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(Facing::N),
            "E" => Ok(Facing::E),
            "S" => Ok(Facing::S),
            "W" => Ok(Facing::W),
            _ => Err(ParseTagError { kind: "facing", value: s.to_string() }),
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Facing::N => "N",
            Facing::E => "E",
            Facing::S => "S",
            Facing::W => "W",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DoorKind {
    Normal,
    Locked,
    Secret,
    OneWay,
    SecretOneWay,
    Teleporter,
}

impl FromStr for DoorKind {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(DoorKind::Normal),
            "locked" => Ok(DoorKind::Locked),
            "secret" => Ok(DoorKind::Secret),
            "one-way" => Ok(DoorKind::OneWay),
            "secret-one-way" => Ok(DoorKind::SecretOneWay),
            "teleporter" => Ok(DoorKind::Teleporter),
            _ => Err(ParseTagError { kind: "door type", value: s.to_string() }),
        }
    }
}

/// Floor-feature tag; at most one per cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellContent {
    StairsUp,
    StairsDown,
    Teleporter,
    Spinner,
    Pit,
    Chute,
    Elevator,
    Darkness,
    Antimagic,
    Encounter,
    Inaccessible,
    Explored,
}

impl FromStr for CellContent {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stairs-up" => Ok(CellContent::StairsUp),
            "stairs-down" => Ok(CellContent::StairsDown),
            "teleporter" => Ok(CellContent::Teleporter),
            "spinner" => Ok(CellContent::Spinner),
            "pit" => Ok(CellContent::Pit),
            "chute" => Ok(CellContent::Chute),
            "elevator" => Ok(CellContent::Elevator),
            "darkness" => Ok(CellContent::Darkness),
            "antimagic" => Ok(CellContent::Antimagic),
            "encounter" => Ok(CellContent::Encounter),
            "inaccessible" => Ok(CellContent::Inaccessible),
            "explored" => Ok(CellContent::Explored),
            _ => Err(ParseTagError { kind: "content", value: s.to_string() }),
        }
    }
}

/// A string did not name a known tag (edge, facing, door type, content).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseTagError {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} tag: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for ParseTagError {}

/// A grid access named a coordinate or floor that does not exist.
/// Out-of-range is a distinct failure, never a silent clamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridError {
    OutOfRange { x: i32, y: i32 },
    UnknownFloor(u8),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { x, y } => {
                write!(f, "coordinate ({x}, {y}) is outside the {GRID_SIZE}x{GRID_SIZE} grid")
            }
            Self::UnknownFloor(floor) => {
                write!(f, "floor {floor} does not exist (floors run {FLOOR_MIN}..={FLOOR_MAX})")
            }
        }
    }
}

impl std::error::Error for GridError {}

//! JSON document format for a full map, and file-backed load/save.
//!
//! The document is a single JSON object:
//! - `currentFloor`: integer 1–10.
//! - `playerPosition`: `{x, y, facing}` with facing `"N"/"E"/"S"/"W"`.
//! - `floors`: map from floor-number string to `{cells}`, where `cells` maps
//!   `"x,y"` keys to cell objects (walls, optional door/content, note, ids).
//!
//! Import is all-or-nothing: a document either parses and validates in full
//! (typed fields, floor keys in 1..=10, cell coordinates on the grid) or is
//! rejected without touching any state. Floors absent from an accepted
//! document are filled in empty. Saving writes to a temporary file and
//! renames it into place.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::state::{Cell, MapState, PlayerPosition};
use crate::types::{FLOOR_MAX, FLOOR_MIN, Facing, Pos};

// ---------------------------------------------------------------------------
// Wire structs
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
struct MapDocument {
    current_floor: u8,
    player_position: PlayerDocument,
    floors: BTreeMap<String, FloorDocument>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct PlayerDocument {
    x: i32,
    y: i32,
    facing: Facing,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
struct FloorDocument {
    #[serde(default)]
    cells: BTreeMap<String, Cell>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a map document was rejected. Rejection never partially applies.
#[derive(Debug)]
pub enum DocumentError {
    /// Underlying I/O failure while reading a file.
    Io(io::Error),
    /// The text is not valid JSON or lacks the required document shape.
    Json(serde_json::Error),
    /// A `floors` key is not an integer in 1..=10.
    BadFloorKey { key: String },
    /// A `cells` key is not of the form `"x,y"`.
    BadCellKey { floor: u8, key: String },
    /// A parsed cell coordinate lies outside the grid.
    CoordOutOfRange { floor: u8, x: i32, y: i32 },
    /// `currentFloor` is outside 1..=10.
    CurrentFloorOutOfRange { floor: u8 },
    /// `playerPosition` lies outside the grid.
    PlayerOutOfRange { x: i32, y: i32 },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "map file I/O error: {e}"),
            Self::Json(e) => write!(f, "invalid map document: {e}"),
            Self::BadFloorKey { key } => {
                write!(f, "floor key {key:?} is not a floor number in {FLOOR_MIN}..={FLOOR_MAX}")
            }
            Self::BadCellKey { floor, key } => {
                write!(f, "cell key {key:?} on floor {floor} is not an \"x,y\" coordinate")
            }
            Self::CoordOutOfRange { floor, x, y } => {
                write!(f, "cell ({x}, {y}) on floor {floor} is outside the grid")
            }
            Self::CurrentFloorOutOfRange { floor } => {
                write!(f, "currentFloor {floor} is outside {FLOOR_MIN}..={FLOOR_MAX}")
            }
            Self::PlayerOutOfRange { x, y } => {
                write!(f, "playerPosition ({x}, {y}) is outside the grid")
            }
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Export / import
// ---------------------------------------------------------------------------

/// Serialize the full map state as a pretty-printed JSON document.
pub fn export_json(state: &MapState) -> String {
    let mut floors = BTreeMap::new();
    for floor in FLOOR_MIN..=FLOOR_MAX {
        let cells = state
            .floor(floor)
            .expect("all floors exist in a map state")
            .cells
            .iter()
            .map(|(pos, cell)| (format!("{},{}", pos.x, pos.y), cell.clone()))
            .collect();
        floors.insert(floor.to_string(), FloorDocument { cells });
    }
    let doc = MapDocument {
        current_floor: state.current_floor,
        player_position: PlayerDocument {
            x: state.player.pos.x,
            y: state.player.pos.y,
            facing: state.player.facing,
        },
        floors,
    };
    serde_json::to_string_pretty(&doc).expect("map document must serialize")
}

/// Parse and validate a JSON document into a fresh [`MapState`].
pub fn import_json(text: &str) -> Result<MapState, DocumentError> {
    let doc: MapDocument = serde_json::from_str(text).map_err(DocumentError::Json)?;

    if !MapState::is_valid_floor(doc.current_floor) {
        return Err(DocumentError::CurrentFloorOutOfRange { floor: doc.current_floor });
    }
    let player_pos = Pos::new(doc.player_position.x, doc.player_position.y);
    if !player_pos.in_bounds() {
        return Err(DocumentError::PlayerOutOfRange { x: player_pos.x, y: player_pos.y });
    }

    let mut state = MapState::new();
    state.current_floor = doc.current_floor;
    state.player = PlayerPosition { pos: player_pos, facing: doc.player_position.facing };

    for (key, floor_doc) in doc.floors {
        let floor: u8 = key
            .parse()
            .ok()
            .filter(|&f| MapState::is_valid_floor(f))
            .ok_or_else(|| DocumentError::BadFloorKey { key: key.clone() })?;
        for (cell_key, cell) in floor_doc.cells {
            let pos = parse_cell_key(&cell_key)
                .ok_or_else(|| DocumentError::BadCellKey { floor, key: cell_key.clone() })?;
            if !pos.in_bounds() {
                return Err(DocumentError::CoordOutOfRange { floor, x: pos.x, y: pos.y });
            }
            state
                .floor_mut(floor)
                .expect("floor number was validated")
                .cells
                .insert(pos, cell);
        }
    }

    Ok(state)
}

fn parse_cell_key(key: &str) -> Option<Pos> {
    let (x, y) = key.split_once(',')?;
    Some(Pos { x: x.parse().ok()?, y: y.parse().ok()? })
}

// ---------------------------------------------------------------------------
// File-backed load/save
// ---------------------------------------------------------------------------

/// Write the document to `path` via a temporary file and rename, so a crash
/// mid-write never leaves a truncated map behind.
pub fn save_to_file(state: &MapState, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, export_json(state))?;
    fs::rename(&tmp_path, path)
}

pub fn load_from_file(path: &Path) -> Result<MapState, DocumentError> {
    let text = fs::read_to_string(path).map_err(DocumentError::Io)?;
    import_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DoorKind, Edge};
    use tempfile::tempdir;

    fn sample_state() -> MapState {
        let mut state = MapState::new();
        state.set_wall(3, Pos::new(5, 5), Edge::N, true).unwrap();
        state
            .set_door(3, Pos::new(5, 5), Edge::N, Some(DoorKind::SecretOneWay))
            .unwrap();
        state.set_note(3, Pos::new(5, 5), "hidden passage".to_string()).unwrap();
        state
            .set_teleporter_id(3, Pos::new(9, 9), Some("t-1".to_string()))
            .unwrap();
        state.set_current_floor(3).unwrap();
        state.set_player_position(Pos::new(5, 4), Facing::N).unwrap();
        state
    }

    #[test]
    fn export_import_round_trips_exactly() {
        let state = sample_state();
        let json = export_json(&state);
        let back = import_json(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn exported_document_has_the_expected_shape() {
        let json = export_json(&sample_state());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["currentFloor"], 3);
        assert_eq!(value["playerPosition"]["facing"], "N");
        let cell = &value["floors"]["3"]["cells"]["5,5"];
        assert_eq!(cell["walls"]["n"], true);
        assert_eq!(cell["door"]["edge"], "n");
        assert_eq!(cell["door"]["type"], "secret-one-way");
        assert_eq!(cell["note"], "hidden passage");
        // All ten floors are serialized, even empty ones.
        assert_eq!(value["floors"].as_object().unwrap().len(), 10);
    }

    #[test]
    fn missing_required_fields_reject_the_document() {
        assert!(matches!(import_json("{}"), Err(DocumentError::Json(_))));
        assert!(matches!(
            import_json(r#"{"currentFloor": 1, "floors": {}}"#),
            Err(DocumentError::Json(_))
        ));
        assert!(matches!(import_json("not json"), Err(DocumentError::Json(_))));
    }

    #[test]
    fn missing_floors_are_filled_in_empty() {
        let json = r#"{
            "currentFloor": 2,
            "playerPosition": {"x": 1, "y": 1, "facing": "E"},
            "floors": {"2": {"cells": {}}}
        }"#;
        let state = import_json(json).unwrap();
        assert_eq!(state.current_floor, 2);
        for floor in FLOOR_MIN..=FLOOR_MAX {
            assert!(state.floor(floor).unwrap().cells.is_empty());
        }
    }

    #[test]
    fn bad_keys_and_ranges_are_rejected_wholesale() {
        let bad_floor = r#"{
            "currentFloor": 1,
            "playerPosition": {"x": 0, "y": 0, "facing": "N"},
            "floors": {"11": {"cells": {}}}
        }"#;
        assert!(matches!(import_json(bad_floor), Err(DocumentError::BadFloorKey { .. })));

        let bad_cell_key = r#"{
            "currentFloor": 1,
            "playerPosition": {"x": 0, "y": 0, "facing": "N"},
            "floors": {"1": {"cells": {"five,5": {"walls": {}}}}}
        }"#;
        assert!(matches!(import_json(bad_cell_key), Err(DocumentError::BadCellKey { .. })));

        let oob_cell = r#"{
            "currentFloor": 1,
            "playerPosition": {"x": 0, "y": 0, "facing": "N"},
            "floors": {"1": {"cells": {"20,0": {"walls": {}}}}}
        }"#;
        assert!(matches!(
            import_json(oob_cell),
            Err(DocumentError::CoordOutOfRange { floor: 1, x: 20, y: 0 })
        ));

        let oob_player = r#"{
            "currentFloor": 1,
            "playerPosition": {"x": -1, "y": 0, "facing": "N"},
            "floors": {}
        }"#;
        assert!(matches!(
            import_json(oob_player),
            Err(DocumentError::PlayerOutOfRange { x: -1, y: 0 })
        ));
    }

    #[test]
    fn partial_cells_deserialize_with_defaults() {
        let json = r#"{
            "currentFloor": 1,
            "playerPosition": {"x": 0, "y": 0, "facing": "N"},
            "floors": {"1": {"cells": {"2,3": {"walls": {"n": true}}}}}
        }"#;
        let state = import_json(json).unwrap();
        let cell = state.cell(1, Pos::new(2, 3)).unwrap();
        assert!(cell.walls.n && !cell.walls.e);
        assert_eq!(cell.door, None);
        assert_eq!(cell.note, "");
    }

    #[test]
    fn save_and_load_round_trip_through_a_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("maps").join("dungeon.json");
        let state = sample_state();

        save_to_file(&state, &path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let loaded = load_from_file(&path).unwrap();
        assert_eq!(loaded, state);
    }
}

//! `mapper` — command-line driver for the dungeon map core.
//!
//! This binary is the thin outer layer: it loads the map file, invokes one
//! core operation, prints the result, and persists the new state. Saving is
//! best-effort; a save failure is logged and never undoes the in-memory
//! mutation that already succeeded.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use mapper_core::{
    CellContent, DoorKind, Edge, Editor, Facing, Pos, map_file,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the map file (defaults to the per-user data directory)
    #[arg(short, long)]
    map: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a fresh, empty map file
    Init,
    /// Print the current floor, player position, and per-floor cell counts
    Info,
    /// Set or remove a wall edge of a cell
    Wall {
        floor: u8,
        x: i32,
        y: i32,
        /// One of n/e/s/w
        edge: String,
        /// Remove the wall instead of placing it
        #[arg(long)]
        remove: bool,
    },
    /// Place or remove a door on a cell edge
    Door {
        floor: u8,
        x: i32,
        y: i32,
        /// One of n/e/s/w
        edge: String,
        /// normal, locked, secret, one-way, secret-one-way, teleporter
        #[arg(default_value = "normal")]
        kind: String,
        /// Remove the door instead of placing one
        #[arg(long)]
        remove: bool,
    },
    /// Set or clear a cell's content tag
    Content {
        floor: u8,
        x: i32,
        y: i32,
        /// Content tag, e.g. stairs-up or darkness; omit to clear
        kind: Option<String>,
    },
    /// Attach a note to a cell (an empty string clears it)
    Note { floor: u8, x: i32, y: i32, text: String },
    /// Move or turn the player
    Player {
        x: i32,
        y: i32,
        /// One of N/E/S/W
        #[arg(default_value = "N")]
        facing: String,
    },
    /// Shortest route between two cells, as coordinates and instructions
    Route {
        floor: u8,
        from_x: i32,
        from_y: i32,
        to_x: i32,
        to_y: i32,
    },
    /// Flood-mark every cell reachable from a seed as explored
    Explore { floor: u8, x: i32, y: i32 },
    /// Rotate a floor 90° clockwise
    Rotate { floor: u8 },
    /// Wipe one floor
    ClearFloor { floor: u8 },
    /// Print the map document to stdout
    Export,
    /// Replace the map with a document read from a file
    Import { file: PathBuf },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let path = match args.map {
        Some(path) => path,
        None => default_map_path().context("could not determine a per-user map location")?,
    };

    if let Command::Init = args.command {
        let editor = Editor::new();
        map_file::save_to_file(editor.state(), &path)
            .with_context(|| format!("failed to create map at {}", path.display()))?;
        println!("created empty map at {}", path.display());
        return Ok(());
    }

    let state = map_file::load_from_file(&path)
        .with_context(|| format!("failed to load map from {}", path.display()))?;
    let mut editor = Editor::with_state(state);

    match args.command {
        Command::Init => unreachable!("handled above"),
        Command::Info => {
            let state = editor.state();
            println!(
                "floor {} | player at {} facing {}",
                state.current_floor, state.player.pos, state.player.facing
            );
            for floor in mapper_core::FLOOR_MIN..=mapper_core::FLOOR_MAX {
                let count = state.floor(floor)?.cells.len();
                if count > 0 {
                    println!("  floor {floor}: {count} cells");
                }
            }
        }
        Command::Wall { floor, x, y, edge, remove } => {
            let edge: Edge = edge.parse()?;
            editor.set_wall(floor, Pos::new(x, y), edge, !remove)?;
            persist(editor.state(), &path);
        }
        Command::Door { floor, x, y, edge, kind, remove } => {
            let edge: Edge = edge.parse()?;
            let kind = if remove { None } else { Some(kind.parse::<DoorKind>()?) };
            editor.set_door(floor, Pos::new(x, y), edge, kind)?;
            persist(editor.state(), &path);
        }
        Command::Content { floor, x, y, kind } => {
            let content = kind.map(|k| k.parse::<CellContent>()).transpose()?;
            editor.set_content(floor, Pos::new(x, y), content)?;
            persist(editor.state(), &path);
        }
        Command::Note { floor, x, y, text } => {
            editor.set_note(floor, Pos::new(x, y), text)?;
            persist(editor.state(), &path);
        }
        Command::Player { x, y, facing } => {
            let facing: Facing = facing.parse()?;
            editor.set_player_position(Pos::new(x, y), facing)?;
            persist(editor.state(), &path);
        }
        Command::Route { floor, from_x, from_y, to_x, to_y } => {
            let start = Pos::new(from_x, from_y);
            let goal = Pos::new(to_x, to_y);
            match editor.find_path(floor, start, goal)? {
                None => bail!("no route from {start} to {goal} on floor {floor}"),
                Some(path) => {
                    let coords: Vec<String> = path.iter().map(|p| p.to_string()).collect();
                    println!("{}", coords.join(" -> "));
                    let steps = editor.path_to_directions(
                        floor,
                        &path,
                        editor.state().player.facing,
                    )?;
                    let tokens: Vec<String> = steps.iter().map(|s| s.to_string()).collect();
                    println!("{}", tokens.join(", "));
                }
            }
        }
        Command::Explore { floor, x, y } => {
            editor.flood_fill_explored(floor, Pos::new(x, y))?;
            persist(editor.state(), &path);
        }
        Command::Rotate { floor } => {
            editor.rotate_floor_90(floor)?;
            persist(editor.state(), &path);
        }
        Command::ClearFloor { floor } => {
            editor.clear_floor(floor)?;
            persist(editor.state(), &path);
        }
        Command::Export => {
            println!("{}", editor.export_json());
        }
        Command::Import { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            editor
                .import_json(&text)
                .with_context(|| format!("rejected map document {}", file.display()))?;
            persist(editor.state(), &path);
        }
    }

    Ok(())
}

fn default_map_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "DungeonMapper").map(|dirs| dirs.data_dir().join("map.json"))
}

/// Best-effort save-on-mutation: the in-memory change already happened, so a
/// storage failure is reported but not fatal.
fn persist(state: &mapper_core::MapState, path: &Path) {
    if let Err(e) = map_file::save_to_file(state, path) {
        log::error!("failed to save map to {}: {e}", path.display());
    }
}

pub mod editor;
pub mod explore;
pub mod history;
pub mod map_file;
pub mod pathfinding;
pub mod rotate;
pub mod state;
pub mod types;

pub use editor::Editor;
pub use explore::flood_fill_explored;
pub use history::History;
pub use pathfinding::{Instruction, Step, find_path, path_to_directions};
pub use rotate::rotate_floor_90;
pub use state::{Cell, Door, Floor, MapState, PlayerPosition, Walls};
pub use types::*;

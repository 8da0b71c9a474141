//! Frame-driven game simulation
//!
//! All gameplay logic lives here. Nothing in this module renders, reads
//! devices, or touches the platform: hosts feed a `FrameInput` per frame and
//! read positions, colours and flags back out of `GameState`.

pub mod actor;
pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;
pub mod tiles;
pub mod walls;

pub use actor::{Actor, Enemy, Footing, Hero, Stride, Vitality};
pub use autopilot::Autopilot;
pub use collision::{ContactReport, check_contacts, footprints_overlap, resolve_wall_contacts};
pub use state::{ActorId, Camera, CloseReason, GameEvent, GameState};
pub use tick::{FrameInput, tick};
pub use tiles::{Tile, TileGrid, TileShade};
pub use walls::{KeepOutZone, Walls};

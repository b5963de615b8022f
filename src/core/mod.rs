mod animation;
mod consts;
mod controller;
mod events;
mod layout;
mod models;
mod occupancy;

pub use animation::{Animation, Completion, advance_position};
pub use consts::*;
pub use controller::LevelController;
pub use events::{GameEvent, SoundCue};
pub use layout::{ElevatorSpec, LevelLayout, ParseError, parse_level};
pub use models::{Direction, GridLoc, MapObject, ObjectId, ObjectKind, StepOutcome};
pub use occupancy::{GridExtent, Occupancy};

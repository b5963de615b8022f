use crate::core::{ANIMATION_SPEED, GridLoc, ObjectId};
use glam::Vec3;

/// What the rule engine does once a motion reaches its target. Carried as
/// data instead of a captured closure so the dependency chain between
/// transitions stays inspectable.
#[derive(Clone, Debug, PartialEq)]
pub enum Completion {
    /// Cargo riding an elevator; the elevator's own entry settles everyone.
    None,
    /// Pushed object finished its horizontal move.
    Settle { id: ObjectId },
    /// Gopher finished a step; the vacated cell must be re-evaluated
    /// before the gopher itself settles.
    SettleAndRelease { id: ObjectId, vacated: GridLoc },
    /// First mover of a push chain; once it settles, the barrier objects
    /// above the chain drop.
    SettleThenDrop { id: ObjectId, drop: Vec<ObjectId> },
    /// A fall that stayed in the lattice.
    Land {
        id: ObjectId,
        floors: i32,
        play_sound: bool,
    },
    /// A fall that reached floor zero and left the game.
    Ejected { id: ObjectId },
    AscentDone { id: ObjectId },
    DescentDone { id: ObjectId },
}

/// One pending constant-speed linear motion. The logical grid was already
/// mutated when this was queued; only the presentation position moves here.
#[derive(Clone, Debug)]
pub struct Animation {
    pub id: ObjectId,
    pub target: Vec3,
    pub on_complete: Completion,
}

impl Animation {
    pub fn new(id: ObjectId, target: Vec3, on_complete: Completion) -> Animation {
        Animation {
            id,
            target,
            on_complete,
        }
    }
}

/// Moves `pos` toward `target` by one tick's worth of travel. Returns true
/// while still short of the target; snaps exactly onto it otherwise.
pub fn advance_position(pos: &mut Vec3, target: Vec3, time_delta: f32) -> bool {
    let to_target = target - *pos;
    let dist = to_target.length();
    let travel = ANIMATION_SPEED * time_delta;
    if dist > travel {
        *pos += to_target.normalize() * travel;
        true
    } else {
        *pos = target;
        false
    }
}

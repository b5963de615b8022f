use crate::core::ObjectId;

/// Every sound the presentation layer knows how to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Walk,
    Bump,
    GopherFallStart,
    GopherFallEnd,
    GopherHurt,
    BoxPush,
    BoxOnPad,
    BoxOffPad,
    BoxFallStart,
    BoxFallEnd,
    ElevatorUp,
    ElevatorDown,
    LevelDone,
    LevelFail,
    LevelRestart,
}

/// Ordered notifications to the presentation collaborator. The controller
/// appends these as rules resolve; the front-end drains them each tick.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// Play a cue, optionally positioned at an object.
    Sound {
        cue: SoundCue,
        source: Option<ObjectId>,
    },
    /// Stop a looping cue (elevator travel).
    StopSound { cue: SoundCue },
    /// Restart stops everything before replaying.
    StopAllSounds,
    /// A box changed its on-pad visual state.
    BoxPadState { id: ObjectId, on_pad: bool },
    /// Object fell out of the level and left the scene.
    ObjectRemoved { id: ObjectId },
    LevelComplete,
    LevelRestarted,
}

/// Grid cells per second for every queued animation.
pub const ANIMATION_SPEED: f32 = 10.0;

/// Empty floors added above the tallest literal column so objects can be
/// pushed off or thrown above it without leaving the lattice.
pub const FLOOR_HEADROOM: usize = 2;

/// Presentation floor an ejected object animates down to.
pub const EJECT_FALL_FLOOR: f32 = -20.0;

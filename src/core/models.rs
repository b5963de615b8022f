use glam::Vec3;

/// A cell address in the level lattice: `z` is the depth row, `x` the
/// column, `y` the floor. Floors are the only vertical axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridLoc {
    pub z: i32,
    pub x: i32,
    pub y: i32,
}

impl GridLoc {
    pub fn new(z: i32, x: i32, y: i32) -> GridLoc {
        GridLoc { z, x, y }
    }

    /// Continuous presentation position. Identity mapping, no scaling.
    pub fn vec3(&self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    pub fn offset(&self, zd: i32, xd: i32, yd: i32) -> GridLoc {
        GridLoc {
            z: self.z + zd,
            x: self.x + xd,
            y: self.y + yd,
        }
    }

    pub fn above(&self) -> GridLoc {
        self.offset(0, 0, 1)
    }

    pub fn below(&self) -> GridLoc {
        self.offset(0, 0, -1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Horizontal delta as (zd, xd). Floors are never part of a step.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Stable handle into the controller's object table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Gopher,
    Box,
    Block,
    /// Static horizontally, travels between the inclusive floors [low, high].
    Elevator { low: i32, high: i32 },
}

/// One live occupant of the lattice. Pads are not occupants; their
/// locations live in the layout and boxes carry the `on_pad` visual state.
#[derive(Clone, Debug)]
pub struct MapObject {
    pub kind: ObjectKind,
    pub loc: GridLoc,
    /// Where the presentation currently shows this object; the animation
    /// scheduler interpolates it toward the logical location.
    pub pos: Vec3,
    pub on_pad: bool,
}

impl MapObject {
    pub fn new(kind: ObjectKind, loc: GridLoc) -> MapObject {
        MapObject {
            kind,
            loc,
            pos: loc.vec3(),
            on_pad: false,
        }
    }

    pub fn pushable(&self) -> bool {
        matches!(self.kind, ObjectKind::Gopher | ObjectKind::Box)
    }

    pub fn is_gopher(&self) -> bool {
        matches!(self.kind, ObjectKind::Gopher)
    }

    pub fn is_box(&self) -> bool {
        matches!(self.kind, ObjectKind::Box)
    }
}

/// What an interactive step did, reported to the front-end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// Gopher walked into an empty cell.
    Stepped,
    /// Gopher pushed a box (or stack) and walked into the vacated cell.
    Pushed,
    /// Rejected move; nothing changed.
    Bumped,
    /// Input arrived while a move was still resolving or input is locked.
    Ignored,
}

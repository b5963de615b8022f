use crate::core::{GridLoc, ObjectId};

/// Lattice extent with one corner fixed at (0, 0, 0).
#[derive(Clone, Copy, Debug)]
pub struct GridExtent {
    pub nz: i32,
    pub nx: i32,
    pub ny: i32,
}

impl GridExtent {
    pub fn new(nz: i32, nx: i32, ny: i32) -> GridExtent {
        GridExtent { nz, nx, ny }
    }

    pub fn contains(&self, loc: &GridLoc) -> bool {
        loc.z >= 0
            && loc.z < self.nz
            && loc.x >= 0
            && loc.x < self.nx
            && loc.y >= 0
            && loc.y < self.ny
    }

    pub fn volume(&self) -> i32 {
        self.nz * self.nx * self.ny
    }
}

/// The live occupant grid: at most one object per cell. The layout fixes
/// the shape; only the occupancy mutates during play.
pub struct Occupancy {
    extent: GridExtent,
    cells: Vec<Option<ObjectId>>,
}

impl Occupancy {
    pub fn new(extent: GridExtent) -> Occupancy {
        let cells = vec![None; extent.volume() as usize];
        Occupancy { extent, cells }
    }

    pub fn contains(&self, loc: &GridLoc) -> bool {
        self.extent.contains(loc)
    }

    /// Out-of-lattice cells read as empty; the parser's border padding
    /// keeps neighbor probes of real tiles inside the lattice anyway.
    pub fn get(&self, loc: &GridLoc) -> Option<ObjectId> {
        if !self.extent.contains(loc) {
            return None;
        }
        self[loc]
    }

    pub fn set(&mut self, loc: &GridLoc, id: Option<ObjectId>) {
        self[loc] = id;
    }

    /// Clears the cell only if it still holds `id`; a stale location left
    /// behind by an ejected object must not wipe another occupant.
    pub fn clear_if(&mut self, loc: &GridLoc, id: ObjectId) {
        if self.extent.contains(loc) && self[loc] == Some(id) {
            self[loc] = None;
        }
    }
}

impl std::ops::Index<&GridLoc> for Occupancy {
    type Output = Option<ObjectId>;

    fn index(&self, index: &GridLoc) -> &Self::Output {
        let i = (index.z * self.extent.nx + index.x) * self.extent.ny + index.y;
        &self.cells[i as usize]
    }
}

impl std::ops::IndexMut<&GridLoc> for Occupancy {
    fn index_mut(&mut self, index: &GridLoc) -> &mut Self::Output {
        let i = (index.z * self.extent.nx + index.x) * self.extent.ny + index.y;
        &mut self.cells[i as usize]
    }
}

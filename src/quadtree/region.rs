use crate::Coord;
use crate::quadtree::point::Point;

/// One of the four equal subdivisions of a [`Region`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    SW,
    NW,
    SE,
    NE,
}

impl Quadrant {
    /// Every quadrant, in traversal order. Exported documents list children in this order.
    pub const ALL: [Quadrant; 4] = [Quadrant::SW, Quadrant::NW, Quadrant::SE, Quadrant::NE];

    /// Slot of this quadrant in a node's children array
    pub const fn index(self) -> usize {
        match self {
            Quadrant::SW => 0,
            Quadrant::NW => 1,
            Quadrant::SE => 2,
            Quadrant::NE => 3,
        }
    }
}

/// The square `[x_min, x_min + width) x [y_min, y_min + width)` a node is responsible for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x_min: Coord,
    pub y_min: Coord,
    pub width: Coord,
}

impl Region {
    pub const fn new(x_min: Coord, y_min: Coord, width: Coord) -> Self {
        Region {
            x_min,
            y_min,
            width,
        }
    }

    /// A region of width 1 can't be subdivided any further.
    pub const fn is_unit(&self) -> bool {
        self.width == 1
    }

    pub const fn half(&self) -> Coord {
        self.width / 2
    }

    pub fn contains(&self, p: Point) -> bool {
        // widen so that regions touching `Coord::MAX` don't overflow
        let (x, y) = (p.x as i64, p.y as i64);
        let (x_min, y_min, w) = (self.x_min as i64, self.y_min as i64, self.width as i64);

        x_min <= x && x < x_min + w && y_min <= y && y < y_min + w
    }

    /// Selects the quadrant `p` falls in. `p` is assumed to lie inside the region.
    pub fn quadrant_of(&self, p: Point) -> Quadrant {
        let half = self.half();
        let west = p.x < self.x_min + half;
        let south = p.y < self.y_min + half;

        match (west, south) {
            (true, true) => Quadrant::SW,
            (true, false) => Quadrant::NW,
            (false, true) => Quadrant::SE,
            (false, false) => Quadrant::NE,
        }
    }

    /// The sub-region covered by quadrant `q`.
    pub fn child(&self, q: Quadrant) -> Region {
        let half = self.half();

        match q {
            Quadrant::SW => Region::new(self.x_min, self.y_min, half),
            Quadrant::NW => Region::new(self.x_min, self.y_min + half, half),
            Quadrant::SE => Region::new(self.x_min + half, self.y_min, half),
            Quadrant::NE => Region::new(self.x_min + half, self.y_min + half, half),
        }
    }
}

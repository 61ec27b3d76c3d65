use tracing::debug;
use tracing::trace;

pub use crate::quadtree::error::IndexError;
pub use crate::quadtree::node::Node;
pub use crate::quadtree::node::NodeID;
pub use crate::quadtree::point::Point;
pub use crate::quadtree::region::Quadrant;
pub use crate::quadtree::region::Region;

use crate::Coord;

mod error;
mod node;
mod point;
mod region;

/// An MX-QuadTree over the square grid `[0, width) x [0, width)`.
///
/// Every point lives in a leaf of width 1, so the shape of the tree only depends on which cells
/// are occupied, never on the order they were inserted in. Quadrants are only allocated along
/// insertion paths.
#[derive(Debug, Clone)]
pub struct MxQuadTree {
    /// The index of the root of the tree in `nodes`
    root: NodeID,

    /// Side length of the domain. Always a power of two.
    width: Coord,

    /// Number of occupied cells
    occupied: usize,

    nodes: Vec<Node>,
}

impl MxQuadTree {
    /// Create an empty `MxQuadTree` with sidelength `width`, which must be a power of two.
    pub fn new(width: Coord) -> Result<Self, IndexError> {
        if width <= 0 || !(width as u32).is_power_of_two() {
            return Err(IndexError::InvalidDomain { width });
        }

        debug!(width, "creating quadtree");

        Ok(MxQuadTree {
            root: 0,
            width,
            occupied: 0,
            nodes: vec![Node::empty()],
        })
    }

    /// Insert a point at `(x, y)`. Inserting into an occupied cell overwrites it.
    pub fn insert(&mut self, x: Coord, y: Coord) -> Result<(), IndexError> {
        let p = Point::new(x, y);
        let width = self.width;

        if !self.domain().contains(p) {
            return Err(IndexError::OutOfBounds { x, y, width });
        }

        let mut id = self.root;
        let mut region = self.domain();

        while !region.is_unit() {
            if self.nodes[id].is_leaf() {
                trace!(?region, "subdividing");
                self.nodes[id] = Node::Internal([None; 4]);
            }

            let q = region.quadrant_of(p);

            id = match self.nodes[id].child(q) {
                Some(child) => child,
                None => self.attach(id, q),
            };
            region = region.child(q);
        }

        match self.nodes[id].point() {
            Some(old) => trace!(%old, "overwriting cell"),
            None => self.occupied += 1,
        }

        self.nodes[id] = Node::Leaf(Some(p));

        Ok(())
    }

    /// Allocate an empty leaf in quadrant `q` of the internal node `parent`.
    fn attach(&mut self, parent: NodeID, q: Quadrant) -> NodeID {
        let child: NodeID = self.nodes.len();
        self.nodes.push(Node::empty());

        if let Node::Internal(children) = &mut self.nodes[parent] {
            children[q.index()] = Some(child);
        }

        trace!(parent, child, ?q, "allocated quadrant");

        child
    }

    /// Look up the point stored at `(x, y)`, following the same quadrant rule as `insert`.
    pub fn get(&self, x: Coord, y: Coord) -> Option<Point> {
        let p = Point::new(x, y);
        let mut region = self.domain();

        if !region.contains(p) {
            return None;
        }

        let mut id = self.root;

        while !region.is_unit() {
            let q = region.quadrant_of(p);

            id = self.nodes[id].child(q)?;
            region = region.child(q);
        }

        self.nodes[id].point()
    }

    pub fn contains(&self, x: Coord, y: Coord) -> bool {
        self.get(x, y).is_some()
    }

    /// All stored points, in traversal order (SW, NW, SE, NE at every level).
    pub fn points(&self) -> Points<'_> {
        Points {
            tree: self,
            stack: vec![self.root],
        }
    }

    pub fn width(&self) -> Coord {
        self.width
    }

    /// `log2(width)`: the depth every occupied leaf sits at.
    pub fn depth(&self) -> u32 {
        self.width.trailing_zeros()
    }

    /// Longest path from the root to a leaf, counted in edges.
    pub fn height(&self) -> u32 {
        fn go(tree: &MxQuadTree, id: NodeID) -> u32 {
            tree.nodes[id]
                .children()
                .map(|(_, child)| 1 + go(tree, child))
                .max()
                .unwrap_or(0)
        }

        go(self, self.root)
    }

    /// The region covered by the root.
    pub fn domain(&self) -> Region {
        Region::new(0, 0, self.width)
    }

    pub fn root(&self) -> NodeID {
        self.root
    }

    pub fn node(&self, id: NodeID) -> &Node {
        &self.nodes[id]
    }

    pub fn child(&self, id: NodeID, q: Quadrant) -> Option<NodeID> {
        self.nodes[id].child(q)
    }

    /// Number of allocated nodes, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of occupied cells
    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }
}

/// Iterator over the occupied cells of a [`MxQuadTree`]. See [`MxQuadTree::points`].
pub struct Points<'a> {
    tree: &'a MxQuadTree,
    stack: Vec<NodeID>,
}

impl Iterator for Points<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let tree = self.tree;

        while let Some(id) = self.stack.pop() {
            let node = tree.node(id);

            if node.is_leaf() {
                if let Some(p) = node.point() {
                    return Some(p);
                }

                continue;
            }

            // reversed, so that SW is popped first
            let children: Vec<NodeID> = node.children().map(|(_, id)| id).collect();
            self.stack.extend(children.into_iter().rev());
        }

        None
    }
}

#[cfg(test)]
mod test {
    use super::IndexError;
    use super::MxQuadTree;
    use super::Node;
    use super::Point;
    use super::Quadrant;

    fn sample() -> MxQuadTree {
        let mut qt = MxQuadTree::new(16).unwrap();

        for (x, y) in [(3, 4), (10, 10), (12, 14), (5, 8)] {
            qt.insert(x, y).unwrap();
        }

        qt
    }

    #[test]
    fn rejects_invalid_widths() {
        for width in [0, -1, -16, 3, 6, 12, 100] {
            let err = MxQuadTree::new(width).unwrap_err();

            assert_eq!(err, IndexError::InvalidDomain { width });
        }

        for width in [1, 2, 4, 1024, 1 << 30] {
            assert!(MxQuadTree::new(width).is_ok(), "width {width} should be valid");
        }
    }

    #[test]
    fn rejects_out_of_bounds() {
        let mut qt = MxQuadTree::new(8).unwrap();

        for (x, y) in [(-1, 0), (0, -1), (8, 0), (0, 8), (i32::MAX, i32::MIN)] {
            let err = qt.insert(x, y).unwrap_err();

            assert_eq!(err, IndexError::OutOfBounds { x, y, width: 8 });
        }

        // nothing was subdivided
        assert_eq!(qt.node_count(), 1);
        assert_eq!(*qt.node(qt.root()), Node::empty());
    }

    #[test]
    fn unit_width() {
        let mut qt = MxQuadTree::new(1).unwrap();
        qt.insert(0, 0).unwrap();

        assert_eq!(qt.node_count(), 1);
        assert_eq!(*qt.node(qt.root()), Node::Leaf(Some(Point::new(0, 0))));
        assert_eq!(qt.depth(), 0);
    }

    #[test]
    fn width_two_allocates_only_the_path() {
        let mut qt = MxQuadTree::new(2).unwrap();
        qt.insert(0, 0).unwrap();

        let root = qt.root();
        let sw = qt.child(root, Quadrant::SW).unwrap();

        assert_eq!(qt.node_count(), 2);
        assert_eq!(qt.node(sw).point(), Some(Point::new(0, 0)));
        assert_eq!(qt.child(root, Quadrant::NW), None);
        assert_eq!(qt.child(root, Quadrant::SE), None);
        assert_eq!(qt.child(root, Quadrant::NE), None);
    }

    #[test]
    fn lazy_allocation() {
        let mut qt = MxQuadTree::new(16).unwrap();

        // root + one node per level
        qt.insert(3, 4).unwrap();
        assert_eq!(qt.node_count(), 5);

        // shares the SW-NW-SE path with (3, 4), diverges at the last level
        qt.insert(2, 4).unwrap();
        assert_eq!(qt.node_count(), 6);

        // disjoint from the root down
        qt.insert(15, 15).unwrap();
        assert_eq!(qt.node_count(), 10);
    }

    #[test]
    fn overwrite_is_idempotent() {
        let mut qt = sample();
        let nodes = qt.node_count();

        qt.insert(10, 10).unwrap();
        qt.insert(10, 10).unwrap();

        assert_eq!(qt.node_count(), nodes);
        assert_eq!(qt.len(), 4);
        assert_eq!(qt.get(10, 10), Some(Point::new(10, 10)));
    }

    #[test]
    fn lookup() {
        let qt = sample();

        assert!(qt.contains(3, 4));
        assert!(qt.contains(12, 14));
        assert!(!qt.contains(4, 3));
        assert!(!qt.contains(11, 10));
        assert!(!qt.contains(16, 16));
        assert!(!qt.contains(-3, 4));
    }

    #[test]
    fn sample_paths() {
        let qt = sample();
        let root = qt.root();

        // (10, 10) and (12, 14) share the NE quadrant but split at width 4
        let ne = qt.child(root, Quadrant::NE).unwrap();
        assert!(qt.child(ne, Quadrant::SW).is_some());
        assert!(qt.child(ne, Quadrant::NE).is_some());
        assert!(qt.child(ne, Quadrant::NW).is_none());
        assert!(qt.child(ne, Quadrant::SE).is_none());

        assert!(qt.child(root, Quadrant::SE).is_none());
        assert_eq!(qt.height(), qt.depth());
    }

    #[test]
    fn points_in_traversal_order() {
        let qt = sample();
        let points: Vec<(i32, i32)> = qt.points().map(|p| (p.x, p.y)).collect();

        assert_eq!(points, [(3, 4), (5, 8), (10, 10), (12, 14)]);
        assert_eq!(qt.len(), 4);
    }

    #[test]
    fn empty_tree() {
        let qt = MxQuadTree::new(4).unwrap();

        assert!(qt.is_empty());
        assert_eq!(qt.points().count(), 0);
        assert_eq!(qt.height(), 0);
    }
}

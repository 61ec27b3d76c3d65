use std::fmt::Debug;

use crate::quadtree::point::Point;
use crate::quadtree::region::Quadrant;

/// Index of a [`Node`] in the tree's arena.
pub type NodeID = usize;

#[derive(Clone, PartialEq, Eq)]
pub enum Node {
    /// A unit cell, or a node that hasn't been subdivided yet. `None` means unoccupied.
    Leaf(Option<Point>),

    /// A subdivided node. Children are indexed by [`Quadrant::index`] and stay `None` until
    /// something is inserted into that quadrant.
    Internal([Option<NodeID>; 4]),
}

impl Node {
    pub const fn empty() -> Self {
        Node::Leaf(None)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// The point stored in this node, if it is an occupied leaf.
    pub fn point(&self) -> Option<Point> {
        match self {
            Node::Leaf(p) => *p,
            Node::Internal(_) => None,
        }
    }

    pub fn child(&self, q: Quadrant) -> Option<NodeID> {
        match self {
            Node::Leaf(_) => None,
            Node::Internal(children) => children[q.index()],
        }
    }

    /// Present children, in traversal order.
    pub fn children(&self) -> impl Iterator<Item = (Quadrant, NodeID)> + '_ {
        Quadrant::ALL
            .into_iter()
            .filter_map(move |q| self.child(q).map(|id| (q, id)))
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Leaf(Some(p)) => write!(f, "[leaf: {:?}]", p),
            Node::Leaf(None) => write!(f, "[leaf: empty]"),
            Node::Internal(c) => {
                let g = |i: Option<NodeID>| -> isize { i.map_or(-1, |i| i as isize) };

                write!(
                    f,
                    "[sw: {}, nw: {}, se: {}, ne: {}]",
                    g(c[0]),
                    g(c[1]),
                    g(c[2]),
                    g(c[3])
                )
            }
        }
    }
}

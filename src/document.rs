//! Structural export of a [`MxQuadTree`] as a tree of labelled nodes.
//!
//! The traversal only builds the in-memory [`Document`]; turning it into text is the job of
//! [`crate::writer`].

use serde::Serialize;

use crate::quadtree::MxQuadTree;
use crate::quadtree::Node;
use crate::quadtree::NodeID;
use crate::quadtree::Region;

pub const ROOT_LABEL: &str = "Root";
pub const NODE_LABEL: &str = "Node";
pub const EMPTY_LABEL: &str = "Empty";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub name: String,

    /// Present children in SW, NW, SE, NE order. Leaves have none.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Document>,
}

impl Document {
    pub fn leaf(name: impl Into<String>) -> Self {
        Document {
            name: name.into(),
            children: vec![],
        }
    }

    pub fn node(name: impl Into<String>, children: Vec<Document>) -> Self {
        Document {
            name: name.into(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nesting levels below this node. A leaf has depth `0`.
    pub fn depth(&self) -> u32 {
        self.children
            .iter()
            .map(|c| 1 + c.depth())
            .max()
            .unwrap_or(0)
    }

    /// Labels of all leaves, left to right.
    pub fn leaves(&self) -> Vec<&str> {
        if self.is_leaf() {
            return vec![self.name.as_str()];
        }

        self.children.iter().flat_map(|c| c.leaves()).collect()
    }
}

/// Export the whole tree. The result is a `"Root"` node whose single child is the tree's root.
pub fn serialize(tree: &MxQuadTree) -> Document {
    let root = subtree(tree, tree.root(), tree.domain());

    Document::node(ROOT_LABEL, vec![root])
}

/// Export the subtree rooted at `id`, which covers `region`.
pub fn subtree(tree: &MxQuadTree, id: NodeID, region: Region) -> Document {
    let node = tree.node(id);

    match node {
        Node::Leaf(Some(p)) => {
            debug_assert!(region.contains(*p), "{p} stored outside of {region:?}");

            Document::leaf(p.to_string())
        }
        Node::Leaf(None) => Document::leaf(EMPTY_LABEL),
        Node::Internal(_) => {
            let children = node
                .children()
                .map(|(q, child)| subtree(tree, child, region.child(q)))
                .collect();

            Document::node(NODE_LABEL, children)
        }
    }
}

#[cfg(test)]
mod test {
    use super::Document;
    use super::serialize;
    use crate::quadtree::MxQuadTree;

    #[test]
    fn empty_tree() {
        let qt = MxQuadTree::new(8).unwrap();

        let want = Document::node("Root", vec![Document::leaf("Empty")]);

        assert_eq!(serialize(&qt), want);
    }

    #[test]
    fn unit_width() {
        let mut qt = MxQuadTree::new(1).unwrap();
        qt.insert(0, 0).unwrap();

        let want = Document::node("Root", vec![Document::leaf("(0,0)")]);

        assert_eq!(serialize(&qt), want);
    }

    #[test]
    fn absent_quadrants_are_omitted() {
        let mut qt = MxQuadTree::new(2).unwrap();
        qt.insert(0, 0).unwrap();

        let want = Document::node(
            "Root",
            vec![Document::node("Node", vec![Document::leaf("(0,0)")])],
        );

        assert_eq!(serialize(&qt), want);
    }

    #[test]
    fn order_ignores_insertion_order() {
        let mut a = MxQuadTree::new(2).unwrap();
        let mut b = MxQuadTree::new(2).unwrap();

        for (x, y) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            a.insert(x, y).unwrap();
        }

        for (x, y) in [(1, 1), (1, 0), (0, 1), (0, 0)] {
            b.insert(x, y).unwrap();
        }

        let doc = serialize(&a);

        assert_eq!(doc, serialize(&b));
        assert_eq!(doc.leaves(), ["(0,0)", "(0,1)", "(1,0)", "(1,1)"]);
    }

    #[test]
    fn depth_matches_width() {
        let mut qt = MxQuadTree::new(32).unwrap();
        qt.insert(17, 2).unwrap();

        // one extra level for the "Root" wrapper
        assert_eq!(serialize(&qt).depth(), 5 + 1);
    }
}

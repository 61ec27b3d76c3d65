pub mod config;
pub mod document;
pub mod preview;
pub mod quadtree;
pub mod writer;

/// Grid coordinates and domain widths
pub type Coord = i32;

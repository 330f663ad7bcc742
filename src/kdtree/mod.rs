//! A mutable 2D k-d tree over a set of distinct points.
//!
//! Levels alternate their discriminant axis: the root (level 1) and every odd level compare `x`,
//! even levels compare `y`.

#![warn(missing_docs)]

mod builder;
mod index;
mod iter;
mod search;
mod traversal;

pub use builder::KDTreeBuilder;
pub use index::{Axis, KDTree};
pub use iter::RangeIter;
pub use traversal::Node;

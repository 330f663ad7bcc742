#![doc = include_str!("../README.md")]

mod error;
pub mod kdtree;
mod point;
mod rect;
mod r#type;

pub use error::{KDIndexError, Result};
pub use kdtree::{Axis, KDTree, KDTreeBuilder, Node, RangeIter};
pub use point::Point;
pub use r#type::IndexableNum;
pub use rect::Rect;

#[cfg(test)]
pub(crate) mod test;

use std::iter::FusedIterator;

use tinyvec::TinyVec;

use crate::kdtree::index::{Axis, KDNode};
use crate::point::Point;
use crate::r#type::IndexableNum;
use crate::rect::Rect;

/// A lazy iterator over the points of a [`KDTree`][crate::kdtree::KDTree] inside a rectangle.
///
/// Created by [`KDTree::range`][crate::kdtree::KDTree::range] and friends. The iterator borrows
/// the tree, so the tree can't be modified while iterating. Call `range` again for a fresh
/// traversal.
///
/// Points are yielded in pre-order: a node before its left subtree, the left subtree before the
/// right.
#[derive(Debug, Clone)]
pub struct RangeIter<'a, N: IndexableNum> {
    rect: Rect<N>,
    // Pending subtrees. Only `Some` is ever pushed; `Option` satisfies the `Default` bound of
    // the inline storage.
    stack: TinyVec<[Option<&'a KDNode<N>>; 32]>,
}

impl<'a, N: IndexableNum> RangeIter<'a, N> {
    pub(crate) fn new(root: Option<&'a KDNode<N>>, rect: Rect<N>) -> Self {
        let mut stack = TinyVec::new();
        if root.is_some() {
            stack.push(root);
        }
        Self { rect, stack }
    }

    /// The rectangle being searched.
    pub fn rect(&self) -> &Rect<N> {
        &self.rect
    }
}

impl<N: IndexableNum> Iterator for RangeIter<'_, N> {
    type Item = Point<N>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(Some(node)) = self.stack.pop() {
            let point = node.point;
            let (min, max, c) = match node.axis() {
                Axis::X => (self.rect.min_x(), self.rect.max_x(), point.x()),
                Axis::Y => (self.rect.min_y(), self.rect.max_y(), point.y()),
            };

            // Pushed in reverse of the order they get popped
            if max < c {
                // entirely on the left side
                self.stack.extend(node.left.as_deref().map(Some));
            } else if c < min {
                // entirely on the right side
                self.stack.extend(node.right.as_deref().map(Some));
            } else {
                self.stack.extend(node.right.as_deref().map(Some));
                self.stack.extend(node.left.as_deref().map(Some));
            }

            if self.rect.contains(&point) {
                return Some(point);
            }
        }
        None
    }
}

impl<N: IndexableNum> FusedIterator for RangeIter<'_, N> {}

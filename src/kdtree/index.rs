use std::fmt;

use crate::point::Point;
use crate::r#type::IndexableNum;

/// The coordinate compared at a given level of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Compare `x` coordinates.
    X,
    /// Compare `y` coordinates.
    Y,
}

impl Axis {
    /// The discriminant axis of a level, where the root is level 1.
    ///
    /// Odd levels compare `x`, even levels compare `y`.
    #[inline]
    pub fn for_level(level: usize) -> Self {
        if level % 2 == 1 {
            Axis::X
        } else {
            Axis::Y
        }
    }

    /// The axis used by the children of a node split on this axis.
    #[inline]
    pub fn next(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// The coordinate of `point` along this axis.
    #[inline]
    pub fn coord<N: IndexableNum>(self, point: &Point<N>) -> N {
        match self {
            Axis::X => point.x(),
            Axis::Y => point.y(),
        }
    }
}

/// A node of the tree. Each node exclusively owns its subtrees.
pub(crate) struct KDNode<N: IndexableNum> {
    pub(crate) point: Point<N>,
    pub(crate) left: Option<Box<KDNode<N>>>,
    pub(crate) right: Option<Box<KDNode<N>>>,
    /// Depth from the root, which is level 1.
    pub(crate) level: usize,
}

impl<N: IndexableNum> KDNode<N> {
    pub(crate) fn new(point: Point<N>, level: usize) -> Self {
        Self {
            point,
            left: None,
            right: None,
            level,
        }
    }

    #[inline]
    pub(crate) fn axis(&self) -> Axis {
        Axis::for_level(self.level)
    }

    /// Whether `point` belongs in the left subtree of this node.
    ///
    /// The left subtree holds points whose discriminant coordinate is `<=` this node's, the
    /// right subtree those that are strictly greater.
    #[inline]
    pub(crate) fn goes_left(&self, point: &Point<N>) -> bool {
        let axis = self.axis();
        axis.coord(point) <= axis.coord(&self.point)
    }
}

// Only this node, not its subtrees, so formatting never recurses.
impl<N: IndexableNum> fmt::Debug for KDNode<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KDNode")
            .field("point", &self.point)
            .field("level", &self.level)
            .field("has_left", &self.left.is_some())
            .field("has_right", &self.right.is_some())
            .finish()
    }
}

/// A set of distinct 2D points indexed by a k-d tree.
///
/// Points are inserted one at a time and never removed. The tree is not rebalanced, so its
/// height depends on insertion order; use [`KDTreeBuilder`][crate::kdtree::KDTreeBuilder] to
/// bulk load a balanced tree.
///
/// `Clone`, `PartialEq`, `Debug` and `Drop` all walk the tree with an explicit stack, so they
/// work on degenerate trees as deep as they are long.
pub struct KDTree<N: IndexableNum> {
    pub(crate) root: Option<Box<KDNode<N>>>,
    pub(crate) size: usize,
}

impl<N: IndexableNum> KDTree<N> {
    /// Create a new, empty tree.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// The number of distinct points in this tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Alias of [`len`][Self::len].
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the tree holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Insert a point.
    ///
    /// Returns `true` if the point was added, or `false` if an equal point was already stored,
    /// in which case the tree is left unchanged.
    pub fn insert(&mut self, x: N, y: N) -> bool {
        self.insert_point(Point::new(x, y))
    }

    /// Insert a point. See [`insert`][Self::insert].
    pub fn insert_point(&mut self, point: Point<N>) -> bool {
        // Descends along the same path as `contains`, so hitting an equal point here is
        // equivalent to checking membership first.
        let mut slot = &mut self.root;
        let mut level = 1;
        while let Some(node) = slot {
            if node.point == point {
                return false;
            }
            level = node.level + 1;
            slot = if node.goes_left(&point) {
                &mut node.left
            } else {
                &mut node.right
            };
        }

        *slot = Some(Box::new(KDNode::new(point, level)));
        self.size += 1;
        true
    }

    /// Returns `true` if an equal point is stored in the tree.
    pub fn contains(&self, x: N, y: N) -> bool {
        self.contains_point(&Point::new(x, y))
    }

    /// Returns `true` if an equal point is stored in the tree.
    pub fn contains_point(&self, point: &Point<N>) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.point == *point {
                return true;
            }
            current = if node.goes_left(point) {
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };
        }
        false
    }

    /// The number of levels on the longest root-to-leaf path, or 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<&KDNode<N>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            height = height.max(node.level);
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        height
    }
}

impl<N: IndexableNum> Default for KDTree<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: IndexableNum> Extend<Point<N>> for KDTree<N> {
    fn extend<I: IntoIterator<Item = Point<N>>>(&mut self, iter: I) {
        for point in iter {
            self.insert_point(point);
        }
    }
}

impl<N: IndexableNum> FromIterator<Point<N>> for KDTree<N> {
    fn from_iter<I: IntoIterator<Item = Point<N>>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<N: IndexableNum> Clone for KDTree<N> {
    fn clone(&self) -> Self {
        // Post-order rebuild. Children are finished before their parent, left before right.
        let mut work: Vec<(Option<&KDNode<N>>, bool)> = vec![(self.root.as_deref(), false)];
        let mut built: Vec<Option<Box<KDNode<N>>>> = vec![];
        while let Some((pending, children_built)) = work.pop() {
            let Some(node) = pending else {
                built.push(None);
                continue;
            };
            if children_built {
                let right = built.pop().flatten();
                let left = built.pop().flatten();
                built.push(Some(Box::new(KDNode {
                    point: node.point,
                    left,
                    right,
                    level: node.level,
                })));
            } else {
                work.push((Some(node), true));
                work.push((node.right.as_deref(), false));
                work.push((node.left.as_deref(), false));
            }
        }

        Self {
            root: built.pop().flatten(),
            size: self.size,
        }
    }
}

/// Two trees are equal when they hold the same points in the same shape.
impl<N: IndexableNum> PartialEq for KDTree<N> {
    fn eq(&self, other: &Self) -> bool {
        if self.size != other.size {
            return false;
        }
        let mut stack = vec![(self.root.as_deref(), other.root.as_deref())];
        while let Some(pair) = stack.pop() {
            match pair {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    if a.point != b.point || a.level != b.level {
                        return false;
                    }
                    stack.push((a.left.as_deref(), b.left.as_deref()));
                    stack.push((a.right.as_deref(), b.right.as_deref()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<N: IndexableNum> fmt::Debug for KDTree<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KDTree")
            .field("size", &self.size)
            .field("points", &DebugPoints(self))
            .finish()
    }
}

struct DebugPoints<'a, N: IndexableNum>(&'a KDTree<N>);

impl<N: IndexableNum> fmt::Debug for DebugPoints<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Renders the points in pre-order, as a set: `{(0.7, 0.2), (0.5, 0.4)}`.
impl<N: IndexableNum> fmt::Display for KDTree<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, point) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", point)?;
        }
        write!(f, "}}")
    }
}

// Iterative teardown: a degenerate tree is as deep as it is long.
impl<N: IndexableNum> Drop for KDTree<N> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<KDNode<N>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

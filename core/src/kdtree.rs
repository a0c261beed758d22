// k-dimensional point index.
//
// The tree is rebuilt from the backing collection after every mutation, so
// it is always a fresh median split of the current point set. Nodes live in
// an arena and refer to each other (and to their point) by index.

use std::borrow::{Borrow, BorrowMut};

use tracing::{debug, trace};

use crate::error::IndexError;

// A fixed-arity tuple of coordinates.
pub type Point = Vec<f64>;

#[derive(Debug, Clone, Copy)]
struct KdNode {
    // slot in the backing collection
    point: usize,
    axis: usize,
    left: Option<usize>,
    right: Option<usize>,
}

// Result of a nearest-neighbor query.
//
// An empty index yields `point: None` and an infinite distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a> {
    pub point: Option<&'a [f64]>,
    pub distance: f64,
}

impl Neighbor<'_> {
    fn none() -> Self {
        Self {
            point: None,
            distance: f64::INFINITY,
        }
    }
}

// KD-tree over a backing collection of points.
//
// `S` is the backing storage. `PointIndex::new` copies the caller's points
// into an owned `Vec`; `PointIndex::aliasing` works directly on the
// caller's collection, so removals are visible to the caller afterwards.
#[derive(Debug, Clone)]
pub struct PointIndex<S = Vec<Point>> {
    points: S,
    nodes: Vec<KdNode>,
    root: Option<usize>,
    dimensions: usize,
}

impl Default for PointIndex {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            nodes: Vec::new(),
            root: None,
            dimensions: 0,
        }
    }
}

impl PointIndex {
    // Builds an index over a copy of `points`.
    pub fn new(points: &[Point]) -> Result<Self, IndexError> {
        Self::with_storage(points.to_vec())
    }

    // Builds an index that takes ownership of `points`.
    pub fn from_vec(points: Vec<Point>) -> Result<Self, IndexError> {
        Self::with_storage(points)
    }

    // Caller guarantees every point has `dimensions` coordinates.
    pub(crate) fn from_trusted(points: Vec<Point>, dimensions: usize) -> Self {
        let mut index = Self {
            points,
            nodes: Vec::new(),
            root: None,
            dimensions,
        };
        index.rebuild();
        index
    }
}

impl<'a> PointIndex<&'a mut Vec<Point>> {
    // Builds an index that shares the caller's collection instead of copying it.
    pub fn aliasing(points: &'a mut Vec<Point>) -> Result<Self, IndexError> {
        Self::with_storage(points)
    }
}

impl<S: BorrowMut<Vec<Point>>> PointIndex<S> {
    fn with_storage(points: S) -> Result<Self, IndexError> {
        let dimensions = points.borrow().first().map_or(0, Vec::len);
        if !points.borrow().is_empty() && dimensions == 0 {
            return Err(IndexError::EmptyPoint);
        }
        if let Some(bad) = points.borrow().iter().find(|p| p.len() != dimensions) {
            return Err(IndexError::ArityMismatch {
                expected: dimensions,
                got: bad.len(),
            });
        }

        let mut index = Self {
            points,
            nodes: Vec::new(),
            root: None,
            dimensions,
        };
        index.rebuild();
        Ok(index)
    }

    // Arity of the indexed points; 0 until the first point arrives.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.points.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.borrow().is_empty()
    }

    // Backing points in insertion order.
    pub fn points(&self) -> &[Point] {
        self.points.borrow()
    }

    // Iterates the backing points in insertion order (not tree order).
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.borrow().iter()
    }

    // Releases the backing storage.
    pub fn into_inner(self) -> S {
        self.points
    }

    // Appends `point` and rebuilds the tree.
    //
    // The first point of an empty index fixes its arity; afterwards a point
    // of any other arity is rejected and the index is left untouched.
    pub fn insert(&mut self, point: Point) -> Result<(), IndexError> {
        if point.is_empty() {
            return Err(IndexError::EmptyPoint);
        }
        if self.is_empty() {
            self.dimensions = point.len();
        } else if point.len() != self.dimensions {
            return Err(IndexError::ArityMismatch {
                expected: self.dimensions,
                got: point.len(),
            });
        }

        self.points.borrow_mut().push(point);
        self.rebuild();
        Ok(())
    }

    // Removes the indexed point equal to `point`, returning it.
    //
    // Returns `None` when nothing matches, including on an arity mismatch.
    pub fn remove(&mut self, point: &[f64]) -> Option<Point> {
        if point.len() != self.dimensions {
            return None;
        }
        let (slot, dist_sq) = self.nearest_slot(point)?;
        if dist_sq != 0.0 {
            return None;
        }

        let removed = self.points.borrow_mut().remove(slot);
        trace!(slot, "removed point from index");
        self.rebuild();
        Some(removed)
    }

    // True if a point equal to `point` is indexed.
    pub fn has(&self, point: &[f64]) -> bool {
        point.len() == self.dimensions
            && self
                .nearest_slot(point)
                .is_some_and(|(_, dist_sq)| dist_sq == 0.0)
    }

    // Closest indexed point to `point` by Euclidean distance.
    pub fn nearest_neighbor(&self, point: &[f64]) -> Result<Neighbor<'_>, IndexError> {
        if self.is_empty() {
            return Ok(Neighbor::none());
        }
        if point.len() != self.dimensions {
            return Err(IndexError::ArityMismatch {
                expected: self.dimensions,
                got: point.len(),
            });
        }

        Ok(match self.nearest_slot(point) {
            Some((slot, dist_sq)) => Neighbor {
                point: Some(self.points.borrow()[slot].as_slice()),
                distance: dist_sq.sqrt(),
            },
            None => Neighbor::none(),
        })
    }

    // (backing slot, squared distance) of the nearest point
    fn nearest_slot(&self, query: &[f64]) -> Option<(usize, f64)> {
        // NaN compares false against every plane, so nothing is nearest
        if query.iter().any(|v| v.is_nan()) {
            return None;
        }
        let mut best = None;
        if let Some(root) = self.root {
            self.search(root, query, &mut best);
        }
        best
    }

    fn search(&self, id: usize, query: &[f64], best: &mut Option<(usize, f64)>) {
        let node = self.nodes[id];
        let split = &self.points.borrow()[node.point];
        let delta = query[node.axis] - split[node.axis];

        // Descend into the half-space holding the query first
        let (near, far) = if delta <= 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };
        if let Some(near) = near {
            self.search(near, query, best);
        }

        let dist_sq = squared_distance(query, split);
        if best.is_none_or(|(_, b)| dist_sq < b) {
            *best = Some((node.point, dist_sq));
        }

        // The far side can only win if the splitting plane is within reach
        if let Some(far) = far {
            if best.is_none_or(|(_, b)| b >= delta * delta) {
                self.search(far, query, best);
            }
        }
    }

    fn rebuild(&mut self) {
        let points = self.points.borrow();
        let mut slots: Vec<usize> = (0..points.len()).collect();
        let mut nodes = Vec::with_capacity(points.len());
        let root = if self.dimensions == 0 {
            None
        } else {
            build_subtree(points, &mut nodes, &mut slots, 0, self.dimensions)
        };

        debug!(
            points = points.len(),
            dimensions = self.dimensions,
            "rebuilt point index"
        );
        self.nodes = nodes;
        self.root = root;
    }
}

impl<'a, S: BorrowMut<Vec<Point>>> IntoIterator for &'a PointIndex<S> {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Median split on `depth mod dimensions`; returns the subtree root's arena id.
fn build_subtree(
    points: &[Point],
    nodes: &mut Vec<KdNode>,
    slots: &mut [usize],
    depth: usize,
    dimensions: usize,
) -> Option<usize> {
    if slots.is_empty() {
        return None;
    }

    let axis = depth % dimensions;
    // Stable sort keeps equal coordinates in their current order
    slots.sort_by(|&a, &b| points[a][axis].total_cmp(&points[b][axis]));

    let median = slots.len() / 2;
    let (left, rest) = slots.split_at_mut(median);
    let (&mut point, right) = rest.split_first_mut()?;

    let left = build_subtree(points, nodes, left, depth + 1, dimensions);
    let right = build_subtree(points, nodes, right, depth + 1, dimensions);
    nodes.push(KdNode {
        point,
        axis,
        left,
        right,
    });
    Some(nodes.len() - 1)
}

#[inline]
fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

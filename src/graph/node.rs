//! Node and point primitives

/// Stable integer handle identifying a node within its graph
pub type NodeId = u32;

/// Distance reported when two nodes cannot be compared through their points
pub const FALLBACK_DISTANCE: f64 = 1.0;

/// A point with owned coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    coords: Vec<f64>,
}

impl Point {
    pub fn new(coords: Vec<f64>) -> Self {
        Self { coords }
    }

    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// Euclidean distance between two points of equal dimension
    pub fn distance(&self, other: &Point) -> f64 {
        debug_assert_eq!(self.dim(), other.dim());
        self.coords
            .iter()
            .zip(&other.coords)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

/// A node of the graph: a stable identity, an optional coordinate point and a
/// mutable label reused by external clustering and labeling callers.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    point: Option<Point>,
    pub label: i32,
}

impl Node {
    pub(crate) fn new(id: NodeId, label: i32, point: Option<Point>) -> Self {
        Self { id, point, label }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn point(&self) -> Option<&Point> {
        self.point.as_ref()
    }

    pub fn set_point(&mut self, point: Point) {
        self.point = Some(point);
    }

    /// Euclidean distance through the attached points.
    ///
    /// Falls back to the fixed sentinel `1.0` when either point is missing or
    /// the dimensions differ; this is an explicit simplification, not a
    /// metric.
    pub fn distance(&self, other: &Node) -> f64 {
        match (&self.point, &other.point) {
            (Some(a), Some(b)) if a.dim() == b.dim() => a.distance(b),
            _ => FALLBACK_DISTANCE,
        }
    }
}

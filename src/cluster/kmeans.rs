//! k-means baseline used only for clustering quality comparison

use crate::graph::Point;

/// Lloyd's algorithm over a point cloud.
///
/// Initial centers are picked by even spread over the input order, which
/// keeps repeated comparison runs reproducible.
pub struct KMeans {
    k: usize,
    points: Vec<Point>,
    centers: Vec<Point>,
    assignment: Vec<usize>,
}

impl KMeans {
    /// # Panics
    ///
    /// Panics unless `1 <= k <= points.len()`.
    pub fn new(points: Vec<Point>, k: usize) -> Self {
        let n = points.len();
        assert!(k >= 1 && k <= n, "cluster count {k} outside [1, {n}]");

        let centers = (0..k).map(|j| points[j * n / k].clone()).collect();
        Self {
            k,
            points,
            centers,
            assignment: vec![0; n],
        }
    }

    /// Runs Lloyd iterations until the assignment stabilizes or `max_iters`
    /// is reached; returns the number of iterations executed.
    pub fn run(&mut self, max_iters: usize) -> usize {
        for iteration in 0..max_iters {
            if !self.assign_step() {
                log::debug!("k-means converged after {iteration} iterations");
                return iteration;
            }
            self.update_step();
        }
        max_iters
    }

    /// Moves every point to its nearest center; true if anything moved
    fn assign_step(&mut self) -> bool {
        let mut moved = false;
        for (i, point) in self.points.iter().enumerate() {
            let mut nearest = self.assignment[i];
            let mut nearest_distance = point.distance(&self.centers[nearest]);

            for (j, center) in self.centers.iter().enumerate() {
                let distance = point.distance(center);
                if distance < nearest_distance {
                    nearest = j;
                    nearest_distance = distance;
                }
            }

            if nearest != self.assignment[i] {
                self.assignment[i] = nearest;
                moved = true;
            }
        }
        moved
    }

    /// Recomputes every center as the mean of its assigned points; a center
    /// left without points keeps its previous position
    fn update_step(&mut self) {
        for j in 0..self.k {
            let assigned: Vec<&Point> = self
                .points
                .iter()
                .zip(&self.assignment)
                .filter(|(_, &a)| a == j)
                .map(|(p, _)| p)
                .collect();
            let first = match assigned.first() {
                Some(first) => first,
                None => continue,
            };

            let mut center = vec![0.0; first.dim()];
            for point in &assigned {
                for (c, x) in center.iter_mut().zip(point.coords()) {
                    *c += x;
                }
            }
            for c in &mut center {
                *c /= assigned.len() as f64;
            }
            self.centers[j] = Point::new(center);
        }
    }

    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    pub fn centers(&self) -> &[Point] {
        &self.centers
    }

    /// Same normalization as [`super::metrics::intracluster_variance`]:
    /// summed distance to the assigned center divided by the point count
    pub fn intracluster_variance(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .points
            .iter()
            .zip(&self.assignment)
            .map(|(point, &j)| point.distance(&self.centers[j]))
            .sum();
        total / self.points.len() as f64
    }
}

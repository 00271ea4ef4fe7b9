//! Dense distance matrix.

use crate::models::Node;

/// A dense n×n distance matrix stored in row-major order.
///
/// # Examples
///
/// ```
/// use u_vrptw::models::{Node, TimeWindow};
/// use u_vrptw::distance::DistanceMatrix;
///
/// let tw = TimeWindow::new(0.0, 100.0).unwrap();
/// let nodes = vec![
///     Node::depot(0.0, 0.0, tw),
///     Node::new(1, 3.0, 4.0, 10.0, tw, 5.0),
///     Node::new(2, 6.0, 8.0, 20.0, tw, 5.0),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert!((dm.max() - 10.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes the Euclidean matrix from node coordinates.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let size = nodes.len();
        let mut data = vec![0.0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let d = nodes[i].distance_to(&nodes[j]);
                data[i * size + j] = d;
                data[j * size + i] = d;
            }
        }
        Self { data, size }
    }

    /// Creates a matrix from an explicit row-major n×n grid.
    ///
    /// Returns `None` if the length does not match or any entry is negative
    /// or non-finite.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size || data.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return None;
        }
        Some(Self { data, size })
    }

    /// Distance from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Largest entry, `0.0` for matrices with fewer than two locations.
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;

    fn sample_nodes() -> Vec<Node> {
        let tw = TimeWindow::new(0.0, 50.0).expect("valid");
        vec![
            Node::depot(0.0, 0.0, tw),
            Node::new(1, 3.0, 4.0, 10.0, tw, 5.0),
            Node::new(2, 0.0, 8.0, 20.0, tw, 5.0),
        ]
    }

    #[test]
    fn test_from_nodes() {
        let dm = DistanceMatrix::from_nodes(&sample_nodes());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(2, 0) - 8.0).abs() < 1e-10);
        assert_eq!(dm.get(1, 1), 0.0);
    }

    #[test]
    fn test_max_entry() {
        let dm = DistanceMatrix::from_nodes(&sample_nodes());
        assert!((dm.max() - 8.0).abs() < 1e-10);
        assert_eq!(DistanceMatrix::from_nodes(&sample_nodes()[..1]).max(), 0.0);
    }

    #[test]
    fn test_from_data_rejects_bad_grid() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
        assert!(DistanceMatrix::from_data(2, vec![0.0, -1.0, 1.0, 0.0]).is_none());
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 7.0, 0.0]).expect("valid");
        assert_eq!(dm.get(1, 0), 7.0);
    }
}

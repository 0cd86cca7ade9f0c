//! R*-tree nearest-neighbor index over `[lat, lon]` points

use geotab_core::error::{GeotabError, Result};
use rstar::primitives::GeomWithData;
use rstar::RTree;

use crate::metric::{distance, unit_vector};
use crate::models::DistanceMetric;

/// Nearest reference row for one query point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row index in the reference set
    pub row: usize,
    /// Distance under the index metric (coordinate units or meters)
    pub distance: f64,
}

enum Tree {
    /// `[lat, lon]` in the plane
    Planar(RTree<GeomWithData<[f64; 2], usize>>),
    /// Unit-sphere vectors, searched by chord length
    Sphere(RTree<GeomWithData<[f64; 3], usize>>),
}

/// Spatial index over `[lat, lon]` pairs answering single nearest-neighbor queries
pub struct NearestIndex {
    metric: DistanceMetric,
    points: Vec<[f64; 2]>,
    tree: Tree,
}

impl NearestIndex {
    /// Bulk load an R*-tree over the reference points
    ///
    /// Fails with `EmptyReference` when there are no points.
    pub fn build(points: &[[f64; 2]], metric: DistanceMetric) -> Result<Self> {
        if points.is_empty() {
            return Err(GeotabError::EmptyReference);
        }

        let tree = match metric {
            DistanceMetric::Euclidean => Tree::Planar(RTree::bulk_load(
                points.iter().enumerate().map(|(row, p)| GeomWithData::new(*p, row)).collect(),
            )),
            DistanceMetric::Haversine => Tree::Sphere(RTree::bulk_load(
                points
                    .iter()
                    .enumerate()
                    .map(|(row, p)| GeomWithData::new(unit_vector(*p), row))
                    .collect(),
            )),
        };

        tracing::debug!(points = points.len(), %metric, "Built nearest-neighbor index");

        Ok(Self { metric, points: points.to_vec(), tree })
    }

    /// Find the closest reference point to `query` (`[lat, lon]`)
    ///
    /// When several reference points are equally close, which one is returned
    /// depends on the tree layout and is not specified.
    pub fn nearest(&self, query: [f64; 2]) -> Option<Neighbor> {
        let row = match &self.tree {
            Tree::Planar(tree) => tree.nearest_neighbor(&query).map(|n| n.data),
            Tree::Sphere(tree) => tree.nearest_neighbor(&unit_vector(query)).map(|n| n.data),
        }?;

        let distance = distance(self.metric, query, self.points[row]);

        Some(Neighbor { row, distance })
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

use rayon::prelude::*;
use scanmatch_core::Point;
use scanmatch_spatial::SpatialIndex;

/// Below this many points per task the scheduling overhead outweighs the
/// nearest-neighbour work.
const MIN_CHUNK_SIZE: usize = 256;

/// Matched point pairs as two parallel sequences: `source[i]` corresponds to
/// `target[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Correspondences {
    pub source: Vec<Point>,
    pub target: Vec<Point>,
}

impl Correspondences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            source: Vec::with_capacity(n),
            target: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.source.len(), self.target.len());
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn push(&mut self, source: Point, target: Point) {
        self.source.push(source);
        self.target.push(target);
    }

    /// Append all pairs of `other`.
    pub fn extend(&mut self, other: Correspondences) {
        self.source.extend(other.source);
        self.target.extend(other.target);
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&Point, &Point)> + '_ {
        self.source.iter().zip(&self.target)
    }

    pub fn into_parts(self) -> (Vec<Point>, Vec<Point>) {
        (self.source, self.target)
    }
}

/// Find correspondences between `points` and their nearest neighbours in
/// `index`.
///
/// A pair is kept only when the Euclidean distance is strictly below
/// `max_distance`; points without a neighbour, or too far from it, are
/// dropped. The input is split into chunks searched in parallel, each
/// filling its own buffers, and the buffers are concatenated afterwards. The
/// set of pairs does not depend on the thread count, their order may.
pub fn find_correspondences<I: SpatialIndex>(
    index: &I,
    points: &[Point],
    max_distance: f64,
) -> Correspondences {
    if points.is_empty() {
        return Correspondences::new();
    }

    let chunk_size = points
        .len()
        .div_ceil(rayon::current_num_threads())
        .max(MIN_CHUNK_SIZE);

    points
        .par_chunks(chunk_size)
        .map(|chunk| {
            let mut local = Correspondences::with_capacity(chunk.len());
            for point in chunk {
                if let Some(closest) = index.closest_neighbor(point) {
                    if (closest - point).norm() < max_distance {
                        local.push(*point, closest);
                    }
                }
            }
            local
        })
        .reduce(Correspondences::new, |mut acc, local| {
            acc.extend(local);
            acc
        })
}

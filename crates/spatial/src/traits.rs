use scanmatch_core::Point;

/// Storage and nearest-neighbour capability backing a point cloud map.
///
/// Implementations decide how points are organized and whether old points
/// are pruned; callers only rely on the operations below. `Sync` is required
/// because correspondence search queries the index from worker threads.
pub trait SpatialIndex: Send + Sync {
    /// Remove every stored point.
    fn clear(&mut self);

    /// True iff no point is stored.
    fn is_empty(&self) -> bool;

    /// Snapshot of all stored points, in no particular order.
    fn pointcloud(&self) -> Vec<Point>;

    /// Ingest `points`, already expressed in the map frame. `origin` is the
    /// sensor position for this batch; an index may use it to drop points
    /// that are now far away.
    fn add_points(&mut self, points: &[Point], origin: &Point);

    /// The stored point closest to `query`, or `None` when the index has no
    /// candidate for it.
    fn closest_neighbor(&self, query: &Point) -> Option<Point>;
}

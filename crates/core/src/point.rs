use nalgebra::Vector3;

/// A 3-D point in double precision.
pub type Point = Vector3<f64>;

/// Build a [`Point`] from an `[x, y, z]` array.
pub fn point_from_array(p: [f64; 3]) -> Point {
    Point::new(p[0], p[1], p[2])
}

/// Convert a [`Point`] into an `[x, y, z]` array.
pub fn point_to_array(p: &Point) -> [f64; 3] {
    [p.x, p.y, p.z]
}

pub fn is_finite(p: &Point) -> bool {
    p.iter().all(|v| v.is_finite())
}

use crate::{Point, Pose};

/// Apply a pose to every point, returning the transformed copy.
pub fn transform_points(pose: &Pose, points: &[Point]) -> Vec<Point> {
    points.iter().map(|p| pose.apply_to_point(p)).collect()
}

/// Apply a pose to every point in place: `p <- R * p + t`.
pub fn transform_points_in_place(pose: &Pose, points: &mut [Point]) {
    for p in points.iter_mut() {
        *p = pose.apply_to_point(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn line_points() -> Vec<Point> {
        vec![
            Point::new(1.0, 2.0, 3.0),
            Point::new(2.0, 4.0, 6.0),
            Point::new(-1.0, 0.0, 0.5),
        ]
    }

    #[test]
    fn identity_leaves_points_unchanged() {
        let points = line_points();
        let out = transform_points(&Pose::identity(), &points);
        assert_eq!(out, points);
    }

    #[test]
    fn translation_offsets_every_point() {
        let points = line_points();
        let pose = Pose::from_translation(Vector3::new(10.0, 20.0, 30.0));
        let out = transform_points(&pose, &points);

        assert_relative_eq!(out[0], Point::new(11.0, 22.0, 33.0), epsilon = 1e-12);
        assert_relative_eq!(out[1], Point::new(12.0, 24.0, 36.0), epsilon = 1e-12);
        assert_relative_eq!(out[2], Point::new(9.0, 20.0, 30.5), epsilon = 1e-12);
    }

    #[test]
    fn in_place_matches_copying_variant() {
        let pose = Pose::from_axis_angle(
            &Vector3::new(0.3, -0.2, 1.0),
            0.7,
            Vector3::new(0.5, -1.0, 2.0),
        );
        let points = line_points();
        let copied = transform_points(&pose, &points);

        let mut in_place = points.clone();
        transform_points_in_place(&pose, &mut in_place);

        for (a, b) in copied.iter().zip(&in_place) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn empty_slice_is_a_no_op() {
        let mut points: Vec<Point> = Vec::new();
        transform_points_in_place(&Pose::from_translation(Vector3::new(1.0, 0.0, 0.0)), &mut points);
        assert!(points.is_empty());
        assert!(transform_points(&Pose::identity(), &points).is_empty());
    }
}

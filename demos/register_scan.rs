use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scanmatch::{transform_points, Point, PointCloudMap, Pose, VoxelHashMap};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    // RUST_LOG=scanmatch_registration=trace shows every ICP step.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    // A static scene: a ground plane with a few walls.
    let mut rng = StdRng::seed_from_u64(0);
    let mut scene: Vec<Point> = (0..4_000)
        .map(|_| Point::new(rng.gen_range(-15.0..15.0), rng.gen_range(-15.0..15.0), 0.0))
        .collect();
    for wall_x in [-10.0, 4.0, 12.0] {
        scene.extend((0..1_000).map(|_| {
            Point::new(
                wall_x + rng.gen_range(-0.05..0.05),
                rng.gen_range(-15.0..15.0),
                rng.gen_range(0.0..3.0),
            )
        }));
    }
    scene.extend((0..1_500).map(|_| {
        Point::new(rng.gen_range(-15.0..15.0), 9.0, rng.gen_range(0.0..3.0))
    }));
    println!("Scene: {} points", scene.len());

    // The sensor drives forward while turning slightly.
    let step = Pose::from_axis_angle(&Vector3::z(), 0.02, Vector3::new(0.5, 0.0, 0.0));
    let mut truth = Pose::identity();

    let mut map = PointCloudMap::new(VoxelHashMap::default());
    let mut estimate = Pose::identity();
    for frame in 0..8 {
        let scan = transform_points(&truth.inverse(), &scene);
        let guess = if frame == 0 {
            Pose::identity()
        } else {
            estimate * step
        };

        let (pose, summary) = match map.register_point_cloud_with_stats(&scan, &guess, 1.0, 0.2) {
            Ok(result) => result,
            Err(err) => {
                error!(frame, %err, "registration failed");
                return;
            }
        };
        map.add_points_with_pose(&scan, &pose);
        estimate = pose;

        println!(
            "Frame {frame}: iterations {}, converged {}, correspondences {}",
            summary.iterations, summary.converged, summary.correspondences
        );
        println!(
            "  Estimated translation: [{:.4}, {:.4}, {:.4}]",
            pose.translation.x, pose.translation.y, pose.translation.z
        );
        println!(
            "  Translation error: {:.6}, rotation error: {:.6} rad",
            (pose.translation - truth.translation).norm(),
            (pose.inverse() * truth).rotation_angle()
        );

        truth = truth * step;
    }

    println!("Map: {} points", map.pointcloud().len());
}

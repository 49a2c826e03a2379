use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scanmatch::{
    transform_points, KdTreeMap, Point, PointCloudMap, Pose, SpatialIndex, VoxelHashMap,
};

fn random_cloud(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Point::new(
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-2.0..2.0),
            )
        })
        .collect()
}

fn populated<I: SpatialIndex>(index: I, cloud: &[Point]) -> PointCloudMap<I> {
    let mut map = PointCloudMap::new(index);
    map.add_points(cloud, &Point::zeros());
    map
}

fn bench_correspondences(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_correspondences");

    for size in [1_000, 10_000, 50_000] {
        let cloud = random_cloud(size, 42);
        let scan = random_cloud(size, 43);

        let voxel = populated(VoxelHashMap::default(), &cloud);
        group.bench_with_input(BenchmarkId::new("voxel", size), &size, |b, _| {
            b.iter(|| voxel.get_correspondences(&scan, 1.0))
        });

        let kdtree = populated(KdTreeMap::new(), &cloud);
        group.bench_with_input(BenchmarkId::new("kdtree", size), &size, |b, _| {
            b.iter(|| kdtree.get_correspondences(&scan, 1.0))
        });
    }
    group.finish();
}

fn bench_register(c: &mut Criterion) {
    let mut group = c.benchmark_group("register_point_cloud");
    group.sample_size(20);

    // Small motion of the kind seen between consecutive scans.
    let motion = Pose::from_axis_angle(&Vector3::z(), 0.01, Vector3::new(0.2, 0.05, 0.0));

    for size in [1_000, 10_000] {
        let cloud = random_cloud(size, 7);
        let scan = transform_points(&motion.inverse(), &cloud);

        let voxel = populated(VoxelHashMap::default(), &cloud);
        group.bench_with_input(BenchmarkId::new("voxel", size), &size, |b, _| {
            b.iter(|| voxel.register_point_cloud(&scan, &Pose::identity(), 1.0, 0.3))
        });

        let kdtree = populated(KdTreeMap::new(), &cloud);
        group.bench_with_input(BenchmarkId::new("kdtree", size), &size, |b, _| {
            b.iter(|| kdtree.register_point_cloud(&scan, &Pose::identity(), 1.0, 0.3))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_correspondences, bench_register);
criterion_main!(benches);

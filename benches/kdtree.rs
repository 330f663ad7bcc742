use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kd_pointset::{KDTree, KDTreeBuilder, Point, Rect};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstar::{RTree, AABB};

const NUM_POINTS: usize = 100_000;

fn load_data() -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..NUM_POINTS)
        .map(|_| [rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)])
        .collect()
}

fn construct_kdtree(points: &[[f64; 2]]) -> KDTree<f64> {
    let mut tree = KDTree::new();
    for [x, y] in points {
        tree.insert(*x, *y);
    }
    tree
}

fn construct_kdtree_bulk(points: &[[f64; 2]]) -> KDTree<f64> {
    let mut builder = KDTreeBuilder::with_capacity(points.len());
    for [x, y] in points {
        builder.add(*x, *y);
    }
    builder.finish()
}

fn construct_rstar(points: Vec<[f64; 2]>) -> RTree<[f64; 2]> {
    RTree::bulk_load(points)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let points = load_data();

    c.bench_function("construction (kdtree insert)", |b| {
        b.iter(|| construct_kdtree(&points))
    });

    c.bench_function("construction (kdtree bulk)", |b| {
        b.iter(|| construct_kdtree_bulk(&points))
    });

    c.bench_function("construction (rstar bulk)", |b| {
        b.iter(|| construct_rstar(points.to_vec()))
    });

    let kdtree = construct_kdtree(&points);
    let rstar_tree = construct_rstar(points.to_vec());
    let (min_x, min_y, max_x, max_y) = (0.4, 0.4, 0.45, 0.45);
    let rect = Rect::new(min_x, min_y, max_x, max_y).unwrap();

    c.bench_function("range (kdtree)", |b| {
        b.iter(|| kdtree.range_rect(&rect).count())
    });

    c.bench_function("range (rstar)", |b| {
        b.iter(|| {
            let aabb = AABB::from_corners([min_x, min_y], [max_x, max_y]);
            rstar_tree.locate_in_envelope(&aabb).count()
        })
    });

    let query = Point::new(0.123, 0.456);

    c.bench_function("nearest (kdtree)", |b| {
        b.iter(|| kdtree.nearest_point(black_box(&query)))
    });

    c.bench_function("nearest (rstar)", |b| {
        b.iter(|| rstar_tree.nearest_neighbor(black_box(&[query.x(), query.y()])))
    });

    c.bench_function("neighbors k=10 (kdtree)", |b| {
        b.iter(|| kdtree.neighbors(query.x(), query.y(), Some(10), None))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
